use crate::app::AppContext;
use crate::cli::DeleteArgs;
use crate::helpers::parse_entry_id;

use super::not_found_or;

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let id = parse_entry_id(&args.id)?;
    let journal = ctx.open_journal()?;
    let user_id = ctx.user_id()?;

    journal.delete_entry(&user_id, &id).map_err(not_found_or)?;
    tracing::info!(entry_id = %id, "entry deleted");

    if !ctx.quiet() {
        println!("Deleted entry {}", id);
    }
    Ok(())
}
