use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::helpers::parse_entry_id;
use crate::output::{entry_json, print_entry};

use super::not_found_or;

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let id = parse_entry_id(&args.id)?;
    let journal = ctx.open_journal()?;
    let user_id = ctx.user_id()?;

    let entry = journal.require_entry(&user_id, &id).map_err(not_found_or)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&entry_json(&entry))?);
    } else {
        print_entry(&entry, ctx.quiet());
    }
    Ok(())
}
