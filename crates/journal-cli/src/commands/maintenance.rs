use crate::app::AppContext;

pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    match store.check_integrity() {
        Ok(()) => {
            if !ctx.quiet() {
                println!("Integrity check: OK");
                println!("- format version: {}", store.format_version()?);
            }
        }
        Err(err) => {
            eprintln!("Integrity check: FAILED");
            eprintln!("- error: {}", err);
            eprintln!("Hint: Restore the database file from a backup before retrying.");
            return Err(anyhow::anyhow!("Integrity check failed"));
        }
    }
    Ok(())
}
