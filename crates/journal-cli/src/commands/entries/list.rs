use chrono::Utc;

use journal_core::storage::EntryFilter;

use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::helpers::{parse_datetime, parse_duration, parse_entry_kind, parse_output_format};
use crate::output::{entries_json, print_entry_list};

const DEFAULT_LIST_LIMIT: usize = 20;

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let format = parse_output_format(args.format.as_deref())?;
    if args.json && format.is_some() {
        return Err(anyhow::anyhow!("--format cannot be used with --json"));
    }
    let kind = args.kind.as_deref().map(parse_entry_kind).transpose()?;

    let journal = ctx.open_journal()?;
    let user_id = ctx.user_id()?;

    let mut filter = EntryFilter::new();
    if let Some(ref l) = args.last {
        let window = parse_duration(l)?;
        filter = filter.since(Utc::now() - window);
    }
    if let Some(ref s) = args.since {
        filter = filter.since(parse_datetime(s)?);
    }
    if let Some(ref u) = args.until {
        filter = filter.until(parse_datetime(u)?);
    }
    if let Some(lim) = args.limit {
        filter = filter.limit(lim);
    } else if args.last.is_none() && args.since.is_none() && args.until.is_none() {
        filter = filter.limit(DEFAULT_LIST_LIMIT);
    }

    let entries = journal.fetch_entries(&user_id, &filter, kind)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries_json(&entries))?);
    } else {
        print_entry_list(&entries, format, ctx.quiet());
    }
    Ok(())
}
