use journal_core::codec::StructuredContent;
use journal_core::storage::{EntryBody, EntryUpdate};

use crate::app::AppContext;
use crate::cli::EditArgs;
use crate::helpers::{parse_entry_id, parse_entry_kind, read_entry_body};

use super::not_found_or;

/// Replace an entry's content.
///
/// With `--title` or `--summary` the existing record is patched and rewritten
/// (plain text becomes its `content`); otherwise the new body replaces the
/// text outright.
pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let id = parse_entry_id(&args.id)?;
    let journal = ctx.open_journal()?;
    let user_id = ctx.user_id()?;
    let kind = args.kind.as_deref().map(parse_entry_kind).transpose()?;

    let existing = journal.require_entry(&user_id, &id).map_err(not_found_or)?;

    let body = if args.title.is_some() || args.summary.is_some() {
        // Plain-text entries keep their prose as the record's content.
        let mut content = match &existing.structured {
            Some(structured) => structured.clone(),
            None if existing.text.trim().is_empty() => StructuredContent::new(),
            None => StructuredContent::new().with_content(existing.text.as_str()),
        };
        if let Some(title) = &args.title {
            content = content.with_title(title.as_str());
        }
        if let Some(summary) = &args.summary {
            content = content.with_summary(summary.as_str());
        }
        if let Some(body) = &args.body {
            content = content.with_content(body.as_str());
        }
        if let Some(kind) = kind {
            content = content.with_kind(kind);
        }
        EntryBody::Structured(content)
    } else {
        let text = read_entry_body(args.no_input, args.body.clone(), Some(&existing.text))?;
        EntryBody::Text(text)
    };

    let mut update = EntryUpdate::new(body);
    if let Some(prompt) = &args.prompt {
        update = update.with_prompt(prompt.as_str());
    }
    if let Some(kind) = kind {
        update = update.with_kind(kind);
    }

    let updated = journal
        .update_entry(&user_id, &id, &update)
        .map_err(not_found_or)?;

    if !ctx.quiet() {
        println!("Edited entry {}", updated.id);
    }
    Ok(())
}
