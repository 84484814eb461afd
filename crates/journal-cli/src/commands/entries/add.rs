use journal_core::codec::StructuredContent;
use journal_core::storage::{EntryDraft, EntryKind};

use crate::app::AppContext;
use crate::cli::AddArgs;
use crate::helpers::{parse_datetime, parse_entry_kind, parse_field, read_entry_body};

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let journal = ctx.open_journal()?;
    let user_id = ctx.user_id()?;

    let kind = match args.kind.as_deref() {
        Some(value) => parse_entry_kind(value)?,
        None => EntryKind::default(),
    };

    let structured = args.title.is_some() || args.summary.is_some() || !args.fields.is_empty();
    let mut draft = if structured {
        let mut content = StructuredContent::new();
        if let Some(title) = &args.title {
            content = content.with_title(title.as_str());
        }
        if let Some(body) = &args.body {
            content = content.with_content(body.as_str());
        }
        if let Some(summary) = &args.summary {
            content = content.with_summary(summary.as_str());
        }
        for field in &args.fields {
            let (key, value) = parse_field(field)?;
            content = content.with_field(key, value);
        }
        content.ensure_kind(kind);
        EntryDraft::structured(args.prompt.as_str(), content, kind)
    } else {
        let body = read_entry_body(args.no_input, args.body.clone(), None)?;
        EntryDraft::text(args.prompt.as_str(), body, kind)
    };
    if let Some(value) = &args.date {
        draft = draft.with_created_at(parse_datetime(value)?);
    }

    let saved = journal.save_entry(&user_id, &draft)?;
    tracing::info!(entry_id = %saved.id, kind = %saved.kind, "entry added");

    if !ctx.quiet() {
        println!("Added entry {}", saved.id);
    }
    Ok(())
}
