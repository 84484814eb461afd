use journal_core::storage::NewMoodEntry;

use crate::app::AppContext;
use crate::cli::{MoodAddArgs, MoodCommands, MoodListArgs};
use crate::output::{moods_json, print_mood_list};

pub fn handle_mood(ctx: &AppContext, command: &MoodCommands) -> anyhow::Result<()> {
    match command {
        MoodCommands::Add(args) => handle_mood_add(ctx, args),
        MoodCommands::List(args) => handle_mood_list(ctx, args),
    }
}

fn handle_mood_add(ctx: &AppContext, args: &MoodAddArgs) -> anyhow::Result<()> {
    let journal = ctx.open_journal()?;
    let user_id = ctx.user_id()?;

    let mut mood = NewMoodEntry::new(user_id, args.label.as_str(), args.intensity);
    if let Some(note) = &args.note {
        mood = mood.with_note(note.as_str());
    }
    let recorded = journal.record_mood(&mood)?;

    if !ctx.quiet() {
        println!(
            "Recorded mood {} ({}/10)",
            recorded.mood, recorded.intensity
        );
    }
    Ok(())
}

fn handle_mood_list(ctx: &AppContext, args: &MoodListArgs) -> anyhow::Result<()> {
    let journal = ctx.open_journal()?;
    let user_id = ctx.user_id()?;
    let moods = journal.list_moods(&user_id, args.limit)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&moods_json(&moods))?);
    } else {
        print_mood_list(&moods, ctx.quiet());
    }
    Ok(())
}
