mod add;
mod delete;
mod edit;
mod list;
mod show;

pub use add::handle_add;
pub use delete::handle_delete;
pub use edit::handle_edit;
pub use list::handle_list;
pub use show::handle_show;

use journal_core::JournalError;

use crate::app::exit_not_found_with_hint;

/// Map a missing entry to the not-found exit; pass other errors through.
fn not_found_or(err: JournalError) -> anyhow::Error {
    match err {
        JournalError::EntryNotFound(_) => exit_not_found_with_hint(
            "Entry not found",
            "Hint: Run `journal list --last 7d` to find entry IDs.",
        ),
        other => other.into(),
    }
}
