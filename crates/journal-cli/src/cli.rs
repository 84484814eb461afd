use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use journal_core::VERSION;

/// Journal - an encrypted personal-growth journal for the command line
#[derive(Parser)]
#[command(name = "journal")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the journal database
    #[arg(long, global = true, env = "JOURNAL_DB")]
    pub db: Option<String>,

    /// User id that owns (and encrypts) the entries
    #[arg(short, long, global = true, env = "JOURNAL_USER")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the journal database will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Key namespace for content encryption
    #[arg(long)]
    pub namespace: Option<String>,

    /// Profile cache TTL seconds
    #[arg(long)]
    pub profile_ttl_seconds: Option<u64>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Question or prompt the entry answers
    #[arg(long, default_value = "")]
    pub prompt: String,

    /// Entry title (stores a structured record)
    #[arg(long)]
    pub title: Option<String>,

    /// Entry body (overrides stdin/editor)
    #[arg(long)]
    pub body: Option<String>,

    /// Short summary (stores a structured record)
    #[arg(long)]
    pub summary: Option<String>,

    /// Extra record field as KEY=VALUE (stores a structured record)
    #[arg(long = "field", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,

    /// Entry type (journal, story, sideQuest, action)
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,

    /// Set custom date/time (ISO-8601)
    #[arg(long)]
    pub date: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Entry ID (full UUID)
    #[arg(value_name = "ID")]
    pub id: String,

    /// New entry body (overrides stdin/editor)
    #[arg(long)]
    pub body: Option<String>,

    /// New title (stores a structured record)
    #[arg(long)]
    pub title: Option<String>,

    /// New summary (stores a structured record)
    #[arg(long)]
    pub summary: Option<String>,

    /// Replace the prompt
    #[arg(long)]
    pub prompt: Option<String>,

    /// Change the entry type
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Filter by entry type
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,

    /// Time window (e.g., "7d", "30d")
    #[arg(long)]
    pub last: Option<String>,

    /// Start date (ISO-8601)
    #[arg(long)]
    pub since: Option<String>,

    /// End date (ISO-8601)
    #[arg(long)]
    pub until: Option<String>,

    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Entry ID (full UUID)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Entry ID (full UUID)
    #[arg(value_name = "ID")]
    pub id: String,
}

#[derive(Subcommand)]
pub enum MoodCommands {
    /// Record how you feel
    Add(MoodAddArgs),

    /// List recorded moods
    List(MoodListArgs),
}

/// Arguments for `mood add`
#[derive(Args)]
pub struct MoodAddArgs {
    /// Mood label (e.g., calm, anxious)
    #[arg(value_name = "LABEL")]
    pub label: String,

    /// Strength of the mood, 1-10
    #[arg(short, long)]
    pub intensity: u8,

    /// Optional note (stored encrypted)
    #[arg(long)]
    pub note: Option<String>,
}

/// Arguments for `mood list`
#[derive(Args)]
pub struct MoodListArgs {
    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show profile and subscription state
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark onboarding as completed
    Onboarded,

    /// Set the display name (omit to clear it)
    Name {
        #[arg(value_name = "NAME")]
        name: Option<String>,
    },
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a config file and an empty journal
    Init(InitArgs),

    /// Add a new entry to the journal
    Add(AddArgs),

    /// Replace an entry's content
    Edit(EditArgs),

    /// List entries, newest first
    List(ListArgs),

    /// Show a specific entry by ID
    Show(ShowArgs),

    /// Delete an entry
    Delete(DeleteArgs),

    /// Record and list moods
    #[command(subcommand)]
    Mood(MoodCommands),

    /// Profile and onboarding state
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Print the display preview of text read from stdin
    Preview,

    /// Check journal integrity
    Check,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
