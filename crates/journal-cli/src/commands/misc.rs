use clap::CommandFactory;
use clap_complete::generate;
use journal_core::codec;

use crate::cli::Cli;
use crate::helpers::read_stdin;

pub fn handle_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "journal", &mut std::io::stdout());
    Ok(())
}

/// Print the display preview of stored-style text from stdin.
pub fn handle_preview() -> anyhow::Result<()> {
    let input = read_stdin()?;
    println!("{}", codec::preview(input.trim_end()));
    Ok(())
}
