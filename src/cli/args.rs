use clap::Parser;

/// Interactive manager for the slash commands of a Discord bot.
///
/// Retrieves global and guild commands, saves them as JSON files and deletes them after
/// confirmation. Credentials are asked for interactively on every run.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {}
