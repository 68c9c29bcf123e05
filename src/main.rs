mod api;
mod cli;
mod error;
mod models;
mod store;

use api::DiscordClient;
use clap::Parser;
use cli::{Cli, Config, TerminalConsole, Workflow};
use colored::*;
use error::AppError;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Only --help and --version; everything else is asked interactively
    let _cli = Cli::parse();

    // Initialize logging on stderr so it does not interleave with the prompts
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Discord command manager...");

    println!("{}", "🤖 Discord Command Manager - v1.0".cyan().bold());
    println!(
        "{}",
        "Ce script permet de récupérer et supprimer les commandes slash de votre bot Discord."
            .magenta()
    );

    let mut console = TerminalConsole::new();

    let config = match Config::collect(&mut console) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to collect configuration: {:?}", e);
            println!("{}", startup_failure_message(&e).red());
            return ExitCode::FAILURE;
        },
    };

    let client = match DiscordClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build HTTP client: {:?}", e);
            println!("{} {}", "❌ Erreur générale:".red(), e.to_string().red());
            return ExitCode::FAILURE;
        },
    };

    let mut workflow = Workflow::new(config, client, console);
    if let Err(e) = workflow.run().await {
        error!("Workflow aborted: {:?}", e);
        println!("{} {}", "❌ Erreur générale:".red(), e.to_string().red());
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Message printed when configuration collection fails. Only missing credentials count as an
/// incomplete configuration; console failures are general errors.
fn startup_failure_message(e: &AppError) -> String {
    match e {
        AppError::Config(reason) => format!(
            "❌ {}\n❌ Configuration incomplète. Le script va se terminer.",
            reason
        ),
        other => format!("❌ Erreur générale: {}", other),
    }
}
