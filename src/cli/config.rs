//! Interactive collection of the run configuration.
//!
//! Nothing is read from the environment or from files: every run asks for the application id,
//! the bot token, an optional guild id and an optional output directory.

use crate::cli::console::{Console, Tone};
use crate::error::{AppError, Result};
use std::fmt;
use std::path::PathBuf;
use tracing::{error, info};

/// Output directory used when the user keeps the default or leaves the override blank.
pub const DEFAULT_OUTPUT_DIR: &str = "./discord_commands";

/// Configuration of one run. Built once by [`Config::collect`] and never modified afterwards.
#[derive(Clone)]
pub struct Config {
    pub application_id: String,
    pub bot_token: String,
    /// Guild whose commands are managed alongside the global ones, if any.
    pub guild_id: Option<String>,
    pub output_dir: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("application_id", &self.application_id)
            .field("bot_token", &"<redacted>")
            .field("guild_id", &self.guild_id)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

impl Config {
    /// Prompts the user for every configuration value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the application id or the bot token is left empty,
    /// and propagates console errors.
    pub fn collect(console: &mut impl Console) -> Result<Self> {
        console.emit(Tone::Heading, "=== CONFIGURATION ===");
        console.emit(
            Tone::Warning,
            "Veuillez saisir les informations nécessaires pour le fonctionnement du script.",
        );

        let application_id = console.ask("ID de l'application Discord")?.trim().to_string();
        if application_id.is_empty() {
            error!("Configuration aborted: empty application id");
            return Err(AppError::Config(
                "L'ID de l'application est obligatoire.".to_string(),
            ));
        }

        let bot_token = console.ask_secret("Token du bot Discord")?.trim().to_string();
        if bot_token.is_empty() {
            error!("Configuration aborted: empty bot token");
            return Err(AppError::Config(
                "Le token du bot est obligatoire.".to_string(),
            ));
        }

        let mut guild_id = None;
        if console.confirm("Voulez-vous également gérer les commandes spécifiques à un serveur?")? {
            let id = console.ask("ID du serveur Discord")?.trim().to_string();
            if !id.is_empty() {
                guild_id = Some(id);
            }
        }

        let mut output_dir = PathBuf::from(DEFAULT_OUTPUT_DIR);
        if console.confirm(&format!(
            "Voulez-vous modifier le dossier de sortie? (Actuellement: {})",
            DEFAULT_OUTPUT_DIR
        ))? {
            let dir = console.ask("Nouveau dossier de sortie")?.trim().to_string();
            if !dir.is_empty() {
                output_dir = PathBuf::from(dir);
            }
        }

        let config = Self {
            application_id,
            bot_token,
            guild_id,
            output_dir,
        };
        info!("Configuration collected: {:?}", config);
        console.emit(Tone::Success, "Configuration terminée!");
        Ok(config)
    }

    /// Whether guild-scoped operations can be attempted.
    pub fn has_guild(&self) -> bool {
        self.guild_id.as_deref().is_some_and(|id| !id.is_empty())
    }
}
