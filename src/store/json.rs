//! Saves retrieved command lists as pretty-printed JSON files.
//!
//! Each scope has a fixed filename under the configured output directory. Files are
//! overwritten on every retrieval, without atomic rename.

use crate::cli::Config;
use crate::error::Result;
use crate::models::{CommandRecord, Scope};
use std::path::PathBuf;
use tracing::{debug, info};

/// Writes command lists under one output directory.
pub struct CommandStore {
    output_dir: PathBuf,
}

impl CommandStore {
    /// Creates a store writing into the output directory of `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
        }
    }

    /// Path of the file holding the commands of `scope`.
    pub fn path_for(&self, scope: Scope) -> PathBuf {
        self.output_dir.join(scope.file_name())
    }

    /// Saves `commands` to the file of `scope`, creating the output directory if needed.
    ///
    /// The JSON is indented with two spaces and contains every record exactly as received.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the directory or the file cannot be written, and
    /// `AppError::JsonParse` if serialization fails.
    pub async fn save(&self, commands: &[CommandRecord], scope: Scope) -> Result<PathBuf> {
        if !tokio::fs::try_exists(&self.output_dir).await? {
            debug!("Creating output directory {}", self.output_dir.display());
            tokio::fs::create_dir_all(&self.output_dir).await?;
        }

        let path = self.path_for(scope);
        let contents = serde_json::to_string_pretty(commands)?;
        tokio::fs::write(&path, contents).await?;

        info!(
            "Saved {} {} commands to {}",
            commands.len(),
            scope,
            path.display()
        );
        Ok(path)
    }
}
