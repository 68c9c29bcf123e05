//! Defines the data structures exchanged with the Discord application commands API.
//!
//! Includes:
//! - `CommandRecord`: a registered slash command, with unknown fields passed through untouched.
//! - `Scope`: whether a command is registered globally or for a single guild.
//! - `ListOutcome`: the tagged result of a list request.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Placeholder displayed for commands without a description.
pub const NO_DESCRIPTION: &str = "Aucune";

/// A registered application command as returned by the API.
///
/// Only `id` and `name` are typed. Every other field (`description`, `options`, `version`, ...)
/// lives in `fields` so that saving a record writes back exactly what the API sent.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CommandRecord {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl CommandRecord {
    /// Returns the command description, treating a missing, null or empty value as absent.
    pub fn description(&self) -> Option<&str> {
        self.fields
            .get("description")
            .and_then(Value::as_str)
            .filter(|d| !d.is_empty())
    }
}

/// Where a command is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Available in every guild the application is installed in.
    Global,
    /// Registered for one specific guild.
    Guild,
}

impl Scope {
    /// Name of the JSON file a retrieved list of this scope is saved to.
    pub fn file_name(self) -> &'static str {
        match self {
            Scope::Global => "commands_globales.json",
            Scope::Guild => "commands_serveur.json",
        }
    }

    /// Adjective used in console messages ("commandes globales", "commandes de serveur").
    pub fn label(self) -> &'static str {
        match self {
            Scope::Global => "globales",
            Scope::Guild => "de serveur",
        }
    }

    /// Singular form of [`Scope::label`] ("aucune commande globale").
    pub fn singular_label(self) -> &'static str {
        match self {
            Scope::Global => "globale",
            Scope::Guild => "de serveur",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Global => write!(f, "global"),
            Scope::Guild => write!(f, "guild"),
        }
    }
}

/// Result of listing the commands of one scope.
///
/// A failed request and an empty registration both leave the workflow with nothing to delete,
/// but they are reported differently to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum ListOutcome {
    Fetched(Vec<CommandRecord>),
    Failed(String),
}

impl ListOutcome {
    /// The fetched commands, or an empty slice when the request failed.
    pub fn commands(&self) -> &[CommandRecord] {
        match self {
            ListOutcome::Fetched(commands) => commands,
            ListOutcome::Failed(_) => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ListOutcome::Failed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_keeps_unknown_fields() {
        let raw = json!({
            "id": "42",
            "name": "ping",
            "description": "Pong!",
            "type": 1,
            "options": [{"name": "target", "type": 6}],
            "default_member_permissions": null
        });

        let record: CommandRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(record.id, "42");
        assert_eq!(record.name, "ping");
        assert_eq!(record.description(), Some("Pong!"));
        assert_eq!(serde_json::to_value(&record).unwrap(), raw);
    }

    #[test]
    fn test_description_absent_or_empty() {
        let missing: CommandRecord =
            serde_json::from_value(json!({"id": "1", "name": "a"})).unwrap();
        let empty: CommandRecord =
            serde_json::from_value(json!({"id": "2", "name": "b", "description": ""})).unwrap();
        let null: CommandRecord =
            serde_json::from_value(json!({"id": "3", "name": "c", "description": null})).unwrap();

        assert_eq!(missing.description(), None);
        assert_eq!(empty.description(), None);
        assert_eq!(null.description(), None);
    }

    #[test]
    fn test_scope_file_names() {
        assert_eq!(Scope::Global.file_name(), "commands_globales.json");
        assert_eq!(Scope::Guild.file_name(), "commands_serveur.json");
    }

    #[test]
    fn test_scope_labels() {
        assert_eq!(Scope::Global.label(), "globales");
        assert_eq!(Scope::Global.singular_label(), "globale");
        assert_eq!(Scope::Guild.singular_label(), "de serveur");
    }

    #[test]
    fn test_failed_outcome_has_no_commands() {
        let failed = ListOutcome::Failed("HTTP 401".to_string());
        assert!(failed.commands().is_empty());
        assert!(failed.is_failed());
        assert!(!ListOutcome::Fetched(Vec::new()).is_failed());
    }
}
