//! The interactive menu workflow, modelled as an explicit state machine.
//!
//! Each call to [`Workflow::step`] consumes one state, reads whatever console input that state
//! needs, performs the matching API or file operation, and returns the next state.
//! [`Workflow::run`] loops from `MainMenu` until `Exit`.

use crate::api::CommandApi;
use crate::cli::config::Config;
use crate::cli::console::{show_commands, Console, Tone};
use crate::error::Result;
use crate::models::{CommandRecord, ListOutcome, Scope};
use crate::store::CommandStore;
use tracing::{debug, error, info};

/// Command lists fetched by the retrieve flow and handed over to the delete flow.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Prefetched {
    pub global: Vec<CommandRecord>,
    pub guild: Vec<CommandRecord>,
}

impl Prefetched {
    fn take(&mut self, scope: Scope) -> Vec<CommandRecord> {
        match scope {
            Scope::Global => std::mem::take(&mut self.global),
            Scope::Guild => std::mem::take(&mut self.guild),
        }
    }
}

/// A position in the menu flow.
#[derive(Debug, Clone, PartialEq)]
pub enum State {
    MainMenu,
    Retrieve,
    /// Scope choice of the delete flow. Lists handed over by `Retrieve` are reused instead of
    /// being fetched again.
    DeleteScope {
        prefetched: Option<Prefetched>,
    },
    AllOrOne {
        scope: Scope,
        commands: Vec<CommandRecord>,
    },
    ConfirmAll {
        scope: Scope,
        commands: Vec<CommandRecord>,
    },
    PickOne {
        scope: Scope,
        commands: Vec<CommandRecord>,
    },
    ConfirmOne {
        scope: Scope,
        command: CommandRecord,
    },
    Exit,
}

/// Drives the menus. Owns the configuration for the whole session.
pub struct Workflow<A, C> {
    config: Config,
    api: A,
    store: CommandStore,
    console: C,
}

impl<A: CommandApi, C: Console> Workflow<A, C> {
    pub fn new(config: Config, api: A, console: C) -> Self {
        let store = CommandStore::new(&config);
        Self {
            config,
            api,
            store,
            console,
        }
    }

    /// Runs the menus until the user quits.
    ///
    /// # Errors
    ///
    /// Only console failures escape; API and file errors are reported and the flow goes on.
    pub async fn run(&mut self) -> Result<()> {
        let mut state = State::MainMenu;
        while state != State::Exit {
            state = self.step(state).await?;
        }
        info!("Workflow finished");
        Ok(())
    }

    /// Executes one state and returns the next one.
    pub async fn step(&mut self, state: State) -> Result<State> {
        debug!("Entering state {:?}", state);
        match state {
            State::MainMenu => self.main_menu(),
            State::Retrieve => self.retrieve().await,
            State::DeleteScope { prefetched } => self.delete_scope(prefetched).await,
            State::AllOrOne { scope, commands } => self.all_or_one(scope, commands),
            State::ConfirmAll { scope, commands } => self.confirm_all(scope, commands).await,
            State::PickOne { scope, commands } => self.pick_one(scope, commands),
            State::ConfirmOne { scope, command } => self.confirm_one(scope, command).await,
            State::Exit => Ok(State::Exit),
        }
    }

    fn main_menu(&mut self) -> Result<State> {
        self.console
            .emit(Tone::Heading, "=== GESTIONNAIRE DE COMMANDES DISCORD ===");
        self.console.emit(Tone::Info, "1. Récupérer les commandes");
        self.console.emit(Tone::Info, "2. Supprimer des commandes");
        self.console.emit(Tone::Info, "3. Quitter");

        let choice = self.console.ask("Choisissez une option (1-3)")?;
        match choice.trim() {
            "1" => Ok(State::Retrieve),
            "2" => Ok(State::DeleteScope { prefetched: None }),
            "3" => {
                self.console.emit(Tone::Success, "Au revoir!");
                Ok(State::Exit)
            },
            _ => {
                self.console
                    .emit(Tone::Error, "Option non reconnue. Veuillez réessayer.");
                Ok(State::MainMenu)
            },
        }
    }

    async fn retrieve(&mut self) -> Result<State> {
        self.console
            .emit(Tone::Heading, "=== RÉCUPÉRATION DES COMMANDES ===");

        let global = self.fetch_and_save(Scope::Global).await?;
        let guild = if self.config.has_guild() {
            self.fetch_and_save(Scope::Guild).await?
        } else {
            self.console.emit(
                Tone::Warning,
                "Aucun ID de serveur spécifié, les commandes de serveur ne seront pas récupérées.",
            );
            Vec::new()
        };

        self.console
            .emit(Tone::Success, "Récupération des commandes terminée.");

        if global.is_empty() && guild.is_empty() {
            return Ok(State::MainMenu);
        }
        if self
            .console
            .confirm("Voulez-vous également supprimer des commandes maintenant?")?
        {
            Ok(State::DeleteScope {
                prefetched: Some(Prefetched { global, guild }),
            })
        } else {
            Ok(State::MainMenu)
        }
    }

    async fn delete_scope(&mut self, prefetched: Option<Prefetched>) -> Result<State> {
        self.console
            .emit(Tone::Heading, "=== SUPPRESSION DES COMMANDES ===");
        self.console
            .emit(Tone::Info, "1. Supprimer des commandes globales");
        self.console
            .emit(Tone::Info, "2. Supprimer des commandes de serveur");
        self.console.emit(Tone::Info, "3. Retour au menu principal");

        let choice = self.console.ask("Choisissez une option (1-3)")?;
        let scope = match choice.trim() {
            "1" => Scope::Global,
            "2" => {
                if !self.config.has_guild() {
                    self.console.emit(
                        Tone::Error,
                        "Aucun ID de serveur spécifié dans la configuration.",
                    );
                    return Ok(State::MainMenu);
                }
                Scope::Guild
            },
            "3" => return Ok(State::MainMenu),
            _ => {
                self.console
                    .emit(Tone::Error, "Option non reconnue. Veuillez réessayer.");
                return Ok(State::MainMenu);
            },
        };

        let commands = match prefetched {
            Some(mut lists) => lists.take(scope),
            None => {
                let outcome = self.fetch(scope).await?;
                if outcome.is_failed() {
                    return Ok(State::MainMenu);
                }
                outcome.commands().to_vec()
            },
        };

        if show_commands(&mut self.console, &commands, scope) {
            Ok(State::AllOrOne { scope, commands })
        } else {
            Ok(State::MainMenu)
        }
    }

    fn all_or_one(&mut self, scope: Scope, commands: Vec<CommandRecord>) -> Result<State> {
        let choice = self.console.ask(&format!(
            "Voulez-vous supprimer toutes les commandes {} ou seulement une commande spécifique? (T = toutes / S = spécifique)",
            scope.label()
        ))?;

        match choice.trim().to_lowercase().as_str() {
            "t" => Ok(State::ConfirmAll { scope, commands }),
            "s" => Ok(State::PickOne { scope, commands }),
            _ => {
                self.console
                    .emit(Tone::Error, "Option non reconnue. Suppression annulée.");
                Ok(State::MainMenu)
            },
        }
    }

    async fn confirm_all(&mut self, scope: Scope, commands: Vec<CommandRecord>) -> Result<State> {
        let confirmed = self.console.confirm(&format!(
            "ATTENTION: Voulez-vous vraiment supprimer TOUTES les commandes {}?",
            scope.label()
        ))?;
        if !confirmed {
            self.console.emit(
                Tone::Warning,
                &format!("Suppression des commandes {} annulée.", scope.label()),
            );
            return Ok(State::MainMenu);
        }

        self.console.emit(
            Tone::Info,
            &format!("Suppression de toutes les commandes {}...", scope.label()),
        );

        // One request at a time; a failed delete does not stop the others.
        let mut deleted = 0;
        for command in &commands {
            if self.delete(scope, command).await? {
                deleted += 1;
            }
        }

        let failed = commands.len() - deleted;
        info!(
            "Bulk delete of {} commands finished: {} deleted, {} failed",
            scope, deleted, failed
        );
        self.console.emit(
            Tone::Success,
            &format!(
                "Suppression de toutes les commandes {} terminée ({}/{} supprimées).",
                scope.label(),
                deleted,
                commands.len()
            ),
        );
        if failed > 0 {
            self.console.emit(
                Tone::Warning,
                &format!("{} suppression(s) ont échoué.", failed),
            );
        }
        Ok(State::MainMenu)
    }

    fn pick_one(&mut self, scope: Scope, commands: Vec<CommandRecord>) -> Result<State> {
        let answer = self
            .console
            .ask("Entrez l'ID de la commande à supprimer")?;
        let command_id = answer.trim();

        match commands.into_iter().find(|c| c.id == command_id) {
            Some(command) => Ok(State::ConfirmOne { scope, command }),
            None => {
                self.console.emit(
                    Tone::Error,
                    &format!("Aucune commande trouvée avec l'ID {}.", command_id),
                );
                Ok(State::MainMenu)
            },
        }
    }

    async fn confirm_one(&mut self, scope: Scope, command: CommandRecord) -> Result<State> {
        let confirmed = self.console.confirm(&format!(
            "Voulez-vous vraiment supprimer la commande \"{}\"?",
            command.name
        ))?;
        if !confirmed {
            self.console.emit(Tone::Warning, "Suppression annulée.");
            return Ok(State::MainMenu);
        }

        self.console.emit(Tone::Info, "Suppression de la commande...");
        self.delete(scope, &command).await?;
        Ok(State::MainMenu)
    }

    /// Lists the commands of `scope`, reporting a failed request as an error.
    async fn fetch(&mut self, scope: Scope) -> Result<ListOutcome> {
        self.console.begin_activity(&format!(
            "Récupération des commandes {}...",
            scope.label()
        ))?;
        let outcome = self.api.list_commands(scope).await;
        self.console.end_activity();

        if let ListOutcome::Failed(reason) = &outcome {
            self.console.emit(
                Tone::Error,
                &format!(
                    "Erreur lors de la récupération des commandes {}: {}",
                    scope.label(),
                    reason
                ),
            );
        }
        Ok(outcome)
    }

    /// Lists, saves and displays the commands of `scope`. Nothing is written for an empty
    /// or failed list.
    async fn fetch_and_save(&mut self, scope: Scope) -> Result<Vec<CommandRecord>> {
        match scope {
            Scope::Global => self
                .console
                .emit(Tone::Info, "Récupération des commandes globales..."),
            Scope::Guild => self.console.emit(
                Tone::Info,
                &format!(
                    "Récupération des commandes spécifiques au serveur {}...",
                    self.config.guild_id.as_deref().unwrap_or_default()
                ),
            ),
        }

        let outcome = self.fetch(scope).await?;
        if outcome.is_failed() {
            return Ok(Vec::new());
        }

        let commands = outcome.commands();
        if !commands.is_empty() {
            match self.store.save(commands, scope).await {
                Ok(path) => self.console.emit(
                    Tone::Success,
                    &format!("Données sauvegardées dans {}", path.display()),
                ),
                Err(e) => {
                    error!("Failed to save {} commands: {:?}", scope, e);
                    self.console.emit(
                        Tone::Error,
                        &format!(
                            "Impossible de sauvegarder {}: {}",
                            self.store.path_for(scope).display(),
                            e
                        ),
                    );
                },
            }
        }
        show_commands(&mut self.console, commands, scope);
        Ok(commands.to_vec())
    }

    /// Deletes one command and reports the outcome.
    async fn delete(&mut self, scope: Scope, command: &CommandRecord) -> Result<bool> {
        self.console.begin_activity(&format!(
            "Suppression de \"{}\" (ID: {})...",
            command.name, command.id
        ))?;
        let deleted = self
            .api
            .delete_command(scope, &command.id, &command.name)
            .await;
        self.console.end_activity();

        if deleted {
            self.console.emit(
                Tone::Success,
                &format!(
                    "Commande \"{}\" (ID: {}) supprimée avec succès.",
                    command.name, command.id
                ),
            );
        } else {
            self.console.emit(
                Tone::Error,
                &format!(
                    "Échec de la suppression de la commande \"{}\" (ID: {}).",
                    command.name, command.id
                ),
            );
        }
        Ok(deleted)
    }
}
