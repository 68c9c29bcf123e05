//! Console input and output for the interactive workflow.
//!
//! The `Console` trait keeps terminal concerns (colours, prompts, spinners) out of the
//! workflow so the state machine can be driven by scripted input in tests.
//! `TerminalConsole` is the real implementation built on `dialoguer`, `colored` and `indicatif`.
//! When stdin or stderr is not a terminal (piped input), it reads plain lines instead.

use crate::error::Result;
use crate::models::{CommandRecord, Scope, NO_DESCRIPTION};
use colored::*;
use dialoguer::{theme::ColorfulTheme, Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, IsTerminal, Write};
use std::time::Duration;

/// The only answer accepted by a confirmation prompt ("oui").
pub const AFFIRMATIVE: &str = "o";

/// Category of a console message. Only affects how the message is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
    Warning,
    Info,
    Heading,
}

/// Returns true only for the affirmative token, case-insensitively. Anything else, including
/// an empty answer, is a refusal.
pub fn is_affirmative(answer: &str) -> bool {
    answer.eq_ignore_ascii_case(AFFIRMATIVE)
}

/// Bidirectional console used by the configuration collector and the workflow.
pub trait Console {
    /// Reads one line of free text.
    fn ask(&mut self, prompt: &str) -> Result<String>;

    /// Reads a secret without echoing it where the console supports that.
    fn ask_secret(&mut self, prompt: &str) -> Result<String> {
        self.ask(prompt)
    }

    /// Prints a categorised message.
    fn emit(&mut self, tone: Tone, message: &str);

    /// Asks a yes/no question where only the affirmative token counts as yes.
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = self.ask(&format!("{} (o/N)", prompt))?;
        Ok(is_affirmative(&answer))
    }

    /// Signals that a long-running operation (a network call) has started.
    fn begin_activity(&mut self, _message: &str) -> Result<()> {
        Ok(())
    }

    /// Signals that the operation started by `begin_activity` is over.
    fn end_activity(&mut self) {}
}

/// Displays a list of commands of the given scope.
///
/// Returns whether the list was non-empty, which callers use to decide whether deletion
/// can continue.
pub fn show_commands(console: &mut impl Console, commands: &[CommandRecord], scope: Scope) -> bool {
    if commands.is_empty() {
        console.emit(
            Tone::Warning,
            &format!("Aucune commande {} trouvée.", scope.singular_label()),
        );
        return false;
    }

    console.emit(
        Tone::Info,
        &format!(
            "Commandes {} trouvées ({}):",
            scope.label(),
            commands.len()
        ),
    );
    for command in commands {
        console.emit(
            Tone::Info,
            &format!(
                "   ID: {} - Nom: {} - Description: {}",
                command.id,
                command.name,
                command.description().unwrap_or(NO_DESCRIPTION)
            ),
        );
    }
    true
}

/// Console backed by the real terminal.
pub struct TerminalConsole {
    theme: ColorfulTheme,
    spinner: Option<ProgressBar>,
    /// dialoguer prompts need a terminal on both stdin and stderr.
    interactive: bool,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            spinner: None,
            interactive: io::stdin().is_terminal() && io::stderr().is_terminal(),
        }
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        if !self.interactive {
            return read_answer(&mut io::stdin().lock(), &mut io::stdout(), prompt);
        }
        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }

    fn ask_secret(&mut self, prompt: &str) -> Result<String> {
        if !self.interactive {
            return read_answer(&mut io::stdin().lock(), &mut io::stdout(), prompt);
        }
        let answer = Password::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()?;
        Ok(answer)
    }

    fn emit(&mut self, tone: Tone, message: &str) {
        // Keep the spinner line from swallowing the message.
        if let Some(spinner) = &self.spinner {
            spinner.suspend(|| print_styled(tone, message));
        } else {
            print_styled(tone, message);
        }
    }

    fn begin_activity(&mut self, message: &str) -> Result<()> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}")?);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
        Ok(())
    }

    fn end_activity(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

/// Reads one answer from a plain line stream.
///
/// Fails with `UnexpectedEof` once the input is closed.
fn read_answer(reader: &mut impl BufRead, writer: &mut impl Write, prompt: &str) -> Result<String> {
    write!(writer, "{}: ", prompt)?;
    writer.flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "console input closed").into());
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn print_styled(tone: Tone, message: &str) {
    match tone {
        Tone::Success => println!("{}", format!("✅ {}", message).green()),
        Tone::Error => println!("{}", format!("❌ {}", message).red()),
        Tone::Warning => println!("{}", format!("⚠️ {}", message).yellow()),
        Tone::Info => println!("{}", message.cyan()),
        Tone::Heading => println!("\n{}", message.cyan().bold()),
    }
}
