//! Shell context, dispatch, and error reporting.

use std::io;

use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;

use crate::{
    controller::LedgerController,
    errors::LedgerError,
    summary::Summary,
};

use super::commands;
use super::output;
use super::registry::{CommandEntry, CommandRegistry};
use super::ui::ledger_view;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Failures that end the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Failures of a single command. The shell reports them and keeps going.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub running: bool,
    pub last_command: Option<String>,
    controller: LedgerController,
    registry: CommandRegistry,
    currency_symbol: String,
}

impl ShellContext {
    pub fn new(mode: CliMode, controller: LedgerController, currency_symbol: String) -> Self {
        let mut registry = CommandRegistry::new();
        for entry in commands::all_definitions() {
            registry.register(entry);
        }
        Self {
            mode,
            running: true,
            last_command: None,
            controller,
            registry,
            currency_symbol,
        }
    }

    pub fn controller(&self) -> &LedgerController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut LedgerController {
        &mut self.controller
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn commands(&self) -> Vec<&CommandEntry> {
        self.registry.list()
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        if self.controller.form().has_pending_item() {
            "budget (draft)> ".to_string()
        } else {
            "budget> ".to_string()
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.handler(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::hint(format!("Did you mean `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        super::io::confirm_action(prompt, false)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Core(err @ LedgerError::Validation(_)) => {
                output::error(err);
                output::hint("Fix the field with `name`, `price` or `qty`, then run `add`.");
            }
            CommandError::Core(err @ LedgerError::ItemNotFound(_)) => {
                output::error(err);
                output::hint("Run `show` to see the current item ids.");
            }
            other => output::error(other),
        }
    }

    /// Redraws the whole item table and the summary fields.
    pub fn redraw(&self) {
        let state = self.controller.state();
        output::section("Items");
        output::block(ledger_view::render_items(state, &self.currency_symbol));
        output::section("Summary");
        let summary = Summary::project(state);
        output::block(ledger_view::render_summary(&summary, &self.currency_symbol));
        if summary.is_over_budget() && state.budget > 0.0 {
            output::warning("Spending is over budget.");
        }
    }

    pub fn show_form(&self) {
        output::section("Form");
        output::block(ledger_view::render_form(self.controller.form()));
    }
}
