use std::{
    borrow::Cow,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;

use crate::{
    config::{Config, ConfigManager},
    controller::LedgerController,
    storage::JsonFileStore,
};

use super::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use super::output::{self, set_preferences, OutputPreferences};

/// Opens the configured store and runs the shell until `exit` or end of input.
pub fn run_cli(mode: CliMode) -> Result<(), CliError> {
    let manager = ConfigManager::new()?;
    let config = manager.load().unwrap_or_else(|err| {
        output::warning(format!("{err}; using default settings"));
        Config::default()
    });

    set_preferences(OutputPreferences {
        plain_mode: config.plain_output || mode == CliMode::Script,
    });

    let store = JsonFileStore::new(manager.storage_path(&config))?;
    tracing::debug!(path = %store.path().display(), "opening ledger store");
    let controller = LedgerController::open(Box::new(store));
    for warning in controller.load_warnings() {
        output::warning(warning);
    }

    let mut context = ShellContext::new(mode, controller, config.currency_symbol);
    if mode == CliMode::Interactive {
        output::info("Budget tracker. Type `help` for commands.");
    }
    context.redraw();

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new(context.command_names())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                if let LoopControl::Exit = handle_line(context, trimmed) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                output::info("Press Ctrl-D or type `exit` to leave.");
            }
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if !context.running {
            break;
        }
        let line = line?;
        if let LoopControl::Exit = handle_line(context, &line) {
            break;
        }
    }
    Ok(())
}

/// Tokenizes and dispatches one line. Command failures are reported here so
/// the loop never stops on them.
fn handle_line(context: &mut ShellContext, line: &str) -> LoopControl {
    if line.trim_start().starts_with('#') {
        return LoopControl::Continue;
    }
    let tokens = match split(&escape_word_hashes(line)) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(format!("Could not parse input: {err}"));
            return LoopControl::Continue;
        }
    };

    let Some(raw) = tokens.first() else {
        return LoopControl::Continue;
    };
    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

    context.last_command = Some(line.trim().to_string());

    match context.dispatch(&command, raw, &args) {
        Ok(LoopControl::Exit) => {
            context.running = false;
            LoopControl::Exit
        }
        Ok(LoopControl::Continue) => LoopControl::Continue,
        Err(err) => {
            report(context, err);
            LoopControl::Continue
        }
    }
}

/// `shell_words` reads an unquoted `#` at the start of a word as a comment,
/// which would swallow ids typed as `#3`. Escapes those so they survive
/// tokenizing; quoted text is left alone.
fn escape_word_hashes(line: &str) -> Cow<'_, str> {
    if !line.contains('#') {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len() + 4);
    let mut in_single = false;
    let mut in_double = false;
    let mut escaped = false;
    let mut word_start = true;

    for ch in line.chars() {
        if escaped {
            escaped = false;
            out.push(ch);
            word_start = false;
            continue;
        }
        match ch {
            '\\' if !in_single => escaped = true,
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            '#' if word_start && !in_single && !in_double => out.push('\\'),
            _ => {}
        }
        out.push(ch);
        word_start = !in_single && !in_double && !escaped && ch.is_whitespace();
    }

    Cow::Owned(out)
}

fn report(context: &ShellContext, err: CommandError) {
    tracing::debug!(command = ?context.last_command, error = %err, "command failed");
    context.report_error(err);
}

struct CommandHelper {
    commands: Vec<String>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names.into_iter().map(str::to_ascii_lowercase).collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    /// Completes the command word only; arguments are free text.
    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix.len() - prefix.trim_start().len();
        if prefix[start..].contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }

        let needle = prefix[start..].to_ascii_lowercase();
        let candidates = self
            .commands
            .iter()
            .filter(|name| name.starts_with(&needle))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_prefixed_ids_survive_tokenizing() {
        let tokens = split(&escape_word_hashes("delete #3")).unwrap();
        assert_eq!(tokens, vec!["delete", "#3"]);

        let tokens = split(&escape_word_hashes("edit   #12")).unwrap();
        assert_eq!(tokens, vec!["edit", "#12"]);
    }

    #[test]
    fn quoted_and_inner_hashes_are_untouched() {
        let tokens = split(&escape_word_hashes("add 'Box #2' 4 1")).unwrap();
        assert_eq!(tokens, vec!["add", "Box #2", "4", "1"]);

        let tokens = split(&escape_word_hashes("name Size#4 \"#x\"")).unwrap();
        assert_eq!(tokens, vec!["name", "Size#4", "#x"]);
    }

    #[test]
    fn lines_without_hashes_are_borrowed() {
        assert!(matches!(escape_word_hashes("show"), Cow::Borrowed("show")));
    }
}
