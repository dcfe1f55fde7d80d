use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
        CommandEntry::new("quit", "Exit the shell", "quit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(raw) = args.first() {
        match context.command(&raw.to_lowercase()) {
            Some(entry) => {
                output::section(format!("Help: {}", entry.name));
                output::block(format!("  Description: {}", entry.description));
                output::block(format!("  Usage: {}", entry.usage));
            }
            None => context.suggest_command(raw),
        }
        return Ok(());
    }

    output::section("Available commands");
    let commands = context.commands();
    let width = commands.iter().map(|entry| entry.usage.len()).max().unwrap_or(0);
    for entry in commands {
        output::block(format!(
            "  {:<width$}  {}",
            entry.usage,
            entry.description,
            width = width
        ));
    }
    output::block("Use `help <command>` for details.");
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::block(build_info::current().summary());
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
