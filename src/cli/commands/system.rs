use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_version(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Invoice Core {}", meta.version));
    let rows = [
        ("Commit", format!("{} ({})", meta.git_hash, meta.git_status)),
        ("Built", meta.timestamp.to_string()),
        (
            "Toolchain",
            format!("{} / {} / {}", meta.rustc, meta.target, meta.profile),
        ),
        ("Config", context.config_manager.path().display().to_string()),
    ];
    for (label, value) in rows {
        output::info(format!("  {:<10}: {}", label, value));
    }
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first() {
        None => help::print_overview(&context.registry),
        Some(name) => match context.registry.get(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        },
    }
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
