use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::config::SETTING_KEYS;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change preferences",
        "config [show|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            show(context);
            Ok(())
        }
        ["set", key, value @ ..] => {
            context
                .config
                .apply_setting(key, &value.join(" "))
                .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
            context.persist_config()?;
            output::success(format!("Updated `{}`.", key));
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(format!(
            "usage: config [show|set <key> <value>] (keys: {})",
            SETTING_KEYS.join(", ")
        ))),
    }
}

fn show(context: &ShellContext) {
    let config = &context.config;
    output::section("Configuration");
    output::info(format!("  date-format     : {}", config.date_format));
    output::info(format!("  export-fallback : {}", config.export.fallback_stem));
    output::info(format!("  export-suffix   : {}", config.export.name_suffix));
    output::info(format!(
        "  color           : {}",
        if config.ui_color_enabled { "on" } else { "off" }
    ));
    output::info(format!(
        "  file            : {}",
        context.config_manager.path().display()
    ));
}
