use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::render::render_preview;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("preview", "Show the invoice preview", "preview", cmd_preview),
        CommandEntry::new(
            "json",
            "Print the form and its preview as JSON",
            "json [form|preview]",
            cmd_json,
        ),
        CommandEntry::new(
            "export",
            "Validate the invoice and name the export file",
            "export",
            cmd_export,
        ),
    ]
}

fn cmd_preview(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let preview = context.preview();
    output::section("Invoice");
    println!("{}", render_preview(&preview));
    let invalid = preview.invalid_fields().count();
    if invalid > 0 {
        output::hint(format!(
            "{} field(s) hold invalid numbers and are left out of the totals.",
            invalid
        ));
    }
    Ok(())
}

fn cmd_json(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let json = match args.first().map(|arg| arg.to_ascii_lowercase()) {
        Some(target) if target == "form" => serde_json::to_string_pretty(context.editor.form())?,
        _ => serde_json::to_string_pretty(&context.preview())?,
    };
    println!("{}", json);
    Ok(())
}

fn cmd_export(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let plan = context
        .export_gate()
        .prepare(context.editor.form(), context.issued_on)?;
    output::success(format!("Invoice ready to export as `{}`.", plan.file_name));
    Ok(())
}
