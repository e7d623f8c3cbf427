use crate::cli::core::{parse_date, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::form::{Acceptance, DiscountKind, NumericField, RowId};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "customer",
            "Set the customer name",
            "customer <name...>",
            cmd_customer,
        ),
        CommandEntry::new(
            "phone",
            "Set the customer phone",
            "phone <phone...>",
            cmd_phone,
        ),
        CommandEntry::new(
            "add-item",
            "Add an item row (quantity x rate)",
            "add-item [description] [qty] [rate]",
            cmd_add_item,
        ),
        CommandEntry::new(
            "add-charge",
            "Add an additional charge row (flat price)",
            "add-charge [description] [price]",
            cmd_add_charge,
        ),
        CommandEntry::new(
            "set",
            "Edit a field of a row",
            "set <row> <desc|qty|rate|price> <value...>",
            cmd_set,
        ),
        CommandEntry::new("remove", "Remove a row", "remove <row>", cmd_remove),
        CommandEntry::new(
            "discount",
            "Set the discount value and optionally its type",
            "discount <value> [percent|flat]",
            cmd_discount,
        ),
        CommandEntry::new(
            "date",
            "Set the invoice date",
            "date <YYYY-MM-DD|today>",
            cmd_date,
        ),
    ]
}

fn cmd_customer(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.editor.set_customer_name(&args.join(" "));
    context.refresh_bill_to();
    Ok(())
}

fn cmd_phone(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.editor.set_customer_phone(&args.join(" "));
    context.refresh_bill_to();
    Ok(())
}

fn cmd_add_item(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() > 3 {
        return Err(usage("add-item [description] [qty] [rate]"));
    }
    let id = context.editor.add_item();
    fill_row(
        context,
        id,
        args,
        &[NumericField::Quantity, NumericField::Rate],
    )?;
    announce_row(context, id, "item");
    Ok(())
}

fn cmd_add_charge(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() > 2 {
        return Err(usage("add-charge [description] [price]"));
    }
    let id = context.editor.add_charge();
    fill_row(context, id, args, &[NumericField::Price])?;
    announce_row(context, id, "charge");
    Ok(())
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [row, field, rest @ ..] = args else {
        return Err(usage("set <row> <desc|qty|rate|price> <value...>"));
    };
    let id = context.resolve_row(row)?;
    let value = rest.join(" ");

    match field.to_ascii_lowercase().as_str() {
        "desc" | "description" | "name" => context.editor.set_description(id, &value)?,
        other => {
            let field = NumericField::parse(other).ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "unknown field `{}` (use desc, qty, rate or price)",
                    other
                ))
            })?;
            let outcome = context.editor.set_numeric(id, field, &value)?;
            report_revert(field.label(), &value, &outcome);
        }
    }
    context.refresh();
    Ok(())
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [row] = args else {
        return Err(usage("remove <row>"));
    };
    let id = context.resolve_row(row)?;
    context.editor.remove_row(id)?;
    output::success(format!("Removed row {}.", row.trim_start_matches('#')));
    context.refresh();
    Ok(())
}

fn cmd_discount(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (value, kind) = match args {
        [value] => (*value, None),
        [value, kind] => (*value, Some(*kind)),
        _ => return Err(usage("discount <value> [percent|flat]")),
    };
    if let Some(kind) = kind {
        let kind = DiscountKind::parse(kind).ok_or_else(|| {
            CommandError::InvalidArguments(format!(
                "unknown discount type `{}` (use percent or flat)",
                kind
            ))
        })?;
        context.editor.set_discount_kind(kind);
    }
    let outcome = context.editor.set_discount_value(value);
    report_revert("discount", value, &outcome);
    context.refresh();
    Ok(())
}

fn cmd_date(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(usage("date <YYYY-MM-DD|today>"));
    };
    context.issued_on = if raw.eq_ignore_ascii_case("today") {
        chrono::Local::now().date_naive()
    } else {
        parse_date(raw)?
    };
    output::info(context.preview().bill_date_line);
    Ok(())
}

/// Writes the optional description and numeric values typed after `add-*`.
fn fill_row(
    context: &mut ShellContext,
    id: RowId,
    args: &[&str],
    fields: &[NumericField],
) -> CommandResult {
    let Some((description, values)) = args.split_first() else {
        return Ok(());
    };
    context.editor.set_description(id, description)?;
    for (field, value) in fields.iter().zip(values) {
        let outcome = context.editor.set_numeric(id, *field, value)?;
        report_revert(field.label(), value, &outcome);
    }
    Ok(())
}

fn announce_row(context: &ShellContext, id: RowId, label: &str) {
    if let Some(position) = context.editor.form().index_of(id) {
        output::success(format!("Added {} row {}.", label, position + 1));
    }
    context.refresh();
}

fn report_revert(label: &str, rejected: &str, outcome: &Acceptance) {
    if let Acceptance::Reverted(kept) = outcome {
        let kept = if kept.is_empty() { "(blank)" } else { kept.as_str() };
        output::warning(format!(
            "`{}` is not a valid {}; kept {}.",
            rejected, label, kept
        ));
    }
}

fn usage(text: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {}", text))
}
