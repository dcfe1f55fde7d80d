use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::currency::{format_currency, format_percent};
use crate::ledger::ItemId;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("budget", "Set the budget", "budget <amount>", cmd_budget),
        CommandEntry::new("tax", "Set the tax rate in percent", "tax <percent>", cmd_tax),
        CommandEntry::new("name", "Fill the product name field", "name <text...>", cmd_name),
        CommandEntry::new(
            "price",
            "Fill the price per unit field",
            "price <amount>",
            cmd_price,
        ),
        CommandEntry::new("qty", "Fill the quantity field", "qty <count>", cmd_quantity),
        CommandEntry::new(
            "add",
            "Submit the form, or fill and submit it in one go",
            "add [<name> <price> <qty>]",
            cmd_add,
        ),
        CommandEntry::new(
            "edit",
            "Move an item back into the form for re-entry",
            "edit <id>",
            cmd_edit,
        ),
        CommandEntry::new("delete", "Remove an item", "delete <id>", cmd_delete),
        CommandEntry::new(
            "reset",
            "Clear all items, budget and tax rate",
            "reset",
            cmd_reset,
        ),
        CommandEntry::new("show", "Show items and summary", "show", cmd_show),
        CommandEntry::new("list", "Show items and summary", "list", cmd_show),
        CommandEntry::new("form", "Show the input fields", "form", cmd_form),
    ]
}

fn single_arg<'a>(args: &[&'a str], usage: &str) -> Result<&'a str, CommandError> {
    match args {
        [value] => Ok(*value),
        _ => Err(CommandError::InvalidArguments(format!("usage: {usage}"))),
    }
}

/// Optional single value; no argument clears the field.
fn field_arg<'a>(args: &[&'a str], usage: &str) -> Result<&'a str, CommandError> {
    match args {
        [] => Ok(""),
        [value] => Ok(*value),
        _ => Err(CommandError::InvalidArguments(format!("usage: {usage}"))),
    }
}

fn parse_id(args: &[&str], usage: &str) -> Result<ItemId, CommandError> {
    let raw = single_arg(args, usage)?;
    raw.parse::<ItemId>()
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not an item id")))
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = single_arg(args, "budget <amount>")?;
    let budget = context.controller_mut().set_budget(raw)?;
    output::success(format!(
        "Budget set to {}",
        format_currency(budget, context.currency_symbol())
    ));
    context.redraw();
    Ok(())
}

fn cmd_tax(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = single_arg(args, "tax <percent>")?;
    let rate = context.controller_mut().set_tax_rate(raw)?;
    output::success(format!("Tax rate set to {}%", format_percent(rate)));
    context.redraw();
    Ok(())
}

fn cmd_name(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.controller_mut().form_mut().product_name = args.join(" ");
    Ok(())
}

fn cmd_price(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let value = field_arg(args, "price <amount>")?;
    context.controller_mut().form_mut().price_per_unit = value.to_string();
    Ok(())
}

fn cmd_quantity(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let value = field_arg(args, "qty <count>")?;
    context.controller_mut().form_mut().quantity = value.to_string();
    Ok(())
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {}
        [name, price, quantity] => {
            let form = context.controller_mut().form_mut();
            form.product_name = name.to_string();
            form.price_per_unit = price.to_string();
            form.quantity = quantity.to_string();
        }
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: add [<name> <price> <qty>]".into(),
            ))
        }
    }

    let id = context.controller_mut().submit()?;
    if let Some(item) = context.controller().state().items.get(id) {
        output::success(format!("Added {} as {}", item.name, id));
    }
    context.redraw();
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = parse_id(args, "edit <id>")?;
    let item = context.controller_mut().edit_item(id)?;
    output::success(format!(
        "Moved {} into the form. Adjust the fields and run `add` to save it.",
        item.name
    ));
    context.show_form();
    context.redraw();
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = parse_id(args, "delete <id>")?;
    let item = context.controller_mut().delete_item(id)?;
    output::success(format!("Deleted {} ({})", item.name, id));
    context.redraw();
    Ok(())
}

fn cmd_reset(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::InvalidArguments("usage: reset".into()));
    }
    if !context.confirm("Clear every item, the budget and the tax rate?")? {
        output::info("Reset cancelled.");
        return Ok(());
    }
    context.controller_mut().reset()?;
    output::success("Ledger reset.");
    context.redraw();
    Ok(())
}

fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.redraw();
    Ok(())
}

fn cmd_form(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.show_form();
    Ok(())
}
