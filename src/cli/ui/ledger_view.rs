//! Text rendering of the item table, the summary fields, and the input form.
//! Every call rebuilds its output from scratch.

use crate::{
    controller::InputForm,
    currency::format_currency,
    ledger::LedgerState,
    summary::Summary,
};

use super::table_renderer::{Alignment, Table, TableColumn};

const NAME_MAX_WIDTH: usize = 32;
const LABEL_WIDTH: usize = 18;

fn item_columns() -> Vec<TableColumn> {
    vec![
        TableColumn::new("ID", Alignment::Right).min_width(3),
        TableColumn::new("Name", Alignment::Left)
            .min_width(12)
            .max_width(NAME_MAX_WIDTH),
        TableColumn::new("Unit Price", Alignment::Right),
        TableColumn::new("Quantity", Alignment::Right),
        TableColumn::new("Line Total", Alignment::Right),
        TableColumn::new("Actions", Alignment::Left),
    ]
}

/// One row per item, in display order. The action cell names the id-bound
/// commands for that row.
pub fn render_items(state: &LedgerState, symbol: &str) -> String {
    let mut table = Table::new(item_columns());
    for (id, item) in state.items.iter() {
        table.push_row(vec![
            id.to_string(),
            item.name.clone(),
            format_currency(item.unit_price, symbol),
            item.quantity.to_string(),
            format_currency(item.line_total(), symbol),
            format!("edit {id} | delete {id}"),
        ]);
    }
    let mut out = table.render();
    if state.items.is_empty() {
        out.push_str("\n (no items yet)");
    }
    out
}

pub fn render_summary(summary: &Summary, symbol: &str) -> String {
    [
        ("Total before tax", summary.total_before_tax),
        ("Total after tax", summary.total_after_tax),
        ("Remaining budget", summary.remaining_budget),
    ]
    .iter()
    .map(|(label, amount)| {
        format!(
            "{:<width$}{}",
            format!("{label}:"),
            format_currency(*amount, symbol),
            width = LABEL_WIDTH
        )
    })
    .collect::<Vec<_>>()
    .join("\n")
}

/// Item table followed by the summary fields.
pub fn render_ledger(state: &LedgerState, symbol: &str) -> String {
    format!(
        "{}\n\n{}",
        render_items(state, symbol),
        render_summary(&Summary::project(state), symbol)
    )
}

pub fn render_form(form: &InputForm) -> String {
    let show = |value: &str| {
        if value.is_empty() {
            "(empty)".to_string()
        } else {
            value.to_string()
        }
    };
    [
        ("Budget", show(&form.budget)),
        ("Tax rate (%)", show(&form.tax_rate)),
        ("Product name", show(&form.product_name)),
        ("Price per unit", show(&form.price_per_unit)),
        ("Quantity", show(&form.quantity)),
    ]
    .iter()
    .map(|(label, value)| format!("{:<width$}{}", format!("{label}:"), value, width = LABEL_WIDTH))
    .collect::<Vec<_>>()
    .join("\n")
}
