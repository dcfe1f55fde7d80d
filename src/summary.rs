//! Totals derived from a ledger state. Always computed from the live item
//! list, never updated incrementally.

use crate::ledger::LedgerState;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub total_before_tax: f64,
    pub total_after_tax: f64,
    pub remaining_budget: f64,
}

impl Summary {
    pub fn project(state: &LedgerState) -> Self {
        let total_before_tax: f64 = state.items.iter().map(|(_, item)| item.line_total()).sum();
        let total_after_tax = total_before_tax * (1.0 + state.tax_rate);
        Self {
            total_before_tax,
            total_after_tax,
            remaining_budget: state.budget - total_after_tax,
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining_budget < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{ItemList, LineItem};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn widget_example_totals() {
        let items = ItemList::from_items(vec![LineItem::new("Widget", 10.0, 3).unwrap()]);
        let state = LedgerState::new(100.0, 0.025, items);
        let summary = Summary::project(&state);
        assert!(approx(summary.total_before_tax, 30.0));
        assert!(approx(summary.total_after_tax, 30.75));
        assert!(approx(summary.remaining_budget, 69.25));
        assert!(!summary.is_over_budget());
    }

    #[test]
    fn empty_ledger_leaves_budget_untouched() {
        let state = LedgerState::new(42.5, 0.08, ItemList::new());
        let summary = Summary::project(&state);
        assert_eq!(summary.total_before_tax, 0.0);
        assert_eq!(summary.total_after_tax, 0.0);
        assert_eq!(summary.remaining_budget, 42.5);
    }

    #[test]
    fn sums_every_line_total() {
        let items = ItemList::from_items(vec![
            LineItem::new("A", 1.5, 2).unwrap(),
            LineItem::new("B", 4.0, 1).unwrap(),
            LineItem::new("C", 0.25, 8).unwrap(),
        ]);
        let state = LedgerState::new(5.0, 0.1, items);
        let summary = Summary::project(&state);
        assert!(approx(summary.total_before_tax, 9.0));
        assert!(approx(summary.total_after_tax, 9.9));
        assert!(approx(summary.remaining_budget, -4.9));
        assert!(summary.is_over_budget());
    }
}
