mod common;

use budget_tracker::currency::format_currency;
use budget_tracker::{LedgerError, ValidationError};
use common::{approx, open_controller, temp_store_path};

#[test]
fn widget_example_formats_expected_totals() {
    let (_temp, path) = temp_store_path();
    let mut ledger = open_controller(&path);
    ledger.set_budget("100").unwrap();
    ledger.set_tax_rate("2.5").unwrap();
    ledger.add_item("Widget", "10", "3").unwrap();

    let summary = ledger.summary();
    assert_eq!(format_currency(summary.total_before_tax, "$"), "$30.00");
    assert_eq!(format_currency(summary.total_after_tax, "$"), "$30.75");
    assert_eq!(format_currency(summary.remaining_budget, "$"), "$69.25");
}

#[test]
fn totals_track_every_mutation() {
    let (_temp, path) = temp_store_path();
    let mut ledger = open_controller(&path);
    ledger.set_budget("50").unwrap();
    ledger.set_tax_rate("10").unwrap();

    let a = ledger.add_item("Apples", "0.5", "10").unwrap();
    let b = ledger.add_item("Bread", "3.2", "2").unwrap();
    let expected_before = 0.5 * 10.0 + 3.2 * 2.0;
    let summary = ledger.summary();
    assert!(approx(summary.total_before_tax, expected_before));
    assert!(approx(summary.total_after_tax, expected_before * 1.1));
    assert!(approx(summary.remaining_budget, 50.0 - expected_before * 1.1));

    ledger.delete_item(a).unwrap();
    assert!(approx(ledger.summary().total_before_tax, 6.4));

    ledger.edit_item(b).unwrap();
    assert_eq!(ledger.summary().total_before_tax, 0.0);
    assert_eq!(ledger.summary().remaining_budget, 50.0);

    ledger.form_mut().quantity = "5".into();
    let resubmitted = ledger.submit().unwrap();
    assert_ne!(resubmitted, b);
    assert!(approx(ledger.summary().total_before_tax, 16.0));
}

#[test]
fn rejected_items_leave_store_untouched() {
    let (_temp, path) = temp_store_path();
    let mut ledger = open_controller(&path);

    let err = ledger.add_item("", "10", "1").unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Validation(ValidationError::EmptyName)
    ));
    let err = ledger.add_item("Widget", "0", "1").unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Validation(ValidationError::InvalidPrice(_))
    ));
    let err = ledger.add_item("Widget", "10", "0").unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Validation(ValidationError::InvalidQuantity(_))
    ));

    assert!(ledger.state().items.is_empty());
    assert!(!path.exists(), "no save may happen for rejected items");
}

#[test]
fn deleting_only_item_shows_budget_again() {
    let (_temp, path) = temp_store_path();
    let mut ledger = open_controller(&path);
    ledger.set_budget("75.5").unwrap();
    let id = ledger.add_item("Widget", "10", "3").unwrap();
    ledger.delete_item(id).unwrap();

    let summary = ledger.summary();
    assert_eq!(format_currency(summary.total_before_tax, "$"), "$0.00");
    assert_eq!(format_currency(summary.total_after_tax, "$"), "$0.00");
    assert_eq!(format_currency(summary.remaining_budget, "$"), "$75.50");
}

#[test]
fn ids_stay_valid_after_earlier_deletions() {
    let (_temp, path) = temp_store_path();
    let mut ledger = open_controller(&path);
    let first = ledger.add_item("First", "1", "1").unwrap();
    let second = ledger.add_item("Second", "2", "1").unwrap();
    let third = ledger.add_item("Third", "3", "1").unwrap();

    ledger.delete_item(first).unwrap();
    let removed = ledger.delete_item(third).unwrap();
    assert_eq!(removed.name, "Third");
    assert_eq!(ledger.state().items.ids(), &[second]);
}
