use crate::{
    errors::Result,
    ledger::{parse_decimal, ItemList, LedgerState, LineItem, DEFAULT_BUDGET, DEFAULT_TAX_RATE},
};

use super::KeyValueStore;

pub const BUDGET_KEY: &str = "budget";
pub const TAX_RATE_KEY: &str = "taxRate";
pub const ITEMS_KEY: &str = "items";

/// Outcome of reading a ledger back from a store.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub state: LedgerState,
    /// One message per entry that was replaced by its default.
    pub warnings: Vec<String>,
}

/// Maps a [`LedgerState`] onto three independent store entries.
pub struct Persistence {
    store: Box<dyn KeyValueStore>,
}

impl Persistence {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Rewrites all three entries.
    pub fn save(&self, state: &LedgerState) -> Result<()> {
        self.store.set(BUDGET_KEY, &state.budget.to_string())?;
        self.store.set(TAX_RATE_KEY, &state.tax_rate.to_string())?;
        let items = serde_json::to_string(&state.items.to_vec())?;
        self.store.set(ITEMS_KEY, &items)?;
        tracing::debug!(
            budget = state.budget,
            tax_rate = state.tax_rate,
            items = state.items.len(),
            "ledger saved"
        );
        Ok(())
    }

    /// Reads the ledger back, substituting defaults for absent or unreadable
    /// entries. Returns `None` only when the store holds none of the entries.
    pub fn load(&self) -> Option<LoadReport> {
        let mut warnings = Vec::new();
        let budget_raw = self.read_entry(BUDGET_KEY, &mut warnings);
        let tax_raw = self.read_entry(TAX_RATE_KEY, &mut warnings);
        let items_raw = self.read_entry(ITEMS_KEY, &mut warnings);

        if budget_raw.is_none() && tax_raw.is_none() && items_raw.is_none() {
            for warning in &warnings {
                tracing::warn!("{warning}");
            }
            return None;
        }

        let budget = match budget_raw.as_deref() {
            Some(raw) => parse_decimal(raw).unwrap_or_else(|| {
                warnings.push(format!("stored budget `{raw}` is not a number; using 0"));
                DEFAULT_BUDGET
            }),
            None => DEFAULT_BUDGET,
        };

        let tax_rate = match tax_raw.as_deref() {
            Some(raw) => parse_decimal(raw)
                .filter(|rate| *rate >= 0.0)
                .unwrap_or_else(|| {
                    warnings.push(format!(
                        "stored tax rate `{raw}` is invalid; using {DEFAULT_TAX_RATE}"
                    ));
                    DEFAULT_TAX_RATE
                }),
            None => DEFAULT_TAX_RATE,
        };

        let items = match items_raw.as_deref() {
            Some(raw) => decode_items(raw, &mut warnings),
            None => ItemList::new(),
        };

        for warning in &warnings {
            tracing::warn!("{warning}");
        }

        Some(LoadReport {
            state: LedgerState::new(budget, tax_rate, items),
            warnings,
        })
    }

    /// Drops every entry from the store.
    pub fn clear(&self) -> Result<()> {
        self.store.clear()?;
        tracing::debug!("ledger storage cleared");
        Ok(())
    }

    fn read_entry(&self, key: &str, warnings: &mut Vec<String>) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                warnings.push(format!("could not read `{key}`: {err}"));
                None
            }
        }
    }
}

/// Decodes the stored array element by element so one bad entry costs only
/// itself.
fn decode_items(raw: &str, warnings: &mut Vec<String>) -> ItemList {
    let decoded: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(items) => items,
        Err(err) => {
            warnings.push(format!("stored items are unreadable ({err}); starting empty"));
            return ItemList::new();
        }
    };

    let mut items = ItemList::new();
    for (position, value) in decoded.into_iter().enumerate() {
        let checked = serde_json::from_value::<LineItem>(value)
            .map_err(|err| err.to_string())
            .and_then(|item| item.validate().map(|()| item).map_err(|err| err.to_string()));
        match checked {
            Ok(item) => {
                items.push(item);
            }
            Err(err) => warnings.push(format!("skipped stored item {}: {err}", position + 1)),
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn persistence_with(entries: Vec<(&str, &str)>) -> Persistence {
        Persistence::new(Box::new(MemoryStore::with_entries(entries)))
    }

    fn sample_state() -> LedgerState {
        let items = ItemList::from_items(vec![
            LineItem::new("Widget", 10.0, 3).unwrap(),
            LineItem::new("Gadget", 2.75, 1).unwrap(),
        ]);
        LedgerState::new(100.0, 0.025, items)
    }

    #[test]
    fn save_then_load_round_trips() {
        let persistence = Persistence::new(Box::new(MemoryStore::new()));
        let state = sample_state();
        persistence.save(&state).unwrap();

        let report = persistence.load().expect("state stored");
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        assert_eq!(report.state.budget, 100.0);
        assert_eq!(report.state.tax_rate, 0.025);
        assert_eq!(report.state.items.to_vec(), state.items.to_vec());
    }

    #[test]
    fn writes_three_entries_with_expected_layout() {
        let persistence = Persistence::new(Box::new(MemoryStore::new()));
        persistence.save(&sample_state()).unwrap();
        let store = persistence.store();

        assert_eq!(store.get(BUDGET_KEY).unwrap().as_deref(), Some("100"));
        assert_eq!(store.get(TAX_RATE_KEY).unwrap().as_deref(), Some("0.025"));
        let items: serde_json::Value =
            serde_json::from_str(&store.get(ITEMS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(items[0]["name"], "Widget");
        assert_eq!(items[0]["unitPrice"], 10.0);
        assert_eq!(items[0]["quantity"], 3);
    }

    #[test]
    fn empty_store_loads_nothing() {
        assert!(persistence_with(vec![]).load().is_none());
    }

    #[test]
    fn corrupt_entries_degrade_to_defaults() {
        let persistence = persistence_with(vec![
            (BUDGET_KEY, "lots"),
            (TAX_RATE_KEY, "-0.5"),
            (ITEMS_KEY, "{broken"),
        ]);
        let report = persistence.load().expect("entries present");
        assert_eq!(report.state.budget, DEFAULT_BUDGET);
        assert_eq!(report.state.tax_rate, DEFAULT_TAX_RATE);
        assert!(report.state.items.is_empty());
        assert_eq!(report.warnings.len(), 3);
    }

    #[test]
    fn missing_entries_use_defaults_without_warnings() {
        let report = persistence_with(vec![(BUDGET_KEY, "55.5")])
            .load()
            .expect("budget present");
        assert_eq!(report.state.budget, 55.5);
        assert_eq!(report.state.tax_rate, DEFAULT_TAX_RATE);
        assert!(report.state.items.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn invalid_stored_items_are_skipped() {
        let raw = r#"[{"name":"Ok","unitPrice":1.0,"quantity":1},
                      {"name":"","unitPrice":1.0,"quantity":1},
                      {"name":"Free","pricePerUnit":0,"quantity":2}]"#;
        let report = persistence_with(vec![(ITEMS_KEY, raw)]).load().unwrap();
        assert_eq!(report.state.items.len(), 1);
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn ill_typed_items_do_not_drop_their_neighbours() {
        let raw = r#"[{"name":"Ok","unitPrice":1.5,"quantity":2},
                      {"name":"Negative","unitPrice":1.0,"quantity":-1},
                      {"name":"Fraction","unitPrice":1.0,"quantity":2.5},
                      {"name":"Text","unitPrice":"x","quantity":1},
                      "not an object",
                      {"name":"Ok2","unitPrice":3.0,"quantity":1}]"#;
        let report = persistence_with(vec![(ITEMS_KEY, raw)]).load().unwrap();

        let names: Vec<String> = report
            .state
            .items
            .iter()
            .map(|(_, item)| item.name.clone())
            .collect();
        assert_eq!(names, vec!["Ok", "Ok2"]);
        assert_eq!(report.warnings.len(), 4, "{:?}", report.warnings);
        assert!(report.warnings[0].starts_with("skipped stored item 2"));
    }

    #[test]
    fn clear_empties_store() {
        let persistence = Persistence::new(Box::new(MemoryStore::new()));
        persistence.save(&sample_state()).unwrap();
        persistence.clear().unwrap();
        assert!(persistence.load().is_none());
    }
}
