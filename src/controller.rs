//! The ledger controller: owns the state and the input form, applies user
//! actions, and saves after every mutation.

use crate::{
    currency::{format_fixed, format_percent},
    errors::{LedgerError, Result},
    ledger::{parse_decimal, ItemId, LedgerState, LineItem, DEFAULT_BUDGET, DEFAULT_TAX_RATE},
    storage::{KeyValueStore, Persistence},
    summary::Summary,
};

/// Text currently held by the five input fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputForm {
    pub budget: String,
    /// Percent text, e.g. `2.50`.
    pub tax_rate: String,
    pub product_name: String,
    pub price_per_unit: String,
    pub quantity: String,
}

impl InputForm {
    /// Field text reflecting a freshly loaded state. A zero budget shows as blank.
    pub fn for_state(state: &LedgerState) -> Self {
        Self {
            budget: if state.budget == 0.0 {
                String::new()
            } else {
                format_fixed(state.budget, 2)
            },
            tax_rate: format_percent(state.tax_rate),
            ..Self::default()
        }
    }

    pub fn fill_item(&mut self, item: &LineItem) {
        self.product_name = item.name.clone();
        self.price_per_unit = item.unit_price.to_string();
        self.quantity = item.quantity.to_string();
    }

    pub fn clear_item_fields(&mut self) {
        self.product_name.clear();
        self.price_per_unit.clear();
        self.quantity.clear();
    }

    pub fn has_pending_item(&self) -> bool {
        !(self.product_name.is_empty() && self.price_per_unit.is_empty() && self.quantity.is_empty())
    }
}

pub struct LedgerController {
    state: LedgerState,
    form: InputForm,
    persistence: Persistence,
    load_warnings: Vec<String>,
}

impl LedgerController {
    /// Restores the ledger held by `store`, or starts from defaults.
    pub fn open(store: Box<dyn KeyValueStore>) -> Self {
        let persistence = Persistence::new(store);
        let (state, load_warnings) = match persistence.load() {
            Some(report) => {
                tracing::info!(items = report.state.items.len(), "ledger restored");
                (report.state, report.warnings)
            }
            None => (LedgerState::default(), Vec::new()),
        };
        Self {
            form: InputForm::for_state(&state),
            state,
            persistence,
            load_warnings,
        }
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn form(&self) -> &InputForm {
        &self.form
    }

    /// Direct field access, used when the user types into the item fields.
    pub fn form_mut(&mut self) -> &mut InputForm {
        &mut self.form
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    /// Warnings gathered while restoring the stored ledger.
    pub fn load_warnings(&self) -> &[String] {
        &self.load_warnings
    }

    pub fn summary(&self) -> Summary {
        Summary::project(&self.state)
    }

    /// Applies budget text; anything unparsable counts as zero.
    pub fn set_budget(&mut self, raw: &str) -> Result<f64> {
        self.form.budget = raw.trim().to_string();
        self.state.budget = parse_decimal(raw).unwrap_or(DEFAULT_BUDGET);
        tracing::debug!(budget = self.state.budget, "budget updated");
        self.persist()?;
        Ok(self.state.budget)
    }

    /// Applies a percent; unparsable or negative input falls back to the default rate.
    pub fn set_tax_rate(&mut self, raw_percent: &str) -> Result<f64> {
        self.form.tax_rate = raw_percent.trim().to_string();
        self.state.tax_rate = parse_decimal(raw_percent)
            .filter(|percent| *percent >= 0.0)
            .map(|percent| percent / 100.0)
            .unwrap_or(DEFAULT_TAX_RATE);
        tracing::debug!(tax_rate = self.state.tax_rate, "tax rate updated");
        self.persist()?;
        Ok(self.state.tax_rate)
    }

    /// Validates and appends an item. On success the item fields are cleared;
    /// on validation failure nothing changes and nothing is saved.
    pub fn add_item(&mut self, name: &str, unit_price: &str, quantity: &str) -> Result<ItemId> {
        let item = LineItem::parse(name, unit_price, quantity).map_err(|err| {
            tracing::debug!(error = %err, "item rejected");
            LedgerError::from(err)
        })?;
        let id = self.state.items.push(item);
        self.form.clear_item_fields();
        tracing::info!(%id, "item added");
        self.persist()?;
        Ok(id)
    }

    /// Submits whatever the item fields currently hold.
    pub fn submit(&mut self) -> Result<ItemId> {
        let InputForm {
            product_name,
            price_per_unit,
            quantity,
            ..
        } = self.form.clone();
        self.add_item(&product_name, &price_per_unit, &quantity)
    }

    /// Moves an item back into the form for re-entry. The item leaves the
    /// ledger until the form is submitted again.
    pub fn edit_item(&mut self, id: ItemId) -> Result<LineItem> {
        let item = self
            .state
            .items
            .remove(id)
            .ok_or(LedgerError::ItemNotFound(id))?;
        self.form.fill_item(&item);
        tracing::info!(%id, "item moved to form for editing");
        self.persist()?;
        Ok(item)
    }

    pub fn delete_item(&mut self, id: ItemId) -> Result<LineItem> {
        let item = self
            .state
            .items
            .remove(id)
            .ok_or(LedgerError::ItemNotFound(id))?;
        tracing::info!(%id, "item deleted");
        self.persist()?;
        Ok(item)
    }

    /// Clears items, budget, and tax rate, and empties the store.
    pub fn reset(&mut self) -> Result<()> {
        self.state.reset();
        self.form = InputForm::for_state(&self.state);
        tracing::info!("ledger reset");
        self.persistence.clear()
    }

    fn persist(&self) -> Result<()> {
        self.persistence.save(&self.state).map_err(|err| {
            tracing::error!(error = %err, "failed to save ledger");
            err
        })
    }
}
