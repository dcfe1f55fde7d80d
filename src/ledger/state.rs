use std::collections::HashMap;

use super::item::{ItemId, LineItem};

pub const DEFAULT_BUDGET: f64 = 0.0;
pub const DEFAULT_TAX_RATE: f64 = 0.025;

/// Line items keyed by id, with a separate sequence recording display order.
///
/// Ids come from a counter owned by the list and are never reissued, so a
/// removal never changes how the remaining items are addressed.
#[derive(Debug, Clone, Default)]
pub struct ItemList {
    entries: HashMap<ItemId, LineItem>,
    order: Vec<ItemId>,
    last_id: u64,
}

impl ItemList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from items in display order, issuing fresh ids.
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut list = Self::new();
        for item in items {
            list.push(item);
        }
        list
    }

    pub fn push(&mut self, item: LineItem) -> ItemId {
        self.last_id += 1;
        let id = ItemId(self.last_id);
        self.entries.insert(id, item);
        self.order.push(id);
        id
    }

    pub fn get(&self, id: ItemId) -> Option<&LineItem> {
        self.entries.get(&id)
    }

    pub fn remove(&mut self, id: ItemId) -> Option<LineItem> {
        let item = self.entries.remove(&id)?;
        self.order.retain(|existing| *existing != id);
        Some(item)
    }

    /// Drops every item. The id counter keeps running.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn ids(&self) -> &[ItemId] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &LineItem)> + '_ {
        self.order
            .iter()
            .filter_map(move |id| self.entries.get(id).map(|item| (*id, item)))
    }

    /// Clones the items in display order, without their ids.
    pub fn to_vec(&self) -> Vec<LineItem> {
        self.iter().map(|(_, item)| item.clone()).collect()
    }
}

/// Budget, tax rate, and line items of a single ledger.
#[derive(Debug, Clone)]
pub struct LedgerState {
    pub budget: f64,
    /// Fraction, so `0.025` is 2.5%.
    pub tax_rate: f64,
    pub items: ItemList,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self {
            budget: DEFAULT_BUDGET,
            tax_rate: DEFAULT_TAX_RATE,
            items: ItemList::new(),
        }
    }
}

impl LedgerState {
    pub fn new(budget: f64, tax_rate: f64, items: ItemList) -> Self {
        Self {
            budget,
            tax_rate,
            items,
        }
    }

    /// Restores defaults in place, keeping the id counter.
    pub fn reset(&mut self) {
        self.budget = DEFAULT_BUDGET;
        self.tax_rate = DEFAULT_TAX_RATE;
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, price: f64, quantity: u32) -> LineItem {
        LineItem::new(name, price, quantity).unwrap()
    }

    #[test]
    fn removal_keeps_order_and_ids_of_remaining_items() {
        let mut list = ItemList::new();
        let a = list.push(item("A", 1.0, 1));
        let b = list.push(item("B", 2.0, 1));
        let c = list.push(item("C", 3.0, 1));

        assert_eq!(list.remove(b).map(|i| i.name), Some("B".to_string()));
        assert_eq!(list.ids(), &[a, c]);
        assert_eq!(list.get(c).map(|i| i.name.as_str()), Some("C"));
        assert!(list.remove(b).is_none());
    }

    #[test]
    fn ids_are_never_reused() {
        let mut list = ItemList::new();
        let first = list.push(item("A", 1.0, 1));
        list.remove(first);
        list.clear();
        let second = list.push(item("B", 1.0, 1));
        assert_ne!(first, second);
        assert!(second > first);
    }

    #[test]
    fn from_items_preserves_order() {
        let list = ItemList::from_items(vec![item("X", 1.0, 2), item("Y", 3.0, 4)]);
        let names: Vec<_> = list.iter().map(|(_, i)| i.name.clone()).collect();
        assert_eq!(names, vec!["X", "Y"]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut state = LedgerState::new(50.0, 0.1, ItemList::from_items(vec![item("A", 1.0, 1)]));
        state.reset();
        assert_eq!(state.budget, DEFAULT_BUDGET);
        assert_eq!(state.tax_rate, DEFAULT_TAX_RATE);
        assert!(state.items.is_empty());
    }
}
