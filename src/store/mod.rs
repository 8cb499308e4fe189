//! Catalog filter and card-selection state shared by every screen.
//!
//! `CatalogStore` is an explicit container: the embedding application creates
//! one and hands it (usually behind an `Arc`) to whatever needs it. Every
//! mutation goes through a `watch` channel and only notifies subscribers when
//! the value actually changed, so repeated writes of the same value never
//! fan out.

pub mod filters;
pub mod selection;

pub use filters::{FilterState, NumericRange};
pub use selection::{merge_selection, SelectedCard, Selection};

use std::collections::BTreeSet;
use tokio::sync::watch;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreState {
    pub filters: FilterState,
    pub selection: Selection,
}

#[derive(Debug)]
pub struct CatalogStore {
    state: watch::Sender<StoreState>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(StoreState::default());
        Self { state }
    }

    /// Receiver woken on every effective change.
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> StoreState {
        self.state.borrow().clone()
    }

    pub fn filters(&self) -> FilterState {
        self.state.borrow().filters.clone()
    }

    pub fn selected_cards(&self) -> Vec<SelectedCard> {
        self.state.borrow().selection.cards().to_vec()
    }

    pub fn quantity_of(&self, card_id: &str) -> u8 {
        self.state.borrow().selection.quantity_of(card_id)
    }

    // ==================== FILTER SETTERS ====================

    pub fn set_selected_colors(&self, colors: BTreeSet<String>) -> bool {
        self.set_filter(colors, |f| &mut f.selected_colors)
    }

    pub fn set_selected_set(&self, set: Option<String>) -> bool {
        self.set_filter(set, |f| &mut f.selected_set)
    }

    pub fn set_selected_family(&self, family: Option<String>) -> bool {
        self.set_filter(family, |f| &mut f.selected_family)
    }

    pub fn set_selected_types(&self, types: BTreeSet<String>) -> bool {
        self.set_filter(types, |f| &mut f.selected_types)
    }

    pub fn set_selected_rarities(&self, rarities: BTreeSet<String>) -> bool {
        self.set_filter(rarities, |f| &mut f.selected_rarities)
    }

    pub fn set_ability_filters(&self, abilities: BTreeSet<String>) -> bool {
        self.set_filter(abilities, |f| &mut f.ability_filters)
    }

    pub fn set_selected_attributes(&self, attributes: BTreeSet<String>) -> bool {
        self.set_filter(attributes, |f| &mut f.selected_attributes)
    }

    pub fn set_trigger_filter(&self, enabled: bool) -> bool {
        self.set_filter(enabled, |f| &mut f.trigger_filter)
    }

    /// Bounds are not validated; callers keep values inside the domain.
    pub fn set_cost_range(&self, range: NumericRange) -> bool {
        self.set_filter(range, |f| &mut f.cost_range)
    }

    pub fn set_power_range(&self, range: NumericRange) -> bool {
        self.set_filter(range, |f| &mut f.power_range)
    }

    pub fn set_counter_range(&self, range: NumericRange) -> bool {
        self.set_filter(range, |f| &mut f.counter_range)
    }

    pub fn set_search_query(&self, query: impl Into<String>) -> bool {
        self.set_filter(query.into(), |f| &mut f.search_query)
    }

    pub fn reset_filters(&self) -> bool {
        self.state.send_if_modified(|state| {
            if state.filters.is_default() {
                return false;
            }
            state.filters = FilterState::default();
            true
        })
    }

    fn set_filter<T: PartialEq>(
        &self,
        value: T,
        field: impl FnOnce(&mut FilterState) -> &mut T,
    ) -> bool {
        self.state.send_if_modified(|state| {
            let slot = field(&mut state.filters);
            if *slot == value {
                return false;
            }
            *slot = value;
            true
        })
    }

    // ==================== SELECTION ====================

    pub fn update_card_quantity(&self, card_id: &str, delta: i32, color: &str, name: &str) -> bool {
        let changed = self
            .state
            .send_if_modified(|state| state.selection.update_quantity(card_id, delta, color, name));
        if changed {
            tracing::debug!(card_id, delta, "selection updated");
        }
        changed
    }

    /// Wholesale replacement, normalised through [`Selection::from_cards`].
    pub fn set_selected_cards(&self, cards: Vec<SelectedCard>) -> bool {
        let next = Selection::from_cards(cards);
        self.state.send_if_modified(|state| {
            if state.selection == next {
                return false;
            }
            state.selection = next;
            true
        })
    }

    pub fn clear_selection(&self) -> bool {
        self.set_selected_cards(Vec::new())
    }

    /// Finalizes the pick: hands back the selected cards and empties the selection.
    pub fn take_selection(&self) -> Vec<SelectedCard> {
        let mut taken = Vec::new();
        self.state.send_if_modified(|state| {
            if state.selection.is_empty() {
                return false;
            }
            taken = std::mem::take(&mut state.selection).into_cards();
            true
        });
        if !taken.is_empty() {
            tracing::info!("Finalized selection of {} cards", taken.len());
        }
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn setting_equal_value_does_not_notify() {
        let store = CatalogStore::new();
        let mut rx = store.subscribe();

        assert!(store.set_selected_colors(colors(&["red", "blue"])));
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        assert!(!store.set_selected_colors(colors(&["blue", "red"])));
        assert!(!store.set_cost_range(NumericRange::COST_DOMAIN));
        assert!(!store.set_selected_set(None));
        assert!(!store.set_trigger_filter(false));
        assert!(!store.set_search_query(""));
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn every_filter_setter_writes_its_field() {
        let store = CatalogStore::new();
        store.set_selected_set(Some("Romance Dawn".into()));
        store.set_selected_family(Some("Navy".into()));
        store.set_selected_types(colors(&["CHARACTER"]));
        store.set_selected_rarities(colors(&["SR"]));
        store.set_ability_filters(colors(&["Blocker"]));
        store.set_selected_attributes(colors(&["Slash"]));
        store.set_trigger_filter(true);
        store.set_power_range(NumericRange::new(4000, 6000));
        store.set_counter_range(NumericRange::new(1000, 2000));
        store.set_search_query("zoro");

        let filters = store.filters();
        assert_eq!(filters.selected_set.as_deref(), Some("Romance Dawn"));
        assert_eq!(filters.selected_family.as_deref(), Some("Navy"));
        assert!(filters.selected_types.contains("CHARACTER"));
        assert!(filters.selected_rarities.contains("SR"));
        assert!(filters.ability_filters.contains("Blocker"));
        assert!(filters.selected_attributes.contains("Slash"));
        assert!(filters.trigger_filter);
        assert_eq!(filters.power_range, NumericRange::new(4000, 6000));
        assert_eq!(filters.counter_range, NumericRange::new(1000, 2000));
        assert_eq!(filters.search_query, "zoro");

        assert!(store.reset_filters());
        assert!(store.filters().is_default());
        assert!(!store.reset_filters());
    }

    #[test]
    fn range_setter_does_not_validate_bounds() {
        let store = CatalogStore::new();
        assert!(store.set_cost_range(NumericRange::new(8, 99)));
        assert_eq!(store.filters().cost_range.max, 99);
    }

    #[test]
    fn selection_walkthrough() {
        let store = CatalogStore::new();

        store.update_card_quantity("c1", 1, "red", "Card1");
        let cards = store.selected_cards();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].card_id, "c1");
        assert_eq!(cards[0].quantity, 1);

        for _ in 0..3 {
            store.update_card_quantity("c1", 1, "red", "Card1");
        }
        assert_eq!(store.quantity_of("c1"), 4);

        assert!(!store.update_card_quantity("c1", 1, "red", "Card1"));
        assert_eq!(store.quantity_of("c1"), 4);

        for _ in 0..4 {
            store.update_card_quantity("c1", -1, "red", "Card1");
        }
        assert!(store.selected_cards().is_empty());
        assert_eq!(store.quantity_of("c1"), 0);
    }

    #[test]
    fn clamped_increment_does_not_notify() {
        let store = CatalogStore::new();
        for _ in 0..4 {
            store.update_card_quantity("c1", 1, "red", "Card1");
        }
        let mut rx = store.subscribe();
        store.update_card_quantity("c1", 1, "red", "Card1");
        assert!(!rx.has_changed().unwrap());
        store.update_card_quantity("c1", -1, "red", "Card1");
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();
    }

    #[test]
    fn take_selection_finalizes_and_clears() {
        let store = CatalogStore::new();
        store.update_card_quantity("a", 1, "red", "A");
        store.update_card_quantity("b", 1, "green", "B");
        store.update_card_quantity("b", 1, "green", "B");

        let taken = store.take_selection();
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[1].quantity, 2);
        assert!(store.selected_cards().is_empty());
        assert!(store.take_selection().is_empty());
    }

    #[test]
    fn set_selected_cards_replaces_wholesale() {
        let store = CatalogStore::new();
        store.update_card_quantity("a", 1, "red", "A");
        let replacement = vec![SelectedCard {
            card_id: "z".into(),
            name: "Z".into(),
            quantity: 3,
            color: "purple".into(),
        }];

        assert!(store.set_selected_cards(replacement.clone()));
        assert!(!store.set_selected_cards(replacement));
        assert_eq!(store.quantity_of("a"), 0);
        assert_eq!(store.quantity_of("z"), 3);

        assert!(store.clear_selection());
        assert!(store.snapshot().selection.is_empty());
    }

    #[test]
    fn store_is_shareable_across_threads() {
        let store = std::sync::Arc::new(CatalogStore::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store.update_card_quantity(&format!("c{i}"), 1, "red", "Card");
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.selected_cards().len(), 4);
    }
}
