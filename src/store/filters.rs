use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::{
    constants::{COST_MAX, COST_MIN, COUNTER_MAX, COUNTER_MIN, POWER_MAX, POWER_MIN},
    models::CatalogCard,
};

/// Closed numeric interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: u32,
    pub max: u32,
}

impl NumericRange {
    pub const COST_DOMAIN: NumericRange = NumericRange::new(COST_MIN, COST_MAX);
    pub const POWER_DOMAIN: NumericRange = NumericRange::new(POWER_MIN, POWER_MAX);
    pub const COUNTER_DOMAIN: NumericRange = NumericRange::new(COUNTER_MIN, COUNTER_MAX);

    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u32) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn covers(&self, other: &NumericRange) -> bool {
        self.min <= other.min && other.max <= self.max
    }
}

/// Catalog filter criteria shared by the list screens.
///
/// Sets are ordered so two states built in different insertion orders
/// still compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub selected_colors: BTreeSet<String>,
    pub selected_set: Option<String>,
    pub selected_family: Option<String>,
    pub selected_types: BTreeSet<String>,
    pub selected_rarities: BTreeSet<String>,
    pub ability_filters: BTreeSet<String>,
    pub selected_attributes: BTreeSet<String>,
    pub trigger_filter: bool,
    pub cost_range: NumericRange,
    pub power_range: NumericRange,
    pub counter_range: NumericRange,
    pub search_query: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            selected_colors: BTreeSet::new(),
            selected_set: None,
            selected_family: None,
            selected_types: BTreeSet::new(),
            selected_rarities: BTreeSet::new(),
            ability_filters: BTreeSet::new(),
            selected_attributes: BTreeSet::new(),
            trigger_filter: false,
            cost_range: NumericRange::COST_DOMAIN,
            power_range: NumericRange::POWER_DOMAIN,
            counter_range: NumericRange::COUNTER_DOMAIN,
            search_query: String::new(),
        }
    }
}

impl FilterState {
    pub fn is_default(&self) -> bool {
        *self == FilterState::default()
    }

    pub fn matches(&self, card: &CatalogCard) -> bool {
        if !self.selected_colors.is_empty()
            && !card
                .colors()
                .any(|color| contains_ignore_case(&self.selected_colors, color))
        {
            return false;
        }

        if let Some(set) = &self.selected_set {
            if card.set_name != *set {
                return false;
            }
        }

        if let Some(family) = &self.selected_family {
            if !card.families().any(|f| f.eq_ignore_ascii_case(family)) {
                return false;
            }
        }

        if !matches_any(&self.selected_types, &card.card_type)
            || !matches_any(&self.selected_rarities, &card.rarity)
            || !matches_any(
                &self.selected_attributes,
                card.attribute.as_deref().unwrap_or_default(),
            )
        {
            return false;
        }

        if !self.ability_filters.is_empty() {
            let ability = card.ability.to_lowercase();
            if !self
                .ability_filters
                .iter()
                .all(|keyword| ability.contains(&keyword.to_lowercase()))
            {
                return false;
            }
        }

        if self.trigger_filter && !card.has_trigger() {
            return false;
        }

        range_matches(&self.cost_range, &NumericRange::COST_DOMAIN, card.cost)
            && range_matches(&self.power_range, &NumericRange::POWER_DOMAIN, card.power)
            && range_matches(&self.counter_range, &NumericRange::COUNTER_DOMAIN, card.counter)
            && self.matches_query(card)
    }

    pub fn apply<'a>(&self, cards: &'a [CatalogCard]) -> Vec<&'a CatalogCard> {
        cards.iter().filter(|card| self.matches(card)).collect()
    }

    fn matches_query(&self, card: &CatalogCard) -> bool {
        let query = self.search_query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        card.name.to_lowercase().contains(&query) || card.code.to_lowercase().contains(&query)
    }
}

fn contains_ignore_case(set: &BTreeSet<String>, value: &str) -> bool {
    set.iter().any(|s| s.eq_ignore_ascii_case(value))
}

fn matches_any(set: &BTreeSet<String>, value: &str) -> bool {
    set.is_empty() || contains_ignore_case(set, value)
}

// Cards lacking a stat only survive an untouched range.
fn range_matches(range: &NumericRange, domain: &NumericRange, value: Option<u32>) -> bool {
    match value {
        Some(v) => range.contains(v),
        None => range.covers(domain),
    }
}
