use serde::{Deserialize, Serialize};

use crate::{
    constants::PLAYSET_SIZE,
    models::{DeckAddition, DeckEntry},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedCard {
    pub card_id: String,
    pub name: String,
    pub quantity: u8,
    pub color: String,
}

/// In-progress multi-card pick, ordered by first selection and unique by card id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    cards: Vec<SelectedCard>,
}

impl Selection {
    /// Builds a selection from an arbitrary list, keeping the first entry per
    /// card id, clamping quantities to the playset and dropping empty entries.
    pub fn from_cards(cards: Vec<SelectedCard>) -> Self {
        let mut selection = Selection::default();
        for mut card in cards {
            if selection.position(&card.card_id).is_some() {
                continue;
            }
            card.quantity = card.quantity.min(PLAYSET_SIZE);
            if card.quantity > 0 {
                selection.cards.push(card);
            }
        }
        selection
    }

    pub fn cards(&self) -> &[SelectedCard] {
        &self.cards
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn total_quantity(&self) -> u32 {
        self.cards.iter().map(|c| u32::from(c.quantity)).sum()
    }

    /// Absent cards are implicitly at quantity 0.
    pub fn quantity_of(&self, card_id: &str) -> u8 {
        self.position(card_id)
            .map(|idx| self.cards[idx].quantity)
            .unwrap_or(0)
    }

    /// Applies `delta` to one card and reports whether the selection changed.
    ///
    /// Existing entries are clamped to `[0, PLAYSET_SIZE]` and removed at 0.
    /// A fresh entry always starts at 1, whatever the magnitude of a positive
    /// delta; non-positive deltas on absent cards do nothing.
    pub fn update_quantity(&mut self, card_id: &str, delta: i32, color: &str, name: &str) -> bool {
        match self.position(card_id) {
            Some(idx) => {
                let current = i64::from(self.cards[idx].quantity);
                let next = (current + i64::from(delta)).clamp(0, i64::from(PLAYSET_SIZE)) as u8;
                if next == 0 {
                    self.cards.remove(idx);
                    true
                } else if next == self.cards[idx].quantity {
                    false
                } else {
                    self.cards[idx].quantity = next;
                    true
                }
            }
            None if delta > 0 => {
                self.cards.push(SelectedCard {
                    card_id: card_id.to_string(),
                    name: name.to_string(),
                    quantity: 1,
                    color: color.to_string(),
                });
                true
            }
            None => false,
        }
    }

    pub fn into_cards(self) -> Vec<SelectedCard> {
        self.cards
    }

    fn position(&self, card_id: &str) -> Option<usize> {
        self.cards.iter().position(|c| c.card_id == card_id)
    }
}

/// Turns a finished selection into persistence additions for `deck_id`.
///
/// Each addition is capped so the deck never holds more than a playset of a
/// card; cards already at the cap produce nothing.
pub fn merge_selection(
    deck_id: &str,
    current: &[DeckEntry],
    selection: &[SelectedCard],
) -> Vec<DeckAddition> {
    selection
        .iter()
        .filter_map(|card| {
            let owned: u8 = current
                .iter()
                .filter(|entry| entry.card_id == card.card_id)
                .map(|entry| entry.quantity)
                .fold(0u8, |acc, q| acc.saturating_add(q));
            let room = PLAYSET_SIZE.saturating_sub(owned);
            let quantity = card.quantity.min(room);
            if quantity == 0 {
                tracing::debug!(card_id = %card.card_id, owned, "skipping card already at playset");
                return None;
            }
            Some(DeckAddition {
                deck_id: deck_id.to_string(),
                card_id: card.card_id.clone(),
                quantity,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected(id: &str, quantity: u8) -> SelectedCard {
        SelectedCard {
            card_id: id.into(),
            name: format!("Card {id}"),
            quantity,
            color: "Red".into(),
        }
    }

    #[test]
    fn quantity_never_leaves_playset_bounds() {
        let mut selection = Selection::default();
        let deltas = [1, 1, -1, 1, 1, 1, 1, 1, -1, -1, -1, -1, -1, -1, 1, -1, 1];
        for delta in deltas {
            selection.update_quantity("c1", delta, "red", "Card1");
            let q = selection.quantity_of("c1");
            assert!(q <= PLAYSET_SIZE);
            assert_eq!(q == 0, selection.is_empty());
        }
    }

    #[test]
    fn positive_delta_on_absent_card_starts_at_one() {
        let mut selection = Selection::default();
        assert!(selection.update_quantity("c1", 3, "red", "Card1"));
        assert_eq!(selection.quantity_of("c1"), 1);
    }

    #[test]
    fn non_positive_delta_on_absent_card_is_noop() {
        let mut selection = Selection::default();
        assert!(!selection.update_quantity("c1", 0, "red", "Card1"));
        assert!(!selection.update_quantity("c1", -1, "red", "Card1"));
        assert!(selection.is_empty());
    }

    #[test]
    fn large_delta_on_existing_card_clamps() {
        let mut selection = Selection::default();
        selection.update_quantity("c1", 1, "red", "Card1");
        assert!(selection.update_quantity("c1", 10, "red", "Card1"));
        assert_eq!(selection.quantity_of("c1"), 4);
        assert!(!selection.update_quantity("c1", 1, "red", "Card1"));
        assert!(selection.update_quantity("c1", -10, "red", "Card1"));
        assert!(selection.is_empty());
    }

    #[test]
    fn entries_keep_first_selection_order() {
        let mut selection = Selection::default();
        selection.update_quantity("b", 1, "blue", "B");
        selection.update_quantity("a", 1, "red", "A");
        selection.update_quantity("b", 1, "blue", "B");
        let ids: Vec<_> = selection.cards().iter().map(|c| c.card_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(selection.total_quantity(), 3);
    }

    #[test]
    fn from_cards_dedupes_and_clamps() {
        let selection = Selection::from_cards(vec![
            selected("a", 9),
            selected("b", 0),
            selected("a", 2),
        ]);
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.quantity_of("a"), 4);
    }

    #[test]
    fn merge_caps_additions_at_playset() {
        let current = vec![
            DeckEntry { card_id: "a".into(), quantity: 3 },
            DeckEntry { card_id: "b".into(), quantity: 4 },
        ];
        let selection = vec![selected("a", 2), selected("b", 1), selected("c", 4)];

        let additions = merge_selection("deck-1", &current, &selection);

        assert_eq!(
            additions,
            vec![
                DeckAddition { deck_id: "deck-1".into(), card_id: "a".into(), quantity: 1 },
                DeckAddition { deck_id: "deck-1".into(), card_id: "c".into(), quantity: 4 },
            ]
        );
    }
}
