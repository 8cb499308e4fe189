use std::collections::BTreeMap;

use crate::{
    constants::{DEFAULT_LIFE, LEADER_TYPE, PLAYSET_SIZE, POWER_BUCKET},
    error::{AppError, Result},
    models::{CurvePoint, DeckStatsRequest, DeckStatsResponse, StatCard},
};

/// Cost/power curves, counter spread and trigger odds for a deck list.
///
/// Leader entries are ignored; every other entry counts `quantity` times.
/// A quantity above the playset size is rejected.
pub fn compute_deck_stats(request: &DeckStatsRequest) -> Result<DeckStatsResponse> {
    if let Some((index, card)) = request
        .cards
        .iter()
        .enumerate()
        .find(|(_, c)| c.quantity > u32::from(PLAYSET_SIZE))
    {
        return Err(AppError::BadRequest(format!(
            "cards[{}].quantity {} exceeds {}",
            index, card.quantity, PLAYSET_SIZE
        )));
    }

    let cards: Vec<&StatCard> = request
        .cards
        .iter()
        .filter(|c| c.quantity > 0 && !is_leader(c))
        .collect();

    let mut cost_curve = BTreeMap::new();
    let mut power_curve = BTreeMap::new();
    let mut counter_distribution = BTreeMap::new();
    let mut total_cards = 0u32;
    let mut trigger_count = 0u32;
    let mut cost_sum = 0u64;
    let mut costed_cards = 0u32;

    for card in &cards {
        let q = card.quantity;
        total_cards += q;
        if card.trigger {
            trigger_count += q;
        }
        if let Some(cost) = card.cost {
            *cost_curve.entry(cost).or_insert(0) += q;
            cost_sum += u64::from(cost) * u64::from(q);
            costed_cards += q;
        }
        if let Some(power) = card.power {
            *power_curve.entry(power / POWER_BUCKET * POWER_BUCKET).or_insert(0) += q;
        }
        *counter_distribution
            .entry(card.counter.unwrap_or(0))
            .or_insert(0) += q;
    }

    let average_cost = if costed_cards == 0 {
        0.0
    } else {
        cost_sum as f64 / f64::from(costed_cards)
    };

    let life = request.life.unwrap_or(DEFAULT_LIFE);

    Ok(DeckStatsResponse {
        total_cards,
        average_cost,
        cost_curve: to_curve(cost_curve),
        power_curve: to_curve(power_curve),
        counter_distribution: to_curve(counter_distribution),
        trigger_count,
        trigger_probability: at_least_one_probability(total_cards, trigger_count, life),
    })
}

fn is_leader(card: &StatCard) -> bool {
    card.card_type
        .as_deref()
        .map(|t| t.eq_ignore_ascii_case(LEADER_TYPE))
        .unwrap_or(false)
}

fn to_curve(counts: BTreeMap<u32, u32>) -> Vec<CurvePoint> {
    counts
        .into_iter()
        .map(|(value, count)| CurvePoint { value, count })
        .collect()
}

/// Hypergeometric chance that `draws` cards taken from a deck of `deck_size`
/// contain at least one of `hits`.
pub fn at_least_one_probability(deck_size: u32, hits: u32, draws: u32) -> f64 {
    if deck_size == 0 || hits == 0 || draws == 0 {
        return 0.0;
    }
    let hits = hits.min(deck_size);
    let draws = draws.min(deck_size);
    let misses = deck_size - hits;
    if draws > misses {
        return 1.0;
    }

    let none = (0..draws).fold(1.0, |acc, i| {
        acc * f64::from(misses - i) / f64::from(deck_size - i)
    });
    1.0 - none
}
