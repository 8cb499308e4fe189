use axum::{extract::rejection::JsonRejection, Json};

use crate::{
    error::Result,
    models::{ApiResponse, DeckStatsRequest, DeckStatsResponse},
    services::compute_deck_stats,
};

use super::json_body;

/// POST /deck-stats
pub async fn get_deck_stats(
    payload: std::result::Result<Json<DeckStatsRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<DeckStatsResponse>>> {
    let req = json_body(payload)?;
    let stats = compute_deck_stats(&req)?;
    tracing::debug!(
        "Deck stats: {} cards, {} triggers",
        stats.total_cards,
        stats.trigger_count
    );
    Ok(Json(ApiResponse::success(stats)))
}
