use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::Result,
    models::DeckImageRequest,
    services::DeckCompositor,
    utils::ensure_card_limit,
};

use super::{json_body, AppState};

/// POST /deck-image
pub async fn create_deck_image(
    State(state): State<AppState>,
    payload: std::result::Result<Json<DeckImageRequest>, JsonRejection>,
) -> Result<Response> {
    let req = json_body(payload)?;
    ensure_card_limit(req.cards.len(), state.config.max_deck_image_cards)?;

    tracing::info!(
        "Rendering deck image: {} cards, leader {:?}",
        req.cards.len(),
        req.leader_name
    );

    let compositor = DeckCompositor::new(
        state.images.clone(),
        state.font.clone(),
        state.config.image_fetch_timeout(),
    );
    let png = compositor.render(&req).await?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}
