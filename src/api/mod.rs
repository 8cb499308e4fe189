// src/api/mod.rs

pub mod deck_image;
pub mod deck_stats;
pub mod health;

use ab_glyph::FontArc;
use axum::{
    extract::rejection::JsonRejection,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::services::ImageSource;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub images: Arc<dyn ImageSource>,
    pub font: FontArc,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Deck sharing
        .route("/deck-image", post(deck_image::create_deck_image))
        // Deck analysis
        .route("/deck-stats", post(deck_stats::get_deck_stats))
        .with_state(state)
}

/// Unwraps a JSON body, reporting malformed input as a 400 with the usual error shape.
pub fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}
