//! Deck backend: catalog filter/selection state and the deck-image compositor.

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;
