// src/models/mod.rs
pub mod card;
pub mod deck;

pub use card::CatalogCard;
pub use deck::{
    ApiResponse,
    CurvePoint,
    DeckAddition,
    DeckCardRef,
    DeckEntry,
    DeckImageRequest,
    DeckStatsRequest,
    DeckStatsResponse,
    StatCard,
};
