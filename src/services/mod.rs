// All service modules
pub mod deck_compositor;
pub mod deck_stats;
pub mod image_fetcher;

// Re-export for convenience
pub use deck_compositor::{DeckCompositor, DeckLayout};
pub use deck_stats::compute_deck_stats;
pub use image_fetcher::{HttpImageSource, ImageSource};
