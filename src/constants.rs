/// Application constants

// Deck rules
pub const PLAYSET_SIZE: u8 = 4; // max copies of one card in a deck
pub const DEFAULT_LIFE: u32 = 5;
pub const LEADER_TYPE: &str = "LEADER";

// Filter domains (inclusive)
pub const COST_MIN: u32 = 0;
pub const COST_MAX: u32 = 10;
pub const POWER_MIN: u32 = 0;
pub const POWER_MAX: u32 = 13_000;
pub const COUNTER_MIN: u32 = 0;
pub const COUNTER_MAX: u32 = 2_000;
pub const POWER_BUCKET: u32 = 1_000;

// Deck image layout (pixels)
pub const CARD_WIDTH: u32 = 180;
pub const CARD_HEIGHT: u32 = 252;
pub const LEADER_WIDTH: u32 = 270;
pub const LEADER_HEIGHT: u32 = 378;
pub const GRID_GAP: u32 = 20;
pub const GRID_COLUMNS: u32 = 4;
pub const FOOTER_HEIGHT: u32 = 60;
pub const BADGE_RADIUS: u32 = 20;
pub const LEADER_NAME_OFFSET: u32 = 12;
pub const LEADER_NAME_SCALE: f32 = 28.0;
pub const BADGE_TEXT_SCALE: f32 = 24.0;

// Deck image colors (RGBA)
pub const BACKGROUND_COLOR: [u8; 4] = [24, 24, 27, 255];
pub const BADGE_FILL_COLOR: [u8; 4] = [196, 30, 58, 255];
pub const BADGE_BORDER_COLOR: [u8; 4] = [255, 255, 255, 255];
pub const TEXT_COLOR: [u8; 4] = [255, 255, 255, 255];

// API version
pub const API_VERSION: &str = "v1";
