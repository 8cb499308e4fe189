use ab_glyph::{FontArc, PxScale};
use image::{imageops, DynamicImage, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_text_mut, text_size};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    constants::{
        BACKGROUND_COLOR, BADGE_BORDER_COLOR, BADGE_FILL_COLOR, BADGE_RADIUS, BADGE_TEXT_SCALE,
        CARD_HEIGHT, CARD_WIDTH, FOOTER_HEIGHT, GRID_COLUMNS, GRID_GAP, LEADER_HEIGHT,
        LEADER_NAME_OFFSET, LEADER_NAME_SCALE, LEADER_WIDTH, TEXT_COLOR,
    },
    error::{AppError, Result},
    models::DeckImageRequest,
};

use super::image_fetcher::{fetch_all, ImageSource};

// ==================== LAYOUT ====================

/// Fixed geometry of a shared deck image.
///
/// The leader sits at the top-left; every other card goes into a grid to its
/// right, row-major, with a quantity badge on each cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckLayout {
    pub card_width: u32,
    pub card_height: u32,
    pub leader_width: u32,
    pub leader_height: u32,
    pub gap: u32,
    pub columns: u32,
    pub footer_height: u32,
    pub badge_radius: u32,
}

impl Default for DeckLayout {
    fn default() -> Self {
        Self {
            card_width: CARD_WIDTH,
            card_height: CARD_HEIGHT,
            leader_width: LEADER_WIDTH,
            leader_height: LEADER_HEIGHT,
            gap: GRID_GAP,
            columns: GRID_COLUMNS,
            footer_height: FOOTER_HEIGHT,
            badge_radius: BADGE_RADIUS,
        }
    }
}

impl DeckLayout {
    /// Grid rows needed for `total_cards` (leader included).
    pub fn rows(&self, total_cards: usize) -> u32 {
        let grid_cards = total_cards.saturating_sub(1) as u32;
        grid_cards.div_ceil(self.columns)
    }

    /// `(width, height)` of the canvas for `total_cards` (leader included).
    pub fn canvas_size(&self, total_cards: usize) -> (u32, u32) {
        let width = self.gap
            + self.leader_width
            + self.gap
            + self.columns * (self.card_width + self.gap);
        let grid_height = self.rows(total_cards) * (self.card_height + self.gap);
        let height = self.gap + self.leader_height.max(grid_height) + self.footer_height;
        (width, height)
    }

    pub fn leader_origin(&self) -> (u32, u32) {
        (self.gap, self.gap)
    }

    pub fn leader_name_origin(&self) -> (u32, u32) {
        (self.gap, self.gap + self.leader_height + LEADER_NAME_OFFSET)
    }

    pub fn grid_origin(&self) -> (u32, u32) {
        (self.gap + self.leader_width + self.gap, self.gap)
    }

    /// Top-left corner of grid cell `index` (0 = first non-leader card).
    pub fn cell_origin(&self, index: usize) -> (u32, u32) {
        let (gx, gy) = self.grid_origin();
        let (dx, dy) = grid_position(
            index,
            self.columns,
            (self.card_width, self.card_height),
            self.gap,
        );
        (gx + dx, gy + dy)
    }

    /// Badge centre, tucked into the bottom-right corner of the cell.
    pub fn badge_center(&self, index: usize) -> (u32, u32) {
        let (x, y) = self.cell_origin(index);
        (
            x + self.card_width - self.badge_radius,
            y + self.card_height - self.badge_radius,
        )
    }
}

/// Offset of cell `index` inside a row-major grid.
pub fn grid_position(index: usize, columns: u32, cell: (u32, u32), gap: u32) -> (u32, u32) {
    let columns = columns.max(1) as usize;
    let col = (index % columns) as u32;
    let row = (index / columns) as u32;
    (col * (cell.0 + gap), row * (cell.1 + gap))
}

// ==================== DRAWING ====================

pub struct GridCard {
    pub image: DynamicImage,
    pub quantity: u32,
}

/// Paints the whole deck in one pass. All artwork must already be decoded.
pub fn compose(
    layout: &DeckLayout,
    leader: &DynamicImage,
    leader_name: &str,
    grid: &[GridCard],
    font: &FontArc,
) -> RgbaImage {
    let (width, height) = layout.canvas_size(grid.len() + 1);
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba(BACKGROUND_COLOR));

    let (lx, ly) = layout.leader_origin();
    paste(
        &mut canvas,
        leader,
        (lx, ly),
        (layout.leader_width, layout.leader_height),
    );

    if !leader_name.trim().is_empty() {
        let (nx, ny) = layout.leader_name_origin();
        draw_text_mut(
            &mut canvas,
            Rgba(TEXT_COLOR),
            nx as i32,
            ny as i32,
            PxScale::from(LEADER_NAME_SCALE),
            font,
            leader_name.trim(),
        );
    }

    for (index, card) in grid.iter().enumerate() {
        paste(
            &mut canvas,
            &card.image,
            layout.cell_origin(index),
            (layout.card_width, layout.card_height),
        );
        draw_badge(&mut canvas, layout, index, card.quantity, font);
    }

    canvas
}

fn paste(canvas: &mut RgbaImage, art: &DynamicImage, at: (u32, u32), size: (u32, u32)) {
    let resized = imageops::resize(art, size.0, size.1, imageops::FilterType::Triangle);
    imageops::overlay(canvas, &resized, i64::from(at.0), i64::from(at.1));
}

fn draw_badge(
    canvas: &mut RgbaImage,
    layout: &DeckLayout,
    index: usize,
    quantity: u32,
    font: &FontArc,
) {
    let (cx, cy) = layout.badge_center(index);
    let center = (cx as i32, cy as i32);
    let radius = layout.badge_radius as i32;

    draw_filled_circle_mut(canvas, center, radius, Rgba(BADGE_BORDER_COLOR));
    draw_filled_circle_mut(canvas, center, radius - 2, Rgba(BADGE_FILL_COLOR));

    let label = quantity.to_string();
    let scale = PxScale::from(BADGE_TEXT_SCALE);
    let (tw, th) = text_size(scale, font, &label);
    draw_text_mut(
        canvas,
        Rgba(TEXT_COLOR),
        center.0 - tw as i32 / 2,
        center.1 - th as i32 / 2,
        scale,
        font,
        &label,
    );
}

pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    canvas.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

/// DejaVu Sans Bold, shipped with the binary so text never depends on the host.
const BUNDLED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

pub fn default_font() -> Result<FontArc> {
    FontArc::try_from_slice(BUNDLED_FONT)
        .map_err(|e| AppError::Internal(format!("bundled font: {}", e)))
}

pub fn load_font(path: &str) -> Result<FontArc> {
    let bytes = std::fs::read(path)
        .map_err(|e| AppError::Internal(format!("font {}: {}", path, e)))?;
    FontArc::try_from_vec(bytes).map_err(|e| AppError::Internal(format!("font {}: {}", path, e)))
}

/// The configured font file if there is one, else the bundled font.
pub fn resolve_font(path: Option<&str>) -> Result<FontArc> {
    match path {
        Some(path) => load_font(path),
        None => default_font(),
    }
}

// ==================== COMPOSITOR ====================

/// Deck Image Compositor - renders a shareable PNG of a deck
pub struct DeckCompositor {
    images: Arc<dyn ImageSource>,
    font: FontArc,
    fetch_timeout: Option<Duration>,
    layout: DeckLayout,
}

impl DeckCompositor {
    pub fn new(
        images: Arc<dyn ImageSource>,
        font: FontArc,
        fetch_timeout: Option<Duration>,
    ) -> Self {
        Self {
            images,
            font,
            fetch_timeout,
            layout: DeckLayout::default(),
        }
    }

    pub fn layout(&self) -> &DeckLayout {
        &self.layout
    }

    /// Fetches every card image, then draws and encodes the deck.
    ///
    /// Any single fetch or decode failure fails the whole render.
    pub async fn render(&self, request: &DeckImageRequest) -> Result<Vec<u8>> {
        if request.cards.is_empty() {
            return Err(AppError::BadRequest("cards must not be empty".into()));
        }

        let urls: Vec<String> = request.cards.iter().map(|c| c.image.clone()).collect();
        let fetched = fetch_all(self.images.as_ref(), &urls, self.fetch_timeout).await?;
        tracing::debug!("Fetched {} card images", fetched.len());

        let quantities: Vec<u32> = request.cards.iter().map(|c| c.quantity).collect();
        let leader_name = request.leader_name.clone();
        let layout = self.layout;
        let font = self.font.clone();

        tokio::task::spawn_blocking(move || -> Result<Vec<u8>> {
            let mut decoded = fetched
                .iter()
                .map(|f| f.decode())
                .collect::<std::result::Result<Vec<_>, _>>()?
                .into_iter();
            let leader = decoded
                .next()
                .ok_or_else(|| AppError::Internal("leader image missing".into()))?;
            let grid: Vec<GridCard> = decoded
                .zip(quantities.into_iter().skip(1))
                .map(|(image, quantity)| GridCard { image, quantity })
                .collect();

            let canvas = compose(&layout, &leader, &leader_name, &grid, &font);
            encode_png(&canvas)
        })
        .await?
    }
}
