//! Theme constants and colors for the chess UI.

use gpui::{Rgba, rgb};

use crate::domain::SquareFill;

// Layout constants
pub const BOARD_PADDING: f32 = 20.0;
pub const PIECE_SCALE: f32 = 0.98; // piece size relative to square
pub const CAPTURED_PIECE_SIZE: f32 = 28.0;

// Initial panel sizes
pub const INITIAL_LEFT_PANEL: f32 = 540.0;
pub const INITIAL_RIGHT_PANEL: f32 = 280.0;

// Board colors
pub const LIGHT_SQUARE: u32 = 0xEFD9B5;
pub const DARK_SQUARE: u32 = 0xB48764;
pub const DESTINATION_SQUARE: u32 = 0xADD8E6;
pub const LAST_MOVE_FROM: u32 = 0xFFFFCC;
pub const LAST_MOVE_TO: u32 = 0xCCFFCC;
pub const CHECK_SQUARE: u32 = 0xFF6666;

// Panel colors
pub const PANEL_BG: u32 = 0x2a2a2a;
pub const SIDE_PANEL_BG: u32 = 0x1e1e1e;
pub const BORDER_COLOR: u32 = 0x4a4a4a;
pub const TEXT_PRIMARY: u32 = 0xffffff;
pub const TEXT_SECONDARY: u32 = 0x888888;
pub const STATUS_OK: u32 = 0x4ade80;
pub const STATUS_WARNING: u32 = 0xfbbf24;
pub const STATUS_ERROR: u32 = 0xf87171;

/// Map a derived square fill to its paint color.
pub fn fill_color(fill: SquareFill) -> Rgba {
    match fill {
        SquareFill::Check => rgb(CHECK_SQUARE),
        SquareFill::Destination => rgb(DESTINATION_SQUARE),
        SquareFill::LastMoveFrom => rgb(LAST_MOVE_FROM),
        SquareFill::LastMoveTo => rgb(LAST_MOVE_TO),
        SquareFill::Light => rgb(LIGHT_SQUARE),
        SquareFill::Dark => rgb(DARK_SQUARE),
    }
}
