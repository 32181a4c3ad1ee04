//! Board layout calculations - sizing and coordinate transformations.

use crate::ui::theme::{BOARD_PADDING, PIECE_SCALE};
use gpui::{Pixels, Size, px};

use crate::domain::square_to_rowcol;
use shakmaty::Square;

/// Handles all layout calculations for the chess board
#[derive(Clone, Copy, Debug)]
pub struct BoardLayout {
    pub panel_size: Size<Pixels>,
}

impl BoardLayout {
    pub fn new(panel_size: Size<Pixels>) -> Self {
        Self { panel_size }
    }

    /// Calculate square size from measured panel dimensions
    pub fn square_size(&self) -> f32 {
        let panel_width: f32 = self.panel_size.width.into();
        let panel_height: f32 = self.panel_size.height.into();
        let available_width = panel_width - BOARD_PADDING * 2.0;
        let available_height = panel_height - BOARD_PADDING * 2.0;
        (available_width.min(available_height) / 8.0).max(30.0)
    }

    /// Calculate piece size based on square size
    pub fn piece_size(&self) -> f32 {
        self.square_size() * PIECE_SCALE
    }

    /// Convert position relative to board panel to board row/col (if within board)
    pub fn pos_to_square(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let board_x = x - BOARD_PADDING;
        let board_y = y - BOARD_PADDING;

        if board_x < 0.0 || board_y < 0.0 {
            return None;
        }

        let square_size = self.square_size();
        let col = (board_x / square_size) as usize;
        let row = (board_y / square_size) as usize;

        if row < 8 && col < 8 {
            Some((row, col))
        } else {
            None
        }
    }

    /// Pixel center of a square, relative to the board panel. Used for
    /// placing the animation overlay.
    pub fn square_center(&self, sq: Square) -> (f32, f32) {
        let (row, col) = square_to_rowcol(sq);
        let square_size = self.square_size();
        (
            BOARD_PADDING + (col as f32 + 0.5) * square_size,
            BOARD_PADDING + (row as f32 + 0.5) * square_size,
        )
    }

    /// Get the total size of the board (8 squares)
    pub fn board_total_size(&self) -> f32 {
        self.square_size() * 8.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> BoardLayout {
        BoardLayout::new(Size {
            width: px(BOARD_PADDING * 2.0 + 400.0),
            height: px(BOARD_PADDING * 2.0 + 400.0),
        })
    }

    #[test]
    fn test_pos_to_square_hit_testing() {
        let layout = layout();
        assert_eq!(layout.square_size(), 50.0);

        // Inside the top-left square
        assert_eq!(layout.pos_to_square(BOARD_PADDING + 1.0, BOARD_PADDING + 1.0), Some((0, 0)));
        // In the margin
        assert_eq!(layout.pos_to_square(1.0, 1.0), None);
        // Past the bottom-right corner
        assert_eq!(
            layout.pos_to_square(BOARD_PADDING + 401.0, BOARD_PADDING + 401.0),
            None
        );
    }

    #[test]
    fn test_square_center() {
        let layout = layout();
        // a8 is the top-left square
        let (x, y) = layout.square_center(Square::A8);
        assert_eq!((x, y), (BOARD_PADDING + 25.0, BOARD_PADDING + 25.0));

        // h1 is the bottom-right square
        let (x, y) = layout.square_center(Square::H1);
        assert_eq!((x, y), (BOARD_PADDING + 375.0, BOARD_PADDING + 375.0));
    }
}
