//! Square rendering component.

use crate::domain::RenderSquare;
use crate::ui::components::render_piece;
use crate::ui::theme::fill_color;
use gpui::{div, prelude::*, px};

/// Render a single board square from its derived render state.
/// `suppress_piece` hides the static glyph while the same piece is being
/// drawn as an animation overlay.
pub fn render_square(
    square: RenderSquare,
    suppress_piece: bool,
    square_size: f32,
    piece_size: f32,
) -> impl IntoElement {
    div()
        .flex_shrink_0() // never shrink - maintain aspect ratio
        .size(px(square_size))
        .bg(fill_color(square.fill))
        .flex()
        .items_center()
        .justify_center()
        .when_some(square.piece, |el, p| {
            if suppress_piece {
                el
            } else {
                el.child(render_piece(p, piece_size))
            }
        })
}
