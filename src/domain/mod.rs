//! Pure game logic: no GPUI dependencies below this line.

pub mod animation;
pub mod captures;
pub mod chess;
pub mod render;
pub mod selection;
pub mod uci;

pub use animation::{AnimationFrame, AnimationSequencer, DEFAULT_FRAME_MS, DEFAULT_STEPS};
pub use captures::CaptureTracker;
pub use chess::{
    Piece, PieceColor, PieceKind, role_to_kind, shakmaty_to_piece, square_to_rowcol, to_square,
};
pub use render::{BoardSnapshot, RenderSquare, SquareFill};
pub use selection::{ClickOutcome, Selection, find_matching_move, move_endpoints};
