//! Derived render state for the board.
//!
//! `BoardSnapshot::derive` is a pure function of the game state; the draw
//! code consumes the snapshot and holds no per-square state of its own.
//! Recomputed on every change, never cached across moves.

use shakmaty::{Chess, Position, Square};

use crate::domain::{Piece, Selection, shakmaty_to_piece, to_square};

/// How a square's background is painted. Ordered by precedence: check
/// beats destination beats last-move beats the plain checkerboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SquareFill {
    Check,
    Destination,
    LastMoveFrom,
    LastMoveTo,
    Light,
    Dark,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderSquare {
    pub fill: SquareFill,
    pub piece: Option<Piece>,
}

/// A full redraw's worth of board state, indexed by row-major (row, col)
/// with row 0 = rank 8.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardSnapshot {
    squares: [RenderSquare; 64],
}

impl BoardSnapshot {
    pub fn derive(
        position: &Chess,
        selection: &Selection,
        last_move: Option<(Square, Square)>,
    ) -> Self {
        let checked_king = if position.is_check() {
            position.board().king_of(position.turn())
        } else {
            None
        };

        let mut squares = [RenderSquare {
            fill: SquareFill::Light,
            piece: None,
        }; 64];

        for row in 0..8 {
            for col in 0..8 {
                let sq = to_square(row, col);
                let fill = if checked_king == Some(sq) {
                    SquareFill::Check
                } else if selection.is_destination(sq) {
                    SquareFill::Destination
                } else if last_move.map(|(from, _)| from) == Some(sq) {
                    SquareFill::LastMoveFrom
                } else if last_move.map(|(_, to)| to) == Some(sq) {
                    SquareFill::LastMoveTo
                } else if (row + col) % 2 == 0 {
                    SquareFill::Light
                } else {
                    SquareFill::Dark
                };

                squares[row * 8 + col] = RenderSquare {
                    fill,
                    piece: position.board().piece_at(sq).map(shakmaty_to_piece),
                };
            }
        }

        Self { squares }
    }

    pub fn square(&self, row: usize, col: usize) -> RenderSquare {
        self.squares[row * 8 + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PieceColor, PieceKind};
    use shakmaty::CastlingMode;
    use shakmaty::fen::Fen;

    fn position(fen: &str) -> Chess {
        fen.parse::<Fen>()
            .unwrap()
            .into_position(CastlingMode::Standard)
            .unwrap()
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let pos = Chess::default();
        let mut sel = Selection::new();
        sel.click(&pos, Square::G1);

        let last_move = Some((Square::E2, Square::E4));
        let a = BoardSnapshot::derive(&pos, &sel, last_move);
        let b = BoardSnapshot::derive(&pos, &sel, last_move);
        assert_eq!(a, b);
    }

    #[test]
    fn test_starting_position_checkerboard_and_glyphs() {
        let pos = Chess::default();
        let snap = BoardSnapshot::derive(&pos, &Selection::new(), None);

        // a8 is light, b8 dark
        assert_eq!(snap.square(0, 0).fill, SquareFill::Light);
        assert_eq!(snap.square(0, 1).fill, SquareFill::Dark);

        // White king on e1, empty square on e4
        let king = snap.square(7, 4).piece.expect("king glyph");
        assert_eq!(king.kind, PieceKind::King);
        assert_eq!(king.color, PieceColor::White);
        assert!(snap.square(4, 4).piece.is_none());
    }

    #[test]
    fn test_last_move_highlight() {
        let pos = Chess::default();
        let snap = BoardSnapshot::derive(
            &pos,
            &Selection::new(),
            Some((Square::E2, Square::E4)),
        );

        assert_eq!(snap.square(6, 4).fill, SquareFill::LastMoveFrom);
        assert_eq!(snap.square(4, 4).fill, SquareFill::LastMoveTo);
    }

    #[test]
    fn test_destination_beats_last_move() {
        let pos = Chess::default();
        let mut sel = Selection::new();
        sel.click(&pos, Square::E2);

        // e4 is both a legal destination and the fake last-move target
        let snap = BoardSnapshot::derive(&pos, &sel, Some((Square::D2, Square::E4)));
        assert_eq!(snap.square(4, 4).fill, SquareFill::Destination);
    }

    #[test]
    fn test_check_beats_destination() {
        // White king on e1 in check from the e8 rook; king can step aside,
        // so selecting it yields destinations while e1 stays check-colored.
        let pos = position("4r2k/8/8/8/8/8/8/4K3 w - - 0 1");
        let mut sel = Selection::new();
        sel.click(&pos, Square::E1);

        let snap = BoardSnapshot::derive(&pos, &sel, None);
        assert_eq!(snap.square(7, 4).fill, SquareFill::Check);
        // A sideways escape square is destination-colored
        assert_eq!(snap.square(7, 3).fill, SquareFill::Destination);
    }

    #[test]
    fn test_no_check_highlight_when_not_in_check() {
        let pos = Chess::default();
        let snap = BoardSnapshot::derive(&pos, &Selection::new(), None);
        for row in 0..8 {
            for col in 0..8 {
                assert_ne!(snap.square(row, col).fill, SquareFill::Check);
            }
        }
    }
}
