//! Pure chess domain types and utilities.
//! No GPUI dependencies - this is the domain layer.

use shakmaty::{Color as SColor, File, Rank, Role, Square};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Conventional material value in pawns. The king scores zero because
    /// it can never be captured.
    pub fn value(&self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    pub fn opposite(&self) -> PieceColor {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }
}

impl From<SColor> for PieceColor {
    fn from(color: SColor) -> Self {
        match color {
            SColor::White => PieceColor::White,
            SColor::Black => PieceColor::Black,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: PieceColor,
}

impl Piece {
    /// Asset path for this piece's glyph. Exhaustive so a new piece kind
    /// cannot ship without artwork.
    pub fn svg_path(&self) -> &'static str {
        match (self.kind, self.color) {
            (PieceKind::Pawn, PieceColor::White) => "assets/pawn-white.svg",
            (PieceKind::Pawn, PieceColor::Black) => "assets/pawn-black.svg",
            (PieceKind::Rook, PieceColor::White) => "assets/rook-white.svg",
            (PieceKind::Rook, PieceColor::Black) => "assets/rook-black.svg",
            (PieceKind::Knight, PieceColor::White) => "assets/knight-white.svg",
            (PieceKind::Knight, PieceColor::Black) => "assets/knight-black.svg",
            (PieceKind::Bishop, PieceColor::White) => "assets/bishop-white.svg",
            (PieceKind::Bishop, PieceColor::Black) => "assets/bishop-black.svg",
            (PieceKind::Queen, PieceColor::White) => "assets/queen-white.svg",
            (PieceKind::Queen, PieceColor::Black) => "assets/queen-black.svg",
            (PieceKind::King, PieceColor::White) => "assets/king-white.svg",
            (PieceKind::King, PieceColor::Black) => "assets/king-black.svg",
        }
    }
}

/// Convert row/col (0-indexed, row 0 = rank 8) to shakmaty Square
pub fn to_square(row: usize, col: usize) -> Square {
    let file = File::new(col as u32);
    let rank = Rank::new(7 - row as u32); // row 0 = rank 8, row 7 = rank 1
    Square::from_coords(file, rank)
}

/// Convert a shakmaty Square back to board row/col (row 0 = rank 8)
pub fn square_to_rowcol(sq: Square) -> (usize, usize) {
    let row = 7 - u32::from(sq.rank()) as usize;
    let col = u32::from(sq.file()) as usize;
    (row, col)
}

/// Convert shakmaty piece to our domain Piece
pub fn shakmaty_to_piece(piece: shakmaty::Piece) -> Piece {
    Piece {
        kind: role_to_kind(piece.role),
        color: PieceColor::from(piece.color),
    }
}

/// Convert a shakmaty Role to our domain PieceKind
pub fn role_to_kind(role: Role) -> PieceKind {
    match role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_roundtrip() {
        for row in 0..8 {
            for col in 0..8 {
                let sq = to_square(row, col);
                assert_eq!(square_to_rowcol(sq), (row, col));
            }
        }
    }

    #[test]
    fn test_square_orientation() {
        // row 0, col 0 is a8; row 7, col 4 is e1
        assert_eq!(to_square(0, 0), Square::A8);
        assert_eq!(to_square(7, 4), Square::E1);
        assert_eq!(square_to_rowcol(Square::E2), (6, 4));
    }

    #[test]
    fn test_piece_values() {
        assert_eq!(PieceKind::Pawn.value(), 1);
        assert_eq!(PieceKind::Knight.value(), 3);
        assert_eq!(PieceKind::Bishop.value(), 3);
        assert_eq!(PieceKind::Rook.value(), 5);
        assert_eq!(PieceKind::Queen.value(), 9);
        assert_eq!(PieceKind::King.value(), 0);
    }
}
