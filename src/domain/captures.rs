//! Captured-material bookkeeping.

use crate::domain::{Piece, PieceColor};

/// Append-only ledgers of captured pieces, one per capturing side.
/// Cleared only by `reset`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CaptureTracker {
    by_white: Vec<Piece>,
    by_black: Vec<Piece>,
}

impl CaptureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `capturing_side` captured `piece`.
    pub fn record(&mut self, piece: Piece, capturing_side: PieceColor) {
        match capturing_side {
            PieceColor::White => self.by_white.push(piece),
            PieceColor::Black => self.by_black.push(piece),
        }
    }

    /// Pieces captured by the given side, in capture order.
    pub fn captured_by(&self, side: PieceColor) -> &[Piece] {
        match side {
            PieceColor::White => &self.by_white,
            PieceColor::Black => &self.by_black,
        }
    }

    /// Signed material balance, positive favoring white.
    pub fn material_balance(&self) -> i32 {
        let white: i32 = self.by_white.iter().map(|p| p.kind.value()).sum();
        let black: i32 = self.by_black.iter().map(|p| p.kind.value()).sum();
        white - black
    }

    pub fn is_empty(&self) -> bool {
        self.by_white.is_empty() && self.by_black.is_empty()
    }

    pub fn reset(&mut self) {
        self.by_white.clear();
        self.by_black.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PieceKind;

    fn piece(kind: PieceKind, color: PieceColor) -> Piece {
        Piece { kind, color }
    }

    #[test]
    fn test_knight_capture_is_plus_three() {
        let mut tracker = CaptureTracker::new();
        tracker.record(piece(PieceKind::Knight, PieceColor::Black), PieceColor::White);

        assert_eq!(tracker.material_balance(), 3);
        assert_eq!(tracker.captured_by(PieceColor::White).len(), 1);
        assert!(tracker.captured_by(PieceColor::Black).is_empty());
    }

    #[test]
    fn test_balance_is_order_independent() {
        let captures = [
            (piece(PieceKind::Queen, PieceColor::Black), PieceColor::White),
            (piece(PieceKind::Pawn, PieceColor::White), PieceColor::Black),
            (piece(PieceKind::Rook, PieceColor::White), PieceColor::Black),
            (piece(PieceKind::Bishop, PieceColor::Black), PieceColor::White),
        ];

        let mut forward = CaptureTracker::new();
        for (p, side) in captures {
            forward.record(p, side);
        }

        let mut backward = CaptureTracker::new();
        for (p, side) in captures.into_iter().rev() {
            backward.record(p, side);
        }

        assert_eq!(forward.material_balance(), backward.material_balance());
        assert_eq!(forward.material_balance(), 9 + 3 - 1 - 5);
    }

    #[test]
    fn test_reset_clears_both_ledgers() {
        let mut tracker = CaptureTracker::new();
        tracker.record(piece(PieceKind::Pawn, PieceColor::Black), PieceColor::White);
        tracker.record(piece(PieceKind::Pawn, PieceColor::White), PieceColor::Black);

        tracker.reset();
        assert!(tracker.is_empty());
        assert_eq!(tracker.material_balance(), 0);
    }
}
