//! Move animation state machine.
//!
//! `Idle -> Animating(frame 0..=steps) -> Idle`. The sequencer only tracks
//! which squares are in flight and how far along the flight is; pixel
//! positions are interpolated at render time so a window resize mid-flight
//! stays correct. At most one move animates at a time.

use shakmaty::Square;

use crate::domain::Piece;

/// Default flight length and per-frame delay, matching a quick slide
/// rather than a slow glide.
pub const DEFAULT_STEPS: usize = 10;
pub const DEFAULT_FRAME_MS: u64 = 20;

/// One draw of the moving piece at an interpolated pixel position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationFrame {
    pub piece: Piece,
    pub x: f32,
    pub y: f32,
    pub index: usize,
}

#[derive(Clone, Copy, Debug)]
struct Flight {
    piece: Piece,
    from: Square,
    to: Square,
    steps: usize,
    current: usize,
}

/// Sequences a single move's animation.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnimationSequencer {
    flight: Option<Flight>,
}

impl AnimationSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_animating(&self) -> bool {
        self.flight.is_some()
    }

    /// Begin animating `piece` from `from` to `to`. Returns false (and does
    /// nothing) if a flight is already in progress.
    pub fn start(&mut self, piece: Piece, from: Square, to: Square, steps: usize) -> bool {
        if self.flight.is_some() {
            return false;
        }
        self.flight = Some(Flight {
            piece,
            from,
            to,
            steps: steps.max(1),
            current: 0,
        });
        true
    }

    /// The square whose static glyph should be suppressed while the overlay
    /// is drawn (the moving piece already rests there in the position).
    pub fn overlay_square(&self) -> Option<Square> {
        self.flight.map(|f| f.to)
    }

    /// Origin and destination of the flight in progress.
    pub fn endpoints(&self) -> Option<(Square, Square)> {
        self.flight.map(|f| (f.from, f.to))
    }

    /// The overlay frame for the current step, interpolated between the
    /// given pixel centers of the from- and to-squares.
    pub fn frame(&self, from_center: (f32, f32), to_center: (f32, f32)) -> Option<AnimationFrame> {
        let flight = self.flight?;
        let t = flight.current as f32 / flight.steps as f32;
        Some(AnimationFrame {
            piece: flight.piece,
            x: from_center.0 + (to_center.0 - from_center.0) * t,
            y: from_center.1 + (to_center.1 - from_center.1) * t,
            index: flight.current,
        })
    }

    /// Advance one step. Returns true while the flight continues; on the
    /// final step the sequencer returns to idle and the board is drawn
    /// statically again.
    pub fn advance(&mut self) -> bool {
        let Some(flight) = self.flight.as_mut() else {
            return false;
        };
        if flight.current >= flight.steps {
            self.flight = None;
            return false;
        }
        flight.current += 1;
        true
    }

    /// Abort any in-flight animation. Called on reset before the position
    /// is replaced.
    pub fn cancel(&mut self) {
        self.flight = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PieceColor, PieceKind};

    fn knight() -> Piece {
        Piece {
            kind: PieceKind::Knight,
            color: PieceColor::White,
        }
    }

    #[test]
    fn test_runs_from_origin_to_destination() {
        let mut seq = AnimationSequencer::new();
        assert!(seq.start(knight(), Square::G1, Square::F3, 4));

        let from = (0.0, 0.0);
        let to = (100.0, 200.0);

        let first = seq.frame(from, to).unwrap();
        assert_eq!((first.x, first.y, first.index), (0.0, 0.0, 0));

        // Step to the midpoint
        seq.advance();
        seq.advance();
        let mid = seq.frame(from, to).unwrap();
        assert_eq!((mid.x, mid.y, mid.index), (50.0, 100.0, 2));

        // Two more steps reach the destination, one more returns to idle
        seq.advance();
        assert!(seq.advance());
        let last = seq.frame(from, to).unwrap();
        assert_eq!((last.x, last.y), (100.0, 200.0));

        assert!(!seq.advance());
        assert!(!seq.is_animating());
        assert!(seq.frame(from, to).is_none());
    }

    #[test]
    fn test_single_move_in_flight() {
        let mut seq = AnimationSequencer::new();
        assert!(seq.start(knight(), Square::G1, Square::F3, 5));
        assert!(!seq.start(knight(), Square::B1, Square::C3, 5));
        assert_eq!(seq.overlay_square(), Some(Square::F3));
    }

    #[test]
    fn test_cancel_aborts_flight() {
        let mut seq = AnimationSequencer::new();
        seq.start(knight(), Square::G1, Square::F3, 5);
        seq.cancel();
        assert!(!seq.is_animating());
        assert!(seq.start(knight(), Square::B1, Square::C3, 5));
    }

    #[test]
    fn test_zero_steps_is_clamped() {
        let mut seq = AnimationSequencer::new();
        seq.start(knight(), Square::G1, Square::F3, 0);
        assert!(seq.advance());
        assert!(!seq.advance());
        assert!(!seq.is_animating());
    }
}
