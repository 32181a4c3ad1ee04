//! Click-to-move selection state.
//!
//! A click either selects a friendly piece, toggles the selection off,
//! completes a move, or is ignored. Illegal destinations deselect silently
//! rather than erroring.

use shakmaty::{Chess, File, Move, Position, Rank, Role, Square};

/// The squares a move is presented on: the origin and the square the user
/// clicks to perform it. For castling this is the king's two-square
/// destination (g1/g8 or c1/c8), not the rook square shakmaty stores.
pub fn move_endpoints(m: &Move) -> Option<(Square, Square)> {
    match m {
        Move::Normal { from, to, .. } => Some((*from, *to)),
        Move::EnPassant { from, to } => Some((*from, *to)),
        Move::Castle { king, rook } => {
            let king_dest = if rook.file() == File::H {
                Square::from_coords(File::G, rook.rank())
            } else {
                Square::from_coords(File::C, rook.rank())
            };
            Some((*king, king_dest))
        }
        Move::Put { .. } => None,
    }
}

/// Find the legal move presented on (from -> to), if any.
///
/// A pawn stepping onto the last rank always promotes; with no promotion
/// picker in the UI the policy is to promote to a queen. Under-promotions
/// are deliberately unreachable from the board.
pub fn find_matching_move(position: &Chess, from: Square, to: Square) -> Option<Move> {
    for m in &position.legal_moves() {
        let Some((move_from, move_to)) = move_endpoints(m) else {
            continue;
        };
        if move_from != from || move_to != to {
            continue;
        }

        let move_to_play = match m {
            Move::Normal {
                role: Role::Pawn,
                from,
                to,
                capture,
                promotion: _,
            } if to.rank() == Rank::Eighth || to.rank() == Rank::First => Move::Normal {
                role: Role::Pawn,
                from: *from,
                to: *to,
                capture: *capture,
                promotion: Some(Role::Queen),
            },
            _ => m.clone(),
        };
        return Some(move_to_play);
    }
    None
}

/// All squares the piece on `from` may be played to.
pub fn destinations_from(position: &Chess, from: Square) -> Vec<Square> {
    let mut dests = Vec::new();
    for m in &position.legal_moves() {
        if let Some((move_from, move_to)) = move_endpoints(m) {
            if move_from == from && !dests.contains(&move_to) {
                dests.push(move_to);
            }
        }
    }
    dests
}

/// Result of feeding one click to the selection.
#[derive(Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    /// A friendly piece was selected and its destinations populated.
    Selected,
    /// The selection was cleared (toggle-off or illegal destination).
    Cleared,
    /// The click completed a legal move; the selection is now empty.
    Move(Move),
    /// The click hit nothing selectable.
    Ignored,
}

/// Current selection: at most one selected square plus its legal
/// destinations. A non-empty destination set implies the selected square
/// holds a piece of the side to move.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
    selected: Option<Square>,
    destinations: Vec<Square>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn destinations(&self) -> &[Square] {
        &self.destinations
    }

    pub fn is_active(&self) -> bool {
        self.selected.is_some()
    }

    pub fn is_destination(&self, sq: Square) -> bool {
        self.selected.is_some() && self.destinations.contains(&sq)
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.destinations.clear();
    }

    /// Advance the selection state machine by one click.
    pub fn click(&mut self, position: &Chess, sq: Square) -> ClickOutcome {
        if self.selected == Some(sq) {
            self.clear();
            return ClickOutcome::Cleared;
        }

        match self.selected {
            None => {
                let holds_friendly = position
                    .board()
                    .piece_at(sq)
                    .is_some_and(|p| p.color == position.turn());
                if holds_friendly {
                    self.selected = Some(sq);
                    self.destinations = destinations_from(position, sq);
                    ClickOutcome::Selected
                } else {
                    ClickOutcome::Ignored
                }
            }
            Some(from) => match find_matching_move(position, from, sq) {
                Some(m) => {
                    self.clear();
                    ClickOutcome::Move(m)
                }
                None => {
                    self.clear();
                    ClickOutcome::Cleared
                }
            },
        }
    }
}
