//! Game state model - the application layer for the chess game.
//!
//! Owns the authoritative position. The position changes only through
//! `apply_move` (which validates against the rules library first) or
//! `reset`; everything the board renders is derived from here.

use gpui::{AsyncApp, Context, Pixels, Size, Task, WeakEntity, px};
use shakmaty::san::San;
use shakmaty::uci::UciMove;
use shakmaty::{Chess, EnPassantMode, Move, Position, Square, fen::Fen};
use std::time::Duration;
use thiserror::Error;

use crate::config::Config;
use crate::domain::{
    AnimationSequencer, BoardSnapshot, CaptureTracker, ClickOutcome, Piece, PieceColor, Selection,
    move_endpoints, role_to_kind, shakmaty_to_piece, to_square,
};
use crate::ui::board_layout::BoardLayout;
use crate::ui::theme::INITIAL_LEFT_PANEL;

/// Internal-consistency failures. User input never produces these; the
/// selection and the engine both validate before a move gets here.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("illegal move {0} reached the game state")]
    IllegalMove(String),
    #[error("engine move '{0}' is not playable: {1}")]
    BadEngineMove(String, String),
}

/// Final result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
}

/// What a board click amounted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickResult {
    /// A move was applied and its animation started.
    Moved,
    /// The selection changed (or cleared); redraw needed.
    SelectionChanged,
    /// Nothing happened.
    Ignored,
}

/// The side the engine plays. The human always drives White.
pub const ENGINE_SIDE: PieceColor = PieceColor::Black;

/// The main game model containing all chess game state
pub struct GameModel {
    /// The authoritative position
    position: Chess,
    /// Applied moves, in order, for history rendering
    history: Vec<Move>,
    /// Click-to-move selection state
    selection: Selection,
    /// Captured material per side
    captures: CaptureTracker,
    /// Endpoints of the most recently applied move, for highlighting
    last_move: Option<(Square, Square)>,
    /// In-flight move animation
    animation: AnimationSequencer,
    /// Set while a best-move request is outstanding; gates input
    awaiting_engine: bool,
    /// Most recent internal-consistency error, surfaced in the status line
    last_error: Option<String>,
    /// Measured panel size from canvas
    pub panel_size: Size<Pixels>,
    animation_steps: usize,
    animation_frame_ms: u64,
    /// Frame-advancing task, alive while a move animates
    _anim_task: Option<Task<()>>,
}

impl GameModel {
    pub fn new(config: &Config) -> Self {
        Self {
            position: Chess::default(),
            history: Vec::new(),
            selection: Selection::new(),
            captures: CaptureTracker::new(),
            last_move: None,
            animation: AnimationSequencer::new(),
            awaiting_engine: false,
            last_error: None,
            panel_size: Size {
                width: px(INITIAL_LEFT_PANEL),
                height: px(600.0),
            },
            animation_steps: config.animation_steps,
            animation_frame_ms: config.animation_frame_ms,
            _anim_task: None,
        }
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    pub fn current_turn(&self) -> PieceColor {
        PieceColor::from(self.position.turn())
    }

    pub fn layout(&self) -> BoardLayout {
        BoardLayout::new(self.panel_size)
    }

    /// Everything the draw code needs for one repaint.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::derive(&self.position, &self.selection, self.last_move)
    }

    pub fn animation(&self) -> &AnimationSequencer {
        &self.animation
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_animating()
    }

    pub fn is_awaiting_engine(&self) -> bool {
        self.awaiting_engine
    }

    pub fn set_awaiting_engine(&mut self, waiting: bool) {
        self.awaiting_engine = waiting;
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_check(&self) -> bool {
        self.position.is_check()
    }

    pub fn is_game_over(&self) -> bool {
        self.position.is_game_over()
    }

    /// None while the game is in progress.
    pub fn result(&self) -> Option<GameResult> {
        if self.position.is_checkmate() {
            Some(match self.current_turn() {
                PieceColor::White => GameResult::BlackWins,
                PieceColor::Black => GameResult::WhiteWins,
            })
        } else if self.position.is_game_over() {
            Some(GameResult::Draw)
        } else {
            None
        }
    }

    /// The engine should be asked to move now: the human move has been
    /// applied and fully animated, no request is outstanding, and the game
    /// continues.
    pub fn ready_for_engine(&self) -> bool {
        self.current_turn() == ENGINE_SIDE
            && !self.awaiting_engine
            && !self.is_animating()
            && !self.is_game_over()
    }

    pub fn fen(&self) -> String {
        Fen::from_position(&self.position, EnPassantMode::Legal).to_string()
    }

    pub fn material_balance(&self) -> i32 {
        self.captures.material_balance()
    }

    pub fn captured_by(&self, side: PieceColor) -> &[Piece] {
        self.captures.captured_by(side)
    }

    /// Feed a click on a board square through the selection. Moves are
    /// applied and animated here; input is ignored while a move is in
    /// flight, while the engine is thinking, and after the game ends.
    pub fn handle_click(&mut self, sq: Square, cx: &mut Context<Self>) -> ClickResult {
        if self.is_animating() || self.awaiting_engine || self.is_game_over() {
            return ClickResult::Ignored;
        }

        let position = self.position.clone();
        match self.selection.click(&position, sq) {
            ClickOutcome::Move(m) => match self.apply_move(&m) {
                Ok(()) => {
                    self.begin_animation(&m, cx);
                    ClickResult::Moved
                }
                Err(e) => {
                    log::error!("{}", e);
                    self.last_error = Some(e.to_string());
                    ClickResult::SelectionChanged
                }
            },
            ClickOutcome::Selected | ClickOutcome::Cleared => ClickResult::SelectionChanged,
            ClickOutcome::Ignored => ClickResult::Ignored,
        }
    }

    /// Apply a move the engine chose, given as a UCI move string. Failures
    /// here are integration defects; they are logged and surfaced in the
    /// status line rather than swallowed.
    pub fn apply_engine_move(&mut self, uci: &str, cx: &mut Context<Self>) {
        self.awaiting_engine = false;
        match self.parse_engine_move(uci) {
            Ok(m) => {
                if let Err(e) = self.apply_move(&m) {
                    log::error!("{}", e);
                    self.last_error = Some(e.to_string());
                    return;
                }
                self.begin_animation(&m, cx);
            }
            Err(e) => {
                log::error!("{}", e);
                self.last_error = Some(e.to_string());
            }
        }
    }

    fn parse_engine_move(&self, uci: &str) -> Result<Move, GameError> {
        uci.parse::<UciMove>()
            .map_err(|e| GameError::BadEngineMove(uci.to_string(), e.to_string()))?
            .to_move(&self.position)
            .map_err(|e| GameError::BadEngineMove(uci.to_string(), e.to_string()))
    }

    /// Apply a validated move: record any capture, update history and the
    /// last-move highlight, and advance the position. Rejects moves the
    /// rules library does not list as legal.
    pub fn apply_move(&mut self, m: &Move) -> Result<(), GameError> {
        if !self.position.legal_moves().contains(m) {
            let san = San::from_move(&self.position, *m).to_string();
            return Err(GameError::IllegalMove(san));
        }

        if let Some(role) = m.capture() {
            let captured = Piece {
                kind: role_to_kind(role),
                color: self.current_turn().opposite(),
            };
            self.captures.record(captured, self.current_turn());
        }

        self.last_move = move_endpoints(m);
        self.history.push(m.clone());
        self.position.play_unchecked(*m);
        self.selection.clear();
        self.last_error = None;
        Ok(())
    }

    fn begin_animation(&mut self, m: &Move, cx: &mut Context<Self>) {
        let Some((from, to)) = move_endpoints(m) else {
            return;
        };
        // The position is already updated, so the destination square holds
        // the moved piece (post-promotion for pawns reaching the last rank).
        let Some(piece) = self.position.board().piece_at(to).map(shakmaty_to_piece) else {
            return;
        };
        if !self.animation.start(piece, from, to, self.animation_steps) {
            return;
        }

        let frame_ms = self.animation_frame_ms;
        let task = cx.spawn(async move |weak_entity: WeakEntity<GameModel>, cx: &mut AsyncApp| {
            Self::run_animation_loop(weak_entity, frame_ms, cx).await;
        });
        self._anim_task = Some(task);
    }

    /// Timer loop that advances the animation one frame at a time on the
    /// UI thread. Exits when the flight finishes or the entity is dropped.
    async fn run_animation_loop(weak_entity: WeakEntity<GameModel>, frame_ms: u64, cx: &mut AsyncApp) {
        loop {
            cx.background_executor()
                .timer(Duration::from_millis(frame_ms))
                .await;

            let should_continue = weak_entity.update(cx, |game, cx| {
                let still_flying = game.animation.advance();
                cx.notify();
                still_flying
            });

            match should_continue {
                Ok(true) => continue,
                _ => break,
            }
        }
    }

    /// Get piece at row/col from the current position
    pub fn piece_at(&self, row: usize, col: usize) -> Option<Piece> {
        let sq = to_square(row, col);
        self.position.board().piece_at(sq).map(shakmaty_to_piece)
    }

    /// Move history as (move number, white SAN, black SAN) rows, replayed
    /// from the start on a scratch board so the live position is untouched.
    pub fn history_rows(&self) -> Vec<(usize, String, Option<String>)> {
        let mut replay = Chess::default();
        let mut sans = Vec::with_capacity(self.history.len());
        for m in &self.history {
            sans.push(San::from_move(&replay, *m).to_string());
            replay.play_unchecked(*m);
        }

        sans.chunks(2)
            .enumerate()
            .map(|(i, chunk)| {
                let white = chunk.first().cloned().unwrap_or_default();
                let black = chunk.get(1).cloned();
                (i + 1, white, black)
            })
            .collect()
    }

    /// Back to the starting arrangement: position, history, captures,
    /// selection, last-move highlight, and any in-flight animation.
    pub fn reset(&mut self) {
        self.animation.cancel();
        self._anim_task = None;
        self.position = Chess::default();
        self.history.clear();
        self.selection.clear();
        self.captures.reset();
        self.last_move = None;
        self.awaiting_engine = false;
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PieceKind, find_matching_move};
    use shakmaty::Role;

    fn game() -> GameModel {
        GameModel::new(&Config::default())
    }

    /// Apply the legal move presented on (from -> to), panicking if absent.
    fn play(game: &mut GameModel, from: Square, to: Square) {
        let m = find_matching_move(game.position(), from, to)
            .unwrap_or_else(|| panic!("{}-{} must be legal", from, to));
        game.apply_move(&m).unwrap();
    }

    #[test]
    fn test_e2e4_scenario() {
        let mut game = game();
        play(&mut game, Square::E2, Square::E4);

        let pawn = game.piece_at(4, 4).expect("pawn on e4");
        assert_eq!(pawn.kind, PieceKind::Pawn);
        assert_eq!(pawn.color, PieceColor::White);
        assert!(game.piece_at(6, 4).is_none());
        assert_eq!(game.current_turn(), PieceColor::Black);
        assert_eq!(game.material_balance(), 0);
        assert!(game.captured_by(PieceColor::White).is_empty());
        assert!(game.captured_by(PieceColor::Black).is_empty());
    }

    #[test]
    fn test_history_matches_san_of_applied_move() {
        let mut game = game();
        let pre_move_position = game.position().clone();
        let m = find_matching_move(game.position(), Square::G1, Square::F3).unwrap();
        let expected = San::from_move(&pre_move_position, m).to_string();

        game.apply_move(&m).unwrap();
        let rows = game.history_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], (1, expected, None));
    }

    #[test]
    fn test_history_pairs_moves() {
        let mut game = game();
        play(&mut game, Square::E2, Square::E4);
        play(&mut game, Square::E7, Square::E5);
        play(&mut game, Square::G1, Square::F3);

        let rows = game.history_rows();
        assert_eq!(
            rows,
            vec![
                (1, "e4".to_string(), Some("e5".to_string())),
                (2, "Nf3".to_string(), None),
            ]
        );
    }

    #[test]
    fn test_capture_is_recorded_with_balance() {
        // Scandinavian: 1. e4 d5 2. exd5 captures a pawn
        let mut game = game();
        play(&mut game, Square::E2, Square::E4);
        play(&mut game, Square::D7, Square::D5);
        play(&mut game, Square::E4, Square::D5);

        let captured = game.captured_by(PieceColor::White);
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].kind, PieceKind::Pawn);
        assert_eq!(captured[0].color, PieceColor::Black);
        assert_eq!(game.material_balance(), 1);

        let rows = game.history_rows();
        assert_eq!(rows[1].1, "exd5");
    }

    #[test]
    fn test_knight_capture_scores_three() {
        // 1. e4 Nf6 2. e5 Ng4 3. d4 Nxe5?? 4. dxe5 wins the knight
        let mut game = game();
        play(&mut game, Square::E2, Square::E4);
        play(&mut game, Square::G8, Square::F6);
        play(&mut game, Square::E4, Square::E5);
        play(&mut game, Square::F6, Square::G4);
        play(&mut game, Square::D2, Square::D4);
        play(&mut game, Square::G4, Square::E5);
        play(&mut game, Square::D4, Square::E5);

        // Black took a pawn, white took the knight back
        assert_eq!(game.material_balance(), 3 - 1);
        assert_eq!(game.captured_by(PieceColor::White)[0].kind, PieceKind::Knight);
    }

    #[test]
    fn test_illegal_move_is_rejected() {
        let mut game = game();
        let m = Move::Normal {
            role: Role::Pawn,
            from: Square::E2,
            to: Square::E5,
            capture: None,
            promotion: None,
        };
        let err = game.apply_move(&m).unwrap_err();
        assert!(matches!(err, GameError::IllegalMove(_)));
        // Nothing changed
        assert_eq!(game.current_turn(), PieceColor::White);
        assert!(game.history_rows().is_empty());
    }

    #[test]
    fn test_reset_restores_everything() {
        let mut game = game();
        play(&mut game, Square::E2, Square::E4);
        play(&mut game, Square::D7, Square::D5);
        play(&mut game, Square::E4, Square::D5);
        game.set_awaiting_engine(true);

        game.reset();

        let fresh = GameModel::new(&Config::default());
        assert_eq!(game.fen(), fresh.fen());
        assert!(game.history_rows().is_empty());
        assert_eq!(game.material_balance(), 0);
        assert!(game.captured_by(PieceColor::White).is_empty());
        assert!(game.captured_by(PieceColor::Black).is_empty());
        assert!(!game.is_awaiting_engine());
        assert!(!game.is_animating());
        assert_eq!(game.current_turn(), PieceColor::White);
    }

    #[test]
    fn test_result_reporting() {
        let mut game = game();
        assert_eq!(game.result(), None);
        assert!(!game.is_game_over());

        // Fool's mate: 1. f3 e5 2. g4 Qh4#
        play(&mut game, Square::F2, Square::F3);
        play(&mut game, Square::E7, Square::E5);
        play(&mut game, Square::G2, Square::G4);
        play(&mut game, Square::D8, Square::H4);

        assert!(game.is_game_over());
        assert_eq!(game.result(), Some(GameResult::BlackWins));
    }

    #[test]
    fn test_engine_move_parsing() {
        let mut game = game();
        let m = game.parse_engine_move("e2e4").unwrap();
        game.apply_move(&m).unwrap();
        assert_eq!(game.current_turn(), PieceColor::Black);

        // Unplayable or malformed answers are rejected
        let err = game.parse_engine_move("e2e5").unwrap_err();
        assert!(matches!(err, GameError::BadEngineMove(_, _)));
        let err = game.parse_engine_move("not-a-move").unwrap_err();
        assert!(matches!(err, GameError::BadEngineMove(_, _)));
    }

    #[test]
    fn test_fen_round_trips_side_to_move() {
        let mut game = game();
        assert!(game.fen().contains(" w "));
        play(&mut game, Square::E2, Square::E4);
        assert!(game.fen().contains(" b "));
    }
}
