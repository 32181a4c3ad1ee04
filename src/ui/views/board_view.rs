//! Chess board view - the board grid with click-to-move interaction.
//!
//! The view observes the game and engine models. All state mutation runs
//! on the UI thread through entity updates: clicks and engine answers both
//! funnel into the same `GameModel` mutation path.

use gpui::{
    Context, Entity, MouseButton, MouseDownEvent, Pixels, Subscription, Window, canvas, div, img,
    prelude::*, px, rgb,
};
use gpui_component::resizable::{h_resizable, resizable_panel};

use crate::config::Config;
use crate::domain::to_square;
use crate::models::{ClickResult, EngineModel, GameModel};
use crate::ui::components::render_square;
use crate::ui::theme::{BOARD_PADDING, INITIAL_LEFT_PANEL, INITIAL_RIGHT_PANEL, PANEL_BG};
use crate::ui::views::render_side_panel;

/// The main chess board view that observes the game and engine models
pub struct ChessBoardView {
    game: Entity<GameModel>,
    engine: Entity<EngineModel>,
    move_time_ms: u64,
    _subscriptions: Vec<Subscription>,
}

impl ChessBoardView {
    pub fn new(
        game: Entity<GameModel>,
        engine: Entity<EngineModel>,
        config: &Config,
        cx: &mut Context<Self>,
    ) -> Self {
        let _subscriptions = vec![
            cx.observe(&game, |this, _, cx| {
                this.maybe_request_engine_move(cx);
                cx.notify();
            }),
            cx.observe(&engine, |this, _, cx| {
                this.handle_engine_update(cx);
                cx.notify();
            }),
        ];
        Self {
            game,
            engine,
            move_time_ms: config.move_time_ms,
            _subscriptions,
        }
    }

    /// Ask the engine to move once the human move has been applied and its
    /// animation finished. `set_awaiting_engine` gates re-entry, so extra
    /// notifications are harmless.
    fn maybe_request_engine_move(&mut self, cx: &mut Context<Self>) {
        if !self.game.read(cx).ready_for_engine() {
            return;
        }
        if !self.engine.read(cx).is_running() {
            return; // fatal error already shown in the status line
        }

        let fen = self.game.read(cx).fen();
        let move_time_ms = self.move_time_ms;
        self.game.update(cx, |game, _| game.set_awaiting_engine(true));
        self.engine
            .update(cx, |engine, _| engine.request_move(&fen, move_time_ms));
    }

    /// Apply the engine's answer on the UI thread.
    fn handle_engine_update(&mut self, cx: &mut Context<Self>) {
        let best = self.engine.update(cx, |engine, _| engine.take_best_move());
        if let Some(uci) = best {
            self.game.update(cx, |game, cx| {
                game.apply_engine_move(&uci, cx);
                cx.notify();
            });
        }

        // If the engine died mid-request, unblock input so the status line
        // is at least readable next to a frozen game.
        if self.engine.read(cx).fatal_error().is_some() {
            self.game.update(cx, |game, cx| {
                if game.is_awaiting_engine() {
                    game.set_awaiting_engine(false);
                    cx.notify();
                }
            });
        }
    }
}

impl Render for ChessBoardView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let model_down = self.game.clone();
        let model_measure = self.game.clone();

        let game = self.game.read(cx);
        let layout = game.layout();
        let square_size = layout.square_size();
        let piece_size = layout.piece_size();
        let board_total_size = layout.board_total_size();

        // Everything the grid needs, resolved before closures capture it
        let snapshot = game.snapshot();
        let animation = *game.animation();
        let suppress = animation
            .overlay_square()
            .map(crate::domain::square_to_rowcol);

        // The moving piece is drawn as an overlay at its interpolated
        // position; its static glyph at the destination stays hidden.
        let overlay = animation.endpoints().and_then(|(from, to)| {
            animation.frame(layout.square_center(from), layout.square_center(to))
        });
        let floating_piece = overlay.map(|frame| {
            div()
                .absolute()
                .left(px(frame.x - piece_size / 2.0))
                .top(px(frame.y - piece_size / 2.0))
                .size(px(piece_size))
                .child(img(frame.piece.svg_path()).size(px(piece_size)))
        });

        let board = div()
            .flex_shrink_0()
            .flex()
            .flex_col()
            .w(px(board_total_size))
            .h(px(board_total_size))
            .overflow_hidden()
            .rounded_md()
            .children((0..8).map(|row| {
                let snapshot = snapshot.clone();
                div().flex().flex_shrink_0().children((0..8).map(move |col| {
                    let suppress_piece = suppress == Some((row, col));
                    render_square(
                        snapshot.square(row, col),
                        suppress_piece,
                        square_size,
                        piece_size,
                    )
                }))
            }));

        let board_panel_content = div()
            .id("board-panel")
            .relative()
            .size_full()
            .overflow_hidden()
            .bg(rgb(PANEL_BG))
            .p(px(BOARD_PADDING))
            .child(board)
            .when_some(floating_piece, |el, fp| el.child(fp))
            // Mouse down: feed the click through the selection
            .on_mouse_down(
                MouseButton::Left,
                move |ev: &MouseDownEvent, _window, cx| {
                    model_down.update(cx, |game, cx| {
                        let pos = ev.position;
                        if let Some((row, col)) =
                            game.layout().pos_to_square(pos.x.into(), pos.y.into())
                        {
                            // Ignored clicks change nothing worth repainting
                            if game.handle_click(to_square(row, col), cx) != ClickResult::Ignored {
                                cx.notify();
                            }
                        }
                    });
                },
            );

        // Canvas to measure actual panel size
        let measure_canvas = canvas(
            move |bounds, _window, cx| {
                model_measure.update(cx, |game, cx| {
                    if game.panel_size != bounds.size {
                        game.panel_size = bounds.size;
                        cx.notify();
                    }
                });
            },
            |_, _, _, _| {},
        )
        .absolute()
        .top_0()
        .left_0()
        .size_full();

        // Wrap board panel content with measuring canvas
        let board_panel_with_measure = div()
            .relative()
            .size_full()
            .child(measure_canvas)
            .child(board_panel_content);

        // Captures, history, status and restart
        let side_panel_content = render_side_panel(&self.game, &self.engine, cx);

        // Main resizable layout
        div().size_full().child(
            h_resizable("chess-layout")
                .child(
                    resizable_panel()
                        .size(px(INITIAL_LEFT_PANEL))
                        .size_range(px(320.)..px(1200.))
                        .child(board_panel_with_measure),
                )
                .child(
                    resizable_panel()
                        .size(px(INITIAL_RIGHT_PANEL))
                        .size_range(px(150.)..Pixels::MAX)
                        .child(side_panel_content),
                ),
        )
    }
}
