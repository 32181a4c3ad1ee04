//! Side panel - move history, captured pieces, material balance and status.

use gpui::{App, Div, Entity, SharedString, div, prelude::*, px, rgb};
use gpui_component::button::{Button, ButtonVariants};

use crate::domain::{Piece, PieceColor};
use crate::models::{EngineModel, GameModel, GameResult};
use crate::ui::components::render_piece;
use crate::ui::theme::{
    BOARD_PADDING, BORDER_COLOR, CAPTURED_PIECE_SIZE, SIDE_PANEL_BG, STATUS_ERROR, STATUS_OK,
    STATUS_WARNING, TEXT_PRIMARY, TEXT_SECONDARY,
};

/// Render the right-hand panel for a game: status line, captured pieces
/// with material balance, the move history and a restart button.
pub fn render_side_panel(
    model: &Entity<GameModel>,
    engine_model: &Entity<EngineModel>,
    cx: &App,
) -> Div {
    let game = model.read(cx);
    let engine = engine_model.read(cx);

    let (status_text, status_color) = status_line(game, engine);
    let material = material_label(game.material_balance());
    let rows = game.history_rows();
    let by_white = game.captured_by(PieceColor::White).to_vec();
    let by_black = game.captured_by(PieceColor::Black).to_vec();

    let model_restart = model.clone();
    let engine_restart = engine_model.clone();
    let restart_button = Button::new("restart-game")
        .label("New Game")
        .primary()
        .compact()
        .on_click(move |_, _, cx| {
            model_restart.update(cx, |game, cx| {
                game.reset();
                cx.notify();
            });
            engine_restart.update(cx, |engine, cx| {
                engine.new_game();
                cx.notify();
            });
        });

    let history_content = if rows.is_empty() {
        div().text_color(rgb(TEXT_SECONDARY)).child("No moves yet")
    } else {
        div()
            .flex()
            .flex_col()
            .gap_1()
            .children(rows.into_iter().map(|(num, white, black)| {
                div()
                    .flex()
                    .gap_2()
                    .child(
                        div()
                            .w(px(28.))
                            .text_color(rgb(TEXT_SECONDARY))
                            .child(format!("{}.", num)),
                    )
                    .child(
                        div()
                            .w(px(64.))
                            .text_color(rgb(TEXT_PRIMARY))
                            .child(white),
                    )
                    .when_some(black, |el, san| {
                        el.child(div().text_color(rgb(TEXT_PRIMARY)).child(san))
                    })
            }))
    };

    div()
        .size_full()
        .flex()
        .flex_col()
        .overflow_hidden()
        .bg(rgb(SIDE_PANEL_BG))
        .p(px(BOARD_PADDING))
        .gap_3()
        // Status line + restart
        .child(
            div()
                .flex()
                .items_center()
                .justify_between()
                .gap_2()
                .child(
                    div()
                        .text_sm()
                        .text_color(rgb(status_color))
                        .overflow_hidden()
                        .text_ellipsis()
                        .child(status_text),
                )
                .child(restart_button),
        )
        // Captured pieces
        .child(
            div()
                .flex()
                .flex_col()
                .gap_1()
                .child(captured_row("Captured by White", &by_white))
                .child(captured_row("Captured by Black", &by_black))
                .child(div().text_sm().text_color(rgb(TEXT_SECONDARY)).child(material)),
        )
        // Move history
        .child(
            div()
                .flex_1()
                .min_h_0()
                .flex()
                .flex_col()
                .border_1()
                .border_color(rgb(BORDER_COLOR))
                .rounded_md()
                .overflow_hidden()
                .child(
                    div()
                        .px_3()
                        .py_2()
                        .text_color(rgb(TEXT_PRIMARY))
                        .border_b_1()
                        .border_color(rgb(BORDER_COLOR))
                        .child("Move History"),
                )
                .child(
                    div()
                        .id("history-scroll")
                        .flex_1()
                        .min_h_0()
                        .overflow_y_scroll()
                        .px_3()
                        .py_2()
                        .child(history_content),
                ),
        )
}

/// One row of captured piece glyphs for a side.
fn captured_row(label: &'static str, pieces: &[Piece]) -> Div {
    div()
        .flex()
        .items_center()
        .gap_2()
        .min_h(px(CAPTURED_PIECE_SIZE))
        .child(
            div()
                .w(px(130.))
                .text_xs()
                .text_color(rgb(TEXT_SECONDARY))
                .child(label),
        )
        .child(
            div()
                .flex()
                .flex_wrap()
                .items_center()
                .children(pieces.iter().map(|p| {
                    div()
                        .size(px(CAPTURED_PIECE_SIZE))
                        .child(render_piece(*p, CAPTURED_PIECE_SIZE))
                })),
        )
}

/// Material balance from the captured totals, shown from White's side.
fn material_label(balance: i32) -> SharedString {
    let text = if balance > 0 {
        format!("Material: White +{}", balance)
    } else if balance < 0 {
        format!("Material: Black +{}", -balance)
    } else {
        "Material: even".to_string()
    };
    SharedString::from(text)
}

/// Pick the single most relevant status message. Fatal engine errors win,
/// then internal game errors, then the game result, then in-game state.
fn status_line(game: &GameModel, engine: &EngineModel) -> (SharedString, u32) {
    if let Some(fatal) = engine.fatal_error() {
        return (
            SharedString::from(format!("Engine error: {}", fatal)),
            STATUS_ERROR,
        );
    }
    if let Some(err) = game.last_error() {
        return (SharedString::from(err.to_string()), STATUS_ERROR);
    }
    if let Some(result) = game.result() {
        let text = match result {
            GameResult::WhiteWins => "Checkmate. White wins",
            GameResult::BlackWins => "Checkmate. Black wins",
            GameResult::Draw => "Draw",
        };
        return (SharedString::from(text), STATUS_OK);
    }
    if game.is_awaiting_engine() || engine.is_thinking() {
        return (SharedString::from("Engine is thinking..."), STATUS_WARNING);
    }
    if game.is_check() {
        return (SharedString::from("Check!"), STATUS_WARNING);
    }
    (SharedString::from("Your move"), TEXT_SECONDARY)
}
