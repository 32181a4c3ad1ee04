//! Application setup and window creation.

use gpui::{App, Bounds, WindowBounds, WindowOptions, prelude::*, px, size};
use gpui_component::Root;

use crate::config::Config;
use crate::models::{EngineModel, GameModel};
use crate::ui::views::ChessBoardView;

/// Initialize and run the chess application
pub fn run(cx: &mut App) {
    gpui_component::init(cx);

    let config = Config::load();
    log::info!(
        "starting with engine '{}', movetime {}ms",
        config.engine_path,
        config.move_time_ms
    );

    let game = cx.new(|_| GameModel::new(&config));
    let engine = cx.new(|_| EngineModel::new(&config));

    // A dead engine is survivable: the board still works and the side
    // panel shows the failure.
    engine.update(cx, |engine, cx| {
        if let Err(e) = engine.start(cx) {
            log::error!("failed to start engine: {}", e);
        }
    });

    let bounds = Bounds::centered(None, size(px(900.0), px(640.0)), cx);
    cx.open_window(
        WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            ..Default::default()
        },
        |window, cx| {
            let view = cx.new(|cx| ChessBoardView::new(game, engine, &config, cx));
            cx.new(|cx| Root::new(view, window, cx))
        },
    )
    .unwrap();
}
