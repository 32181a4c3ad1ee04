use gpui::Application;

mod app;
mod config;
mod domain;
mod models;
mod ui;

use ui::FileAssets;

fn main() {
    env_logger::init();
    Application::new()
        .with_assets(FileAssets::new())
        .run(app::run);
}
