pub mod engine;
pub mod game;

pub use engine::EngineModel;
pub use game::{ClickResult, ENGINE_SIDE, GameModel, GameResult};
