//! Native GUI built on egui/eframe: a play screen against the engine (or
//! hotseat) and a replay browser for saved games.

mod app;
mod board_view;
mod session;
mod theme;

pub use app::GomokuApp;
pub use session::{GameMode, GameSession};
