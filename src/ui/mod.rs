//! TUI module for the flashcard application.

mod app;
pub mod theme;
mod widgets;

pub use app::App;
