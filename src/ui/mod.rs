//! Front ends: a ratatui terminal UI and a line-oriented headless mode.
//! Both drive a `Session` and redraw from its event stream.

mod app;
mod game_view;
pub mod headless;

pub use app::App;
