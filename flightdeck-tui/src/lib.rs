//! Flightdeck TUI - terminal booking screens over `flightdeck-core`.
//!
//! Screens:
//! - Search form with airport picker and date entry
//! - Progress overlay while a search runs
//! - Results list
//! - Flight details

pub mod app;
pub mod input;
pub mod logging;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::AppState;
pub use input::handle_key;
pub use theme::Theme;
