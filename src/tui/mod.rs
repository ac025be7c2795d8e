//! Terminal UI for the audit panel, built on ratatui.
//!
//! The panel renders one report at a time as three collapsible category
//! sections, with a blocking modal while a fetch is in flight and a
//! terminal error panel when a cycle fails.

mod app;
mod events;
mod open;
pub mod theme;
mod ui;
mod views;
mod widgets;

pub use app::PanelApp;
pub use events::Event;
pub use theme::{colors, set_theme, toggle_theme, ColorScheme, Theme};
pub use ui::run_panel_tui;
