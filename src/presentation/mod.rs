//! Presentation layer handling terminal UI and user input.
//!
//! This module renders the landing, onboarding, dashboard and matches views
//! using ratatui and maps crossterm key events onto application actions.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
