//! Infrastructure layer: data providers, file persistence, and the clipboard.

pub mod catalog;
pub mod clipboard;
pub mod json_provider;
pub mod persistence;

pub use catalog::*;
pub use clipboard::*;
pub use json_provider::*;
pub use persistence::*;
