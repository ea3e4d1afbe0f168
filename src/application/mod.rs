//! Application layer managing view state and user workflows.
//!
//! This module sits between the domain controllers and the terminal
//! presentation: it routes between views, owns input buffers, and drives
//! the asynchronous profile submission.

pub mod state;
pub mod submit;
pub mod text_input;

pub use state::*;
pub use submit::*;
pub use text_input::*;
