//! Domain layer: records, the intake wizard, and opportunity filtering.
//!
//! Nothing in here touches the terminal or the filesystem.

pub mod errors;
pub mod models;
pub mod provider;
pub mod services;
pub mod wizard;

pub use errors::*;
pub use models::*;
pub use provider::*;
pub use services::*;
pub use wizard::*;
