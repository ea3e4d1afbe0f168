//! fundmatch - Startup Funding Matcher Library
//!
//! A terminal front-end that walks founders through a startup intake wizard
//! and lists matching funding opportunities, built in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;
pub mod config;

pub use domain::*;
pub use application::*;
