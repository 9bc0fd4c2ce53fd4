//! Tally Core crate - shared error type, configuration, and domain types.
//!
//! Every other Tally crate depends on this one. It defines the top-level
//! `TallyError`, the TOML-backed `TallyConfig`, and the domain vocabulary
//! (screens, form fields, contribution entries, operator notices).

pub mod config;
pub mod error;
pub mod types;

pub use config::TallyConfig;
pub use error::{Result, TallyError};
pub use types::*;
