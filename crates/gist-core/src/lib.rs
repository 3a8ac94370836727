//! Shared data model, error taxonomy, configuration and word-level text
//! utilities for the gist salience engine.

pub mod config;
pub mod diff;
pub mod error;
pub mod text;
pub mod types;

pub use config::EngineConfig;
pub use error::{GistError, Result};
pub use types::*;

#[cfg(test)]
mod tests;
