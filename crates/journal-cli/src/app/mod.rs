//! Application-level utilities for the journal CLI.
//!
//! This module provides:
//! - Path and user resolution for config and store files
//! - A per-invocation context that opens the store and services

mod context;
mod resolver;

// Re-export public API
pub use context::AppContext;
pub use resolver::{exit_not_found_with_hint, resolve_config_path};
