// src/config/mod.rs

//! Global configuration consumed by the execution engine.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate basic invariants like the nice range (`validate.rs`).
//!
//! The engine only ever reads this configuration, never mutates it.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{BuildSection, ConfigFile, LogSection};
pub use validate::validate_config;
