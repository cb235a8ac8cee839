//! Command interpreter and simulated filesystem for a browser-hosted fake
//! Linux terminal.
//!
//! Each distro is a declarative bundle (JSON or TOML) describing the system
//! identity, a small filesystem and a table of commands. [`core::Terminal`]
//! runs lines against it; the renderer only has to draw the returned
//! [`models::OutputLine`]s.

pub mod config;
pub mod core;
pub mod models;
pub mod utils;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use crate::core::{CommandResult, Effect, MemorySource, Terminal};
