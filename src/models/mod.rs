//! Data models and types for the terminal engine.
//!
//! Contains domain types for:
//! - [`DistroConfig`], [`CommandSpec`], [`ActionTag`] - Declarative distro bundles
//! - [`DistroRegistry`] - Available distros for multi-config deployments
//! - [`FsNode`], [`DirEntry`] - Virtual filesystem representation
//! - [`OutputLine`], [`Prompt`], [`SessionStats`] - Data handed to the renderer

mod config;
mod filesystem;
mod registry;
mod terminal;

pub use config::{ActionTag, CommandSpec, DistroConfig, OutputSpec, SystemInfo};
pub use filesystem::{DirEntry, FsNode};
pub use registry::{DistroEntry, DistroRegistry};
pub use terminal::{LineStyle, OutputLine, Prompt, SessionStats, Theme};
