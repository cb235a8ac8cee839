//! Core business logic for the terminal engine.
//!
//! This module provides:
//! - [`Terminal`] tying a distro's [`VirtualFs`] and [`CommandTable`] to a [`Session`]
//! - [`execute`] dispatch and the interpreter built-ins
//! - [`suggest`] and [`SuggestionState`] for the suggestion dropdown and Tab
//! - [`ConfigSource`] loading of distro bundles and the registry

mod autocomplete;
pub mod commands;
pub mod debounce;
pub mod error;
mod filesystem;
pub mod loader;
pub mod path;
mod session;
mod terminal;

pub use autocomplete::{AutocompleteResult, Suggestion, SuggestionState, suggest};
pub use commands::{CommandResult, CommandTable, Effect, ExecContext, execute};
pub use debounce::{Debouncer, Ticket};
pub use error::{ConfigError, FsError, ShellError};
pub use filesystem::VirtualFs;
pub use loader::{ConfigSource, MemorySource, load_config, load_registry};
pub use session::Session;
pub use terminal::Terminal;
