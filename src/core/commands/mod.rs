//! Command lookup and execution.
//!
//! This module provides:
//! - [`CommandTable`] built from a distro's commands merged over the core defaults
//! - [`execute`] for running one submitted line against the session
//! - [`CommandResult`] carrying output lines and host effects
//!
//! # Architecture
//!
//! A line is looked up verbatim first (multi-word phrases), then by its
//! first word. A matching entry runs its action if it has one, else an
//! interpreter built-in of the same name, else its static output.

mod execute;
mod result;
mod table;

pub use execute::{ExecContext, execute};
pub use result::{CommandResult, Effect};
pub use table::{
    CommandDescriptor, CommandTable, LIST_DISTROS_COMMAND, SWITCH_DISTRO_COMMAND, core_defaults,
};

/// Commands the interpreter implements itself when no action is attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Builtin {
    Help,
    Echo,
    Cat,
    Ls,
    Pwd,
}

impl Builtin {
    /// Match a table key against the built-ins. Case sensitive.
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "help" => Some(Self::Help),
            "echo" => Some(Self::Echo),
            "cat" => Some(Self::Cat),
            "ls" => Some(Self::Ls),
            "pwd" => Some(Self::Pwd),
            _ => None,
        }
    }
}
