//! Command execution result type.

use crate::models::{OutputLine, Theme};

/// Side effect a command asks the host to carry out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Wipe the rendered scrollback.
    ClearScreen,
    /// The session theme changed; restyle the page.
    ThemeChanged(Theme),
    /// Load the named distro and call `Terminal::reset` with it.
    SwitchDistro(String),
}

/// Result of executing a command.
///
/// Commands produce output and optionally request an effect from the host.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandResult {
    /// Output lines to display
    pub output: Vec<OutputLine>,
    /// Optional effect to apply (e.g., for `clear`)
    pub effect: Option<Effect>,
}

impl CommandResult {
    /// Create a result with just output, no effect.
    pub fn output(lines: Vec<OutputLine>) -> Self {
        Self {
            output: lines,
            effect: None,
        }
    }

    /// Create a result with output and an effect.
    pub fn with_effect(lines: Vec<OutputLine>, effect: Effect) -> Self {
        Self {
            output: lines,
            effect: Some(effect),
        }
    }

    /// Create an empty result (no output, no effect).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Texts of all output lines, mostly useful in tests.
    pub fn texts(&self) -> Vec<&str> {
        self.output.iter().map(|l| l.text.as_str()).collect()
    }
}
