//! Terminal-related data types handed to the renderer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Visual style of an output line. Serialized as the renderer's CSS class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    /// Plain text output
    Text,
    /// Error message (red)
    Error,
    /// Success message (green)
    Success,
    /// Info message (yellow)
    Info,
    /// Multi-line block rendered as preformatted text (`cat`)
    Block,
    /// Single-line directory listing (`ls`)
    Listing,
    /// Message of the day
    Motd,
}

impl LineStyle {
    /// CSS class name used by the renderer.
    pub fn class(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Error => "error",
            Self::Success => "success",
            Self::Info => "info",
            Self::Block => "block",
            Self::Listing => "listing",
            Self::Motd => "motd",
        }
    }
}

/// A single line of terminal output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OutputLine {
    pub text: String,
    #[serde(rename = "styleClass")]
    pub style: LineStyle,
}

impl OutputLine {
    fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn text(s: impl Into<String>) -> Self {
        Self::new(s, LineStyle::Text)
    }

    pub fn error(s: impl Into<String>) -> Self {
        Self::new(s, LineStyle::Error)
    }

    pub fn success(s: impl Into<String>) -> Self {
        Self::new(s, LineStyle::Success)
    }

    pub fn info(s: impl Into<String>) -> Self {
        Self::new(s, LineStyle::Info)
    }

    pub fn block(s: impl Into<String>) -> Self {
        Self::new(s, LineStyle::Block)
    }

    pub fn listing(s: impl Into<String>) -> Self {
        Self::new(s, LineStyle::Listing)
    }

    pub fn motd(s: impl Into<String>) -> Self {
        Self::new(s, LineStyle::Motd)
    }
}

/// Color theme of the terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Parse a persisted theme name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prompt components; the renderer decides the layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub user: String,
    pub host: String,
    /// Current directory with the home prefix shown as `~`.
    pub display_path: String,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.user, self.host, self.display_path)
    }
}

/// Counters shown in the status bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub command_count: u64,
    pub elapsed_seconds: u64,
}
