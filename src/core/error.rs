//! Error types for the terminal engine.
//!
//! - [`FsError`] - Virtual filesystem lookups
//! - [`ShellError`] - Command failures, rendered as a single error line
//! - [`ConfigError`] - Fetching or parsing distro configuration

use thiserror::Error;

/// Virtual filesystem errors. The payload is the path as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    #[error("{0}: No such file or directory")]
    NoSuchPath(String),
    #[error("{0}: Not a directory")]
    NotADirectory(String),
    #[error("{0}: Is a directory")]
    IsADirectory(String),
}

impl FsError {
    /// Replace the reported path, e.g. with the operand as the user typed it.
    pub fn with_path(self, path: &str) -> Self {
        let path = path.to_string();
        match self {
            Self::NoSuchPath(_) => Self::NoSuchPath(path),
            Self::NotADirectory(_) => Self::NotADirectory(path),
            Self::IsADirectory(_) => Self::IsADirectory(path),
        }
    }
}

/// Errors raised while executing a command line.
///
/// These never escape the interpreter: each one becomes a single
/// error-styled output line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellError {
    #[error("{cmd}: missing operand")]
    MissingOperand { cmd: String },
    #[error("{cmd}: {source}")]
    Fs { cmd: String, source: FsError },
    /// Carries the fully rendered not-found message.
    #[error("{0}")]
    UnknownCommand(String),
    #[error("distro: unknown distribution '{0}' (try 'distros')")]
    UnknownDistro(String),
}

impl ShellError {
    pub fn missing_operand(cmd: &str) -> Self {
        Self::MissingOperand {
            cmd: cmd.to_string(),
        }
    }

    pub fn fs(cmd: &str, source: FsError) -> Self {
        Self::Fs {
            cmd: cmd.to_string(),
            source,
        }
    }
}

/// Configuration load failures. Terminal for the boot or switch that hit them.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid home directory '{0}' (expected an absolute path)")]
    InvalidHome(String),
    #[error("invalid filesystem path '{0}' (expected '~', '~/...' or an absolute path)")]
    InvalidPath(String),
    #[error("failed to fetch {location}: {reason}")]
    Fetch { location: String, reason: String },
    #[error("unknown distribution '{0}'")]
    UnknownDistro(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_error_display() {
        let e = ShellError::fs("cat", FsError::NoSuchPath("missing.txt".into()));
        assert_eq!(e.to_string(), "cat: missing.txt: No such file or directory");

        let e = ShellError::fs("ls", FsError::NotADirectory("a.txt".into()));
        assert_eq!(e.to_string(), "ls: a.txt: Not a directory");

        let e = ShellError::fs("cat", FsError::IsADirectory("sub".into()));
        assert_eq!(e.to_string(), "cat: sub: Is a directory");
    }

    #[test]
    fn test_missing_operand_display() {
        assert_eq!(
            ShellError::missing_operand("touch").to_string(),
            "touch: missing operand"
        );
    }

    #[test]
    fn test_unknown_command_is_verbatim() {
        let e = ShellError::UnknownCommand("bash: foo: command not found".into());
        assert_eq!(e.to_string(), "bash: foo: command not found");
    }

    #[test]
    fn test_json_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let e: ConfigError = json_err.into();
        assert!(e.to_string().starts_with("invalid JSON configuration"));
    }

    #[test]
    fn test_toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("this is [[[not valid toml").unwrap_err();
        let e: ConfigError = toml_err.into();
        assert!(e.to_string().starts_with("invalid TOML configuration"));
    }

    #[test]
    fn test_fetch_error_display() {
        let e = ConfigError::Fetch {
            location: "distros/x.json".into(),
            reason: "HTTP 404".into(),
        };
        assert_eq!(e.to_string(), "failed to fetch distros/x.json: HTTP 404");
    }
}
