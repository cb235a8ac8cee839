//! Declarative distro configuration.
//!
//! A distro bundle describes one simulated environment: system identity,
//! filesystem layout, file contents, message of the day and command table.
//! Every map keeps its declaration order because `help`, `ls` and the
//! suggestion list all present entries in that order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_NOT_FOUND_TEMPLATE, HOME_BASE, ROOT_HOME};

// =============================================================================
// Distro Configuration
// =============================================================================

/// Root structure of a distro bundle.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct DistroConfig {
    pub system: SystemInfo,
    /// Directory path (`~`, `~/sub` or absolute) to entry names.
    /// A trailing `/` marks a subdirectory.
    #[serde(default)]
    pub filesystem: IndexMap<String, Vec<String>>,
    /// File name (relative to home) to content.
    #[serde(default)]
    pub files: IndexMap<String, String>,
    #[serde(default)]
    pub motd: Vec<String>,
    #[serde(default)]
    pub commands: IndexMap<String, CommandSpec>,
}

/// Identity of the simulated system.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    /// Human readable distro name (e.g. "Ubuntu 24.04 LTS").
    pub name: String,
    pub user: String,
    pub host: String,
    #[serde(default)]
    pub command_not_found_template: Option<String>,
    #[serde(default)]
    pub package_manager: Option<String>,
}

impl SystemInfo {
    /// Home directory derived from the configured user.
    pub fn home_path(&self) -> String {
        if self.user == "root" {
            ROOT_HOME.to_string()
        } else {
            format!("{}/{}", HOME_BASE, self.user)
        }
    }

    pub fn not_found_template(&self) -> &str {
        self.command_not_found_template
            .as_deref()
            .unwrap_or(DEFAULT_NOT_FOUND_TEMPLATE)
    }
}

// =============================================================================
// Command Specification
// =============================================================================

/// A command entry as written in the configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommandSpec {
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionTag>,
}

/// Static command output: either one string or a list of lines.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OutputSpec {
    Line(String),
    Lines(Vec<String>),
}

impl OutputSpec {
    pub fn into_lines(self) -> Vec<String> {
        match self {
            Self::Line(line) => vec![line],
            Self::Lines(lines) => lines,
        }
    }
}

/// Built-in behavior selected by a command entry instead of static text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionTag {
    #[serde(alias = "clearScreen", alias = "clear-screen")]
    Clear,
    #[serde(alias = "showDate", alias = "show-date")]
    Date,
    #[serde(alias = "showHistory", alias = "show-history")]
    History,
    #[serde(alias = "toggleTheme", alias = "toggle-theme")]
    Theme,
    #[serde(alias = "changeDirectory", alias = "change-directory")]
    Cd,
    #[serde(alias = "makeDirectory", alias = "make-directory")]
    Mkdir,
    #[serde(alias = "createFile", alias = "create-file")]
    Touch,
    #[serde(alias = "removeFile", alias = "remove-file")]
    Rm,
    #[serde(alias = "switch-distro")]
    SwitchDistro,
    #[serde(alias = "list-distros")]
    ListDistros,
}
