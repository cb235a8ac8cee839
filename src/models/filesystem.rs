use serde::Serialize;

// =============================================================================
// Filesystem Node
// =============================================================================

/// A node of the virtual filesystem.
///
/// Nodes live in a flat map keyed by absolute path. A node only knows the
/// path of its parent; children are stored by name and resolved by joining
/// them onto the directory's own path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FsNode {
    Directory {
        /// Absolute path of the parent, `None` for the root.
        parent: Option<String>,
        /// Child names in declaration order, without duplicates.
        children: Vec<String>,
    },
    File {
        parent: Option<String>,
        content: String,
    },
}

impl FsNode {
    /// Create an empty directory below `parent`.
    pub fn directory(parent: Option<String>) -> Self {
        Self::Directory {
            parent,
            children: Vec::new(),
        }
    }

    /// Create a file below `parent`.
    pub fn file(parent: Option<String>, content: impl Into<String>) -> Self {
        Self::File {
            parent,
            content: content.into(),
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory { .. })
    }

    /// Absolute path of the parent directory.
    pub fn parent(&self) -> Option<&str> {
        match self {
            Self::Directory { parent, .. } | Self::File { parent, .. } => parent.as_deref(),
        }
    }

    /// Child names for directories, `None` for files.
    pub fn children(&self) -> Option<&[String]> {
        match self {
            Self::Directory { children, .. } => Some(children),
            Self::File { .. } => None,
        }
    }

    /// Append a child name unless it is already present.
    ///
    /// Returns `false` when called on a file.
    pub(crate) fn add_child(&mut self, name: &str) -> bool {
        match self {
            Self::Directory { children, .. } => {
                if !children.iter().any(|c| c == name) {
                    children.push(name.to_string());
                }
                true
            }
            Self::File { .. } => false,
        }
    }
}

// =============================================================================
// Directory Listing
// =============================================================================

/// Directory entry returned by `VirtualFs::list`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

impl DirEntry {
    /// Name as shown by `ls`: directories carry a trailing `/`.
    pub fn display_name(&self) -> String {
        if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }
}
