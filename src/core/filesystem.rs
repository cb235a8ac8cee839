use std::collections::HashMap;

use indexmap::IndexMap;
use log::warn;

use crate::config::{HOME_ALIAS, ROOT_PATH};
use crate::core::error::{ConfigError, FsError};
use crate::core::path::{join, normalize, split_parent};
use crate::models::{DirEntry, FsNode};

/// Virtual filesystem for one distro.
///
/// Nodes are stored in a flat map keyed by absolute path. Every non-root
/// node's parent exists, is a directory, and lists the node's basename
/// among its children.
///
/// The tree is built once from configuration and never mutated afterwards;
/// `mkdir`, `touch` and `rm` only print what they would have done.
#[derive(Clone, Debug)]
pub struct VirtualFs {
    nodes: HashMap<String, FsNode>,
    home: String,
}

impl VirtualFs {
    /// Build the filesystem from a distro description.
    ///
    /// # Arguments
    /// - `home`: absolute home directory of the configured user
    /// - `directories`: directory path (`~`, `~/sub` or absolute) to entry
    ///   names; a trailing `/` marks a subdirectory
    /// - `files`: file name (relative to `home`, `~/...` or absolute) to content
    pub fn build(
        home: &str,
        directories: &IndexMap<String, Vec<String>>,
        files: &IndexMap<String, String>,
    ) -> Result<Self, ConfigError> {
        if !home.starts_with('/') {
            return Err(ConfigError::InvalidHome(home.to_string()));
        }

        let mut fs = Self {
            nodes: HashMap::new(),
            home: normalize(home),
        };
        fs.nodes
            .insert(ROOT_PATH.to_string(), FsNode::directory(None));

        let home = fs.home.clone();
        if !fs.ensure_directory(&home) {
            return Err(ConfigError::InvalidHome(home));
        }

        for (key, entries) in directories {
            let dir = fs.expand_key(key)?;
            if !fs.ensure_directory(&dir) {
                continue;
            }
            for entry in entries {
                let (name, is_dir) = match entry.strip_suffix('/') {
                    Some(name) => (name, true),
                    None => (entry.as_str(), false),
                };
                if name.is_empty() || name.contains('/') {
                    warn!("Ignoring invalid entry '{}' in '{}'", entry, key);
                    continue;
                }
                fs.link_child(&dir, name);
                if is_dir {
                    fs.nodes
                        .entry(join(&dir, name))
                        .or_insert_with(|| FsNode::directory(Some(dir.clone())));
                }
            }
        }

        for (name, content) in files {
            let path = fs.file_path(name);
            let Some((parent, basename)) = split_parent(&path) else {
                continue;
            };
            let parent = parent.to_string();
            let basename = basename.to_string();

            if !fs.ensure_directory(&parent) {
                continue;
            }
            if fs.is_directory(&path) {
                warn!("File '{}' shadowed by a directory of the same name", path);
                continue;
            }
            fs.link_child(&parent, &basename);
            fs.nodes.insert(path, FsNode::file(Some(parent), content.clone()));
        }

        Ok(fs)
    }

    /// Expand a filesystem description key into an absolute path.
    fn expand_key(&self, key: &str) -> Result<String, ConfigError> {
        if key == HOME_ALIAS {
            return Ok(self.home.clone());
        }
        if let Some(rest) = key.strip_prefix("~/") {
            return Ok(normalize(&join(&self.home, rest)));
        }
        if key.starts_with('/') {
            return Ok(normalize(key));
        }
        Err(ConfigError::InvalidPath(key.to_string()))
    }

    /// Absolute path for a file key: absolute and `~/` keys as written,
    /// anything else relative to home.
    fn file_path(&self, name: &str) -> String {
        if name.starts_with('/') {
            return normalize(name);
        }
        let relative = name.strip_prefix("~/").unwrap_or(name);
        normalize(&join(&self.home, relative))
    }

    /// Create `path` and every missing ancestor, linking each into its parent.
    ///
    /// Returns `false` if a file sits somewhere on the way.
    fn ensure_directory(&mut self, path: &str) -> bool {
        let mut current = ROOT_PATH.to_string();
        for part in path.split('/').filter(|p| !p.is_empty()) {
            let child = join(&current, part);
            match self.nodes.get(&child) {
                Some(FsNode::File { .. }) => {
                    warn!("Directory '{}' blocked by existing file '{}'", path, child);
                    return false;
                }
                Some(FsNode::Directory { .. }) => {}
                None => {
                    self.nodes
                        .insert(child.clone(), FsNode::directory(Some(current.clone())));
                }
            }
            self.link_child(&current, part);
            current = child;
        }
        true
    }

    fn link_child(&mut self, dir: &str, name: &str) {
        if let Some(node) = self.nodes.get_mut(dir) {
            node.add_child(name);
        }
    }

    /// Home directory of the configured user.
    pub fn home(&self) -> &str {
        &self.home
    }

    /// Get the node at an absolute path. A trailing `/` is ignored.
    pub fn lookup(&self, path: &str) -> Option<&FsNode> {
        self.nodes
            .get(path)
            .or_else(|| self.nodes.get(&normalize(path)))
    }

    /// Check if a path is a directory.
    pub fn is_directory(&self, path: &str) -> bool {
        self.lookup(path).is_some_and(FsNode::is_directory)
    }

    /// List a directory's children in declaration order.
    ///
    /// A child without a node of its own is reported as a file.
    pub fn list(&self, path: &str) -> Result<Vec<DirEntry>, FsError> {
        let node = self
            .lookup(path)
            .ok_or_else(|| FsError::NoSuchPath(path.to_string()))?;
        let children = node
            .children()
            .ok_or_else(|| FsError::NotADirectory(path.to_string()))?;

        let dir = normalize(path);
        Ok(children
            .iter()
            .map(|name| DirEntry {
                name: name.clone(),
                is_dir: self.is_directory(&join(&dir, name)),
            })
            .collect())
    }

    /// Read a file's content.
    pub fn read(&self, path: &str) -> Result<&str, FsError> {
        match self.lookup(path) {
            Some(FsNode::File { content, .. }) => Ok(content.as_str()),
            Some(FsNode::Directory { .. }) => Err(FsError::IsADirectory(path.to_string())),
            None => Err(FsError::NoSuchPath(path.to_string())),
        }
    }

    /// Iterate over every absolute path in the filesystem (unordered).
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
