//! Path resolution for user-typed paths.
//!
//! Resolution is single-segment: `.` and `..` are only understood as the
//! whole argument, and longer relative paths are appended to the current
//! directory as they are. `..` follows the parent recorded on the node
//! rather than trimming the string.

use crate::config::{HOME_ALIAS, ROOT_PATH};
use crate::core::VirtualFs;
use crate::models::FsNode;

/// Resolve `input` against `cwd` into an absolute path.
///
/// - empty or `.` returns `cwd`
/// - absolute input is returned verbatim
/// - `..` returns the parent of the node at `cwd` (or `cwd` when there is none)
/// - `~` and `~/rest` are taken relative to the home directory
/// - anything else is `cwd/input` with doubled separators collapsed
pub fn resolve(input: &str, cwd: &str, fs: &VirtualFs) -> String {
    match input {
        "" | "." => cwd.to_string(),
        ".." => fs
            .lookup(cwd)
            .and_then(FsNode::parent)
            .unwrap_or(cwd)
            .to_string(),
        HOME_ALIAS => fs.home().to_string(),
        _ if input.starts_with('/') => input.to_string(),
        _ => match input.strip_prefix("~/") {
            Some(rest) => collapse_separators(&format!("{}/{}", fs.home(), rest)),
            None => collapse_separators(&format!("{}/{}", cwd, input)),
        },
    }
}

/// Collapse runs of `/` into one.
pub fn collapse_separators(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_slash = false;
    for c in path.chars() {
        if c == '/' {
            if !prev_slash {
                out.push(c);
            }
            prev_slash = true;
        } else {
            out.push(c);
            prev_slash = false;
        }
    }
    out
}

/// Collapse separators and drop a trailing `/` (the root stays `/`).
pub fn normalize(path: &str) -> String {
    let collapsed = collapse_separators(path);
    match collapsed.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed.to_string(),
        _ => collapsed,
    }
}

/// Join a child name onto a directory path.
pub fn join(dir: &str, name: &str) -> String {
    if dir == ROOT_PATH {
        format!("/{}", name)
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Split an absolute path into its parent path and basename.
///
/// Returns `None` for the root.
pub fn split_parent(path: &str) -> Option<(&str, &str)> {
    let (parent, name) = path.rsplit_once('/')?;
    if name.is_empty() {
        return None;
    }
    Some((if parent.is_empty() { ROOT_PATH } else { parent }, name))
}

/// Render `path` for the prompt, with the home prefix shown as `~`.
pub fn display_path(path: &str, home: &str) -> String {
    if path == home {
        return HOME_ALIAS.to_string();
    }
    match path.strip_prefix(home) {
        Some(rest) if rest.starts_with('/') => format!("{}{}", HOME_ALIAS, rest),
        _ => path.to_string(),
    }
}
