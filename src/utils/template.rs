//! `{name}` placeholder substitution for configurable messages.

use std::sync::LazyLock;

use log::warn;
use regex::{Captures, Regex};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z]+)\}").expect("placeholder pattern is valid"));

/// Replace `{key}` placeholders with values from `vars`.
///
/// Unknown placeholders are left untouched.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            let key = &caps[1];
            match vars.iter().find(|(name, _)| *name == key) {
                Some((_, value)) => value.to_string(),
                None => {
                    warn!("Unknown placeholder '{{{}}}' in template", key);
                    caps[0].to_string()
                }
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_cmd() {
        assert_eq!(
            render("bash: {cmd}: command not found", &[("cmd", "foo")]),
            "bash: foo: command not found"
        );
    }

    #[test]
    fn test_render_repeated_and_multiple() {
        assert_eq!(
            render("{user}@{host} {user}", &[("user", "ada"), ("host", "box")]),
            "ada@box ada"
        );
    }

    #[test]
    fn test_unknown_placeholder_kept() {
        assert_eq!(render("{nope} {cmd}", &[("cmd", "x")]), "{nope} x");
    }

    #[test]
    fn test_value_not_reexpanded() {
        assert_eq!(render("{cmd}", &[("cmd", "{cmd}")]), "{cmd}");
    }

    #[test]
    fn test_no_placeholders() {
        assert_eq!(render("plain text", &[]), "plain text");
    }
}
