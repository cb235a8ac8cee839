//! Command suggestions while typing and Tab completion.
//!
//! Suggestions are prefix matches against the command table keys, so
//! multi-word phrases (`sudo rm -rf /`) are offered as soon as their first
//! characters are typed.

use serde::Serialize;

use crate::config::suggestions::MAX_RESULTS;
use crate::core::commands::CommandTable;

// ============================================================================
// Public Types
// ============================================================================

/// A suggested command with its help text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub command: String,
    pub description: String,
}

/// Result of a Tab press.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AutocompleteResult {
    /// Single match - replace the input with this value.
    Single(String),
    /// Multiple matches - show them all.
    Multiple(Vec<Suggestion>),
    /// No matches found.
    None,
}

// ============================================================================
// Matching
// ============================================================================

/// Commands whose name starts with `prefix`, ignoring case.
///
/// Results keep table order and are capped at [`MAX_RESULTS`]. A blank
/// prefix yields nothing.
pub fn suggest(prefix: &str, table: &CommandTable) -> Vec<Suggestion> {
    if prefix.trim().is_empty() {
        return Vec::new();
    }
    let needle = prefix.trim_start().to_lowercase();

    table
        .iter()
        .filter(|(name, _)| name.to_lowercase().starts_with(&needle))
        .take(MAX_RESULTS)
        .map(|(name, descriptor)| Suggestion {
            command: name.to_string(),
            description: descriptor.description.clone(),
        })
        .collect()
}

// ============================================================================
// Selection State
// ============================================================================

/// The suggestion list currently shown and the highlighted entry.
#[derive(Clone, Debug, Default)]
pub struct SuggestionState {
    items: Vec<Suggestion>,
    selected: Option<usize>,
}

impl SuggestionState {
    /// Replace the list; the selection is dropped.
    pub fn set(&mut self, items: Vec<Suggestion>) {
        self.items = items;
        self.selected = None;
    }

    pub fn clear(&mut self) {
        self.set(Vec::new());
    }

    pub fn items(&self) -> &[Suggestion] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Suggestion> {
        self.selected.and_then(|i| self.items.get(i))
    }

    /// Move the highlight down, wrapping to the first entry.
    pub fn select_next(&mut self) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % len,
            None => 0,
        });
    }

    /// Move the highlight up, wrapping to the last entry.
    pub fn select_prev(&mut self) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        });
    }

    /// Take the highlighted command and close the list.
    ///
    /// Returns `None` (and keeps the list) when nothing is highlighted.
    pub fn accept(&mut self) -> Option<String> {
        let command = self.selected()?.command.clone();
        self.clear();
        Some(command)
    }

    /// Handle a Tab press on `input`.
    ///
    /// A single match is completed and the list closed; several matches
    /// are shown; no match leaves everything as it was.
    pub fn tab(&mut self, input: &str, table: &CommandTable) -> AutocompleteResult {
        let mut matches = suggest(input, table);
        match matches.len() {
            0 => AutocompleteResult::None,
            1 => {
                self.clear();
                let only = matches.remove(0);
                AutocompleteResult::Single(format!("{} ", only.command))
            }
            _ => {
                self.set(matches.clone());
                AutocompleteResult::Multiple(matches)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;
    use crate::core::commands::{CommandDescriptor, core_defaults};

    fn table() -> CommandTable {
        let mut distro = IndexMap::new();
        for name in ["neofetch", "nano", "sudo", "sudo rm -rf /", "Systemctl"] {
            distro.insert(name.to_string(), CommandDescriptor::new(format!("{name} help")));
        }
        CommandTable::build(distro, core_defaults())
    }

    fn commands(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.command.as_str()).collect()
    }

    #[test]
    fn test_prefix_in_table_order() {
        let table = table();
        assert_eq!(commands(&suggest("n", &table)), ["neofetch", "nano"]);
        assert_eq!(commands(&suggest("su", &table)), ["sudo", "sudo rm -rf /"]);
        assert_eq!(commands(&suggest("sudo r", &table)), ["sudo rm -rf /"]);
    }

    #[test]
    fn test_case_insensitive() {
        let table = table();
        assert_eq!(commands(&suggest("SY", &table)), ["Systemctl"]);
        assert_eq!(commands(&suggest("NEO", &table)), ["neofetch"]);
    }

    #[test]
    fn test_carries_description() {
        let suggestions = suggest("neo", &table());
        assert_eq!(suggestions[0].description, "neofetch help");
    }

    #[test]
    fn test_capped() {
        let mut distro = IndexMap::new();
        for i in 0..8 {
            distro.insert(format!("cmd{i}"), CommandDescriptor::new("x"));
        }
        let table = CommandTable::build(distro, IndexMap::new());
        let result = suggest("cmd", &table);
        assert_eq!(result.len(), MAX_RESULTS);
        assert_eq!(result[0].command, "cmd0");
        assert_eq!(result[4].command, "cmd4");
    }

    #[test]
    fn test_blank_prefix() {
        let table = table();
        assert!(suggest("", &table).is_empty());
        assert!(suggest("   ", &table).is_empty());
        assert!(suggest("zzz", &table).is_empty());
    }

    #[test]
    fn test_selection_wraps() {
        let mut state = SuggestionState::default();
        state.set(suggest("n", &table()));
        assert_eq!(state.selected_index(), None);

        state.select_next();
        assert_eq!(state.selected_index(), Some(0));
        state.select_next();
        assert_eq!(state.selected_index(), Some(1));
        state.select_next();
        assert_eq!(state.selected_index(), Some(0));

        state.select_prev();
        assert_eq!(state.selected_index(), Some(1));
    }

    #[test]
    fn test_prev_from_nothing_selects_last() {
        let mut state = SuggestionState::default();
        state.set(suggest("su", &table()));
        state.select_prev();
        assert_eq!(state.selected().unwrap().command, "sudo rm -rf /");
    }

    #[test]
    fn test_selection_on_empty_list() {
        let mut state = SuggestionState::default();
        state.select_next();
        state.select_prev();
        assert_eq!(state.selected_index(), None);
        assert_eq!(state.accept(), None);
    }

    #[test]
    fn test_accept() {
        let mut state = SuggestionState::default();
        state.set(suggest("n", &table()));
        assert_eq!(state.accept(), None);
        assert_eq!(state.items().len(), 2);

        state.select_next();
        state.select_next();
        assert_eq!(state.accept().as_deref(), Some("nano"));
        assert!(state.is_empty());
        assert_eq!(state.selected_index(), None);
    }

    #[test]
    fn test_set_resets_selection() {
        let mut state = SuggestionState::default();
        state.set(suggest("n", &table()));
        state.select_next();
        state.set(suggest("su", &table()));
        assert_eq!(state.selected_index(), None);
    }

    #[test]
    fn test_tab_single() {
        let mut state = SuggestionState::default();
        state.set(suggest("neo", &table()));
        assert_eq!(
            state.tab("neo", &table()),
            AutocompleteResult::Single("neofetch ".to_string())
        );
        assert!(state.is_empty());
    }

    #[test]
    fn test_tab_multiple() {
        let mut state = SuggestionState::default();
        let result = state.tab("n", &table());
        match result {
            AutocompleteResult::Multiple(items) => assert_eq!(commands(&items), ["neofetch", "nano"]),
            other => panic!("expected Multiple, got {other:?}"),
        }
        assert_eq!(state.items().len(), 2);
    }

    #[test]
    fn test_tab_none_keeps_state() {
        let mut state = SuggestionState::default();
        state.set(suggest("n", &table()));
        assert_eq!(state.tab("zzz", &table()), AutocompleteResult::None);
        assert_eq!(state.items().len(), 2);
    }
}
