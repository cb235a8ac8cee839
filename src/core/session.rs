//! Per-page-load session state: working directory, command history,
//! counters and theme.

use crate::config::{MAX_COMMAND_HISTORY, MS_PER_SECOND};
use crate::models::Theme;

/// Session state for one terminal.
///
/// The history cursor ranges over `0..=history.len()`; `history.len()` is
/// the "new empty line" position.
#[derive(Clone, Debug)]
pub struct Session {
    cwd: String,
    history: Vec<String>,
    history_cursor: usize,
    command_count: u64,
    started_at_ms: u64,
    theme: Theme,
}

impl Session {
    /// Creates a session rooted at `home`, started at `now_ms`.
    pub fn new(home: impl Into<String>, now_ms: u64) -> Self {
        Self {
            cwd: home.into(),
            history: Vec::new(),
            history_cursor: 0,
            command_count: 0,
            started_at_ms: now_ms,
            theme: Theme::default(),
        }
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    pub fn set_cwd(&mut self, path: impl Into<String>) {
        self.cwd = path.into();
    }

    /// Records a submitted line.
    ///
    /// Blank lines are ignored. Otherwise the line is appended unless it
    /// equals the previous entry, the cursor returns to the end and the
    /// command counter is incremented.
    pub fn record(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        if self.history.last().map(String::as_str) != Some(line) {
            self.history.push(line.to_string());
            if self.history.len() > MAX_COMMAND_HISTORY {
                self.history.remove(0);
            }
        }
        self.history_cursor = self.history.len();
        self.command_count += 1;
    }

    /// Replaces the history with persisted entries, oldest first.
    pub fn restore_history(&mut self, entries: Vec<String>) {
        let skip = entries.len().saturating_sub(MAX_COMMAND_HISTORY);
        self.history = entries.into_iter().skip(skip).collect();
        self.history_cursor = self.history.len();
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn history_cursor(&self) -> usize {
        self.history_cursor
    }

    /// Moves the cursor one entry back and returns the line to show.
    pub fn history_up(&mut self) -> String {
        if self.history_cursor > 0 {
            self.history_cursor -= 1;
        }
        self.current_entry()
    }

    /// Moves the cursor one entry forward and returns the line to show.
    pub fn history_down(&mut self) -> String {
        if self.history_cursor < self.history.len() {
            self.history_cursor += 1;
        }
        self.current_entry()
    }

    /// Entry under the cursor, or an empty string at the end position.
    pub fn current_entry(&self) -> String {
        self.history
            .get(self.history_cursor)
            .cloned()
            .unwrap_or_default()
    }

    pub fn command_count(&self) -> u64 {
        self.command_count
    }

    /// Whole seconds elapsed since the session started.
    pub fn elapsed_seconds(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.started_at_ms) / MS_PER_SECOND
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Flips the theme and returns the new one.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let session = Session::new("/home/ada", 1_000);
        assert_eq!(session.cwd(), "/home/ada");
        assert!(session.history().is_empty());
        assert_eq!(session.history_cursor(), 0);
        assert_eq!(session.command_count(), 0);
        assert_eq!(session.theme(), Theme::Dark);
    }

    #[test]
    fn test_consecutive_duplicates_collapse() {
        let mut session = Session::new("/", 0);
        session.record("ls");
        session.record("ls");
        assert_eq!(session.history(), ["ls"]);
        assert_eq!(session.command_count(), 2);
    }

    #[test]
    fn test_non_consecutive_duplicates_kept() {
        let mut session = Session::new("/", 0);
        session.record("ls");
        session.record("pwd");
        session.record("ls");
        assert_eq!(session.history(), ["ls", "pwd", "ls"]);
    }

    #[test]
    fn test_blank_lines_ignored() {
        let mut session = Session::new("/", 0);
        session.record("   ");
        session.record("");
        assert!(session.history().is_empty());
        assert_eq!(session.command_count(), 0);
    }

    #[test]
    fn test_record_resets_cursor() {
        let mut session = Session::new("/", 0);
        session.record("ls");
        session.record("pwd");
        session.history_up();
        session.history_up();
        assert_eq!(session.history_cursor(), 0);
        session.record("date");
        assert_eq!(session.history_cursor(), 3);
    }

    #[test]
    fn test_history_navigation() {
        let mut session = Session::new("/", 0);
        session.record("ls");
        session.record("pwd");

        assert_eq!(session.history_up(), "pwd");
        assert_eq!(session.history_up(), "ls");
        // Clamped at the oldest entry.
        assert_eq!(session.history_up(), "ls");
        assert_eq!(session.history_down(), "pwd");
        assert_eq!(session.history_down(), "");
        // Clamped at the empty line.
        assert_eq!(session.history_down(), "");
        assert_eq!(session.history_cursor(), 2);
    }

    #[test]
    fn test_navigation_on_empty_history() {
        let mut session = Session::new("/", 0);
        assert_eq!(session.history_up(), "");
        assert_eq!(session.history_down(), "");
    }

    #[test]
    fn test_history_cap() {
        let mut session = Session::new("/", 0);
        for i in 0..MAX_COMMAND_HISTORY + 10 {
            session.record(&format!("echo {i}"));
        }
        assert_eq!(session.history().len(), MAX_COMMAND_HISTORY);
        assert_eq!(session.history()[0], "echo 10");
    }

    #[test]
    fn test_restore_history() {
        let mut session = Session::new("/", 0);
        session.restore_history(vec!["ls".to_string(), "pwd".to_string()]);
        assert_eq!(session.history_cursor(), 2);
        assert_eq!(session.history_up(), "pwd");
    }

    #[test]
    fn test_elapsed_seconds() {
        let session = Session::new("/", 10_000);
        assert_eq!(session.elapsed_seconds(10_999), 0);
        assert_eq!(session.elapsed_seconds(75_000), 65);
        assert_eq!(session.elapsed_seconds(0), 0);
    }

    #[test]
    fn test_toggle_theme() {
        let mut session = Session::new("/", 0);
        assert_eq!(session.toggle_theme(), Theme::Light);
        assert_eq!(session.toggle_theme(), Theme::Dark);
    }
}
