//! The terminal: one distro's filesystem and command table plus the
//! session that runs against them.

use log::info;

use crate::core::autocomplete::{AutocompleteResult, Suggestion, SuggestionState, suggest};
use crate::core::commands::{CommandResult, CommandTable, ExecContext, execute};
use crate::core::debounce::{Debouncer, Ticket};
use crate::core::error::ConfigError;
use crate::core::loader::{ConfigSource, load_config, load_registry};
use crate::core::path::display_path;
use crate::core::{Session, VirtualFs};
use crate::models::{
    DistroConfig, DistroRegistry, OutputLine, Prompt, SessionStats, SystemInfo, Theme,
};
use crate::utils::now_millis;

/// A running terminal.
///
/// Owns everything a command can touch. Switching distros goes through
/// [`Terminal::reset`], which rebuilds the filesystem and command table
/// and keeps the session's history, counters and theme.
#[derive(Debug)]
pub struct Terminal {
    config: DistroConfig,
    registry: Option<DistroRegistry>,
    active_distro: Option<String>,
    fs: VirtualFs,
    table: CommandTable,
    session: Session,
    suggestions: SuggestionState,
    debouncer: Debouncer,
}

impl Terminal {
    /// Single-distro terminal. `distro`/`distros` only report that nothing
    /// else is installed.
    pub fn new(config: DistroConfig, now_ms: u64) -> Result<Self, ConfigError> {
        let home = config.system.home_path();
        let fs = VirtualFs::build(&home, &config.filesystem, &config.files)?;
        let table = CommandTable::from_config(&config, fs.home());
        let session = Session::new(fs.home(), now_ms);

        info!(
            "Terminal ready: {} ({} paths, {} commands)",
            config.system.name,
            fs.len(),
            table.len()
        );

        Ok(Self {
            config,
            registry: None,
            active_distro: None,
            fs,
            table,
            session,
            suggestions: SuggestionState::default(),
            debouncer: Debouncer::default(),
        })
    }

    /// Terminal running `key` out of `registry`.
    pub fn with_registry(
        registry: DistroRegistry,
        key: &str,
        config: DistroConfig,
        now_ms: u64,
    ) -> Result<Self, ConfigError> {
        if !registry.contains(key) {
            return Err(ConfigError::UnknownDistro(key.to_string()));
        }
        let mut terminal = Self::new(config, now_ms)?;
        terminal.registry = Some(registry);
        terminal.active_distro = Some(key.to_string());
        Ok(terminal)
    }

    /// Load the registry, pick `preferred` if registered (else the
    /// registry default) and load that distro.
    pub async fn boot<S: ConfigSource>(
        source: &S,
        registry_location: &str,
        preferred: Option<&str>,
        now_ms: u64,
    ) -> Result<Self, ConfigError> {
        let registry = load_registry(source, registry_location).await?;
        let key = registry.resolve_key(preferred).to_string();
        let location = registry
            .get(&key)
            .map(|entry| entry.config_location.clone())
            .ok_or_else(|| ConfigError::UnknownDistro(key.clone()))?;

        info!("Booting distro '{}' from {}", key, location);
        let config = load_config(source, &location).await?;
        Self::with_registry(registry, &key, config, now_ms)
    }

    /// Where the bundle for `key` lives.
    pub fn config_location(&self, key: &str) -> Result<String, ConfigError> {
        self.registry
            .as_ref()
            .and_then(|registry| registry.get(key))
            .map(|entry| entry.config_location.clone())
            .ok_or_else(|| ConfigError::UnknownDistro(key.to_string()))
    }

    /// Fetch the bundle for `key` and [`reset`](Self::reset) onto it.
    ///
    /// On failure the terminal keeps running the current distro.
    pub async fn switch_distro<S: ConfigSource>(
        &mut self,
        source: &S,
        key: &str,
    ) -> Result<(), ConfigError> {
        let location = self.config_location(key)?;
        let config = load_config(source, &location).await?;
        self.reset(config, key)
    }

    /// Replace the running distro.
    ///
    /// The new filesystem and table are built before anything is touched,
    /// so an invalid bundle leaves the terminal as it was. On success the
    /// working directory moves to the new home, pending suggestion lookups
    /// are invalidated and the suggestion list is closed.
    pub fn reset(&mut self, config: DistroConfig, key: &str) -> Result<(), ConfigError> {
        let home = config.system.home_path();
        let fs = VirtualFs::build(&home, &config.filesystem, &config.files)?;
        let table = CommandTable::from_config(&config, fs.home());

        self.debouncer.cancel();
        self.suggestions.clear();
        self.session.set_cwd(fs.home());

        info!(
            "Switched to {} ('{}', {} paths, {} commands)",
            config.system.name,
            key,
            fs.len(),
            table.len()
        );

        self.fs = fs;
        self.table = table;
        self.config = config;
        self.active_distro = Some(key.to_string());
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    /// Execute a line at the current wall-clock time.
    pub fn execute(&mut self, line: &str) -> CommandResult {
        self.execute_at(line, now_millis())
    }

    /// Execute a line as if submitted at `now_ms`.
    pub fn execute_at(&mut self, line: &str, now_ms: u64) -> CommandResult {
        self.suggestions.clear();
        self.debouncer.cancel();

        let cwd_before = self.session.cwd().to_string();
        let mut ctx = ExecContext {
            session: &mut self.session,
            table: &self.table,
            fs: &self.fs,
            system: &self.config.system,
            registry: self.registry.as_ref(),
            active_distro: self.active_distro.as_deref(),
            now_ms,
        };
        let result = execute(line, &mut ctx);

        if self.session.cwd() != cwd_before {
            self.table
                .refresh_dynamic(&self.config.system.user, self.session.cwd());
        }
        result
    }

    // ------------------------------------------------------------------------
    // Suggestions
    // ------------------------------------------------------------------------

    /// Compute suggestions for `prefix` now and make them the shown list.
    pub fn suggestions(&mut self, prefix: &str) -> &[Suggestion] {
        self.suggestions.set(suggest(prefix, &self.table));
        self.suggestions.items()
    }

    /// Start a debounced lookup; hand the ticket to
    /// [`apply_suggestions`](Self::apply_suggestions) when the timer fires.
    pub fn schedule_suggestions(&mut self) -> Ticket {
        self.debouncer.schedule()
    }

    /// Run a debounced lookup. `None` if the ticket was superseded or
    /// invalidated by a command or distro switch.
    pub fn apply_suggestions(&mut self, ticket: Ticket, prefix: &str) -> Option<&[Suggestion]> {
        if !self.debouncer.fire(ticket) {
            return None;
        }
        Some(self.suggestions(prefix))
    }

    pub fn suggestion_state(&self) -> &SuggestionState {
        &self.suggestions
    }

    pub fn suggestion_state_mut(&mut self) -> &mut SuggestionState {
        &mut self.suggestions
    }

    pub fn tab(&mut self, input: &str) -> AutocompleteResult {
        self.debouncer.cancel();
        self.suggestions.tab(input, &self.table)
    }

    // ------------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------------

    pub fn prompt(&self) -> Prompt {
        let system = &self.config.system;
        Prompt {
            user: system.user.clone(),
            host: system.host.clone(),
            display_path: display_path(self.session.cwd(), self.fs.home()),
        }
    }

    pub fn session_stats(&self, now_ms: u64) -> SessionStats {
        SessionStats {
            command_count: self.session.command_count(),
            elapsed_seconds: self.session.elapsed_seconds(now_ms),
        }
    }

    pub fn motd(&self) -> Vec<OutputLine> {
        self.config.motd.iter().map(OutputLine::motd).collect()
    }

    pub fn history_up(&mut self) -> String {
        self.session.history_up()
    }

    pub fn history_down(&mut self) -> String {
        self.session.history_down()
    }

    pub fn restore_history(&mut self, entries: Vec<String>) {
        self.session.restore_history(entries);
    }

    pub fn history(&self) -> &[String] {
        self.session.history()
    }

    pub fn theme(&self) -> Theme {
        self.session.theme()
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.session.set_theme(theme);
    }

    pub fn cwd(&self) -> &str {
        self.session.cwd()
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn system(&self) -> &SystemInfo {
        &self.config.system
    }

    pub fn config(&self) -> &DistroConfig {
        &self.config
    }

    pub fn fs(&self) -> &VirtualFs {
        &self.fs
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    pub fn registry(&self) -> Option<&DistroRegistry> {
        self.registry.as_ref()
    }

    pub fn active_distro(&self) -> Option<&str> {
        self.active_distro.as_deref()
    }
}
