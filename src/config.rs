//! Crate configuration.
//!
//! Centralizes the constants used throughout the terminal engine. Sample
//! distro bundles are embedded at compile time using `include_str!`.

// =============================================================================
// Bundled Distros (loaded at compile time)
// =============================================================================

/// Registry describing the bundled distros.
pub const BUNDLED_REGISTRY: &str = include_str!("../assets/distros/registry.json");

/// Ubuntu-flavoured distro bundle.
pub const BUNDLED_UBUNTU: &str = include_str!("../assets/distros/ubuntu.json");

/// Arch-flavoured distro bundle (TOML).
pub const BUNDLED_ARCH: &str = include_str!("../assets/distros/arch.toml");

/// Locations under which the bundled files are served by [`MemorySource::bundled`].
///
/// [`MemorySource::bundled`]: crate::core::MemorySource::bundled
pub mod bundled_locations {
    pub const REGISTRY: &str = "distros/registry.json";
    pub const UBUNTU: &str = "distros/ubuntu.json";
    pub const ARCH: &str = "distros/arch.toml";
}

// =============================================================================
// Filesystem Configuration
// =============================================================================

/// Filesystem root path.
pub const ROOT_PATH: &str = "/";

/// Home alias accepted in paths and filesystem descriptions.
pub const HOME_ALIAS: &str = "~";

/// Parent directory of regular users' homes.
pub const HOME_BASE: &str = "/home";

/// Home directory of the `root` user.
pub const ROOT_HOME: &str = "/root";

// =============================================================================
// Terminal Configuration
// =============================================================================

/// Maximum number of command history entries to keep.
pub const MAX_COMMAND_HISTORY: usize = 500;

/// Width of the right-aligned index column printed by `history`.
pub const HISTORY_INDEX_WIDTH: usize = 5;

/// Separator placed between entries of the single-line `ls` output.
pub const LS_SEPARATOR: &str = "  ";

/// Template used when a distro does not declare `commandNotFoundTemplate`.
pub const DEFAULT_NOT_FOUND_TEMPLATE: &str = "{cmd}: command not found";

// =============================================================================
// Suggestion Configuration
// =============================================================================

/// Suggestion engine limits.
pub mod suggestions {
    /// Maximum number of suggestions returned for a prefix.
    pub const MAX_RESULTS: usize = 5;
    /// Debounce window between the last keystroke and suggestion computation.
    pub const DEBOUNCE_MS: u32 = 150;
}

// =============================================================================
// Boot Sequence Configuration
// =============================================================================

/// Artificial delay (milliseconds) between the configuration fetch and the
/// first prompt.
pub const SETUP_DELAY_MS: u32 = 400;

// =============================================================================
// Time Constants
// =============================================================================

/// Milliseconds per second for time formatting.
pub const MS_PER_SECOND: u64 = 1000;

// =============================================================================
// Storage Configuration
// =============================================================================

/// localStorage keys for preferences that survive a reload.
pub mod storage {
    /// Command history (JSON array of strings).
    pub const HISTORY_KEY: &str = "distroterm.history";
    /// Active theme name.
    pub const THEME_KEY: &str = "distroterm.theme";
    /// Last active distro key.
    pub const DISTRO_KEY: &str = "distroterm.distro";
}
