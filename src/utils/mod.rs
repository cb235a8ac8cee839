//! Utility modules for formatting, templating and time.
//!
//! Provides:
//! - [`format_datetime`] - Date display
//! - [`render_template`] - `{placeholder}` substitution in config messages
//! - [`now_millis`] - Wall-clock access on native and wasm targets

mod format;
mod sysinfo;
mod template;

pub use format::{format_date_iso, format_datetime};
pub use sysinfo::now_millis;
pub use template::render as render_template;
