//! localStorage persistence for history, theme and the last distro.
//!
//! Everything here is best-effort: a browser without storage (or with it
//! disabled) simply starts fresh on every load.

use log::warn;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use web_sys::Storage;

use crate::config::storage::{DISTRO_KEY, HISTORY_KEY, THEME_KEY};
use crate::models::Theme;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("localStorage not available")]
    Unavailable,
    #[error("failed to serialize value: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("failed to write '{0}'")]
    WriteFailed(String),
}

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok()?
}

fn get_raw(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

fn set_raw(key: &str, value: &str) -> Result<(), StorageError> {
    local_storage()
        .ok_or(StorageError::Unavailable)?
        .set_item(key, value)
        .map_err(|_| StorageError::WriteFailed(key.to_string()))
}

fn get_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    serde_json::from_str(&get_raw(key)?).ok()
}

fn set_json<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<(), StorageError> {
    set_raw(key, &serde_json::to_string(value)?)
}

fn report(result: Result<(), StorageError>) {
    if let Err(e) = result {
        warn!("Could not persist preference: {}", e);
    }
}

pub fn load_history() -> Vec<String> {
    get_json(HISTORY_KEY).unwrap_or_default()
}

pub fn save_history(entries: &[String]) {
    report(set_json(HISTORY_KEY, entries));
}

pub fn load_theme() -> Option<Theme> {
    Theme::from_name(&get_raw(THEME_KEY)?)
}

pub fn save_theme(theme: Theme) {
    report(set_raw(THEME_KEY, theme.as_str()));
}

pub fn load_distro() -> Option<String> {
    get_raw(DISTRO_KEY)
}

pub fn save_distro(key: &str) {
    report(set_raw(DISTRO_KEY, key));
}
