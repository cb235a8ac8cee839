//! Fetching and parsing distro bundles and the registry.
//!
//! Where the bytes come from is abstracted by [`ConfigSource`]; the format
//! is picked from the location's extension.

use std::collections::HashMap;

use log::debug;
use serde::de::DeserializeOwned;

use crate::config::{BUNDLED_ARCH, BUNDLED_REGISTRY, BUNDLED_UBUNTU, bundled_locations};
use crate::core::error::ConfigError;
use crate::models::{DistroConfig, DistroRegistry};

/// Something that can produce the text stored at a location.
#[allow(async_fn_in_trait)]
pub trait ConfigSource {
    async fn fetch(&self, location: &str) -> Result<String, ConfigError>;
}

/// In-memory bundles keyed by location.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, location: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(location, content);
        self
    }

    pub fn insert(&mut self, location: impl Into<String>, content: impl Into<String>) {
        self.files.insert(location.into(), content.into());
    }

    /// The sample distros compiled into the crate, served at
    /// [`bundled_locations`].
    pub fn bundled() -> Self {
        Self::new()
            .with(bundled_locations::REGISTRY, BUNDLED_REGISTRY)
            .with(bundled_locations::UBUNTU, BUNDLED_UBUNTU)
            .with(bundled_locations::ARCH, BUNDLED_ARCH)
    }
}

impl ConfigSource for MemorySource {
    async fn fetch(&self, location: &str) -> Result<String, ConfigError> {
        self.files
            .get(location)
            .cloned()
            .ok_or_else(|| ConfigError::Fetch {
                location: location.to_string(),
                reason: "not found".to_string(),
            })
    }
}

/// Serialization format of a configuration document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
}

impl Format {
    /// `.toml` locations are TOML, everything else is JSON. Query strings
    /// and fragments are ignored.
    pub fn from_location(location: &str) -> Self {
        let path = location.split(['?', '#']).next().unwrap_or(location);
        if path.to_ascii_lowercase().ends_with(".toml") {
            Self::Toml
        } else {
            Self::Json
        }
    }
}

fn parse<T: DeserializeOwned>(text: &str, format: Format) -> Result<T, ConfigError> {
    Ok(match format {
        Format::Json => serde_json::from_str(text)?,
        Format::Toml => toml::from_str(text)?,
    })
}

pub fn parse_config(text: &str, format: Format) -> Result<DistroConfig, ConfigError> {
    parse(text, format)
}

pub fn parse_registry(text: &str, format: Format) -> Result<DistroRegistry, ConfigError> {
    parse(text, format)
}

/// Fetch and parse a distro bundle.
pub async fn load_config<S: ConfigSource>(
    source: &S,
    location: &str,
) -> Result<DistroConfig, ConfigError> {
    debug!("Loading distro config from {}", location);
    let text = source.fetch(location).await?;
    parse_config(&text, Format::from_location(location))
}

/// Fetch and parse the distro registry.
pub async fn load_registry<S: ConfigSource>(
    source: &S,
    location: &str,
) -> Result<DistroRegistry, ConfigError> {
    debug!("Loading distro registry from {}", location);
    let text = source.fetch(location).await?;
    parse_registry(&text, Format::from_location(location))
}
