//! Process wide defaults for candidacy and traversal
use std::path::Path;
use std::sync::{LazyLock, RwLock};

use serde::{Deserialize, Serialize};

pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Whether metabolite identity includes compartment unless a pass says otherwise
    pub compartmentalization: bool,
    /// Smallest depth accepted by a proximity traversal
    pub minimum_depth: usize,
    /// Largest depth accepted by a proximity traversal
    pub maximum_depth: usize,
    /// Smallest path count accepted by path and connection traversals
    pub minimum_count: usize,
    /// Largest path count accepted by path and connection traversals
    pub maximum_count: usize,
    /// Depth used when a proximity request does not give one
    pub default_depth: usize,
    /// Count used when a path or connection request does not give one
    pub default_count: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            compartmentalization: false,
            minimum_depth: 1,
            maximum_depth: 5,
            minimum_count: 1,
            maximum_count: 5,
            default_depth: 1,
            default_count: 1,
        }
    }
}

impl Configuration {
    /// Load a configuration from a JSON file, or use the defaults if the file
    /// is missing or can't be parsed
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(configuration) => {
                    log::info!("Loaded configuration from {:?}", path.as_ref());
                    configuration
                }
                Err(e) => {
                    log::warn!("Failed to parse configuration: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Configuration file not found, using defaults");
                Self::default()
            }
        }
    }

    /// Whether a proximity depth lies within the configured bounds
    pub fn admits_depth(&self, depth: usize) -> bool {
        (self.minimum_depth..=self.maximum_depth).contains(&depth)
    }

    /// Whether a path count lies within the configured bounds
    pub fn admits_count(&self, count: usize) -> bool {
        (self.minimum_count..=self.maximum_count).contains(&count)
    }
}

/// Snapshot of the current configuration
///
/// A poisoned lock falls back to the defaults rather than propagating the panic
pub fn current() -> Configuration {
    CONFIGURATION
        .read()
        .map(|configuration| configuration.clone())
        .unwrap_or_default()
}

/// Replace the process wide configuration
pub fn install(configuration: Configuration) {
    match CONFIGURATION.write() {
        Ok(mut guard) => *guard = configuration,
        Err(poisoned) => *poisoned.into_inner() = configuration,
    }
}
