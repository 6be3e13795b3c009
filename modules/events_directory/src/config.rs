use serde::{Deserialize, Serialize};

use crate::domain::service::ServiceConfig;

/// Configuration for the events_directory module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectoryConfig {
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,
    #[serde(default = "default_max_title_length")]
    pub max_title_length: usize,
    #[serde(default = "default_max_rating")]
    pub max_rating: u8,
    /// Reject joins once an event reaches `max_participants`.
    #[serde(default = "default_enforce_capacity")]
    pub enforce_capacity: bool,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            max_name_length: default_max_name_length(),
            max_title_length: default_max_title_length(),
            max_rating: default_max_rating(),
            enforce_capacity: default_enforce_capacity(),
        }
    }
}

impl From<&DirectoryConfig> for ServiceConfig {
    fn from(cfg: &DirectoryConfig) -> Self {
        Self {
            max_name_length: cfg.max_name_length,
            max_title_length: cfg.max_title_length,
            max_rating: cfg.max_rating,
            enforce_capacity: cfg.enforce_capacity,
        }
    }
}

fn default_max_name_length() -> usize {
    100
}

fn default_max_title_length() -> usize {
    200
}

fn default_max_rating() -> u8 {
    5
}

fn default_enforce_capacity() -> bool {
    true
}
