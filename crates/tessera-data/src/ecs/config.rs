// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::{Deserialize, Serialize};

/// The default bound on nested entity copies.
pub const DEFAULT_MAX_COPY_DEPTH: usize = 64;

/// Construction parameters of an [`EcsWorld`](super::EcsWorld).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Name used in log output.
    pub name: String,
    /// Maximum nesting of recursive entity copies before the copy is aborted.
    pub max_copy_depth: usize,
    /// Number of entity slots to allocate up front.
    pub reserved_entities: usize,
}

impl WorldConfig {
    /// Load a world configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a world configuration from a JSON file
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }

    /// Save the world configuration to a JSON file
    pub fn to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: "World".to_string(),
            max_copy_depth: DEFAULT_MAX_COPY_DEPTH,
            reserved_entities: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = WorldConfig::default();
        assert_eq!(config.name, "World");
        assert_eq!(config.max_copy_depth, DEFAULT_MAX_COPY_DEPTH);
        assert_eq!(config.reserved_entities, 0);
    }

    #[test]
    fn json_serialization() {
        let config = WorldConfig {
            name: "Level".to_string(),
            max_copy_depth: 8,
            reserved_entities: 128,
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized = WorldConfig::from_json(&json).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = WorldConfig::from_json(r#"{ "max_copy_depth": 4 }"#).unwrap();
        assert_eq!(config.max_copy_depth, 4);
        assert_eq!(config.name, "World");
    }

    #[test]
    fn file_round_trip() {
        let path = std::env::temp_dir().join("tessera_world_config_test.json");
        let path = path.to_string_lossy().into_owned();
        let config = WorldConfig {
            name: "Saved".to_string(),
            ..WorldConfig::default()
        };

        config.to_file(&path).unwrap();
        let loaded = WorldConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(WorldConfig::from_json("{ not json").is_err());
    }
}
