// Copyright 2025 Fernando Borretti
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

use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;

/// Environment variable holding the Gemini API key. The key never lives in
/// the config file.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub extraction: ExtractionConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Base URL of the Gemini REST API.
    pub api_base: String,
    pub model: String,
    pub temperature: f64,
    /// Largest decoded image accepted, in bytes.
    pub max_image_bytes: usize,
    /// Upstream request timeout, in seconds.
    pub timeout_secs: u64,
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            api_base: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.1,
            max_image_bytes: 10 * 1024 * 1024,
            timeout_secs: 60,
            api_key: None,
        }
    }
}

impl Config {
    /// Loads the configuration from an optional TOML file and picks up the
    /// API key from the environment.
    pub fn load(path: Option<&Path>) -> Fallible<Self> {
        let mut config = match path {
            Some(path) => {
                if !path.exists() {
                    return fail("config file does not exist.");
                }
                log::debug!("Loading config from {}", path.display());
                let content = std::fs::read_to_string(path)?;
                Self::parse(&content)?
            }
            None => Self::default(),
        };
        config.extraction.api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty());
        if config.extraction.api_key.is_none() {
            log::warn!("{API_KEY_VAR} is not set; marksheet extraction will fail.");
        }
        Ok(config)
    }

    pub fn parse(content: &str) -> Fallible<Self> {
        let config: Config = toml::from_str(content)?;
        if config.extraction.max_image_bytes == 0 {
            return fail("extraction.max_image_bytes must be positive.");
        }
        Ok(config)
    }
}
