//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of ZiDrift.
//! The ZiDrift project belongs to the Dunimd project team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Monitor Configuration
//!
//! Configuration for the drift detector, the batch source, the narrative
//! explainer, and the monitoring loop. Every field has a default, so a config
//! file only needs to name what it changes.
//!
//! ```yaml
//! monitored_feature: amount
//! detector:
//!   z_threshold: 0.5
//!   ks_threshold: 0.1
//! source:
//!   path: data/transactions.csv
//!   chunk_size: 100000
//! explainer:
//!   model: nvidia/nemotron-3-nano-30b-a3b:free
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ZiError};

/// Thresholds and numeric policy of the drift detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZiDetectorConfig {
    /// Mean shift, in reference standard deviations, above which a column drifts.
    pub z_threshold: f64,
    /// KS distance above which a column drifts.
    pub ks_threshold: f64,
    /// Standard deviation used when the reference std is not strictly positive.
    pub std_floor: f64,
    /// Decimal places kept in reported scores.
    pub precision: u32,
}

impl Default for ZiDetectorConfig {
    fn default() -> Self {
        Self {
            z_threshold: 0.5,
            ks_threshold: 0.1,
            std_floor: 1e-6,
            precision: 4,
        }
    }
}

/// Settings of the chunked file batch source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZiSourceConfig {
    pub path: Option<PathBuf>,
    /// Rows per batch.
    pub chunk_size: usize,
    /// Numeric column scaled when drift injection is requested.
    pub perturb_field: String,
    pub perturb_factor: f64,
    pub skip_errors: bool,
    pub max_errors: usize,
}

impl Default for ZiSourceConfig {
    fn default() -> Self {
        Self {
            path: None,
            chunk_size: 100_000,
            perturb_field: "amount".to_string(),
            perturb_factor: 1.5,
            skip_errors: true,
            max_errors: 100,
        }
    }
}

/// Settings of the chat-completions narrative explainer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZiExplainerConfig {
    /// Chat completions endpoint URL.
    pub endpoint: String,
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Explicit API key; takes precedence over `api_key_env`.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Request a server-sent event stream instead of a single response.
    pub stream: bool,
    /// Ask the model to reason internally before answering.
    pub reasoning: bool,
    pub timeout_secs: u64,
}

impl Default for ZiExplainerConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            model: "nvidia/nemotron-3-nano-30b-a3b:free".to_string(),
            api_key_env: "OPENROUTER_API_KEY".to_string(),
            api_key: None,
            stream: true,
            reasoning: true,
            timeout_secs: 60,
        }
    }
}

impl ZiExplainerConfig {
    /// Resolves the API key from the explicit value or the configured environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

/// Top-level configuration of a drift monitor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZiMonitorConfig {
    pub detector: ZiDetectorConfig,
    pub source: ZiSourceConfig,
    pub explainer: ZiExplainerConfig,
    /// Feature tracked in the drift history and handed to the explainer.
    pub monitored_feature: String,
}

impl Default for ZiMonitorConfig {
    fn default() -> Self {
        Self {
            detector: ZiDetectorConfig::default(),
            source: ZiSourceConfig::default(),
            explainer: ZiExplainerConfig::default(),
            monitored_feature: "amount".to_string(),
        }
    }
}

impl ZiMonitorConfig {
    /// Loads a YAML (`.yaml`, `.yml`) or JSON (`.json`) config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        let content = std::fs::read_to_string(path)?;

        match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&content),
            "json" => Self::from_json_str(&content),
            other => Err(ZiError::config(format!(
                "unsupported config extension '{}': {}",
                other,
                path.display()
            ))),
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| ZiError::config(format!("invalid YAML config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| ZiError::config(format!("invalid JSON config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let detector = &self.detector;
        for (name, value) in [
            ("detector.z_threshold", detector.z_threshold),
            ("detector.ks_threshold", detector.ks_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ZiError::config(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }
        if !detector.std_floor.is_finite() || detector.std_floor <= 0.0 {
            return Err(ZiError::config("detector.std_floor must be positive"));
        }
        if detector.precision > 12 {
            return Err(ZiError::config("detector.precision must be at most 12"));
        }
        if self.source.chunk_size == 0 {
            return Err(ZiError::config("source.chunk_size must be greater than zero"));
        }
        if !self.source.perturb_factor.is_finite() {
            return Err(ZiError::config("source.perturb_factor must be finite"));
        }
        if self.monitored_feature.trim().is_empty() {
            return Err(ZiError::config("monitored_feature must not be empty"));
        }
        Ok(())
    }
}
