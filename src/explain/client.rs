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

use std::io::BufReader;
use std::time::Duration;

use serde_json::{json, Value};

use crate::config::ZiExplainerConfig;
use crate::drift::report::ZiNarrativeRequest;
use crate::errors::{Result, ZiError};
use crate::explain::prompt::build_prompt;
use crate::explain::stream::{message_content, ZiSseChunks};
use crate::explain::{failure_stream, ZiExplainer, ZiTextStream};

/// Explainer backed by an OpenAI-compatible chat-completions endpoint.
#[derive(Clone, Debug)]
pub struct ZiChatExplainer {
    config: ZiExplainerConfig,
    client: reqwest::blocking::Client,
}

impl ZiChatExplainer {
    #[allow(non_snake_case)]
    pub fn new(config: ZiExplainerConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ZiExplainerConfig {
        &self.config
    }

    /// Chat-completions request body for `request`.
    pub fn request_body(&self, request: &ZiNarrativeRequest) -> Value {
        let mut body = json!({
            "model": self.config.model,
            "messages": [
                {"role": "user", "content": build_prompt(request)}
            ],
            "stream": self.config.stream,
        });
        if self.config.reasoning {
            body["reasoning"] = json!({"enabled": true});
        }
        body
    }

    fn open(&self, request: &ZiNarrativeRequest) -> Result<ZiTextStream> {
        let api_key = self.config.resolve_api_key().ok_or_else(|| {
            ZiError::explainer(format!(
                "API key not found; set '{}'",
                self.config.api_key_env
            ))
        })?;

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&self.request_body(request))
            .send()
            .map_err(|e| ZiError::explainer(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(ZiError::explainer(format!(
                "endpoint returned error {}: {}",
                status, body
            )));
        }

        if self.config.stream {
            return Ok(Box::new(ZiSseChunks::new(BufReader::new(response))));
        }

        let json: Value = response
            .json()
            .map_err(|e| ZiError::explainer(format!("failed to parse response: {}", e)))?;
        let text = message_content(&json)
            .ok_or_else(|| ZiError::explainer("response carried no message content"))?
            .to_string();
        Ok(Box::new(std::iter::once(text)))
    }
}

impl ZiExplainer for ZiChatExplainer {
    fn explain(&self, request: &ZiNarrativeRequest) -> ZiTextStream {
        log::info!("Requesting narrative for feature '{}'", request.feature);
        match self.open(request) {
            Ok(stream) => stream,
            Err(e) => failure_stream(e),
        }
    }
}
