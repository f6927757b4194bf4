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

use std::io::BufRead;

use serde_json::Value;

use crate::explain::error_fragment;

/// Iterator over the visible text deltas of a chat-completions event stream.
///
/// Reads `data:` lines lazily, stops at `data: [DONE]` or end of input, and
/// skips comments, keep-alives, and events without content. Reasoning deltas
/// are not surfaced. A read failure or an error event ends the stream with an
/// inline diagnostic fragment.
pub struct ZiSseChunks<R> {
    reader: R,
    line: String,
    done: bool,
}

impl<R: BufRead> ZiSseChunks<R> {
    #[allow(non_snake_case)]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for ZiSseChunks<R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while !self.done {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    let Some(data) = self.line.trim().strip_prefix("data:") else {
                        continue;
                    };
                    let data = data.trim();
                    if data == "[DONE]" {
                        self.done = true;
                        continue;
                    }
                    let event: Value = match serde_json::from_str(data) {
                        Ok(event) => event,
                        Err(e) => {
                            log::debug!("Ignoring malformed stream event: {}", e);
                            continue;
                        }
                    };
                    if let Some(error) = event.get("error") {
                        self.done = true;
                        let message = error
                            .get("message")
                            .and_then(Value::as_str)
                            .map(str::to_string)
                            .unwrap_or_else(|| error.to_string());
                        return Some(error_fragment(message));
                    }
                    if let Some(text) = delta_content(&event) {
                        return Some(text.to_string());
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(error_fragment(e));
                }
            }
        }
        None
    }
}

fn delta_content(event: &Value) -> Option<&str> {
    event
        .get("choices")?
        .get(0)?
        .get("delta")?
        .get("content")?
        .as_str()
        .filter(|text| !text.is_empty())
}

/// Extracts the answer of a non-streaming chat-completions response.
pub fn message_content(response: &Value) -> Option<&str> {
    response
        .get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
}
