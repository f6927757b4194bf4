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

//! # Narrative Explanation Module
//!
//! Turns the drift result of one feature into a short business-facing
//! explanation. Explainers return a lazy, finite, single-pass stream of text
//! fragments. Failures never escape as errors: they arrive as an inline
//! diagnostic fragment in the stream.
//!
//! ## Module Components
//!
//! - **Prompt** ([prompt.rs](prompt/index.html)): Prompt construction from a narrative request
//! - **Stream** ([stream.rs](stream/index.html)): Server-sent event chunk parsing
//! - **Client** ([client.rs](client/index.html)): Chat-completions explainer over HTTP
//!
//! ## Usage
//!
//! ```rust
//! use zidrift::explain::{ZiExplainer, ZiFnExplainer};
//!
//! let explainer = ZiFnExplainer::new(|request| {
//!     Ok(format!("{} moved by {} standard deviations", request.feature, request.z_score))
//! });
//! let text: String = explainer.explain(&request).collect();
//! ```

pub mod client;
pub mod prompt;
pub mod stream;

pub use client::ZiChatExplainer;
pub use prompt::build_prompt;
pub use stream::ZiSseChunks;

use crate::drift::report::ZiNarrativeRequest;
use crate::errors::Result;

/// Lazy, finite, single-pass sequence of text fragments.
pub type ZiTextStream = Box<dyn Iterator<Item = String> + Send>;

/// Produces a natural-language explanation of a drift result.
pub trait ZiExplainer {
    fn explain(&self, request: &ZiNarrativeRequest) -> ZiTextStream;
}

/// Explainer backed by a synchronous function returning the full text.
pub struct ZiFnExplainer<F> {
    func: F,
}

impl<F> ZiFnExplainer<F>
where
    F: Fn(&ZiNarrativeRequest) -> Result<String>,
{
    #[allow(non_snake_case)]
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> ZiExplainer for ZiFnExplainer<F>
where
    F: Fn(&ZiNarrativeRequest) -> Result<String>,
{
    fn explain(&self, request: &ZiNarrativeRequest) -> ZiTextStream {
        match (self.func)(request) {
            Ok(text) => Box::new(std::iter::once(text)),
            Err(e) => failure_stream(e),
        }
    }
}

/// Inline diagnostic text for a failed explanation.
pub fn error_fragment(error: impl std::fmt::Display) -> String {
    format!("AI Explanation Error: {}", error)
}

pub(crate) fn failure_stream(error: impl std::fmt::Display) -> ZiTextStream {
    log::warn!("Narrative explanation failed: {}", error);
    Box::new(std::iter::once(error_fragment(error)))
}
