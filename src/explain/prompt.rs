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

use crate::drift::report::ZiNarrativeRequest;

/// Builds the instruction sent to the reasoning service for one feature.
pub fn build_prompt(request: &ZiNarrativeRequest) -> String {
    let report = request.to_json();
    let report = serde_json::to_string_pretty(&report).unwrap_or_else(|_| report.to_string());

    format!(
        "You are a senior data scientist responsible for monitoring machine learning systems in production.\n\
         \n\
         Drift Report:\n\
         {}\n\
         \n\
         Your task:\n\
         1. Identify the drifting feature.\n\
         2. Explain the real-world business risk.\n\
         3. Recommend ONE immediate action.\n\
         \n\
         Rules:\n\
         - Be concise and factual.\n\
         - Do not mention statistics explicitly unless needed.\n\
         - Do not include chain-of-thought or internal reasoning.\n",
        report
    )
}
