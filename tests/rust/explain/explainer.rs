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

//! # ZiDrift Explain Tests - Explainers
//!
//! This module contains tests for the narrative boundary: function-backed
//! explainers, the chat explainer's request shape, and inline error fragments.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test explain
//! ```

use std::io::Cursor;

use zidrift::explain::{build_prompt, ZiSseChunks};
use zidrift::{
    ZiChatExplainer, ZiError, ZiExplainer, ZiExplainerConfig, ZiFeatureDrift, ZiFnExplainer,
    ZiNarrativeRequest,
};

fn drifting_amount() -> ZiNarrativeRequest {
    let drift = ZiFeatureDrift {
        z_score: 6.0,
        ks_statistic: 0.8123,
        p_value: 0.0,
        is_drifting: true,
    };
    ZiNarrativeRequest::from_feature("amount", &drift)
}

fn offline_config() -> ZiExplainerConfig {
    ZiExplainerConfig {
        api_key_env: "ZIDRIFT_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
        api_key: None,
        timeout_secs: 2,
        ..Default::default()
    }
}

/// Tests that a function explainer yields its text as one fragment.
#[test]
fn fn_explainer_yields_text() {
    let explainer = ZiFnExplainer::new(|request: &ZiNarrativeRequest| {
        Ok(format!("{} is drifting; recheck pricing", request.feature))
    });

    let fragments: Vec<String> = explainer.explain(&drifting_amount()).collect();
    assert_eq!(fragments, vec!["amount is drifting; recheck pricing".to_string()]);
}

/// Tests that a failing explainer reports the failure inline instead of erroring.
#[test]
fn fn_explainer_failure_becomes_fragment() {
    let explainer =
        ZiFnExplainer::new(|_: &ZiNarrativeRequest| Err(ZiError::explainer("quota exceeded")));

    let text: String = explainer.explain(&drifting_amount()).collect();
    assert!(text.starts_with("AI Explanation Error:"));
    assert!(text.contains("quota exceeded"));
}

/// Tests that a missing API key yields a single error fragment.
#[test]
fn chat_explainer_without_key_reports_inline() {
    let explainer = ZiChatExplainer::new(offline_config()).unwrap();

    let fragments: Vec<String> = explainer.explain(&drifting_amount()).collect();
    assert_eq!(fragments.len(), 1);
    assert!(fragments[0].starts_with("AI Explanation Error:"));
    assert!(fragments[0].contains("ZIDRIFT_TEST_KEY_THAT_IS_NEVER_SET"));
}

/// Tests that an unreachable endpoint yields an error fragment, not a panic.
#[test]
fn chat_explainer_unreachable_endpoint_reports_inline() {
    let config = ZiExplainerConfig {
        endpoint: "http://127.0.0.1:9/v1/chat/completions".to_string(),
        api_key: Some("test-key".to_string()),
        ..offline_config()
    };
    let explainer = ZiChatExplainer::new(config).unwrap();

    let text: String = explainer.explain(&drifting_amount()).collect();
    assert!(text.starts_with("AI Explanation Error:"));
}

/// Tests the chat-completions request body.
#[test]
fn chat_request_body_carries_report() {
    let explainer = ZiChatExplainer::new(offline_config()).unwrap();
    let body = explainer.request_body(&drifting_amount());

    assert_eq!(body["model"], "nvidia/nemotron-3-nano-30b-a3b:free");
    assert_eq!(body["stream"], true);
    assert_eq!(body["reasoning"]["enabled"], true);
    assert_eq!(body["messages"][0]["role"], "user");

    let prompt = body["messages"][0]["content"].as_str().unwrap();
    assert!(prompt.contains("\"feature\": \"amount\""));
    assert!(prompt.contains("0.8123"));
    assert!(prompt.contains("Recommend ONE immediate action"));
}

/// Tests that reasoning can be switched off.
#[test]
fn chat_request_body_without_reasoning() {
    let config = ZiExplainerConfig {
        reasoning: false,
        stream: false,
        ..offline_config()
    };
    let body = ZiChatExplainer::new(config).unwrap().request_body(&drifting_amount());
    assert!(body.get("reasoning").is_none());
    assert_eq!(body["stream"], false);
}

/// Tests that the prompt embeds the report as plain JSON values.
#[test]
fn prompt_embeds_plain_report() {
    let prompt = build_prompt(&drifting_amount());
    assert!(prompt.contains("\"is_drifting\": true"));
    assert!(prompt.contains("\"z_score\": 6.0"));
}

/// Tests that streamed deltas arrive in order and stop at the terminator.
#[test]
fn sse_stream_yields_deltas_in_order() {
    let events = concat!(
        ": keep-alive\n",
        "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"Amounts \"}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"reasoning\":\"hidden\"}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"rose.\"}}]}\n\n",
        "data: [DONE]\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"late\"}}]}\n\n",
    );

    let fragments: Vec<String> = ZiSseChunks::new(Cursor::new(events)).collect();
    assert_eq!(fragments, vec!["Amounts ".to_string(), "rose.".to_string()]);
}

/// Tests that a mid-stream error event ends the stream with a diagnostic.
#[test]
fn sse_error_event_ends_stream() {
    let events = concat!(
        "data: {\"choices\":[{\"delta\":{\"content\":\"Partial\"}}]}\n",
        "data: {\"error\":{\"message\":\"rate limited\"}}\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"never\"}}]}\n",
    );

    let fragments: Vec<String> = ZiSseChunks::new(Cursor::new(events)).collect();
    assert_eq!(fragments.len(), 2);
    assert_eq!(fragments[0], "Partial");
    assert_eq!(fragments[1], "AI Explanation Error: rate limited");
}
