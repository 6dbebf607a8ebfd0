//! HTTP matching backend speaking the OpenAI-style chat-completions
//! protocol. One request per product pair carries both full control
//! sets, which bounds external-call cost at one call per pair instead
//! of one per control.

use std::fmt::Write as _;
use std::time::Duration;

use async_trait::async_trait;

use crate::backend::{ControlSet, MatchBackend, MatchOutcome};
use crate::parse::parse_candidates;

/// Configuration for [`ChatMatchBackend`].
#[derive(Debug, Clone)]
pub struct ChatMatcherConfig {
    /// Base URL of the chat-completions API (e.g. `https://api.openai.com/v1`).
    pub base_url: String,
    /// Bearer token for the backend.
    pub api_key: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Per-request timeout in seconds (default: 15).
    pub timeout_secs: u64,
}

impl ChatMatcherConfig {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            timeout_secs: 15,
        }
    }
}

/// Production matching backend over `POST {base}/chat/completions`.
pub struct ChatMatchBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatMatchBackend {
    /// Build a backend from configuration.
    pub fn new(config: ChatMatcherConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            model: config.model,
        })
    }

    /// The full request, separated so failures can be degraded in one
    /// place inside `propose`.
    async fn call(&self, a: &ControlSet, b: &ControlSet) -> Result<String, String> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": "You are an expert compliance control mapper."},
                {"role": "user", "content": build_prompt(a, b)},
            ],
            "temperature": 0.0,
        });

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("transport error: {e}"))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(format!("HTTP {status}: {body}"));
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| format!("response body was not JSON: {e}"))?;

        body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| format!("response carried no message content: {body}"))
    }
}

#[async_trait]
impl MatchBackend for ChatMatchBackend {
    async fn propose(&self, a: &ControlSet, b: &ControlSet) -> MatchOutcome {
        let content = match self.call(a, b).await {
            Ok(content) => content,
            Err(reason) => {
                tracing::warn!(
                    product_a = %a.product_id,
                    product_b = %b.product_id,
                    %reason,
                    "matching backend call failed"
                );
                return MatchOutcome::Failed { reason };
            }
        };

        match parse_candidates(&content) {
            Ok(candidates) => MatchOutcome::Candidates(candidates),
            Err(e) => {
                // Keep the raw answer around for diagnosis.
                tracing::warn!(
                    product_a = %a.product_id,
                    product_b = %b.product_id,
                    raw = %content,
                    "failed to parse matching backend output: {e}"
                );
                MatchOutcome::Failed {
                    reason: format!("unparseable backend output: {e}"),
                }
            }
        }
    }
}

/// Render both control sets into the matching prompt. Controls are
/// listed as `- <id>: <text>` bullets so the model can echo ids back.
fn build_prompt(a: &ControlSet, b: &ControlSet) -> String {
    let mut list_a = String::new();
    for c in &a.controls {
        let _ = writeln!(list_a, "- {}: {}", c.id, c.text);
    }
    let mut list_b = String::new();
    for c in &b.controls {
        let _ = writeln!(list_b, "- {}: {}", c.id, c.text);
    }

    format!(
        r#"You are a compliance control mapping assistant.
Your task is to map controls from Product A to equivalent controls in Product B.

Rules:
- Only map controls that are truly equivalent or highly similar in intent.
- If a control has no good match, do not include it.
- Provide a confidence score between 0 and 1.
- Only output valid JSON as a list.

Product A Controls:
{list_a}
Product B Controls:
{list_b}
Output example:
[
  {{"source_id": "<UUID of control A>", "target_id": "<UUID of control B>", "confidence": 0.92}}
]"#
    )
}
