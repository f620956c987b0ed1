use reqwest::Client;
use serde_json::json;
use thiserror::Error;
use crate::core::config::LlmConfig;

/// The only errors the synthesis stage can surface. Unparseable model
/// *content* is not represented here; that degrades inside report parsing.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Model Connection Failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Model Error: {0}")]
    Model(String),
}

pub struct LlmClient {
    client: Client,
    config: LlmConfig,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .unwrap_or_else(|_| Client::new()),
            config,
        }
    }

    /// Single-turn completion call. Any non-success status or transport
    /// failure is fatal for the request; there is no retry.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let body = json!({
            "model": self.config.model,
            "input": { "prompt": prompt },
            "parameters": { "result_format": "message" }
        });

        // A missing key is not checked here; the provider rejects the call
        // and that rejection propagates like any other status error.
        let mut req = self.client.post(&self.config.api_url).json(&body);
        if let Some(key) = &self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", key));
        }

        let res = req.send().await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
                .unwrap_or(text);
            log::error!("completion API error {}: {}", status, message);
            return Err(LlmError::Model(message));
        }

        let response_json: serde_json::Value = res.json().await?;
        response_json["output"]["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                log::warn!("unexpected completion response shape: {}", response_json);
                LlmError::Model("unexpected completion response shape".to_string())
            })
    }
}
