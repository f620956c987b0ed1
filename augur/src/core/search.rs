use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use crate::core::config::SearchConfig;

pub struct SearchClient {
    client: Client,
    config: SearchConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

impl SearchClient {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            config,
        }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let body = json!({
            "query": query,
            "search_depth": self.config.search_depth,
            "max_results": self.config.max_results,
        });

        let key = self.config.api_key.as_deref().unwrap_or_default();
        let res = self
            .client
            .post(&self.config.api_url)
            .header("Authorization", format!("Bearer {}", key))
            .json(&body)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(anyhow!("search API error {}: {}", status, text));
        }

        let parsed: SearchResponse = res.json().await?;
        Ok(parsed.results)
    }
}

/// Steers the search towards recent commentary and dispute around the topic
/// instead of encyclopedic pages.
pub fn build_query(topic: &str) -> String {
    format!("{} 最新评论 争议 事件分析", topic)
}

/// One line per result, provider order preserved.
pub fn format_context(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|res| format!("- [{}]({}): {}", res.title, res.url, res.content))
        .collect::<Vec<_>>()
        .join("\n")
}
