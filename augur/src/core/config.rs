use serde::Deserialize;
use std::fs;
use std::path::Path;
use anyhow::Result;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub llm: LlmConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub api_url: String,
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "qwen-plus".to_string(),
            api_url:
                "https://dashscope.aliyuncs.com/api/v1/services/aigc/text-generation/generation"
                    .to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    pub api_url: String,
    pub search_depth: String,
    pub max_results: u32,
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.tavily.com/search".to_string(),
            search_depth: "advanced".to_string(),
            max_results: 5,
            api_key: None,
        }
    }
}

/// Loads config.toml if present, falling back to defaults. API keys are never
/// read from the file; they come from the process environment.
pub fn load_config(path: &str) -> Result<Config> {
    let mut config = if Path::new(path).exists() {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)?
    } else {
        Config::default()
    };

    config.llm.api_key = env_key("DASHSCOPE_API_KEY");
    config.search.api_key = env_key("TAVILY_API_KEY");
    Ok(config)
}

fn env_key(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
