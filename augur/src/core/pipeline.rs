use crate::core::config::Config;
use crate::core::llm::{LlmClient, LlmError};
use crate::core::prompt::build_prompt;
use crate::core::report::{parse_report, strip_code_fences, AnalysisReport};
use crate::core::search::{build_query, format_context, SearchClient};

/// Context fed to the prompt when search is unavailable or failed.
pub const SEARCH_FALLBACK_CONTEXT: &str = "搜索失败，仅基于模型知识库分析。";

/// Outcome of the retrieval stage. Failure is not representable: a missing or
/// broken search collaborator degrades to the fallback sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextBlock {
    Retrieved(String),
    Unavailable,
}

impl ContextBlock {
    pub fn as_text(&self) -> &str {
        match self {
            ContextBlock::Retrieved(text) => text,
            ContextBlock::Unavailable => SEARCH_FALLBACK_CONTEXT,
        }
    }
}

/// One analysis pipeline, shared across requests. Holds the collaborator
/// clients; the search side is optional and checked through [`has_search`].
///
/// [`has_search`]: Pipeline::has_search
pub struct Pipeline {
    search: Option<SearchClient>,
    llm: LlmClient,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        let search = if config.search.api_key.is_some() {
            Some(SearchClient::new(config.search))
        } else {
            None
        };
        Self {
            search,
            llm: LlmClient::new(config.llm),
        }
    }

    pub fn has_search(&self) -> bool {
        self.search.is_some()
    }

    /// Runs retrieval, prompting and synthesis for one topic. The only error
    /// that escapes is a completion transport/status failure; search problems
    /// and unparseable model output both degrade into the returned report.
    pub async fn analyze(&self, topic: &str) -> Result<AnalysisReport, LlmError> {
        let context = self.retrieve_context(topic).await;
        let prompt = build_prompt(topic, context.as_text());

        log::info!("synthesizing sentiment report for topic: {}", topic);
        let content = self.llm.generate(&prompt).await?;

        Ok(parse_report(&strip_code_fences(&content)))
    }

    async fn retrieve_context(&self, topic: &str) -> ContextBlock {
        let Some(search) = &self.search else {
            return ContextBlock::Unavailable;
        };

        log::info!("searching recent coverage for topic: {}", topic);
        match search.search(&build_query(topic)).await {
            Ok(results) => ContextBlock::Retrieved(format_context(&results)),
            Err(e) => {
                log::warn!("search failed, falling back to model knowledge: {}", e);
                ContextBlock::Unavailable
            }
        }
    }
}
