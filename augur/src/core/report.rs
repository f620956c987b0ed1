use serde::{Deserialize, Serialize};

/// Structured sentiment report returned to the dashboard. Score fields are
/// decoded as plain integers and passed through unclamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub sentiment_score: i64,
    pub sentiment_label: String,
    pub keywords: Vec<String>,
    pub trend_data: Vec<TrendPoint>,
    pub report_markdown: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    pub score: i64,
}

pub const PARSE_ERROR_LABEL: &str = "解析错误";

/// Models occasionally wrap the payload in markdown fences despite the
/// prompt. Literal substring removal, not fence parsing; the leniency is
/// deliberate.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Strict decode of the cleaned model output. Anything that is not a
/// well-formed report of the expected shape degrades to [`fallback_report`];
/// this path never errors.
pub fn parse_report(content: &str) -> AnalysisReport {
    match serde_json::from_str(content) {
        Ok(report) => report,
        Err(e) => {
            log::warn!("model output did not decode as a report: {}", e);
            fallback_report(content)
        }
    }
}

/// Fixed-shape degraded report carrying the raw model text for diagnosis.
pub fn fallback_report(raw: &str) -> AnalysisReport {
    AnalysisReport {
        sentiment_score: 50,
        sentiment_label: PARSE_ERROR_LABEL.to_string(),
        keywords: Vec::new(),
        trend_data: Vec::new(),
        report_markdown: format!("解析模型输出失败，原始输出：\n{}", raw),
    }
}
