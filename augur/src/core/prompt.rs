/// Builds the single-turn instruction sent to the completion model.
///
/// The wording is a versioned contract: it spells out every field of the
/// report JSON, and renaming or retyping a field here changes the shape of
/// every response the service returns.
pub fn build_prompt(topic: &str, context: &str) -> String {
    format!(
        r#"你是一个高级舆情分析专家。请根据以下互联网搜索结果，对话题“{topic}”进行深度分析。

搜索结果上下文：
{context}

请必须以严格的 JSON 格式输出，不要包含 Markdown 代码块标记（如 ```json），直接返回 JSON 字符串。
JSON 结构要求如下：
{{
    "sentiment_score": 0-100的整数 (0为极度负面，50中立，100极度正面),
    "sentiment_label": "正面/负面/中立/争议",
    "keywords": ["关键词1", "关键词2", "关键词3", "关键词4", "关键词5"],
    "trend_data": [
        {{"date": "最近5天的日期1", "score": 预估热度值0-100}},
        {{"date": "最近5天的日期2", "score": 预估热度值0-100}},
        ...
    ],
    "report_markdown": "这里是一篇结构清晰、排版精美的深度分析报告（Markdown格式）。请包含：事件背景、各方观点、情感分析结论、未来走势预测。请使用emoji修饰标题。"
}}"#
    )
}
