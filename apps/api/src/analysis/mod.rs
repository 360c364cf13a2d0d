//! Compatibility Analyzer and Icebreaker Generator.
//!
//! Both are soft-failing boundaries around the LLM: any transport error or
//! unparseable output degrades to a fixed fallback value. Matching is never
//! blocked by an AI outage, so neither function returns an error.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::LlmClient;
use crate::models::profile::ProfileRow;

pub mod prompts;

/// Fallback summary when the analyzer fails or returns garbage.
pub const FALLBACK_SUMMARY: &str = "Error analyzing compatibility.";

/// Fallback first message when icebreaker generation fails.
pub const GENERIC_ICEBREAKER: &str = "Hi! I think we'd be a great team. Let's chat!";

/// Validated analyzer output: integer score in [0, 100] and a non-empty
/// ordered list of short summary strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompatibilityAnalysis {
    pub score: i32,
    pub summary: Vec<String>,
}

impl CompatibilityAnalysis {
    pub fn fallback() -> Self {
        Self {
            score: 0,
            summary: vec![FALLBACK_SUMMARY.to_string()],
        }
    }
}

/// Scores the (user1, user2) pair. The pair order is kept as passed so
/// prompts are reproducible for a given call site.
pub async fn analyze_compatibility(
    llm: &LlmClient,
    user1: &ProfileRow,
    user2: &ProfileRow,
) -> CompatibilityAnalysis {
    let prompt = prompts::build_analysis_prompt(user1, user2);

    let text = match llm.call_text(&prompt, prompts::ANALYSIS_SYSTEM).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Compatibility analysis call failed, using fallback: {e}");
            return CompatibilityAnalysis::fallback();
        }
    };

    match parse_analysis(&text) {
        Some(analysis) => analysis,
        None => {
            warn!("Compatibility analysis returned unparseable output, using fallback");
            CompatibilityAnalysis::fallback()
        }
    }
}

/// Generates the opening message from `sender` to `recipient`.
pub async fn generate_icebreaker(
    llm: &LlmClient,
    recipient: &ProfileRow,
    sender: &ProfileRow,
) -> String {
    let prompt = prompts::build_icebreaker_prompt(recipient, sender);

    match llm.call_text(&prompt, prompts::ICEBREAKER_SYSTEM).await {
        Ok(text) => {
            let cleaned = trim_quotes(text.trim()).trim();
            if cleaned.is_empty() {
                warn!("Icebreaker generation returned empty text, using generic greeting");
                GENERIC_ICEBREAKER.to_string()
            } else {
                cleaned.to_string()
            }
        }
        Err(e) => {
            warn!("Icebreaker generation failed, using generic greeting: {e}");
            GENERIC_ICEBREAKER.to_string()
        }
    }
}

/// Parses and validates the analyzer's JSON-in-text answer.
/// Returns `None` on any schema violation; callers fall back.
fn parse_analysis(text: &str) -> Option<CompatibilityAnalysis> {
    let json = extract_json_object(text)?;
    let value: serde_json::Value = serde_json::from_str(json).ok()?;

    let score = value.get("score")?.as_i64()?;
    if !(0..=100).contains(&score) {
        return None;
    }

    let summary: Vec<String> = value
        .get("summary")?
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(|s| s.trim().to_string()))
        .collect::<Option<Vec<_>>>()?;
    if summary.is_empty() || summary.iter().any(String::is_empty) {
        return None;
    }

    Some(CompatibilityAnalysis {
        score: score as i32,
        summary,
    })
}

/// Locates the outermost JSON object in model output that may be wrapped in
/// code fences or surrounded by prose. Tracks string literals so braces
/// inside summary text do not unbalance the scan.
fn extract_json_object(text: &str) -> Option<&str> {
    let text = strip_code_fences(text);
    let start = text.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Removes one layer of surrounding double quotes the model sometimes adds
/// despite the prompt instructions.
fn trim_quotes(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let parsed = parse_analysis(r#"{"score": 82, "summary": ["a", "b"]}"#).unwrap();
        assert_eq!(parsed.score, 82);
        assert_eq!(parsed.summary, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_with_code_fences() {
        let input = "```json\n{\"score\": 75, \"summary\": [\"shared technical skills\"]}\n```";
        let parsed = parse_analysis(input).unwrap();
        assert_eq!(parsed.score, 75);
    }

    #[test]
    fn test_parse_embedded_in_prose() {
        let input = "Here is my analysis:\n\n{\"score\": 82, \"summary\": \
            [\"shared technical skills\", \"complementary commitment levels\"]}\n\nHope that helps!";
        let parsed = parse_analysis(input).unwrap();
        assert_eq!(parsed.score, 82);
        assert_eq!(
            parsed.summary,
            vec!["shared technical skills", "complementary commitment levels"]
        );
    }

    #[test]
    fn test_parse_preserves_summary_order() {
        let parsed =
            parse_analysis(r#"{"score": 10, "summary": ["first", "second", "third"]}"#).unwrap();
        assert_eq!(parsed.summary, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_parse_rejects_out_of_range_score() {
        assert!(parse_analysis(r#"{"score": 101, "summary": ["x"]}"#).is_none());
        assert!(parse_analysis(r#"{"score": -1, "summary": ["x"]}"#).is_none());
    }

    #[test]
    fn test_parse_rejects_non_integer_score() {
        assert!(parse_analysis(r#"{"score": "high", "summary": ["x"]}"#).is_none());
        assert!(parse_analysis(r#"{"score": 82.5, "summary": ["x"]}"#).is_none());
    }

    #[test]
    fn test_parse_rejects_empty_or_malformed_summary() {
        assert!(parse_analysis(r#"{"score": 50, "summary": []}"#).is_none());
        assert!(parse_analysis(r#"{"score": 50, "summary": ["ok", 3]}"#).is_none());
        assert!(parse_analysis(r#"{"score": 50, "summary": [""]}"#).is_none());
        assert!(parse_analysis(r#"{"score": 50}"#).is_none());
    }

    #[test]
    fn test_parse_rejects_non_json_text() {
        assert!(parse_analysis("I cannot provide a score for these users.").is_none());
    }

    #[test]
    fn test_extract_handles_braces_inside_strings() {
        let input = r#"{"score": 40, "summary": ["uses {curly} notation"]}"#;
        let parsed = parse_analysis(input).unwrap();
        assert_eq!(parsed.summary, vec!["uses {curly} notation"]);
    }

    #[test]
    fn test_strip_code_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_fallback_is_schema_valid() {
        let fb = CompatibilityAnalysis::fallback();
        assert_eq!(fb.score, 0);
        assert_eq!(fb.summary.len(), 1);
        assert!(!fb.summary[0].is_empty());
    }

    #[test]
    fn test_trim_quotes() {
        assert_eq!(trim_quotes("\"Hi there!\""), "Hi there!");
        assert_eq!(trim_quotes("Hi there!"), "Hi there!");
        assert_eq!(trim_quotes("\"unbalanced"), "\"unbalanced");
    }
}
