//! The external text-rewrite collaborator seam.
//!
//! `RewriteService` is the contract the edit pipeline depends on: LaTeX in,
//! rewritten LaTeX plus a change summary out. `LlmRewriteClient` is the
//! production implementation against the Anthropic Messages API; tests and
//! embedders can substitute any stub. Collaborator failures are recoverable
//! by policy: the pipeline never commits a partial result.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

use prompts::{FALLBACK_SUMMARY, REWRITE_PROMPT_TEMPLATE, REWRITE_SYSTEM, SHORT_INPUT_NOTE};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for every rewrite call. Intentionally hardcoded to
/// prevent accidental drift.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
const MAX_RETRIES: u32 = 3;
/// Stored sources shorter than this are treated as template names rather
/// than documents when prompting.
const MIN_DOCUMENT_LEN: usize = 50;

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Rewrite returned empty content")]
    EmptyContent,

    #[error("Rewrite reply does not look like LaTeX")]
    NotLatex,
}

/// A successful rewrite: the full replacement source plus a human-readable
/// summary of what changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteOutcome {
    pub latex_source: String,
    pub change_summary: String,
}

/// The rewrite collaborator contract consumed by the edit pipeline.
/// Implement this to swap backends without touching pipeline code.
#[async_trait]
pub trait RewriteService: Send + Sync {
    async fn rewrite(
        &self,
        latex_source: &str,
        instruction: &str,
    ) -> Result<RewriteOutcome, RewriteError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Anthropic-backed client
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl ApiResponse {
    fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// The shape the system prompt asks the model to reply with.
#[derive(Debug, Deserialize)]
struct RewriteReply {
    summary: Option<String>,
    #[serde(rename = "latexCode")]
    latex_code: String,
}

/// LLM-backed rewrite client with retry on rate limits and server errors.
#[derive(Clone)]
pub struct LlmRewriteClient {
    client: Client,
    api_key: String,
}

impl LlmRewriteClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Raw model call with exponential backoff on 429/5xx.
    async fn call(&self, prompt: &str) -> Result<ApiResponse, RewriteError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system: REWRITE_SYSTEM,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_error: Option<RewriteError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "rewrite call attempt {} failed, retrying after {}ms",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(RewriteError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("rewrite API returned {}: {}", status, body);
                last_error = Some(RewriteError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(RewriteError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let api_response: ApiResponse = response.json().await.map_err(RewriteError::Http)?;
            debug!(
                "rewrite call succeeded: input_tokens={}, output_tokens={}",
                api_response.usage.input_tokens, api_response.usage.output_tokens
            );
            return Ok(api_response);
        }

        Err(last_error.unwrap_or(RewriteError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl RewriteService for LlmRewriteClient {
    async fn rewrite(
        &self,
        latex_source: &str,
        instruction: &str,
    ) -> Result<RewriteOutcome, RewriteError> {
        let prompt = build_rewrite_prompt(latex_source, instruction);
        let response = self.call(&prompt).await?;
        let text = response.text().ok_or(RewriteError::EmptyContent)?;
        parse_rewrite_reply(text, latex_source)
    }
}

fn build_rewrite_prompt(latex_source: &str, instruction: &str) -> String {
    let short_input_note = if latex_source.len() < MIN_DOCUMENT_LEN {
        SHORT_INPUT_NOTE
    } else {
        ""
    };
    REWRITE_PROMPT_TEMPLATE
        .replace("{instruction}", instruction)
        .replace("{latex_source}", latex_source)
        .replace("{short_input_note}", short_input_note)
}

/// Interprets a model reply, most structured form first: the requested JSON
/// object, then a fenced ```latex block, then the whole reply as LaTeX.
fn parse_rewrite_reply(text: &str, original: &str) -> Result<RewriteOutcome, RewriteError> {
    let stripped = strip_json_fences(text);

    let outcome = if let Ok(reply) = serde_json::from_str::<RewriteReply>(stripped) {
        RewriteOutcome {
            latex_source: reply.latex_code.trim().to_string(),
            change_summary: reply
                .summary
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_SUMMARY.to_string()),
        }
    } else if let Some(block) = extract_latex_fence(text) {
        debug!("rewrite reply was not JSON; extracted fenced LaTeX block");
        RewriteOutcome {
            latex_source: block.trim().to_string(),
            change_summary: extract_summary_line(text)
                .unwrap_or_else(|| FALLBACK_SUMMARY.to_string()),
        }
    } else {
        debug!("rewrite reply was not JSON; treating entire reply as LaTeX");
        RewriteOutcome {
            latex_source: text.trim().to_string(),
            change_summary: FALLBACK_SUMMARY.to_string(),
        }
    };

    if outcome.latex_source.is_empty() {
        return Err(RewriteError::EmptyContent);
    }
    // When the input was a real document, a reply without any LaTeX-looking
    // tokens means the model answered in prose; do not store it.
    if original.len() > 10 && !looks_like_latex(&outcome.latex_source) {
        return Err(RewriteError::NotLatex);
    }
    Ok(outcome)
}

/// Strips ```json ... ``` or ``` ... ``` fences from a reply.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    for prefix in ["```json", "```"] {
        if let Some(stripped) = text.strip_prefix(prefix) {
            let stripped = stripped.trim_start();
            return stripped
                .strip_suffix("```")
                .map(str::trim)
                .unwrap_or(stripped);
        }
    }
    text
}

/// Pulls the body out of a ```latex ... ``` fence, if one is present.
fn extract_latex_fence(text: &str) -> Option<&str> {
    let (_, rest) = text.split_once("```latex")?;
    let (block, _) = rest.split_once("```")?;
    Some(block)
}

/// Finds a "Summary: ..." or "Changes: ..." line in a non-JSON reply.
fn extract_summary_line(text: &str) -> Option<String> {
    text.lines().find_map(|line| {
        let line = line.trim();
        line.strip_prefix("Summary:")
            .or_else(|| line.strip_prefix("Changes:"))
            .map(|rest| rest.trim().to_string())
            .filter(|s| !s.is_empty())
    })
}

fn looks_like_latex(text: &str) -> bool {
    ["\\documentclass", "\\begin", "\\section", "\\item"]
        .iter()
        .any(|marker| text.contains(marker))
        || text.contains('\\')
        || text.contains('{')
        || text.contains('}')
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\\documentclass{article}\\begin{document}x\\end{document}";

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_parse_reply_json_shape() {
        let reply = r#"{"summary": "Added two skills", "latexCode": "\\documentclass{article}"}"#;
        let outcome = parse_rewrite_reply(reply, DOC).unwrap();
        assert_eq!(outcome.change_summary, "Added two skills");
        assert_eq!(outcome.latex_source, "\\documentclass{article}");
    }

    #[test]
    fn test_parse_reply_json_in_fences() {
        let reply = "```json\n{\"summary\": \"s\", \"latexCode\": \"\\\\section{X}\"}\n```";
        let outcome = parse_rewrite_reply(reply, DOC).unwrap();
        assert_eq!(outcome.latex_source, "\\section{X}");
    }

    #[test]
    fn test_parse_reply_latex_fence_fallback() {
        let reply = "Here you go.\nSummary: tightened the summary\n```latex\n\\documentclass{article}\n```";
        let outcome = parse_rewrite_reply(reply, DOC).unwrap();
        assert_eq!(outcome.latex_source, "\\documentclass{article}");
        assert_eq!(outcome.change_summary, "tightened the summary");
    }

    #[test]
    fn test_parse_reply_raw_latex_fallback() {
        let reply = "\\documentclass{article}\n\\begin{document}\\end{document}";
        let outcome = parse_rewrite_reply(reply, DOC).unwrap();
        assert_eq!(outcome.latex_source, reply);
        assert_eq!(outcome.change_summary, FALLBACK_SUMMARY);
    }

    #[test]
    fn test_parse_reply_prose_is_rejected() {
        let reply = "I am sorry, I cannot help with that.";
        let err = parse_rewrite_reply(reply, DOC).unwrap_err();
        assert!(matches!(err, RewriteError::NotLatex));
    }

    #[test]
    fn test_parse_reply_missing_summary_uses_fallback() {
        let reply = r#"{"latexCode": "\\section{X}"}"#;
        let outcome = parse_rewrite_reply(reply, DOC).unwrap();
        assert_eq!(outcome.change_summary, FALLBACK_SUMMARY);
    }

    #[test]
    fn test_short_input_gets_template_note() {
        let prompt = build_rewrite_prompt("modern", "add skills");
        assert!(prompt.contains(SHORT_INPUT_NOTE));

        let prompt = build_rewrite_prompt(DOC, "add skills");
        assert!(!prompt.contains(SHORT_INPUT_NOTE));
    }

    #[test]
    fn test_empty_reply_is_an_error() {
        let err = parse_rewrite_reply("   ", DOC).unwrap_err();
        assert!(matches!(err, RewriteError::NotLatex | RewriteError::EmptyContent));
    }
}
