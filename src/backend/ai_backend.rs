//! Gemini-style AI client.
//!
//! All requests run on background threads with a blocking reqwest client;
//! results come back to the UI thread over the response channel. Chat uses
//! the SSE streaming endpoint and forwards each text chunk as it arrives.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader};
use std::sync::mpsc::Sender;
use std::thread;
use thiserror::Error;

use crate::config::AiConfig;
use crate::messages::ResponseMessage;

#[derive(Error, Debug)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ContentResponse,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    fn as_str(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        }
    }
}

/// One turn of the running conversation, oldest first.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

#[derive(Clone)]
pub struct AiBackend {
    model: String,
    api_url: String,
    api_key: String,
}

impl AiBackend {
    pub fn new(config: &AiConfig) -> Self {
        let defaults = AiConfig::default();

        let model = non_empty(&config.model_name)
            .or_else(|| std::env::var("GEMINI_MODEL").ok())
            .unwrap_or(defaults.model_name);

        let api_url = non_empty(&config.api_url)
            .or_else(|| std::env::var("GEMINI_API_URL").ok())
            .unwrap_or(defaults.api_url);

        let api_key = non_empty(&config.api_key)
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .unwrap_or_else(|| {
                tracing::warn!("No API key configured and GEMINI_API_KEY not set");
                String::new()
            });

        Self {
            model,
            api_url,
            api_key,
        }
    }

    /// Score `resume` against `jd` and request a rewritten version. Sends
    /// `ResponseMessage::AnalysisReady` when done.
    pub fn analyze_resume(
        &self,
        resume: &str,
        jd: &str,
        company: &str,
        sender: Sender<ResponseMessage>,
    ) {
        let system = format!(
            "You are an expert ATS resume optimizer targeting a 95%+ match score.\n\
             Markdown rules: # for the name, ## for major sections, ### for roles, - or * bullets, **bold** for emphasis.\n\
             Preserve exact career history (names, dates, titles); only rewrite bullet descriptions.\n\
             Infer core values for the company '{}' and score cultural alignment.\n\
             Respond with a single JSON object with fields: overallScore, projectedScore, summary, \
             cultureFit {{companyName, inferredValues, alignmentScore, analysis}}, \
             breakdown (categories: Skills Match, Experience Relevance, Keywords Match, Role Alignment), \
             personalInfo, skills, certifications, missingKeywords, criticalKeywords, strengths, weaknesses, \
             improvements (each with id, section, title, recommendation with Before:/After: examples, impact, isFixable, scoreBoost), \
             rewrittenResume, coverLetter.",
            company
        );
        let prompt = format!("TARGET COMPANY: {}\nJOB DESCRIPTION:\n{}\n\nRESUME:\n{}", company, jd, resume);

        let request = GeminiRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part { text: system }],
            }),
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
            }),
        };

        let backend = self.clone();
        thread::spawn(move || {
            let result = backend
                .blocking_generate(&request)
                .and_then(|text| {
                    serde_json::from_str(&text).map_err(|e| {
                        AiError::ApiError(format!("Failed to deserialize analysis: {}", e))
                    })
                });
            let _ = sender.send(ResponseMessage::AnalysisReady(result));
        });
    }

    /// Grammar/spacing cleanup of the raw resume text. Sends
    /// `ResponseMessage::QuickFixReady` when done.
    pub fn quick_fix(&self, text: &str, sender: Sender<ResponseMessage>) {
        let request = GeminiRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: text.to_string(),
                }],
            }],
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part {
                    text: "Editor: fix grammar, spelling and punctuation. Keep spacing and \
                           bullet alignment consistent. Return the raw corrected text."
                        .to_string(),
                }],
            }),
            generation_config: None,
        };

        let backend = self.clone();
        thread::spawn(move || {
            let result = backend
                .blocking_generate(&request)
                .map(|text| strip_code_fences(&text).to_string());
            let _ = sender.send(ResponseMessage::QuickFixReady(result));
        });
    }

    /// Stream one chat response for the conversation so far. Each text chunk
    /// is sent as `ChatChunk`, followed by a final `ChatDone`.
    pub fn send_chat(
        &self,
        resume: &str,
        jd: &str,
        turns: Vec<ChatTurn>,
        sender: Sender<ResponseMessage>,
    ) {
        let system = format!(
            "You are a resume rewriting copilot aiming for a 95% ATS score.\n\
             Never change identity, career dates or job titles; improve bullet \
             points with metrics, verbs and keywords.\n\
             Format: clean markdown (# name, ## section, ### title, - bullets).\n\
             When the user asks for a rewrite, emit the complete resume between \
             <updated_resume> and </updated_resume> tags, and report the new \
             score as [[SCORE:NN]].\n\nJOB DESCRIPTION:\n{}\n\nCURRENT RESUME:\n{}",
            jd, resume
        );

        let contents = turns
            .into_iter()
            .map(|turn| Content {
                role: Some(turn.role.as_str().to_string()),
                parts: vec![Part { text: turn.text }],
            })
            .collect();

        let request = GeminiRequest {
            contents,
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part { text: system }],
            }),
            generation_config: None,
        };

        let backend = self.clone();
        thread::spawn(move || {
            let result = backend.blocking_stream(&request, &sender);
            let _ = sender.send(ResponseMessage::ChatDone(result));
        });
    }

    fn blocking_generate(&self, request: &GeminiRequest) -> Result<String, AiError> {
        if self.api_key.is_empty() {
            return Err(AiError::ConfigError("API key is not configured".to_string()));
        }
        let client = Client::new();
        let url = format!(
            "{}{}:generateContent?key={}",
            self.api_url, self.model, self.api_key
        );

        let response = client
            .post(&url)
            .json(request)
            .send()
            .map_err(|e| AiError::ApiError(format!("AI request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(AiError::ApiError(format!(
                "API error {}: {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .map_err(|e| AiError::ApiError(format!("Failed to parse AI response: {}", e)))?;

        first_text(&gemini_response)
            .ok_or_else(|| AiError::ApiError("No response content".to_string()))
    }

    fn blocking_stream(
        &self,
        request: &GeminiRequest,
        sender: &Sender<ResponseMessage>,
    ) -> Result<(), AiError> {
        if self.api_key.is_empty() {
            return Err(AiError::ConfigError("API key is not configured".to_string()));
        }
        let client = Client::new();
        let url = format!(
            "{}{}:streamGenerateContent?alt=sse&key={}",
            self.api_url, self.model, self.api_key
        );

        let response = client
            .post(&url)
            .json(request)
            .send()
            .map_err(|e| AiError::ApiError(format!("AI request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(AiError::ApiError(format!(
                "API error {}: {}",
                status, error_text
            )));
        }

        let reader = BufReader::new(response);
        for line in reader.lines() {
            let line = line.map_err(|e| AiError::ApiError(format!("Stream read failed: {}", e)))?;
            if let Some(text) = parse_sse_line(&line)
                && !text.is_empty()
            {
                let _ = sender.send(ResponseMessage::ChatChunk(text));
            }
        }
        Ok(())
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn first_text(response: &GeminiResponse) -> Option<String> {
    response
        .candidates
        .first()
        .and_then(|c| c.content.parts.first())
        .map(|p| p.text.clone())
}

/// Extract the text payload from one SSE `data:` line, if it carries any.
fn parse_sse_line(line: &str) -> Option<String> {
    let payload = line.strip_prefix("data:")?.trim();
    if payload.is_empty() || payload == "[DONE]" {
        return None;
    }
    let response: GeminiResponse = serde_json::from_str(payload).ok()?;
    first_text(&response)
}

/// Models sometimes wrap plain-text answers in a markdown code fence.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let without_open = text
        .strip_prefix("```markdown\n")
        .or_else(|| text.strip_prefix("```\n"))
        .unwrap_or(text);
    without_open.strip_suffix("\n```").unwrap_or(without_open)
}
