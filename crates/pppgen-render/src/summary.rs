//! HTTP summarization collaborator.
//!
//! Talks to a chat-completions style text-generation endpoint: one blocking
//! call per task, temperature 0, a fixed instruction template, and a hard
//! per-call timeout. There is no retry or rate limiting here on purpose;
//! a failed call degrades that one line to its raw fields.

use pppgen_core::{Summarizer, SummaryError};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

/// Instruction template for the goal / summary / assignee extraction
const SYSTEM_PROMPT: &str = "\
You are an expert in summarizing and restructuring tasks.
Analyze the provided details for a task and extract what is relevant for an
executive summary. Keep GOAL and SUMMARY simple, concise, and easy to understand.
1. Identify the name of this task and what department it belongs to. Come up
   with an overall business goal for this task using its name and department.
   This field is called GOAL.
2. Summarize in one sentence what the task is, using its name and any
   subitems. Only cover what an executive would care about. This field is
   called SUMMARY.
3. Identify which individual(s) drive this task. This field is called ASSIGNEE.
4. FORMAT YOUR RESPONSE using exactly this syntax, replacing the fields in
   curly brackets with what you identified:
<b>{GOAL}</b>: {SUMMARY} <span class='assignee'>[{ASSIGNEE}]</span>";

/// Default per-call timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking HTTP client for the summarization backend
pub struct HttpSummarizer {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl HttpSummarizer {
    /// Create a summarizer for the given endpoint with the default model
    /// and timeout. Fails only if the underlying HTTP client cannot be
    /// built.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Result<Self, SummaryError> {
        Self::with_timeout(endpoint, api_key, DEFAULT_TIMEOUT)
    }

    /// Create a summarizer with an explicit per-call timeout
    pub fn with_timeout(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SummaryError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SummaryError::Backend(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: "gpt-4o-mini".to_string(),
        })
    }

    /// Override the model name
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Render the task's raw fields as the user message
    fn user_prompt(fields: &BTreeMap<String, String>) -> String {
        let mut prompt = String::from("Here is the task information:\n");
        for (key, value) in fields {
            prompt.push_str(&format!("- {}: {}\n", key, value));
        }
        prompt
    }
}

impl Summarizer for HttpSummarizer {
    fn summarize(&self, fields: &BTreeMap<String, String>) -> Result<String, SummaryError> {
        let body = json!({
            "model": self.model,
            "temperature": 0,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": Self::user_prompt(fields) },
            ],
        });

        debug!(endpoint = %self.endpoint, model = %self.model, "summarization call");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    SummaryError::Timeout
                } else {
                    SummaryError::Backend(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(SummaryError::Backend(format!(
                "HTTP {} from summarization backend",
                response.status()
            )));
        }

        let payload: Value = response.json().map_err(|_| SummaryError::Malformed)?;
        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(SummaryError::Malformed)?;

        Ok(content.to_string())
    }
}
