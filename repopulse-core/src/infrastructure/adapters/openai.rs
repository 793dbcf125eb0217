// repopulse-core/src/infrastructure/adapters/openai.rs

use crate::application::insights::{InsightSet, ReportContext};
use crate::application::ports::agent::InsightAgent;
use crate::error::RepoPulseError;
use crate::infrastructure::config::report::LlmConfig;
use crate::infrastructure::error::InfrastructureError;
use async_trait::async_trait;
use minijinja::Environment;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

const SYSTEM_PROMPT: &str = "You are a Git repository analyst. You receive collected metrics and \
triggered warnings for one repository and respond with concise, actionable observations. \
Respond ONLY with a JSON object of the form \
{\"summary\": \"...\", \"risks\": [\"...\"], \"improvements\": [\"...\"]}.";

const PROMPT_TEMPLATE: &str = r#"Repository under review: {{ repo_name }}

Collected metrics:
{% for name, value in metrics.values|items -%}
- {{ name }}: {{ value }}
{% endfor %}
Derived metrics:
- commits_per_author: {{ derived.lifetime.commits_per_author }}
- merge_commit_ratio: {{ derived.lifetime.merge_commit_ratio }}
- repo_age_days: {{ derived.lifetime.repo_age_days }}
- commit_velocity: {{ derived.recent.commit_velocity }}
- author_participation_rate: {{ derived.recent.author_participation_rate }}
- change_density: {{ derived.recent.change_density }}

Triggered warnings:
{% for warning in warnings -%}
- [{{ warning.severity }}] {{ warning.title }}: {{ warning.description }}
{% else -%}
- none
{% endfor %}
Summarize the repository health, the main risks, and concrete improvements."#;

/// OpenAI-compatible chat-completions adapter for the InsightAgent port.
pub struct OpenAiAgent {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f64,
    timeout: Duration,
}

impl OpenAiAgent {
    pub fn new(api_key: String, config: &LlmConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Point the adapter at a compatible non-OpenAI endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn build_prompt(&self, context: &ReportContext) -> Result<String, RepoPulseError> {
        let env = Environment::new();
        let ctx = serde_json::to_value(context).map_err(InfrastructureError::JsonError)?;
        env.render_str(PROMPT_TEMPLATE, &ctx)
            .map_err(|e| InfrastructureError::TemplateError(e).into())
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

#[async_trait]
impl InsightAgent for OpenAiAgent {
    async fn generate(&self, context: &ReportContext) -> Result<InsightSet, RepoPulseError> {
        let prompt = self.build_prompt(context)?;

        let body = serde_json::json!({
            "model": self.model,
            "temperature": self.temperature,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt }
            ]
        });

        let request = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send();

        let response = tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| {
                InfrastructureError::AgentError(format!(
                    "Model call timed out after {} seconds",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(InfrastructureError::HttpError)?;

        if !response.status().is_success() {
            return Err(InfrastructureError::AgentError(format!(
                "Model endpoint returned {}",
                response.status()
            ))
            .into());
        }

        let parsed: ChatResponse = response.json().await.map_err(InfrastructureError::HttpError)?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                InfrastructureError::AgentError("Model response contained no choices".to_string())
            })?;

        Ok(parse_insight_payload(&content))
    }
}

/// The model is asked for JSON, but models drift: anything unparseable is
/// kept verbatim as the summary instead of being dropped.
fn parse_insight_payload(content: &str) -> InsightSet {
    let trimmed = content.trim();
    let candidate = strip_code_fence(trimmed);

    match serde_json::from_str::<InsightSet>(candidate) {
        Ok(set) => set,
        Err(_) => InsightSet {
            summary: trimmed.to_string(),
            ..Default::default()
        },
    }
}

fn strip_code_fence(text: &str) -> &str {
    text.strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(text)
}
