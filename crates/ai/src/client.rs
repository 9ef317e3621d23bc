//! OpenAI-compatible chat completions client.

use std::time::Duration;

use async_trait::async_trait;
use folioadvisor_core::profiles::Profile;
use folioadvisor_core::projects::Project;
use folioadvisor_core::recommendations::AllocationPlan;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::audit::{audit_plan, describe};
use crate::error::AiError;
use crate::generator::{ProviderCredentials, RecommendationGeneratorTrait};
use crate::parse::parse_plan;
use crate::prompt::{system_prompt, user_prompt};

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Configuration for the recommendation client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Endpoint used when the caller does not supply one.
    pub api_url: String,
    pub model: String,
    /// Bound on the whole request, connect through last byte.
    pub timeout: Duration,
    /// Reject plans that fail the post-generation audit instead of only
    /// logging the issues.
    pub strict_audit: bool,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            strict_audit: false,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

pub struct RecommendationClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl RecommendationClient {
    pub fn new(config: ClientConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AiError::internal(format!("HTTP client setup failed: {e}")))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends one chat completion request and returns the first choice's text.
    async fn complete(
        &self,
        url: &str,
        api_key: &str,
        system: String,
        user: String,
    ) -> Result<String, AiError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .http
            .post(url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let upstream_message = response
                .json::<ErrorEnvelope>()
                .await
                .ok()
                .and_then(|env| env.error)
                .and_then(|err| err.message)
                .filter(|m| !m.trim().is_empty());
            return Err(AiError::Upstream {
                status: status.as_u16(),
                message: upstream_message
                    .unwrap_or_else(|| format!("API调用失败: {}", status.as_u16())),
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AiError::invalid_response(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(AiError::EmptyResponse)
    }
}

#[async_trait]
impl RecommendationGeneratorTrait for RecommendationClient {
    async fn generate(
        &self,
        profile: &Profile,
        catalog: &[Project],
        credentials: &ProviderCredentials,
    ) -> Result<AllocationPlan, AiError> {
        if credentials.api_key.trim().is_empty() {
            return Err(AiError::MissingApiKey);
        }
        let url = credentials
            .api_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(&self.config.api_url);

        debug!(
            "Requesting allocation plan from {} for user {} over {} projects",
            url,
            profile.user_id,
            catalog.len()
        );

        let text = self
            .complete(
                url,
                &credentials.api_key,
                system_prompt(profile),
                user_prompt(profile, catalog),
            )
            .await?;
        let plan = parse_plan(&text)?;

        let issues = audit_plan(&plan, profile, catalog);
        if !issues.is_empty() {
            let summary = describe(&issues);
            warn!(
                "Allocation plan for user {} failed audit: {}",
                profile.user_id, summary
            );
            if self.config.strict_audit {
                return Err(AiError::PlanRejected(summary));
            }
        }

        Ok(plan)
    }
}
