use super::llm_repository::LlmRepository;
use crate::domain::dialog::GenerateDialogParams;
use crate::domain::generation::error::truncate_for_log;
use crate::domain::generation::{
    build_user_prompt, parse_dialog_payload, DialogPayload, GenerationError, SYSTEM_PROMPT,
};
use crate::infrastructure::config::OpenAiLlmConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
    #[serde(default)]
    error: Option<CompletionError>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CompletionError {
    #[serde(default)]
    message: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

/// Dialog generation against an OpenAI-compatible `/chat/completions` endpoint
pub struct OpenAiLlmRepository {
    client: Client,
    config: OpenAiLlmConfig,
}

impl OpenAiLlmRepository {
    pub fn new(config: OpenAiLlmConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl LlmRepository for OpenAiLlmRepository {
    async fn generate(
        &self,
        params: &GenerateDialogParams,
    ) -> Result<DialogPayload, GenerationError> {
        let user_prompt = build_user_prompt(params);
        let request = CompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        tracing::debug!(
            model = %self.config.model,
            url = %self.completions_url(),
            prompt_length = user_prompt.len(),
            "Calling chat completion API"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, timeout = e.is_timeout(), "Chat completion request failed");
                GenerationError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::Transport(format!("read response: {}", e)))?;

        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                body = %truncate_for_log(&body, 512),
                "Chat completion API returned an error status"
            );
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body: truncate_for_log(&body, 512),
            });
        }

        let completion: CompletionResponse = serde_json::from_str(&body).map_err(|e| {
            GenerationError::Decode(format!("{} body={}", e, truncate_for_log(&body, 256)))
        })?;

        if let Some(error) = completion.error {
            return Err(GenerationError::Provider(format!(
                "{} ({})",
                error.message,
                error.kind.unwrap_or_default()
            )));
        }

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or(GenerationError::NoChoices)?;
        let content = choice.message.content.unwrap_or_default();

        tracing::debug!(
            content_length = content.len(),
            content_preview = %truncate_for_log(content.trim(), 200),
            "Parsing model response"
        );

        parse_dialog_payload(&content)
    }
}
