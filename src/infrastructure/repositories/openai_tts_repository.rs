use super::tts_repository::TtsRepository;
use crate::domain::tts::openai_voice_for_language;
use crate::infrastructure::config::OpenAiTtsConfig;
use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, Voice},
    Client,
};
use async_trait::async_trait;
use std::time::Duration;

/// OpenAI TTS implementation of TTS repository
pub struct OpenAiTtsRepository {
    client: Client<OpenAIConfig>,
    model: String,
    default_voice: String,
    timeout: Duration,
}

impl OpenAiTtsRepository {
    pub fn new(config: OpenAiTtsConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key)
            .with_api_base(config.base_url);

        Self {
            client: Client::with_config(openai_config),
            model: config.model,
            default_voice: config.voice,
            timeout: config.timeout,
        }
    }

    /// Configured voice, or the per-language default when none is set
    fn voice_for(&self, language: &str) -> String {
        if self.default_voice.is_empty() {
            openai_voice_for_language(language).to_string()
        } else {
            self.default_voice.clone()
        }
    }
}

fn speech_model(model: &str) -> SpeechModel {
    match model {
        "tts-1" => SpeechModel::Tts1,
        "tts-1-hd" => SpeechModel::Tts1Hd,
        other => SpeechModel::Other(other.to_string()),
    }
}

fn speech_voice(voice: &str) -> Voice {
    match voice.to_lowercase().as_str() {
        "echo" => Voice::Echo,
        "fable" => Voice::Fable,
        "onyx" => Voice::Onyx,
        "nova" => Voice::Nova,
        "shimmer" => Voice::Shimmer,
        _ => Voice::Alloy,
    }
}

#[async_trait]
impl TtsRepository for OpenAiTtsRepository {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();
        let voice = self.voice_for(language);

        tracing::debug!(
            language = %language,
            voice = %voice,
            model = %self.model,
            text_length = text.len(),
            "Calling OpenAI TTS API"
        );

        let request = CreateSpeechRequest {
            model: speech_model(&self.model),
            input: text.to_string(),
            voice: speech_voice(&voice),
            response_format: None, // Defaults to MP3
            speed: None,
        };

        let response = tokio::time::timeout(self.timeout, self.client.audio().speech(request))
            .await
            .map_err(|_| format!("OpenAI TTS timed out after {}s", self.timeout.as_secs()))?
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    model = %self.model,
                    voice = %voice,
                    "OpenAI TTS API call failed"
                );
                format!("OpenAI TTS error: {}", e)
            })?;

        let audio = response.bytes.to_vec();
        if audio.is_empty() {
            return Err("OpenAI TTS returned empty audio".to_string());
        }

        tracing::info!(
            provider = "openai",
            model = %self.model,
            voice = %voice,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            audio_size_bytes = audio.len(),
            "TTS synthesis completed"
        );

        Ok(audio)
    }
}
