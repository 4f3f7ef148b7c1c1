use super::tts_repository::TtsRepository;
use crate::domain::generation::error::truncate_for_log;
use crate::infrastructure::config::ElevenLabsConfig;
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Serialize;

const STABILITY: f32 = 0.5;
const SIMILARITY_BOOST: f32 = 0.75;

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

/// ElevenLabs implementation of TTS repository. One configured voice speaks every line.
pub struct ElevenLabsTtsRepository {
    client: Client,
    api_key: String,
    voice_id: String,
    model_id: String,
    endpoint: String,
}

impl ElevenLabsTtsRepository {
    pub fn new(config: ElevenLabsConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let endpoint = format!(
            "{}/{}",
            config.base_url.trim_end_matches('/'),
            config.voice_id
        );

        Ok(Self {
            client,
            api_key: config.api_key,
            voice_id: config.voice_id,
            model_id: config.model_id,
            endpoint,
        })
    }
}

#[async_trait]
impl TtsRepository for ElevenLabsTtsRepository {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();
        let request = SpeechRequest {
            text,
            model_id: &self.model_id,
            voice_settings: VoiceSettings {
                stability: STABILITY,
                similarity_boost: SIMILARITY_BOOST,
            },
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            voice_id = %self.voice_id,
            model_id = %self.model_id,
            language = %language,
            "Calling ElevenLabs API"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("xi-api-key", &self.api_key)
            .header(header::ACCEPT, "audio/mpeg")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(endpoint = %self.endpoint, error = %e, "ElevenLabs request failed");
                format!("call elevenlabs: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = truncate_for_log(&body, 512);
            tracing::error!(
                status_code = status.as_u16(),
                response_body = %body,
                endpoint = %self.endpoint,
                "ElevenLabs API error"
            );
            return Err(format!(
                "elevenlabs error: status={} body={}",
                status.as_u16(),
                body
            ));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| format!("read audio: {}", e))?;

        if audio.is_empty() {
            tracing::warn!("ElevenLabs returned empty audio response");
            return Err("elevenlabs returned empty audio".to_string());
        }

        tracing::info!(
            provider = "elevenlabs",
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            audio_size_bytes = audio.len(),
            "TTS synthesis completed"
        );

        Ok(audio.to_vec())
    }
}
