use super::tts_repository::TtsRepository;
use async_trait::async_trait;

/// Offline synthesis that never produces audio, so every turn gets a placeholder
#[derive(Debug, Default)]
pub struct StubTtsRepository;

impl StubTtsRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TtsRepository for StubTtsRepository {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, String> {
        tracing::debug!(
            language = %language,
            text_length = text.len(),
            "Stub synthesis, no audio produced"
        );
        Ok(Vec::new())
    }
}
