use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider (ElevenLabs, OpenAI, stub, etc.)
///
/// Implementations are responsible for:
/// - Provider-specific request shape and authentication
/// - Provider-specific voice selection
/// - Treating a successful response without audio bytes as an error
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize a single dialog line
    ///
    /// Returns MP3 audio. An empty vector means the provider deliberately produced
    /// no audio and the caller should fall back to a placeholder.
    ///
    /// # Arguments
    /// * `text` - The line to speak
    /// * `language` - Language code of the dialog
    ///
    /// # Errors
    /// Returns error if synthesis fails or provider is unavailable
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, String>;
}
