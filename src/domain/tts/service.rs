use super::error::SynthesisError;
use crate::domain::dialog::Dialog;
use crate::infrastructure::repositories::TtsRepository;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::Arc;
use uuid::Uuid;

pub const AUDIO_DATA_URL_PREFIX: &str = "data:audio/mpeg;base64,";

pub fn placeholder_audio_url(position: i32) -> String {
    format!("/static/audio/placeholder.mp3?turn={}", position)
}

/// Voices every turn of a dialog, one provider call at a time in turn order
pub struct DialogSynthesizer {
    tts_repo: Arc<dyn TtsRepository>,
}

impl DialogSynthesizer {
    pub fn new(tts_repo: Arc<dyn TtsRepository>) -> Self {
        Self { tts_repo }
    }

    /// Attach an audio reference to every turn, or fail on the first turn the provider rejects.
    ///
    /// Provider success with no bytes is the one failure-free path that yields a
    /// placeholder reference instead of embedded audio.
    pub async fn synthesize(&self, mut dialog: Dialog) -> Result<Dialog, SynthesisError> {
        let start_time = std::time::Instant::now();

        tracing::info!(
            dialog_id = %dialog.id,
            turns = dialog.turns.len(),
            language = %dialog.dialog_language,
            "Starting dialog synthesis"
        );

        for (index, turn) in dialog.turns.iter_mut().enumerate() {
            if turn.id.is_nil() {
                turn.id = Uuid::new_v4();
            }

            tracing::debug!(
                turn = index,
                speaker = %turn.speaker,
                text_length = turn.text.len(),
                "Synthesizing turn"
            );

            let audio = self
                .tts_repo
                .synthesize(&turn.text, &dialog.dialog_language)
                .await
                .map_err(|message| {
                    tracing::error!(
                        turn = index,
                        speaker = %turn.speaker,
                        error = %message,
                        "Turn synthesis failed"
                    );
                    SynthesisError::new(index, message)
                })?;

            if audio.is_empty() {
                tracing::warn!(
                    turn = index,
                    speaker = %turn.speaker,
                    "Provider returned no audio, using placeholder"
                );
                turn.audio_url = placeholder_audio_url(turn.position);
                continue;
            }

            turn.audio_url = format!("{}{}", AUDIO_DATA_URL_PREFIX, STANDARD.encode(&audio));

            tracing::debug!(
                turn = index,
                audio_bytes = audio.len(),
                url_length = turn.audio_url.len(),
                "Turn synthesized"
            );
        }

        tracing::info!(
            dialog_id = %dialog.id,
            turns = dialog.turns.len(),
            latency_ms = start_time.elapsed().as_millis(),
            "Completed dialog synthesis"
        );

        Ok(dialog)
    }
}
