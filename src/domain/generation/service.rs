use super::error::GenerationError;
use super::response::normalize_payload;
use crate::domain::dialog::{GenerateDialogParams, GeneratedDialog};
use crate::infrastructure::repositories::LlmRepository;
use std::sync::Arc;

/// Asks the configured language model for a dialog and validates what comes back
pub struct DialogGenerator {
    llm_repo: Arc<dyn LlmRepository>,
}

impl DialogGenerator {
    pub fn new(llm_repo: Arc<dyn LlmRepository>) -> Self {
        Self { llm_repo }
    }

    pub async fn generate(
        &self,
        params: &GenerateDialogParams,
    ) -> Result<GeneratedDialog, GenerationError> {
        let start_time = std::time::Instant::now();

        tracing::info!(
            input_language = %params.input_language,
            dialog_language = %params.dialog_language,
            cefr_level = %params.cefr_level,
            word_count = params.input_words.len(),
            "Requesting dialog from generation provider"
        );

        let payload = self.llm_repo.generate(params).await?;
        let raw_turns = payload.turns.as_ref().map(Vec::len).unwrap_or(0);
        let raw_translations = payload.translations.as_ref().map(|t| t.len()).unwrap_or(0);

        let generated = normalize_payload(payload, &params.input_words)?;

        tracing::info!(
            latency_ms = start_time.elapsed().as_millis(),
            raw_turns = raw_turns,
            turns = generated.turns.len(),
            raw_translations = raw_translations,
            translations = generated.translations.len(),
            title = %generated.title,
            "Dialog generated"
        );

        Ok(generated)
    }
}
