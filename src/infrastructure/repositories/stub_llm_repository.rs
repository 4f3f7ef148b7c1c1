use super::llm_repository::LlmRepository;
use crate::domain::dialog::GenerateDialogParams;
use crate::domain::generation::{DialogPayload, GenerationError, TurnPayload};
use async_trait::async_trait;

const MIN_TURNS: usize = 4;
const SPEAKERS: [&str; 2] = ["Ana", "Luis"];

/// Deterministic offline generator for development and tests.
///
/// Emits no title or translations, so the usual fallbacks apply.
#[derive(Debug, Default)]
pub struct StubLlmRepository;

impl StubLlmRepository {
    pub fn new() -> Self {
        Self
    }
}

fn sentence_prefix(language: &str) -> &'static str {
    match language.to_lowercase().as_str() {
        "es" => "Hablemos sobre",
        "en" => "Let's talk about",
        "ru" => "Давайте поговорим о",
        "fi" => "Puhutaan",
        "de" => "Lass uns über",
        "fr" => "Parlons de",
        _ => "Let's discuss",
    }
}

#[async_trait]
impl LlmRepository for StubLlmRepository {
    async fn generate(
        &self,
        params: &GenerateDialogParams,
    ) -> Result<DialogPayload, GenerationError> {
        if params.input_words.is_empty() {
            return Err(GenerationError::InvalidRequest(
                "input words required".to_string(),
            ));
        }

        let prefix = sentence_prefix(&params.dialog_language);
        let turn_count = params.input_words.len().max(MIN_TURNS);

        let turns = (0..turn_count)
            .map(|i| {
                let word = &params.input_words[i % params.input_words.len()];
                TurnPayload::new(
                    SPEAKERS[i % SPEAKERS.len()],
                    format!(
                        "{} {} (CEFR {}, turn {}).",
                        prefix,
                        word,
                        params.cefr_level,
                        i + 1
                    ),
                )
            })
            .collect();

        tracing::debug!(
            input_language = %params.input_language,
            dialog_language = %params.dialog_language,
            cefr_level = %params.cefr_level,
            words = %params.input_words.join(","),
            "Stub generator produced dialog"
        );

        Ok(DialogPayload {
            title: None,
            turns: Some(turns),
            translations: None,
        })
    }
}
