use super::error::DialogServiceError;
use super::model::{CefrLevel, CreateDialogInput, Dialog, DialogFilter, GenerateDialogParams};
use crate::domain::generation::DialogGenerator;
use crate::domain::tts::DialogSynthesizer;
use crate::infrastructure::repositories::DialogRepository;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub const DEFAULT_SEARCH_LIMIT: i64 = 20;

/// Runs the generate, synthesize and persist pipeline for new dialogs
pub struct DialogService {
    dialog_repo: Arc<dyn DialogRepository>,
    generator: Arc<DialogGenerator>,
    synthesizer: Arc<DialogSynthesizer>,
}

impl DialogService {
    pub fn new(
        dialog_repo: Arc<dyn DialogRepository>,
        generator: Arc<DialogGenerator>,
        synthesizer: Arc<DialogSynthesizer>,
    ) -> Self {
        Self {
            dialog_repo,
            generator,
            synthesizer,
        }
    }
}

#[async_trait]
pub trait DialogServiceApi: Send + Sync {
    /// Create a dialog from the learner's vocabulary
    ///
    /// This operation:
    /// - Validates languages, level and words before any provider is called
    /// - Generates title, turns and translations with the language model
    /// - Synthesizes audio for every turn
    /// - Persists the dialog and its turns atomically
    ///
    /// Nothing is stored unless every stage succeeds.
    async fn create_dialog(&self, input: CreateDialogInput) -> Result<Dialog, DialogServiceError>;

    async fn get_dialog(&self, id: Uuid) -> Result<Dialog, DialogServiceError>;

    /// Newest first. A non-positive limit falls back to the default page size.
    async fn search_dialogs(&self, filter: DialogFilter)
        -> Result<Vec<Dialog>, DialogServiceError>;
}

#[async_trait]
impl DialogServiceApi for DialogService {
    async fn create_dialog(&self, input: CreateDialogInput) -> Result<Dialog, DialogServiceError> {
        let params = self.validate(input)?;

        let generated = self.generator.generate(&params).await?;

        let mut dialog = Dialog {
            id: Uuid::new_v4(),
            title: generated.title,
            input_language: params.input_language,
            dialog_language: params.dialog_language,
            cefr_level: params.cefr_level,
            input_words: params.input_words,
            translations: generated.translations,
            turns: generated.turns,
            created_at: Utc::now(),
        };

        for (index, turn) in dialog.turns.iter_mut().enumerate() {
            if turn.id.is_nil() {
                turn.id = Uuid::new_v4();
            }
            turn.position = index as i32;
        }

        let dialog = self.synthesizer.synthesize(dialog).await?;

        self.dialog_repo.create(&dialog).await?;

        tracing::info!(
            dialog_id = %dialog.id,
            turns = dialog.turns.len(),
            cefr_level = %dialog.cefr_level,
            "Dialog created"
        );

        Ok(dialog)
    }

    async fn get_dialog(&self, id: Uuid) -> Result<Dialog, DialogServiceError> {
        self.dialog_repo
            .find_by_id(id)
            .await?
            .ok_or(DialogServiceError::NotFound)
    }

    async fn search_dialogs(
        &self,
        mut filter: DialogFilter,
    ) -> Result<Vec<Dialog>, DialogServiceError> {
        if filter.limit <= 0 {
            filter.limit = DEFAULT_SEARCH_LIMIT;
        }
        if filter.offset < 0 {
            filter.offset = 0;
        }

        Ok(self.dialog_repo.search(&filter).await?)
    }
}

impl DialogService {
    fn validate(&self, input: CreateDialogInput) -> Result<GenerateDialogParams, DialogServiceError> {
        let input_language = input.input_language.trim().to_string();
        let dialog_language = input.dialog_language.trim().to_string();

        if input_language.is_empty() || dialog_language.is_empty() {
            return Err(DialogServiceError::InvalidInput(
                "input_language and dialog_language are required".to_string(),
            ));
        }

        if input.cefr_level.trim().is_empty() {
            return Err(DialogServiceError::InvalidInput(
                "cefr_level is required".to_string(),
            ));
        }
        let cefr_level: CefrLevel = input
            .cefr_level
            .parse()
            .map_err(DialogServiceError::InvalidInput)?;

        if input.input_words.is_empty() {
            return Err(DialogServiceError::InvalidInput(
                "at least one input word is required".to_string(),
            ));
        }
        if input.input_words.iter().any(|word| word.trim().is_empty()) {
            return Err(DialogServiceError::InvalidInput(
                "empty word provided".to_string(),
            ));
        }

        Ok(GenerateDialogParams {
            input_language,
            dialog_language,
            cefr_level,
            input_words: input
                .input_words
                .into_iter()
                .map(|word| word.trim().to_string())
                .collect(),
        })
    }
}
