pub mod error;
pub mod export;
pub mod model;
pub mod service;
pub mod vocabulary;

pub use error::DialogServiceError;
pub use export::{export_filename, render_text_export};
pub use model::{
    CefrLevel, CreateDialogInput, Dialog, DialogFilter, DialogTurn, GenerateDialogParams,
    GeneratedDialog,
};
pub use service::{DialogService, DialogServiceApi, DEFAULT_SEARCH_LIMIT};
pub use vocabulary::normalize_vocabulary;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_EXPORT_LIMIT: i64 = 1000;

/// Vocabulary as submitted: either freeform text or an explicit list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VocabularyInput {
    Raw(String),
    List(Vec<String>),
}

impl Default for VocabularyInput {
    fn default() -> Self {
        VocabularyInput::List(Vec::new())
    }
}

impl VocabularyInput {
    /// Freeform text goes through the normalizer. List entries are trimmed but
    /// blanks are kept so validation can reject them.
    pub fn into_words(self) -> Vec<String> {
        match self {
            VocabularyInput::Raw(raw) => normalize_vocabulary(&raw),
            VocabularyInput::List(words) => {
                words.into_iter().map(|w| w.trim().to_string()).collect()
            }
        }
    }
}

/// Request for POST /api/dialogs
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateDialogRequest {
    #[serde(default)]
    pub input_language: String,
    #[serde(default)]
    pub dialog_language: String,
    #[serde(default)]
    pub cefr_level: String,
    #[serde(default)]
    pub input_words: VocabularyInput,
}

impl From<CreateDialogRequest> for CreateDialogInput {
    fn from(request: CreateDialogRequest) -> Self {
        Self {
            input_language: request.input_language,
            dialog_language: request.dialog_language,
            cefr_level: request.cefr_level,
            input_words: request.input_words.into_words(),
        }
    }
}

/// Query for GET /api/dialogs
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SearchDialogsQuery {
    pub input_language: Option<String>,
    pub dialog_language: Option<String>,
    pub cefr_level: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl SearchDialogsQuery {
    /// Blank filter values are ignored; an unknown CEFR level is rejected.
    pub fn into_filter(self, default_limit: i64) -> Result<DialogFilter, DialogServiceError> {
        let cefr_level = match non_blank(self.cefr_level) {
            Some(level) => Some(
                level
                    .parse::<CefrLevel>()
                    .map_err(DialogServiceError::InvalidInput)?,
            ),
            None => None,
        };

        Ok(DialogFilter {
            input_language: non_blank(self.input_language),
            dialog_language: non_blank(self.dialog_language),
            cefr_level,
            limit: self.limit.filter(|l| *l > 0).unwrap_or(default_limit),
            offset: self.offset.unwrap_or(0).max(0),
        })
    }
}

/// Query for GET /api/dialogs/export/text
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ExportQuery {
    /// Comma-separated dialog ids; when present the filters are ignored
    pub ids: Option<String>,
    pub input_language: Option<String>,
    pub dialog_language: Option<String>,
    pub cefr_level: Option<String>,
    pub limit: Option<i64>,
}

impl ExportQuery {
    /// Parsed ids plus the raw values that were not valid UUIDs
    pub fn selected_ids(&self) -> (Vec<Uuid>, Vec<String>) {
        let mut ids = Vec::new();
        let mut invalid = Vec::new();

        for raw in self.ids.as_deref().unwrap_or_default().split(',') {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            match Uuid::parse_str(raw) {
                Ok(id) => ids.push(id),
                Err(_) => invalid.push(raw.to_string()),
            }
        }

        (ids, invalid)
    }

    pub fn has_selection(&self) -> bool {
        self.ids
            .as_deref()
            .map(|ids| !ids.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn into_filter(self) -> Result<DialogFilter, DialogServiceError> {
        SearchDialogsQuery {
            input_language: self.input_language,
            dialog_language: self.dialog_language,
            cefr_level: self.cefr_level,
            limit: self.limit,
            offset: None,
        }
        .into_filter(DEFAULT_EXPORT_LIMIT)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
