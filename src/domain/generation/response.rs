use super::error::{truncate_for_log, GenerationError};
use crate::domain::dialog::{DialogTurn, GeneratedDialog};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

const FALLBACK_TITLE_CHARS: usize = 50;

/// Dialog JSON as emitted by the model. Every field is optional and checked after parsing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DialogPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub turns: Option<Vec<TurnPayload>>,
    #[serde(default)]
    pub translations: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TurnPayload {
    #[serde(default)]
    pub speaker: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl TurnPayload {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: Some(speaker.into()),
            text: Some(text.into()),
        }
    }
}

/// Remove a surrounding Markdown code fence, including an optional language tag line
pub fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Parse the message content of a completion into a dialog payload
pub fn parse_dialog_payload(content: &str) -> Result<DialogPayload, GenerationError> {
    let cleaned = strip_code_fence(content);
    serde_json::from_str(cleaned).map_err(|e| {
        tracing::error!(
            error = %e,
            content = %truncate_for_log(cleaned, 500),
            "Failed to parse dialog JSON from model"
        );
        GenerationError::MalformedPayload(format!(
            "{} content={}",
            e,
            truncate_for_log(cleaned, 256)
        ))
    })
}

/// Validate the raw payload and align it with the requested vocabulary.
///
/// Turns with a blank speaker or text are dropped and the survivors are numbered
/// from zero. Translations are keyed by every trimmed input word; keys the model
/// invented are discarded.
pub fn normalize_payload(
    payload: DialogPayload,
    input_words: &[String],
) -> Result<GeneratedDialog, GenerationError> {
    let raw_turns = payload.turns.unwrap_or_default();
    if raw_turns.is_empty() {
        return Err(GenerationError::NoTurns);
    }

    let turns: Vec<DialogTurn> = raw_turns
        .into_iter()
        .filter_map(|turn| {
            let speaker = turn.speaker.unwrap_or_default().trim().to_string();
            let text = turn.text.unwrap_or_default().trim().to_string();
            (!speaker.is_empty() && !text.is_empty()).then_some((speaker, text))
        })
        .enumerate()
        .map(|(idx, (speaker, text))| DialogTurn::new(speaker, text, idx as i32))
        .collect();

    if turns.is_empty() {
        return Err(GenerationError::NoTurns);
    }

    let title = resolve_title(payload.title.as_deref(), &turns);
    let raw_translations: BTreeMap<String, String> =
        payload.translations.unwrap_or_default().into_iter().collect();
    let translations = match_translations(&raw_translations, input_words);

    Ok(GeneratedDialog {
        title,
        turns,
        translations,
    })
}

fn resolve_title(title: Option<&str>, turns: &[DialogTurn]) -> String {
    let title = title.unwrap_or_default().trim();
    if !title.is_empty() {
        return title.to_string();
    }

    match turns.first() {
        Some(first) if first.text.chars().count() > FALLBACK_TITLE_CHARS => {
            let excerpt: String = first.text.chars().take(FALLBACK_TITLE_CHARS).collect();
            format!("{}...", excerpt)
        }
        Some(first) => first.text.clone(),
        None => "Dialog".to_string(),
    }
}

fn match_translations(
    raw: &BTreeMap<String, String>,
    input_words: &[String],
) -> BTreeMap<String, String> {
    let mut matched = BTreeMap::new();

    for word in input_words {
        let word = word.trim();

        let exact = raw.get(word).filter(|value| !value.is_empty());
        let translation = exact.or_else(|| {
            raw.iter()
                .find(|(key, value)| {
                    !value.is_empty() && key.trim().to_lowercase() == word.to_lowercase()
                })
                .map(|(_, value)| value)
        });

        match translation {
            Some(value) => {
                matched.insert(word.to_string(), value.clone());
            }
            None => {
                tracing::warn!(
                    input = %word,
                    translations_count = raw.len(),
                    "No translation found for input word"
                );
                matched.insert(word.to_string(), String::new());
            }
        }
    }

    matched
}
