use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Common European Framework of Reference proficiency level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl CefrLevel {
    pub const ALL: [CefrLevel; 6] = [
        CefrLevel::A1,
        CefrLevel::A2,
        CefrLevel::B1,
        CefrLevel::B2,
        CefrLevel::C1,
        CefrLevel::C2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
        }
    }
}

impl fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CefrLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        CefrLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| format!("unknown CEFR level: {}", s.trim()))
    }
}

/// A generated dialog together with its vocabulary and synthesized turns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dialog {
    pub id: Uuid,
    pub title: String,
    pub input_language: String,
    pub dialog_language: String,
    pub cefr_level: CefrLevel,
    pub input_words: Vec<String>,
    pub translations: BTreeMap<String, String>,
    pub turns: Vec<DialogTurn>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogTurn {
    /// Nil until the turn is handed to synthesis
    pub id: Uuid,
    pub speaker: String,
    pub text: String,
    pub audio_url: String,
    pub position: i32,
}

impl DialogTurn {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>, position: i32) -> Self {
        Self {
            id: Uuid::nil(),
            speaker: speaker.into(),
            text: text.into(),
            audio_url: String::new(),
            position,
        }
    }
}

/// Validated input for a new dialog
#[derive(Debug, Clone)]
pub struct CreateDialogInput {
    pub input_language: String,
    pub dialog_language: String,
    pub cefr_level: String,
    pub input_words: Vec<String>,
}

/// Parameters handed to the generation provider
#[derive(Debug, Clone)]
pub struct GenerateDialogParams {
    pub input_language: String,
    pub dialog_language: String,
    pub cefr_level: CefrLevel,
    pub input_words: Vec<String>,
}

/// Title, turns and translations produced by the generator, before ids and audio exist
#[derive(Debug, Clone)]
pub struct GeneratedDialog {
    pub title: String,
    pub turns: Vec<DialogTurn>,
    pub translations: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct DialogFilter {
    pub input_language: Option<String>,
    pub dialog_language: Option<String>,
    pub cefr_level: Option<CefrLevel>,
    pub limit: i64,
    pub offset: i64,
}
