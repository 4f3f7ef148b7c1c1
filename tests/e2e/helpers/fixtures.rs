use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use leveltalk_backend::domain::dialog::{CefrLevel, Dialog, DialogTurn};
use leveltalk_backend::domain::tts::placeholder_audio_url;
use leveltalk_backend::infrastructure::repositories::{DialogRepository, PgDialogRepository};
use sqlx::PgPool;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

pub struct TestFixtures {
    pool: PgPool,
    repo: PgDialogRepository,
}

/// Builder-ish description of a dialog to seed directly into the store
pub struct DialogSeed {
    pub title: String,
    pub input_language: String,
    pub dialog_language: String,
    pub cefr_level: CefrLevel,
    pub input_words: Vec<String>,
    pub turns: Vec<(String, String)>,
    pub created_at: DateTime<Utc>,
}

impl DialogSeed {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            input_language: "ru".to_string(),
            dialog_language: "es".to_string(),
            cefr_level: CefrLevel::A2,
            input_words: vec!["casa".to_string(), "perro".to_string()],
            turns: vec![
                ("Ana".to_string(), "Hola, ¿tienes perro?".to_string()),
                ("Luis".to_string(), "Sí, vive en mi casa.".to_string()),
            ],
            created_at: Utc::now(),
        }
    }

    pub fn languages(mut self, input: &str, dialog: &str) -> Self {
        self.input_language = input.to_string();
        self.dialog_language = dialog.to_string();
        self
    }

    pub fn level(mut self, level: CefrLevel) -> Self {
        self.cefr_level = level;
        self
    }

    /// Shift creation time into the past so ordering is deterministic
    pub fn minutes_ago(mut self, minutes: i64) -> Self {
        self.created_at = Utc::now() - Duration::minutes(minutes);
        self
    }
}

impl TestFixtures {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: PgDialogRepository::new(Arc::new(pool.clone())),
            pool,
        }
    }

    /// The store the app itself writes through
    pub fn repo(&self) -> &PgDialogRepository {
        &self.repo
    }

    /// Materialize a seed into a dialog with ids, positions and placeholder audio
    pub fn build_dialog(seed: DialogSeed) -> Dialog {
        let translations: BTreeMap<String, String> = seed
            .input_words
            .iter()
            .map(|w| (w.clone(), format!("{}-tr", w)))
            .collect();

        Dialog {
            id: Uuid::new_v4(),
            title: seed.title,
            input_language: seed.input_language,
            dialog_language: seed.dialog_language,
            cefr_level: seed.cefr_level,
            input_words: seed.input_words,
            translations,
            turns: seed
                .turns
                .into_iter()
                .enumerate()
                .map(|(i, (speaker, text))| {
                    let position = i as i32;
                    let mut turn = DialogTurn::new(speaker, text, position);
                    turn.id = Uuid::new_v4();
                    turn.audio_url = placeholder_audio_url(position);
                    turn
                })
                .collect(),
            created_at: seed.created_at,
        }
    }

    pub async fn create_dialog(&self, seed: DialogSeed) -> Result<Dialog> {
        let dialog = Self::build_dialog(seed);
        self.repo.create(&dialog).await?;
        Ok(dialog)
    }

    pub async fn count_dialogs(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dialogs")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_turns(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dialog_turns")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
