use crate::domain::dialog::{CefrLevel, Dialog, DialogFilter, DialogTurn};
use crate::error::{AppError, AppResult};
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, Postgres, QueryBuilder};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use uuid::Uuid;

/// Durable storage for dialogs and their turns
#[async_trait]
pub trait DialogRepository: Send + Sync {
    /// Insert a dialog with all of its turns, or nothing at all
    async fn create(&self, dialog: &Dialog) -> AppResult<()>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Dialog>>;

    /// Newest first, equality filters, then `LIMIT`/`OFFSET`
    async fn search(&self, filter: &DialogFilter) -> AppResult<Vec<Dialog>>;
}

#[derive(Debug, FromRow)]
struct DialogRow {
    id: Uuid,
    title: String,
    input_language: String,
    dialog_language: String,
    cefr_level: String,
    input_words: Json<Vec<String>>,
    translations: Json<BTreeMap<String, String>>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct TurnRow {
    id: Uuid,
    dialog_id: Uuid,
    speaker: String,
    text: String,
    audio_url: String,
    position: i32,
}

impl DialogRow {
    fn into_dialog(self, turns: Vec<DialogTurn>) -> AppResult<Dialog> {
        let cefr_level: CefrLevel = self.cefr_level.parse().map_err(|e: String| {
            AppError::Internal(format!("dialog {} has corrupt level: {}", self.id, e))
        })?;

        Ok(Dialog {
            id: self.id,
            title: self.title,
            input_language: self.input_language,
            dialog_language: self.dialog_language,
            cefr_level,
            input_words: self.input_words.0,
            translations: self.translations.0,
            turns,
            created_at: self.created_at,
        })
    }
}

impl From<TurnRow> for DialogTurn {
    fn from(row: TurnRow) -> Self {
        Self {
            id: row.id,
            speaker: row.speaker,
            text: row.text,
            audio_url: row.audio_url,
            position: row.position,
        }
    }
}

pub struct PgDialogRepository {
    pool: Arc<DbPool>,
}

impl PgDialogRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Load turns for a set of dialogs, grouped by dialog and ordered by position
    async fn find_turns(&self, dialog_ids: &[Uuid]) -> AppResult<HashMap<Uuid, Vec<DialogTurn>>> {
        let pool = self.pool.as_ref();
        let rows = sqlx::query_as::<_, TurnRow>(
            r#"
            SELECT id, dialog_id, speaker, text, audio_url, position
            FROM dialog_turns
            WHERE dialog_id = ANY($1)
            ORDER BY dialog_id, position ASC
            "#,
        )
        .bind(dialog_ids)
        .fetch_all(pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<DialogTurn>> = HashMap::new();
        for row in rows {
            grouped.entry(row.dialog_id).or_default().push(row.into());
        }

        Ok(grouped)
    }
}

#[async_trait]
impl DialogRepository for PgDialogRepository {
    async fn create(&self, dialog: &Dialog) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO dialogs (
                id, title, input_language, dialog_language, cefr_level,
                input_words, translations, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(dialog.id)
        .bind(&dialog.title)
        .bind(&dialog.input_language)
        .bind(&dialog.dialog_language)
        .bind(dialog.cefr_level.as_str())
        .bind(Json(&dialog.input_words))
        .bind(Json(&dialog.translations))
        .bind(dialog.created_at)
        .execute(&mut *tx)
        .await?;

        for turn in &dialog.turns {
            sqlx::query(
                r#"
                INSERT INTO dialog_turns (id, dialog_id, speaker, text, audio_url, position)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(turn.id)
            .bind(dialog.id)
            .bind(&turn.speaker)
            .bind(&turn.text)
            .bind(&turn.audio_url)
            .bind(turn.position)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!(
            dialog_id = %dialog.id,
            turns = dialog.turns.len(),
            "Dialog persisted"
        );

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Dialog>> {
        let pool = self.pool.as_ref();
        let row = sqlx::query_as::<_, DialogRow>(
            r#"
            SELECT id, title, input_language, dialog_language, cefr_level,
                   input_words, translations, created_at
            FROM dialogs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let turns = self
            .find_turns(&[row.id])
            .await?
            .remove(&row.id)
            .unwrap_or_default();

        row.into_dialog(turns).map(Some)
    }

    async fn search(&self, filter: &DialogFilter) -> AppResult<Vec<Dialog>> {
        let mut query = QueryBuilder::<Postgres>::new(
            r#"
            SELECT id, title, input_language, dialog_language, cefr_level,
                   input_words, translations, created_at
            FROM dialogs
            WHERE 1 = 1
            "#,
        );

        if let Some(input_language) = &filter.input_language {
            query.push(" AND input_language = ").push_bind(input_language.clone());
        }
        if let Some(dialog_language) = &filter.dialog_language {
            query.push(" AND dialog_language = ").push_bind(dialog_language.clone());
        }
        if let Some(cefr_level) = filter.cefr_level {
            query.push(" AND cefr_level = ").push_bind(cefr_level.as_str());
        }

        query
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(filter.limit)
            .push(" OFFSET ")
            .push_bind(filter.offset);

        let rows = query
            .build_query_as::<DialogRow>()
            .fetch_all(self.pool.as_ref())
            .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let mut turns = self.find_turns(&ids).await?;

        rows.into_iter()
            .map(|row| {
                let dialog_turns = turns.remove(&row.id).unwrap_or_default();
                row.into_dialog(dialog_turns)
            })
            .collect()
    }
}
