use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::dialog::{
        export_filename, render_text_export, CreateDialogRequest, Dialog, DialogServiceApi,
        ExportQuery, SearchDialogsQuery, DEFAULT_SEARCH_LIMIT,
    },
    error::{AppError, AppResult},
};

pub struct DialogController {
    dialog_service: Arc<dyn DialogServiceApi>,
}

impl DialogController {
    pub fn new(dialog_service: Arc<dyn DialogServiceApi>) -> Self {
        Self { dialog_service }
    }

    /// POST /api/dialogs - Generate, voice and store a new dialog
    pub async fn create_dialog(
        State(controller): State<Arc<DialogController>>,
        payload: Result<Json<CreateDialogRequest>, JsonRejection>,
    ) -> AppResult<(StatusCode, Json<Dialog>)> {
        let Json(request) = payload?;
        let dialog = controller
            .dialog_service
            .create_dialog(request.into())
            .await?;
        Ok((StatusCode::CREATED, Json(dialog)))
    }

    /// GET /api/dialogs - Newest dialogs matching the filters
    pub async fn search_dialogs(
        State(controller): State<Arc<DialogController>>,
        query: Result<Query<SearchDialogsQuery>, QueryRejection>,
    ) -> AppResult<Json<Vec<Dialog>>> {
        let Query(query) = query?;
        let filter = query.into_filter(DEFAULT_SEARCH_LIMIT)?;
        let dialogs = controller.dialog_service.search_dialogs(filter).await?;
        Ok(Json(dialogs))
    }

    /// GET /api/dialogs/{id} - Single dialog with its turns
    pub async fn get_dialog(
        State(controller): State<Arc<DialogController>>,
        Path(id): Path<String>,
    ) -> AppResult<Json<Dialog>> {
        let id = Uuid::parse_str(&id)
            .map_err(|_| AppError::BadRequest("invalid dialog id".to_string()))?;
        let dialog = controller.dialog_service.get_dialog(id).await?;
        Ok(Json(dialog))
    }

    /// GET /api/dialogs/export/text - Download selected or filtered dialogs as text
    pub async fn export_text(
        State(controller): State<Arc<DialogController>>,
        query: Result<Query<ExportQuery>, QueryRejection>,
    ) -> AppResult<(StatusCode, HeaderMap, String)> {
        let Query(query) = query?;
        let dialogs = if query.has_selection() {
            controller.selected_dialogs(&query).await
        } else {
            let filter = query.into_filter()?;
            controller.dialog_service.search_dialogs(filter).await?
        };

        if dialogs.is_empty() {
            return Err(AppError::NotFound("no dialogs found".to_string()));
        }

        let now = Utc::now();
        let body = render_text_export(&dialogs, now);

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        let disposition = format!("attachment; filename={}", export_filename(now));
        headers.insert(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_str(&disposition)
                .map_err(|e| AppError::Internal(e.to_string()))?,
        );

        tracing::info!(dialogs = dialogs.len(), "Text export generated");

        Ok((StatusCode::OK, headers, body))
    }

    /// Fetch each requested dialog, skipping ids that are malformed or unknown
    async fn selected_dialogs(&self, query: &ExportQuery) -> Vec<Dialog> {
        let (ids, invalid) = query.selected_ids();
        for raw in invalid {
            tracing::warn!(id = %raw, "Invalid dialog id in export request");
        }

        let mut dialogs = Vec::with_capacity(ids.len());
        for id in ids {
            match self.dialog_service.get_dialog(id).await {
                Ok(dialog) => dialogs.push(dialog),
                Err(e) => tracing::warn!(id = %id, error = %e, "Skipping dialog in export"),
            }
        }
        dialogs
    }
}
