//! Axum route handlers for the Section Editor API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::document::handlers::DocumentView;
use crate::editor::edits::{apply_edit, SectionEdit};
use crate::editor::fields::{fields_for, EditorSchema};
use crate::editor::improve::{improvable_targets, improve_field, ImproveOutcome, ImproveTarget};
use crate::editor::summary::experience_digest;
use crate::errors::AppError;
use crate::models::{SectionId, SectionType};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ImproveResponse {
    pub outcome: ImproveOutcome,
    #[serde(flatten)]
    pub view: DocumentView,
}

#[derive(Debug, Serialize)]
pub struct FieldStatus {
    #[serde(flatten)]
    pub target: ImproveTarget,
    pub optimizing: bool,
}

#[derive(Debug, Serialize)]
pub struct ImproveStatus {
    pub section_id: SectionId,
    pub fields: Vec<FieldStatus>,
}

#[derive(Debug, Serialize)]
pub struct SummarySuggestion {
    pub summary: String,
}

/// GET /api/v1/editor/:type
pub async fn handle_editor_schema(
    Path(section_type): Path<String>,
) -> Result<Json<EditorSchema>, AppError> {
    let kind = SectionType::from_label(&section_type)
        .ok_or_else(|| AppError::NotFound(format!("Unknown section type '{section_type}'")))?;
    Ok(Json(fields_for(kind)))
}

/// POST /api/v1/sections/:id/edits
///
/// Applies one typed edit to the section's current data and stores the result.
pub async fn handle_apply_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(edit): Json<SectionEdit>,
) -> Result<Json<DocumentView>, AppError> {
    let id = SectionId::from(id);
    let mut ctl = state.controller.write().await;

    let document = ctl.document();
    let Some(section) = document.section(&id) else {
        return Ok(Json(DocumentView::of(&ctl)));
    };

    let next = apply_edit(section.data(), edit)?;
    ctl.update_section(&id, next);

    Ok(Json(DocumentView::of(&ctl)))
}

/// GET /api/v1/sections/:id/improve
///
/// Which improvable fields of the section have a rewrite pending. An absent
/// section has no fields.
pub async fn handle_improve_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<ImproveStatus> {
    let id = SectionId::from(id);
    let document = state.controller.read().await.document();
    let fields = document
        .section(&id)
        .map(|section| improvable_targets(section.data()))
        .unwrap_or_default()
        .into_iter()
        .map(|target| FieldStatus {
            target,
            optimizing: state.improve_tracker.is_optimizing(&id, target),
        })
        .collect();

    Json(ImproveStatus {
        section_id: id,
        fields,
    })
}

/// POST /api/v1/sections/:id/improve
///
/// Rewrites one text field through the rewrite collaborator. Returns 409 while
/// a request for the same field is still pending.
///
/// The rewrite runs on its own task, so a client that disconnects does not
/// cancel it and the result is still applied.
pub async fn handle_improve(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(target): Json<ImproveTarget>,
) -> Result<Json<ImproveResponse>, AppError> {
    let id = SectionId::from(id);
    let task = {
        let controller = state.controller.clone();
        let rewriter = state.rewriter.clone();
        let tracker = state.improve_tracker.clone();
        let id = id.clone();
        tokio::spawn(async move {
            improve_field(&controller, rewriter.as_ref(), &tracker, &id, target).await
        })
    };
    let outcome = task
        .await
        .map_err(|e| anyhow::anyhow!("improve task for section {id} failed: {e}"))??;
    info!("Improve {target:?} on section {id}: {outcome:?}");

    let ctl = state.controller.read().await;
    Ok(Json(ImproveResponse {
        outcome,
        view: DocumentView::of(&ctl),
    }))
}

/// POST /api/v1/summary/suggest
///
/// Drafts a summary from the experience entries. Does not modify the document.
pub async fn handle_suggest_summary(State(state): State<AppState>) -> Json<SummarySuggestion> {
    let digest = {
        let document = state.controller.read().await.document();
        experience_digest(&document)
    };

    if digest.is_empty() {
        return Json(SummarySuggestion {
            summary: String::new(),
        });
    }

    Json(SummarySuggestion {
        summary: state.rewriter.generate_summary(&digest).await,
    })
}
