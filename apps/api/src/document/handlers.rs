//! Axum route handlers for the Document API.
//!
//! Every mutating handler answers with the resulting document view. Operations
//! that name an absent section succeed and return the document unchanged.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::document::{Direction, DocumentController};
use crate::errors::AppError;
use crate::models::{Document, Layout, SectionData, SectionId, SectionType};
use crate::render::{render_document, render_html, RenderMode, RenderedDocument};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct DocumentView {
    pub document: Arc<Document>,
    pub selection: Option<SectionId>,
    pub revision: u64,
    pub updated_at: DateTime<Utc>,
}

impl DocumentView {
    pub fn of(ctl: &DocumentController) -> Self {
        DocumentView {
            document: ctl.document(),
            selection: ctl.selection().cloned(),
            revision: ctl.revision(),
            updated_at: ctl.updated_at(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddSectionRequest {
    #[serde(rename = "type")]
    pub section_type: SectionType,
}

#[derive(Debug, Serialize)]
pub struct AddSectionResponse {
    pub section_id: SectionId,
    #[serde(flatten)]
    pub view: DocumentView,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSectionRequest {
    /// Parsed against the section's own type.
    pub data: Value,
}

#[derive(Debug, Deserialize)]
pub struct RenameSectionRequest {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct MoveSectionRequest {
    pub direction: Direction,
}

#[derive(Debug, Deserialize)]
pub struct SetLayoutRequest {
    pub layout: Layout,
}

#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub section_id: Option<SectionId>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/document
pub async fn handle_get_document(State(state): State<AppState>) -> Json<DocumentView> {
    let ctl = state.controller.read().await;
    Json(DocumentView::of(&ctl))
}

/// POST /api/v1/document/reset
pub async fn handle_reset(State(state): State<AppState>) -> Json<DocumentView> {
    let mut ctl = state.controller.write().await;
    ctl.reset();
    info!("Document reset to seed");
    Json(DocumentView::of(&ctl))
}

/// PUT /api/v1/document/layout
pub async fn handle_set_layout(
    State(state): State<AppState>,
    Json(req): Json<SetLayoutRequest>,
) -> Json<DocumentView> {
    let mut ctl = state.controller.write().await;
    ctl.set_layout(req.layout);
    Json(DocumentView::of(&ctl))
}

/// POST /api/v1/sections
pub async fn handle_add_section(
    State(state): State<AppState>,
    Json(req): Json<AddSectionRequest>,
) -> (StatusCode, Json<AddSectionResponse>) {
    let mut ctl = state.controller.write().await;
    let section_id = ctl.add_section(req.section_type);
    info!("Added {:?} section {section_id}", req.section_type);
    (
        StatusCode::CREATED,
        Json(AddSectionResponse {
            section_id,
            view: DocumentView::of(&ctl),
        }),
    )
}

/// DELETE /api/v1/sections/:id
pub async fn handle_remove_section(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<DocumentView> {
    let mut ctl = state.controller.write().await;
    ctl.remove_section(&SectionId::from(id));
    Json(DocumentView::of(&ctl))
}

/// PUT /api/v1/sections/:id/data
///
/// The payload is parsed against the target section's type; a payload of the
/// wrong shape is rejected before it can reach the Document.
pub async fn handle_update_section(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateSectionRequest>,
) -> Result<Json<DocumentView>, AppError> {
    let id = SectionId::from(id);
    let mut ctl = state.controller.write().await;

    let Some(kind) = ctl.document().section(&id).map(|s| s.kind()) else {
        return Ok(Json(DocumentView::of(&ctl)));
    };

    let data = SectionData::from_value(kind, req.data).map_err(|e| {
        AppError::Validation(format!("data does not match {kind:?} section shape: {e}"))
    })?;
    ctl.update_section(&id, data);

    Ok(Json(DocumentView::of(&ctl)))
}

/// PUT /api/v1/sections/:id/title
pub async fn handle_rename_section(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<RenameSectionRequest>,
) -> Json<DocumentView> {
    let mut ctl = state.controller.write().await;
    ctl.rename_section(&SectionId::from(id), &req.title);
    Json(DocumentView::of(&ctl))
}

/// POST /api/v1/sections/:id/move
pub async fn handle_move_section(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<MoveSectionRequest>,
) -> Json<DocumentView> {
    let mut ctl = state.controller.write().await;
    ctl.move_section(&SectionId::from(id), req.direction);
    Json(DocumentView::of(&ctl))
}

/// PUT /api/v1/selection
///
/// `section_id: null` clears the selection; an absent id leaves it as is.
pub async fn handle_select(
    State(state): State<AppState>,
    Json(req): Json<SelectionRequest>,
) -> Json<DocumentView> {
    let mut ctl = state.controller.write().await;
    match req.section_id {
        Some(id) => {
            ctl.select(&id);
        }
        None => ctl.clear_selection(),
    }
    Json(DocumentView::of(&ctl))
}

/// GET /api/v1/render
pub async fn handle_render(State(state): State<AppState>) -> Json<RenderedDocument> {
    let document = state.controller.read().await.document();
    Json(render_document(&document))
}

/// GET /api/v1/export
///
/// Print-ready HTML handed to the platform print dialog. Selection and
/// editing controls are suppressed.
pub async fn handle_export(State(state): State<AppState>) -> Html<String> {
    let document = state.controller.read().await.document();
    Html(render_html(&render_document(&document), RenderMode::Print))
}

/// GET /api/v1/preview
///
/// Editing view of the same HTML, with the selected section marked.
pub async fn handle_preview(State(state): State<AppState>) -> Html<String> {
    let ctl = state.controller.read().await;
    let rendered = render_document(&ctl.document());
    Html(render_html(
        &rendered,
        RenderMode::Editing {
            selected: ctl.selection(),
        },
    ))
}
