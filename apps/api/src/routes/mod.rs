pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::document::handlers as document;
use crate::editor::handlers as editor;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document
        .route("/api/v1/document", get(document::handle_get_document))
        .route("/api/v1/document/reset", post(document::handle_reset))
        .route("/api/v1/document/layout", put(document::handle_set_layout))
        .route("/api/v1/selection", put(document::handle_select))
        // Sections
        .route("/api/v1/sections", post(document::handle_add_section))
        .route("/api/v1/sections/:id", delete(document::handle_remove_section))
        .route(
            "/api/v1/sections/:id/data",
            put(document::handle_update_section),
        )
        .route(
            "/api/v1/sections/:id/title",
            put(document::handle_rename_section),
        )
        .route(
            "/api/v1/sections/:id/move",
            post(document::handle_move_section),
        )
        // Editor
        .route("/api/v1/sections/:id/edits", post(editor::handle_apply_edit))
        .route(
            "/api/v1/sections/:id/improve",
            get(editor::handle_improve_status).post(editor::handle_improve),
        )
        .route("/api/v1/editor/:type", get(editor::handle_editor_schema))
        .route("/api/v1/summary/suggest", post(editor::handle_suggest_summary))
        // Rendering
        .route("/api/v1/render", get(document::handle_render))
        .route("/api/v1/preview", get(document::handle_preview))
        .route("/api/v1/export", get(document::handle_export))
        .with_state(state)
}
