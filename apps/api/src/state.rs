use std::sync::Arc;

use crate::config::Config;
use crate::document::SharedController;
use crate::editor::improve::ImproveTracker;
use crate::rewrite::ContentRewriter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The session's one Document Controller.
    pub controller: SharedController,
    /// Pluggable rewrite collaborator. `LlmRewriter` when a credential is set,
    /// `PassthroughRewriter` otherwise.
    pub rewriter: Arc<dyn ContentRewriter>,
    /// Fields with an improve request in flight.
    pub improve_tracker: Arc<ImproveTracker>,
    pub config: Config,
}
