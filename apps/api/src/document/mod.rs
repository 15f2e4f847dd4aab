// Document Controller and its HTTP surface.
// The controller is the sole mutator of the session's Document.

pub mod controller;
pub mod handlers;

use std::sync::Arc;

use tokio::sync::RwLock;

pub use controller::{Direction, DocumentController, UpdateOutcome};

/// Handle through which the router, editor and renderer reach the one controller.
pub type SharedController = Arc<RwLock<DocumentController>>;
