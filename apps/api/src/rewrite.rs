//! Content Rewrite Collaborator: best-effort text improvement.
//!
//! `ContentRewriter` is the boundary the editor consumes. It never fails:
//! any transport, quota or parse problem resolves to the original content.
//! Carried in `AppState` as `Arc<dyn ContentRewriter>`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::llm_client::prompts::{optimize_prompt, summary_prompt};
use crate::llm_client::LlmError;

/// Sampling parameters forwarded to the text provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub temperature: f32,
    pub top_p: Option<f32>,
}

pub const OPTIMIZE_SAMPLING: Sampling = Sampling {
    temperature: 0.7,
    top_p: Some(0.95),
};

pub const SUMMARY_SAMPLING: Sampling = Sampling {
    temperature: 0.8,
    top_p: None,
};

/// Fallible text generation. Implemented by `LlmClient`; tests plug in stubs.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str, sampling: Sampling) -> Result<String, LlmError>;
}

#[async_trait]
pub trait ContentRewriter: Send + Sync {
    /// Returns improved `content`, or `content` unchanged on any failure.
    async fn optimize(&self, content: &str, context_label: &str) -> String;

    /// Three-sentence summary drafted from experience text. Empty on any failure.
    async fn generate_summary(&self, experiences: &str) -> String;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmRewriter, the default when a credential is configured
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmRewriter {
    backend: Arc<dyn CompletionBackend>,
}

impl LlmRewriter {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl ContentRewriter for LlmRewriter {
    async fn optimize(&self, content: &str, context_label: &str) -> String {
        let prompt = optimize_prompt(content, context_label);
        match self.backend.complete(&prompt, OPTIMIZE_SAMPLING).await {
            Ok(improved) => improved,
            Err(e) => {
                warn!("Rewrite of {context_label} content failed, keeping original: {e}");
                content.to_string()
            }
        }
    }

    async fn generate_summary(&self, experiences: &str) -> String {
        let prompt = summary_prompt(experiences);
        match self.backend.complete(&prompt, SUMMARY_SAMPLING).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!("Summary generation failed: {e}");
                String::new()
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PassthroughRewriter, used when no credential is configured
// ────────────────────────────────────────────────────────────────────────────

pub struct PassthroughRewriter;

#[async_trait]
impl ContentRewriter for PassthroughRewriter {
    async fn optimize(&self, content: &str, _context_label: &str) -> String {
        content.to_string()
    }

    async fn generate_summary(&self, _experiences: &str) -> String {
        String::new()
    }
}
