//! Document Controller: sole owner and mutator of the session's Document.
//!
//! Every operation builds a complete new `Document` and swaps it in, so a
//! snapshot handed out by `document()` is never observed half-updated.
//! Operations on an id that is not present are no-ops, never errors.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::seed::seed_document;
use crate::models::{Document, Layout, Section, SectionData, SectionId, SectionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward index 0.
    Up,
    /// Toward the end.
    Down,
}

/// Result of `update_section`. Only `Applied` changes the Document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Applied,
    Missing,
    /// The payload's type differs from the section's; nothing was replaced.
    TypeMismatch,
}

pub struct DocumentController {
    document: Arc<Document>,
    selection: Option<SectionId>,
    seed: Arc<Document>,
    revision: u64,
    updated_at: DateTime<Utc>,
}

impl Default for DocumentController {
    fn default() -> Self {
        Self::new(seed_document())
    }
}

impl DocumentController {
    /// Creates a controller whose initial state and reset target is `seed`.
    pub fn new(seed: Document) -> Self {
        let seed = Arc::new(seed);
        Self {
            document: Arc::clone(&seed),
            selection: None,
            seed,
            revision: 0,
            updated_at: Utc::now(),
        }
    }

    /// The current immutable snapshot.
    pub fn document(&self) -> Arc<Document> {
        Arc::clone(&self.document)
    }

    pub fn selection(&self) -> Option<&SectionId> {
        self.selection.as_ref()
    }

    /// Incremented on every operation that replaces the Document.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// When the Document was last replaced.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn commit(&mut self, next: Document) {
        self.document = Arc::new(next);
        self.revision += 1;
        self.updated_at = Utc::now();
    }

    /// Appends a new section of `kind` and selects it. Never fails.
    pub fn add_section(&mut self, kind: SectionType) -> SectionId {
        let mut section = Section::fresh(kind);
        while self.document.contains(section.id()) {
            section = Section::fresh(kind);
        }
        let id = section.id().clone();

        let mut sections = self.document.sections.clone();
        sections.push(Arc::new(section));
        self.commit(Document {
            sections,
            layout: self.document.layout,
        });
        self.selection = Some(id.clone());

        debug!("Added {:?} section {id}", kind);
        id
    }

    /// Removes the section with `id`. Clears the selection if it pointed there.
    pub fn remove_section(&mut self, id: &SectionId) -> bool {
        if !self.document.contains(id) {
            debug!("remove_section: {id} not present, ignoring");
            return false;
        }

        let sections = self
            .document
            .sections
            .iter()
            .filter(|s| s.id() != id)
            .cloned()
            .collect();
        self.commit(Document {
            sections,
            layout: self.document.layout,
        });
        if self.selection.as_ref() == Some(id) {
            self.selection = None;
        }

        debug!("Removed section {id}");
        true
    }

    /// Replaces the data of the section with `id`.
    pub fn update_section(&mut self, id: &SectionId, data: SectionData) -> UpdateOutcome {
        let Some(index) = self.document.position(id) else {
            debug!("update_section: {id} not present, ignoring");
            return UpdateOutcome::Missing;
        };

        let Some(updated) = self.document.sections[index].with_data(data) else {
            debug!("update_section: payload type does not match section {id}, ignoring");
            return UpdateOutcome::TypeMismatch;
        };

        self.replace_at(index, updated);
        UpdateOutcome::Applied
    }

    /// Replaces the title of the section with `id`.
    pub fn rename_section(&mut self, id: &SectionId, title: &str) -> bool {
        let Some(index) = self.document.position(id) else {
            debug!("rename_section: {id} not present, ignoring");
            return false;
        };
        let renamed = self.document.sections[index].with_title(title);
        self.replace_at(index, renamed);
        true
    }

    fn replace_at(&mut self, index: usize, section: Section) {
        let mut sections = self.document.sections.clone();
        sections[index] = Arc::new(section);
        self.commit(Document {
            sections,
            layout: self.document.layout,
        });
    }

    /// Swaps the section with its neighbour in `direction`.
    /// No-op when absent or already at that boundary.
    pub fn move_section(&mut self, id: &SectionId, direction: Direction) -> bool {
        let Some(index) = self.document.position(id) else {
            debug!("move_section: {id} not present, ignoring");
            return false;
        };

        let target = match direction {
            Direction::Up if index == 0 => return false,
            Direction::Up => index - 1,
            Direction::Down if index + 1 == self.document.sections.len() => return false,
            Direction::Down => index + 1,
        };

        let mut sections = self.document.sections.clone();
        sections.swap(index, target);
        self.commit(Document {
            sections,
            layout: self.document.layout,
        });

        debug!("Moved section {id} from {index} to {target}");
        true
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.commit(Document {
            sections: self.document.sections.clone(),
            layout,
        });
        debug!("Layout set to {:?}", layout);
    }

    /// Restores the seed Document and clears the selection.
    pub fn reset(&mut self) {
        self.commit(Document::clone(&self.seed));
        self.selection = None;
        debug!("Document reset to seed");
    }

    /// Selects `id` if present.
    pub fn select(&mut self, id: &SectionId) -> bool {
        if !self.document.contains(id) {
            return false;
        }
        self.selection = Some(id.clone());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }
}
