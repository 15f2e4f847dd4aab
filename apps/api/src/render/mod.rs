//! Document Renderer: a pure mapping from a Document to presentation blocks.
//!
//! Each section is dispatched on its type to a content template, then wrapped
//! according to the layout's visual policy. Rendering never mutates the Document.

pub mod blocks;
pub mod html;
pub mod policy;
pub mod templates;

pub use blocks::{PresentationBlock, RenderedDocument};
pub use html::{render_html, RenderMode};

use crate::models::{Document, Section, SectionType};
use crate::render::blocks::{Heading, SectionBlock};
use crate::render::policy::{policy_for, LayoutPolicy};

pub const EMPTY_CANVAS_MESSAGE: &str = "Your canvas is empty";
pub const EMPTY_CANVAS_HINT: &str = "Start by adding components from the sidebar";

pub fn render_document(document: &Document) -> RenderedDocument {
    let policy = policy_for(document.layout);

    let blocks = if document.sections.is_empty() {
        vec![PresentationBlock::EmptyCanvas {
            message: EMPTY_CANVAS_MESSAGE.to_string(),
            hint: EMPTY_CANVAS_HINT.to_string(),
        }]
    } else {
        document
            .sections
            .iter()
            .map(|section| PresentationBlock::Section(render_section(section, &policy)))
            .collect()
    };

    RenderedDocument {
        layout: document.layout,
        spacing: policy.spacing,
        blocks,
    }
}

fn render_section(section: &Section, policy: &LayoutPolicy) -> SectionBlock {
    let heading = match section.kind() {
        SectionType::Header => None,
        _ => Some(Heading {
            text: section.title().to_string(),
            decoration: policy.decoration,
            alignment: policy.heading_alignment,
        }),
    };

    SectionBlock {
        section_id: section.id().clone(),
        section_type: section.kind(),
        heading,
        content: templates::render_content(section.data(), policy),
    }
}
