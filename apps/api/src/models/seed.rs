//! The starter résumé used as initial state and as the reset target.

use std::sync::Arc;

use crate::models::document::{Document, HeaderData, Layout, Section, SectionData, SectionId};

/// Builds the seed Document. Always returns an equal value.
pub fn seed_document() -> Document {
    Document {
        layout: Layout::Modern,
        sections: vec![
            Arc::new(Section::new(
                SectionId::from("header-1"),
                "Contact Information",
                SectionData::Header(HeaderData {
                    name: "John Doe".to_string(),
                    title: "Senior Software Engineer".to_string(),
                    email: "john.doe@example.com".to_string(),
                    phone: "+1 (555) 000-0000".to_string(),
                    location: "San Francisco, CA".to_string(),
                    website: "linkedin.com/in/johndoe".to_string(),
                }),
            )),
            Arc::new(Section::new(
                SectionId::from("summary-1"),
                "Professional Summary",
                SectionData::Summary(
                    "Results-driven Senior Software Engineer with 8+ years of experience \
                     building scalable web applications. Expert in React, Node.js, and \
                     Cloud Architecture."
                        .to_string(),
                ),
            )),
        ],
    }
}
