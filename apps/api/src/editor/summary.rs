//! Draft a professional summary from the document's experience entries.

use crate::models::{Document, SectionData};

/// One line per experience entry across all EXPERIENCE sections, in document order.
/// Entries with no text at all are skipped.
pub fn experience_digest(document: &Document) -> String {
    document
        .sections
        .iter()
        .filter_map(|section| match section.data() {
            SectionData::Experience(items) => Some(items),
            _ => None,
        })
        .flatten()
        .filter_map(|item| {
            let role = match (item.position.trim(), item.company.trim()) {
                ("", "") => String::new(),
                (position, "") => position.to_string(),
                ("", company) => company.to_string(),
                (position, company) => format!("{position} at {company}"),
            };
            let description = item.description.trim();
            match (role.is_empty(), description.is_empty()) {
                (true, true) => None,
                (false, true) => Some(role),
                (true, false) => Some(description.to_string()),
                (false, false) => Some(format!("{role}: {description}")),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
