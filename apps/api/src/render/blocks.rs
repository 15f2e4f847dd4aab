//! Presentation structure produced by the renderer. Framework-agnostic and serializable
//! so any front end (or the HTML print view) can draw it.

use serde::Serialize;

use crate::models::{Layout, SectionId, SectionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingDecoration {
    Underline,
    Divider,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Spacing {
    Normal,
    Compact,
}

/// How densely the HEADER section packs its contact information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderDensity {
    /// Name, title and a single line of contact details.
    ContactStrip,
    /// Name and title on the left, contact details stacked on the right.
    TwoColumn,
    /// Large centered name and title with contact chips underneath.
    CenteredBlock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagStyle {
    Filled,
    Outline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub text: String,
    pub decoration: HeadingDecoration,
    pub alignment: Alignment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactLine {
    /// "email", "phone", "location" or "website".
    pub kind: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderBlock {
    pub density: HeaderDensity,
    pub name: Option<String>,
    pub title: Option<String>,
    pub contacts: Vec<ContactLine>,
}

/// One entry of a list section (a job, a degree, a project).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntryBlock {
    pub heading: String,
    pub subheading: Option<String>,
    pub dates: Option<String>,
    pub location: Option<String>,
    pub link: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockContent {
    Header(HeaderBlock),
    Paragraph { text: String },
    Entries { entries: Vec<EntryBlock> },
    Tags { tags: Vec<String>, style: TagStyle },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionBlock {
    pub section_id: SectionId,
    pub section_type: SectionType,
    /// Absent for HEADER, which carries its own name line instead.
    pub heading: Option<Heading>,
    pub content: BlockContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "block", rename_all = "snake_case")]
pub enum PresentationBlock {
    Section(SectionBlock),
    EmptyCanvas { message: String, hint: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDocument {
    pub layout: Layout,
    pub spacing: Spacing,
    pub blocks: Vec<PresentationBlock>,
}
