//! Document Model is the in-memory résumé: an ordered list of typed sections plus a layout.
//!
//! Section payloads are a sum type keyed by `SectionType`, so every consumer that
//! matches on `SectionData` is checked for exhaustiveness at compile time.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// ────────────────────────────────────────────────────────────────────────────
// Identifiers and enumerations
// ────────────────────────────────────────────────────────────────────────────

/// Opaque section identifier. Stable for the section's lifetime, never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    /// Generates a fresh id of the form `<type>-<random>`.
    pub fn generate(kind: SectionType) -> Self {
        SectionId(format!("{}-{}", kind.context_label(), Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SectionId {
    fn from(value: &str) -> Self {
        SectionId(value.to_string())
    }
}

impl From<String> for SectionId {
    fn from(value: String) -> Self {
        SectionId(value)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectionType {
    Header,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
}

impl SectionType {
    pub const ALL: [SectionType; 6] = [
        SectionType::Header,
        SectionType::Summary,
        SectionType::Experience,
        SectionType::Education,
        SectionType::Skills,
        SectionType::Projects,
    ];

    /// Lower-cased type name. Used as the rewrite context label and as the id prefix.
    pub fn context_label(&self) -> &'static str {
        match self {
            SectionType::Header => "header",
            SectionType::Summary => "summary",
            SectionType::Experience => "experience",
            SectionType::Education => "education",
            SectionType::Skills => "skills",
            SectionType::Projects => "projects",
        }
    }

    /// Title given to a freshly added section of this type.
    pub fn default_title(&self) -> &'static str {
        match self {
            SectionType::Header => "Header",
            SectionType::Summary => "Summary",
            SectionType::Experience => "Experience",
            SectionType::Education => "Education",
            SectionType::Skills => "Skills",
            SectionType::Projects => "Projects",
        }
    }

    /// Parses the lower-case or upper-case type name used in URL path segments.
    pub fn from_label(label: &str) -> Option<Self> {
        SectionType::ALL
            .into_iter()
            .find(|kind| kind.context_label().eq_ignore_ascii_case(label))
    }
}

/// Visual presentation strategy applied uniformly to all sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Layout {
    #[default]
    Modern,
    Classic,
    Minimal,
    Compact,
}

// ────────────────────────────────────────────────────────────────────────────
// Section payloads
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderData {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceItem {
    pub id: String,
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationItem {
    pub id: String,
    pub school: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectItem {
    pub id: String,
    pub name: String,
    pub link: String,
    pub description: String,
}

/// Skills seeded into a freshly added SKILLS section.
pub const DEFAULT_SKILLS: &[&str] = &["React", "TypeScript", "Node.js"];

/// Type-specific section content. Serialized without a tag; the enclosing
/// `Section` carries the type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SectionData {
    Header(HeaderData),
    Summary(String),
    Experience(Vec<ExperienceItem>),
    Education(Vec<EducationItem>),
    Skills(Vec<String>),
    Projects(Vec<ProjectItem>),
}

impl SectionData {
    pub fn kind(&self) -> SectionType {
        match self {
            SectionData::Header(_) => SectionType::Header,
            SectionData::Summary(_) => SectionType::Summary,
            SectionData::Experience(_) => SectionType::Experience,
            SectionData::Education(_) => SectionType::Education,
            SectionData::Skills(_) => SectionType::Skills,
            SectionData::Projects(_) => SectionType::Projects,
        }
    }

    /// The value a newly added section of `kind` starts with.
    pub fn empty_default(kind: SectionType) -> Self {
        match kind {
            SectionType::Header => SectionData::Header(HeaderData::default()),
            SectionType::Summary => SectionData::Summary(String::new()),
            SectionType::Experience => SectionData::Experience(Vec::new()),
            SectionType::Education => SectionData::Education(Vec::new()),
            SectionType::Skills => {
                SectionData::Skills(DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect())
            }
            SectionType::Projects => SectionData::Projects(Vec::new()),
        }
    }

    /// Parses an untyped JSON payload into the shape `kind` prescribes.
    pub fn from_value(kind: SectionType, value: Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            SectionType::Header => SectionData::Header(serde_json::from_value(value)?),
            SectionType::Summary => SectionData::Summary(serde_json::from_value(value)?),
            SectionType::Experience => SectionData::Experience(serde_json::from_value(value)?),
            SectionType::Education => SectionData::Education(serde_json::from_value(value)?),
            SectionType::Skills => SectionData::Skills(serde_json::from_value(value)?),
            SectionType::Projects => SectionData::Projects(serde_json::from_value(value)?),
        })
    }
}

/// Fresh locally-unique id for a list entry inside a section's data.
pub fn new_item_id() -> String {
    Uuid::new_v4().to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Section & Document
// ────────────────────────────────────────────────────────────────────────────

/// One titled block of résumé content. The type is fixed at construction:
/// it is always `data.kind()`, and `with_data` refuses payloads of another type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    id: SectionId,
    #[serde(rename = "type")]
    kind: SectionType,
    title: String,
    data: SectionData,
}

impl Section {
    pub fn new(id: SectionId, title: impl Into<String>, data: SectionData) -> Self {
        Section {
            id,
            kind: data.kind(),
            title: title.into(),
            data,
        }
    }

    /// A section of `kind` with a fresh id, the default title and the empty default data.
    pub fn fresh(kind: SectionType) -> Self {
        Section::new(
            SectionId::generate(kind),
            kind.default_title(),
            SectionData::empty_default(kind),
        )
    }

    pub fn id(&self) -> &SectionId {
        &self.id
    }

    pub fn kind(&self) -> SectionType {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn data(&self) -> &SectionData {
        &self.data
    }

    /// Copy of this section carrying `data`. `None` when `data` is of another type.
    pub fn with_data(&self, data: SectionData) -> Option<Section> {
        if data.kind() != self.kind {
            return None;
        }
        Some(Section {
            data,
            ..self.clone()
        })
    }

    pub fn with_title(&self, title: impl Into<String>) -> Section {
        Section {
            title: title.into(),
            ..self.clone()
        }
    }
}

/// The whole résumé. Section order is presentation order.
///
/// Sections are held behind `Arc` so that a new snapshot shares every
/// section it did not touch with the snapshot it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub sections: Vec<std::sync::Arc<Section>>,
    pub layout: Layout,
}

impl Document {
    pub fn position(&self, id: &SectionId) -> Option<usize> {
        self.sections.iter().position(|s| s.id() == id)
    }

    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id() == id).map(|s| s.as_ref())
    }

    pub fn contains(&self, id: &SectionId) -> bool {
        self.position(id).is_some()
    }
}
