pub mod document;
pub mod seed;

pub use document::{
    Document, EducationItem, ExperienceItem, HeaderData, Layout, ProjectItem, Section,
    SectionData, SectionId, SectionType,
};
