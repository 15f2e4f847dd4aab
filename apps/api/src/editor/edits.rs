//! Typed user edits. Each edit takes a section's current data and produces the
//! next value, which the caller hands to `DocumentController::update_section`.

use serde::Deserialize;
use thiserror::Error;

use crate::models::document::new_item_id;
use crate::models::{
    EducationItem, ExperienceItem, HeaderData, ProjectItem, SectionData, SectionType,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("edit '{op}' does not apply to {section_type:?} sections")]
    NotApplicable {
        op: &'static str,
        section_type: SectionType,
    },

    #[error("no item at index {index} (list has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("unknown field '{field}' for {section_type:?} items")]
    UnknownField {
        field: String,
        section_type: SectionType,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderField {
    Name,
    Title,
    Email,
    Phone,
    Location,
    Website,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SectionEdit {
    SetHeaderField { field: HeaderField, value: String },
    SetSummary { text: String },
    /// Appends a record with a fresh local id and empty fields.
    AddItem,
    /// Filters out the record at `index`; out of range leaves the list as is.
    RemoveItem { index: usize },
    SetItemField {
        index: usize,
        field: String,
        value: String,
    },
    /// Appends a trimmed skill; blank input is ignored.
    AddSkill { skill: String },
    RemoveSkill { index: usize },
}

impl SectionEdit {
    fn op(&self) -> &'static str {
        match self {
            SectionEdit::SetHeaderField { .. } => "set_header_field",
            SectionEdit::SetSummary { .. } => "set_summary",
            SectionEdit::AddItem => "add_item",
            SectionEdit::RemoveItem { .. } => "remove_item",
            SectionEdit::SetItemField { .. } => "set_item_field",
            SectionEdit::AddSkill { .. } => "add_skill",
            SectionEdit::RemoveSkill { .. } => "remove_skill",
        }
    }
}

pub fn apply_edit(data: &SectionData, edit: SectionEdit) -> Result<SectionData, EditError> {
    let not_applicable = EditError::NotApplicable {
        op: edit.op(),
        section_type: data.kind(),
    };

    match (data, edit) {
        (SectionData::Header(header), SectionEdit::SetHeaderField { field, value }) => {
            Ok(SectionData::Header(set_header_field(header, field, value)))
        }
        (SectionData::Summary(_), SectionEdit::SetSummary { text }) => {
            Ok(SectionData::Summary(text))
        }

        (SectionData::Experience(items), SectionEdit::AddItem) => {
            Ok(SectionData::Experience(appended(items, ExperienceItem {
                id: new_item_id(),
                ..Default::default()
            })))
        }
        (SectionData::Education(items), SectionEdit::AddItem) => {
            Ok(SectionData::Education(appended(items, EducationItem {
                id: new_item_id(),
                ..Default::default()
            })))
        }
        (SectionData::Projects(items), SectionEdit::AddItem) => {
            Ok(SectionData::Projects(appended(items, ProjectItem {
                id: new_item_id(),
                ..Default::default()
            })))
        }

        (SectionData::Experience(items), SectionEdit::RemoveItem { index }) => {
            Ok(SectionData::Experience(without_index(items, index)))
        }
        (SectionData::Education(items), SectionEdit::RemoveItem { index }) => {
            Ok(SectionData::Education(without_index(items, index)))
        }
        (SectionData::Projects(items), SectionEdit::RemoveItem { index }) => {
            Ok(SectionData::Projects(without_index(items, index)))
        }

        (SectionData::Experience(items), SectionEdit::SetItemField { index, field, value }) => {
            let mut items = items.clone();
            let item = item_mut(&mut items, index)?;
            let slot = match field.as_str() {
                "company" => &mut item.company,
                "position" => &mut item.position,
                "location" => &mut item.location,
                "startDate" => &mut item.start_date,
                "endDate" => &mut item.end_date,
                "description" => &mut item.description,
                _ => return Err(unknown_field(&field, SectionType::Experience)),
            };
            *slot = value;
            Ok(SectionData::Experience(items))
        }
        (SectionData::Education(items), SectionEdit::SetItemField { index, field, value }) => {
            let mut items = items.clone();
            let item = item_mut(&mut items, index)?;
            let slot = match field.as_str() {
                "school" => &mut item.school,
                "degree" => &mut item.degree,
                "field" => &mut item.field,
                "startDate" => &mut item.start_date,
                "endDate" => &mut item.end_date,
                _ => return Err(unknown_field(&field, SectionType::Education)),
            };
            *slot = value;
            Ok(SectionData::Education(items))
        }
        (SectionData::Projects(items), SectionEdit::SetItemField { index, field, value }) => {
            let mut items = items.clone();
            let item = item_mut(&mut items, index)?;
            let slot = match field.as_str() {
                "name" => &mut item.name,
                "link" => &mut item.link,
                "description" => &mut item.description,
                _ => return Err(unknown_field(&field, SectionType::Projects)),
            };
            *slot = value;
            Ok(SectionData::Projects(items))
        }

        (SectionData::Skills(skills), SectionEdit::AddSkill { skill }) => {
            let skill = skill.trim();
            if skill.is_empty() {
                return Ok(SectionData::Skills(skills.clone()));
            }
            Ok(SectionData::Skills(appended(skills, skill.to_string())))
        }
        (SectionData::Skills(skills), SectionEdit::RemoveSkill { index }) => {
            Ok(SectionData::Skills(without_index(skills, index)))
        }

        _ => Err(not_applicable),
    }
}

fn set_header_field(header: &HeaderData, field: HeaderField, value: String) -> HeaderData {
    let mut next = header.clone();
    match field {
        HeaderField::Name => next.name = value,
        HeaderField::Title => next.title = value,
        HeaderField::Email => next.email = value,
        HeaderField::Phone => next.phone = value,
        HeaderField::Location => next.location = value,
        HeaderField::Website => next.website = value,
    }
    next
}

fn appended<T: Clone>(items: &[T], item: T) -> Vec<T> {
    let mut next = items.to_vec();
    next.push(item);
    next
}

fn without_index<T: Clone>(items: &[T], index: usize) -> Vec<T> {
    items
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, item)| item.clone())
        .collect()
}

fn item_mut<T>(items: &mut [T], index: usize) -> Result<&mut T, EditError> {
    let len = items.len();
    items
        .get_mut(index)
        .ok_or(EditError::IndexOutOfRange { index, len })
}

fn unknown_field(field: &str, section_type: SectionType) -> EditError {
    EditError::UnknownField {
        field: field.to_string(),
        section_type,
    }
}
