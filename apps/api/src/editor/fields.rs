//! Editable-field schema per section type. Front ends build their forms from this.

use serde::Serialize;

use crate::models::SectionType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Widget {
    SingleLine,
    MultiLine,
    RecordList,
    StringList,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub widget: Widget,
    /// Whether the "improve" action is offered for this field.
    pub improvable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorSchema {
    pub section_type: SectionType,
    pub fields: Vec<FieldSpec>,
    /// Per-record fields for `RecordList` sections; empty otherwise.
    pub item_fields: Vec<FieldSpec>,
}

const fn field(name: &'static str, label: &'static str, widget: Widget) -> FieldSpec {
    FieldSpec {
        name,
        label,
        widget,
        improvable: false,
    }
}

const fn improvable(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        label,
        widget: Widget::MultiLine,
        improvable: true,
    }
}

pub fn fields_for(section_type: SectionType) -> EditorSchema {
    use Widget::*;

    let (fields, item_fields) = match section_type {
        SectionType::Header => (
            vec![
                field("name", "Name", SingleLine),
                field("title", "Title", SingleLine),
                field("email", "Email", SingleLine),
                field("phone", "Phone", SingleLine),
                field("location", "Location", SingleLine),
                field("website", "Website", SingleLine),
            ],
            vec![],
        ),
        SectionType::Summary => (vec![improvable("summary", "Professional Summary")], vec![]),
        SectionType::Experience => (
            vec![field("items", "Experience", RecordList)],
            vec![
                field("position", "Position", SingleLine),
                field("company", "Company", SingleLine),
                field("location", "Location", SingleLine),
                field("startDate", "Start Date", SingleLine),
                field("endDate", "End Date", SingleLine),
                improvable("description", "Description"),
            ],
        ),
        SectionType::Education => (
            vec![field("items", "Education", RecordList)],
            vec![
                field("school", "School/University", SingleLine),
                field("degree", "Degree", SingleLine),
                field("field", "Field of Study", SingleLine),
                field("startDate", "Start", SingleLine),
                field("endDate", "End", SingleLine),
            ],
        ),
        SectionType::Projects => (
            vec![field("items", "Projects", RecordList)],
            vec![
                field("name", "Project Name", SingleLine),
                field("link", "Project Link (URL)", SingleLine),
                improvable("description", "Highlights"),
            ],
        ),
        SectionType::Skills => (vec![field("skills", "Skills", StringList)], vec![]),
    };

    EditorSchema {
        section_type,
        fields,
        item_fields,
    }
}
