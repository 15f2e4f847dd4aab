//! Per-type content templates: which sub-fields are shown and how empty ones are omitted.

use crate::models::{EducationItem, ExperienceItem, HeaderData, ProjectItem, SectionData};
use crate::render::blocks::{BlockContent, ContactLine, EntryBlock, HeaderBlock};
use crate::render::policy::LayoutPolicy;

pub fn render_content(data: &SectionData, policy: &LayoutPolicy) -> BlockContent {
    match data {
        SectionData::Header(header) => BlockContent::Header(header_block(header, policy)),
        SectionData::Summary(text) => BlockContent::Paragraph { text: text.clone() },
        SectionData::Experience(items) => BlockContent::Entries {
            entries: items.iter().map(experience_entry).collect(),
        },
        SectionData::Education(items) => BlockContent::Entries {
            entries: items.iter().map(education_entry).collect(),
        },
        SectionData::Projects(items) => BlockContent::Entries {
            entries: items.iter().map(project_entry).collect(),
        },
        SectionData::Skills(skills) => BlockContent::Tags {
            tags: skills
                .iter()
                .filter(|s| !s.trim().is_empty())
                .cloned()
                .collect(),
            style: policy.tag_style,
        },
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn date_range(start: &str, end: &str) -> Option<String> {
    match (non_empty(start), non_empty(end)) {
        (None, None) => None,
        (Some(start), None) => Some(start),
        (None, Some(end)) => Some(end),
        (Some(start), Some(end)) => Some(format!("{start} — {end}")),
    }
}

fn header_block(header: &HeaderData, policy: &LayoutPolicy) -> HeaderBlock {
    let contacts = policy
        .header_contacts
        .iter()
        .filter_map(|&kind| {
            let value = match kind {
                "email" => &header.email,
                "phone" => &header.phone,
                "location" => &header.location,
                "website" => &header.website,
                _ => return None,
            };
            non_empty(value).map(|value| ContactLine { kind, value })
        })
        .collect();

    HeaderBlock {
        density: policy.header_density,
        name: non_empty(&header.name),
        title: non_empty(&header.title),
        contacts,
    }
}

// Position and company always render, even when blank; location only when present.
fn experience_entry(item: &ExperienceItem) -> EntryBlock {
    EntryBlock {
        heading: item.position.clone(),
        subheading: Some(item.company.clone()),
        dates: date_range(&item.start_date, &item.end_date),
        location: non_empty(&item.location),
        link: None,
        body: non_empty(&item.description),
    }
}

fn education_entry(item: &EducationItem) -> EntryBlock {
    EntryBlock {
        heading: item.degree.clone(),
        subheading: Some(item.school.clone()),
        dates: date_range(&item.start_date, &item.end_date),
        location: None,
        link: None,
        body: non_empty(&item.field),
    }
}

fn project_entry(item: &ProjectItem) -> EntryBlock {
    EntryBlock {
        heading: item.name.clone(),
        subheading: None,
        dates: None,
        location: None,
        link: non_empty(&item.link),
        body: non_empty(&item.description),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Layout;
    use crate::render::blocks::{HeaderDensity, TagStyle};
    use crate::render::policy::policy_for;

    #[test]
    fn test_header_omits_empty_fields() {
        let header = HeaderData {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            ..Default::default()
        };
        let block = header_block(&header, &policy_for(Layout::Classic));
        assert_eq!(block.name.as_deref(), Some("Ada"));
        assert_eq!(block.title, None);
        assert_eq!(block.density, HeaderDensity::ContactStrip);
        assert_eq!(block.contacts.len(), 1);
        assert_eq!(block.contacts[0].kind, "email");
    }

    #[test]
    fn test_header_contact_order_follows_layout() {
        let header = HeaderData {
            email: "e".to_string(),
            phone: "p".to_string(),
            location: "l".to_string(),
            website: "w".to_string(),
            ..Default::default()
        };
        let classic = header_block(&header, &policy_for(Layout::Classic));
        let kinds: Vec<&str> = classic.contacts.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec!["location", "phone", "email", "website"]);

        let minimal = header_block(&header, &policy_for(Layout::Minimal));
        let kinds: Vec<&str> = minimal.contacts.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec!["email", "phone", "location"]);
    }

    #[test]
    fn test_experience_without_location_omits_location_line() {
        let item = ExperienceItem {
            position: "Engineer".to_string(),
            company: "".to_string(),
            start_date: "2019".to_string(),
            ..Default::default()
        };
        let entry = experience_entry(&item);
        assert_eq!(entry.heading, "Engineer");
        assert_eq!(entry.subheading.as_deref(), Some(""), "company always renders");
        assert_eq!(entry.location, None);
        assert_eq!(entry.dates.as_deref(), Some("2019"));
    }

    #[test]
    fn test_date_range_joins_both_ends() {
        assert_eq!(date_range("2018", "2020").as_deref(), Some("2018 — 2020"));
        assert_eq!(date_range(" ", ""), None);
    }

    #[test]
    fn test_project_link_only_when_present() {
        let item = ProjectItem {
            name: "Parser".to_string(),
            link: "https://example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(project_entry(&item).link.as_deref(), Some("https://example.com"));
        assert_eq!(project_entry(&ProjectItem::default()).link, None);
    }

    #[test]
    fn test_skills_use_layout_tag_style_and_skip_blanks() {
        let data = SectionData::Skills(vec!["Rust".to_string(), "  ".to_string()]);
        match render_content(&data, &policy_for(Layout::Minimal)) {
            BlockContent::Tags { tags, style } => {
                assert_eq!(tags, vec!["Rust"]);
                assert_eq!(style, TagStyle::Outline);
            }
            other => panic!("unexpected content {other:?}"),
        }
    }
}
