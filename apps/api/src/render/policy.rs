//! Per-layout visual policy. A layout only ever changes how sections look,
//! never which sections exist or their order.

use crate::models::Layout;
use crate::render::blocks::{Alignment, HeaderDensity, HeadingDecoration, Spacing, TagStyle};

/// Contact fields shown by the header, in display order.
pub type ContactFields = &'static [&'static str];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutPolicy {
    pub decoration: HeadingDecoration,
    pub heading_alignment: Alignment,
    pub spacing: Spacing,
    pub header_density: HeaderDensity,
    pub header_contacts: ContactFields,
    pub tag_style: TagStyle,
}

pub fn policy_for(layout: Layout) -> LayoutPolicy {
    match layout {
        Layout::Modern => LayoutPolicy {
            decoration: HeadingDecoration::Underline,
            heading_alignment: Alignment::Left,
            spacing: Spacing::Normal,
            header_density: HeaderDensity::CenteredBlock,
            header_contacts: &["email", "phone", "website"],
            tag_style: TagStyle::Filled,
        },
        Layout::Classic => LayoutPolicy {
            decoration: HeadingDecoration::Divider,
            heading_alignment: Alignment::Center,
            spacing: Spacing::Normal,
            header_density: HeaderDensity::ContactStrip,
            header_contacts: &["location", "phone", "email", "website"],
            tag_style: TagStyle::Filled,
        },
        Layout::Minimal => LayoutPolicy {
            decoration: HeadingDecoration::None,
            heading_alignment: Alignment::Left,
            spacing: Spacing::Normal,
            header_density: HeaderDensity::TwoColumn,
            header_contacts: &["email", "phone", "location"],
            tag_style: TagStyle::Outline,
        },
        Layout::Compact => LayoutPolicy {
            decoration: HeadingDecoration::Underline,
            heading_alignment: Alignment::Left,
            spacing: Spacing::Compact,
            header_density: HeaderDensity::CenteredBlock,
            header_contacts: &["email", "phone", "website"],
            tag_style: TagStyle::Filled,
        },
    }
}
