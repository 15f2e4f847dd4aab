//! HTML view of a rendered document. `Print` mode is what gets handed to the
//! platform print dialog, so it carries no selection marker or editing controls.

use std::fmt::Write;

use crate::models::SectionId;
use crate::render::blocks::{
    Alignment, BlockContent, EntryBlock, HeaderBlock, HeaderDensity, Heading, HeadingDecoration,
    PresentationBlock, RenderedDocument, SectionBlock, Spacing, TagStyle,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode<'a> {
    Editing { selected: Option<&'a SectionId> },
    Print,
}

pub fn render_html(rendered: &RenderedDocument, mode: RenderMode<'_>) -> String {
    let mut out = String::new();
    let spacing = match rendered.spacing {
        Spacing::Normal => "spacing-normal",
        Spacing::Compact => "spacing-compact",
    };
    let layout = format!("{:?}", rendered.layout).to_lowercase();

    out.push_str("<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>Resume</title></head><body>\n");
    let _ = writeln!(
        out,
        "<div id=\"resume-canvas-content\" class=\"resume-page layout-{layout} {spacing}\">"
    );

    for block in &rendered.blocks {
        match block {
            PresentationBlock::EmptyCanvas { message, hint } => {
                // An empty canvas prints as a blank page.
                if let RenderMode::Editing { .. } = mode {
                    let _ = writeln!(
                        out,
                        "<div class=\"empty-canvas\"><p>{}</p><p>{}</p></div>",
                        escape(message),
                        escape(hint)
                    );
                }
            }
            PresentationBlock::Section(section) => write_section(&mut out, section, mode),
        }
    }

    out.push_str("</div>\n</body></html>\n");
    out
}

fn write_section(out: &mut String, section: &SectionBlock, mode: RenderMode<'_>) {
    let mut classes = format!(
        "section section-{}",
        format!("{:?}", section.section_type).to_lowercase()
    );
    if let RenderMode::Editing { selected } = mode {
        if selected == Some(&section.section_id) {
            classes.push_str(" selected");
        }
    }

    let _ = writeln!(
        out,
        "<section class=\"{classes}\" data-section-id=\"{}\">",
        escape(section.section_id.as_str())
    );
    if let RenderMode::Editing { .. } = mode {
        out.push_str(
            "<nav class=\"section-controls\"><button data-action=\"up\">Up</button>\
             <button data-action=\"down\">Down</button>\
             <button data-action=\"remove\">Remove</button></nav>\n",
        );
    }
    if let Some(heading) = &section.heading {
        write_heading(out, heading);
    }

    match &section.content {
        BlockContent::Header(header) => write_header(out, header),
        BlockContent::Paragraph { text } => {
            let _ = writeln!(out, "<p class=\"paragraph\">{}</p>", escape(text));
        }
        BlockContent::Entries { entries } => {
            for entry in entries {
                write_entry(out, entry);
            }
        }
        BlockContent::Tags { tags, style } => {
            let style = match style {
                TagStyle::Filled => "tag-filled",
                TagStyle::Outline => "tag-outline",
            };
            out.push_str("<ul class=\"tags\">");
            for tag in tags {
                let _ = write!(out, "<li class=\"{style}\">{}</li>", escape(tag));
            }
            out.push_str("</ul>\n");
        }
    }

    out.push_str("</section>\n");
}

fn write_heading(out: &mut String, heading: &Heading) {
    let decoration = match heading.decoration {
        HeadingDecoration::Underline => "underline",
        HeadingDecoration::Divider => "divider",
        HeadingDecoration::None => "plain",
    };
    let align = match heading.alignment {
        Alignment::Left => "left",
        Alignment::Center => "center",
    };
    let _ = writeln!(
        out,
        "<h2 class=\"heading {decoration} align-{align}\">{}</h2>",
        escape(&heading.text)
    );
}

fn write_header(out: &mut String, header: &HeaderBlock) {
    let density = match header.density {
        HeaderDensity::ContactStrip => "contact-strip",
        HeaderDensity::TwoColumn => "two-column",
        HeaderDensity::CenteredBlock => "centered-block",
    };
    let _ = writeln!(out, "<header class=\"cv-header {density}\">");
    if let Some(name) = &header.name {
        let _ = writeln!(out, "<h1>{}</h1>", escape(name));
    }
    if let Some(title) = &header.title {
        let _ = writeln!(out, "<p class=\"cv-title\">{}</p>", escape(title));
    }
    if !header.contacts.is_empty() {
        let joined = header
            .contacts
            .iter()
            .map(|c| format!("<span class=\"{}\">{}</span>", c.kind, escape(&c.value)))
            .collect::<Vec<_>>();
        match header.density {
            HeaderDensity::ContactStrip => {
                let _ = writeln!(out, "<div class=\"contacts\">{}</div>", joined.join(" • "));
            }
            _ => {
                let _ = writeln!(out, "<div class=\"contacts\">{}</div>", joined.join(""));
            }
        }
    }
    out.push_str("</header>\n");
}

fn write_entry(out: &mut String, entry: &EntryBlock) {
    out.push_str("<article class=\"entry\">");
    let _ = write!(out, "<h3>{}</h3>", escape(&entry.heading));
    if let Some(dates) = &entry.dates {
        let _ = write!(out, "<span class=\"dates\">{}</span>", escape(dates));
    }
    if let Some(sub) = &entry.subheading {
        let _ = write!(out, "<p class=\"subheading\">{}</p>", escape(sub));
    }
    if let Some(location) = &entry.location {
        let _ = write!(out, "<p class=\"location\">{}</p>", escape(location));
    }
    if let Some(link) = &entry.link {
        let _ = write!(out, "<a href=\"{0}\">{0}</a>", escape(link));
    }
    if let Some(body) = &entry.body {
        let _ = write!(out, "<p class=\"body\">{}</p>", escape(body));
    }
    out.push_str("</article>\n");
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::seed::seed_document;
    use crate::models::{Document, Layout};
    use crate::render::render_document;

    #[test]
    fn test_editing_mode_marks_selected_section() {
        let rendered = render_document(&seed_document());
        let selected = SectionId::from("summary-1");
        let html = render_html(
            &rendered,
            RenderMode::Editing {
                selected: Some(&selected),
            },
        );
        assert!(html.contains("section section-summary selected"));
        assert!(html.contains("section-controls"));
    }

    #[test]
    fn test_print_mode_suppresses_transient_state() {
        let rendered = render_document(&seed_document());
        let html = render_html(&rendered, RenderMode::Print);
        assert!(!html.contains("selected"));
        assert!(!html.contains("section-controls"));
        assert!(html.contains("John Doe"));
        assert!(html.contains("Professional Summary"));
    }

    #[test]
    fn test_print_mode_of_empty_canvas_has_no_placeholder() {
        let doc = Document {
            sections: vec![],
            layout: Layout::Minimal,
        };
        let rendered = render_document(&doc);
        assert!(!render_html(&rendered, RenderMode::Print).contains("empty-canvas"));
        assert!(render_html(&rendered, RenderMode::Editing { selected: None })
            .contains("Your canvas is empty"));
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(escape("<b>R&D</b>"), "&lt;b&gt;R&amp;D&lt;/b&gt;");
    }
}
