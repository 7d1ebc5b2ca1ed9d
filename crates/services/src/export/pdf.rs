//! Minimal PDF 1.4 writer for laid-out text pages.
//!
//! Output uses the two standard Helvetica faces with `WinAnsiEncoding` and
//! uncompressed content streams, so every page's text is visible in the bytes.

use chrono::{DateTime, Utc};

use planner_core::model::Plan;

use super::layout::{Font, PAGE_HEIGHT, PAGE_WIDTH, Page, layout_plan};

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const FIRST_PAGE_ID: usize = 5;
const FONTS: [(usize, Font); 2] = [(3, Font::Regular), (4, Font::Bold)];

/// Render `plan` to PDF bytes.
#[must_use]
pub fn render_pdf(plan: &Plan, title: &str, generated_at: DateTime<Utc>) -> Vec<u8> {
    write_pdf(&layout_plan(plan, title, generated_at))
}

/// Serialize pages into a PDF document. An empty slice yields one blank page.
#[must_use]
pub fn write_pdf(pages: &[Page]) -> Vec<u8> {
    let blank = [Page::default()];
    let pages = if pages.is_empty() { &blank[..] } else { pages };

    // Object ids: catalog, page tree, two fonts, then (page, content) pairs.
    let mut objects: Vec<Vec<u8>> = Vec::with_capacity(FIRST_PAGE_ID - 1 + pages.len() * 2);

    objects.push(format!("<< /Type /Catalog /Pages {PAGES_ID} 0 R >>").into_bytes());

    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", page_id(i)))
        .collect();
    objects.push(
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            pages.len()
        )
        .into_bytes(),
    );

    for (_, font) in FONTS {
        objects.push(
            format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                font.base_font()
            )
            .into_bytes(),
        );
    }

    let font_refs: Vec<String> = FONTS
        .iter()
        .map(|(id, font)| format!("/{} {id} 0 R", font.resource_name()))
        .collect();
    let font_refs = font_refs.join(" ");

    for (i, page) in pages.iter().enumerate() {
        objects.push(
            format!(
                "<< /Type /Page /Parent {PAGES_ID} 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                 /Resources << /Font << {font_refs} >> >> /Contents {} 0 R >>",
                page_id(i) + 1
            )
            .into_bytes(),
        );

        let content = content_stream(page);
        let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        stream.extend_from_slice(content.as_bytes());
        stream.extend_from_slice(b"\nendstream");
        objects.push(stream);
    }

    let mut out: Vec<u8> = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (index, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", index + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_offset = out.len();
    let mut trailer = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        trailer.push_str(&format!("{offset:010} 00000 n \n"));
    }
    trailer.push_str(&format!(
        "trailer\n<< /Size {} /Root {CATALOG_ID} 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
        objects.len() + 1
    ));
    out.extend_from_slice(trailer.as_bytes());

    out
}

fn page_id(index: usize) -> usize {
    FIRST_PAGE_ID + index * 2
}

fn content_stream(page: &Page) -> String {
    let mut content = String::new();
    for line in &page.lines {
        content.push_str(&format!(
            "BT /{} {} Tf {} {} Td ({}) Tj ET\n",
            line.font.resource_name(),
            line.size,
            line.x,
            line.y,
            escape_text(&line.text)
        ));
    }
    content
}

/// Encode text as a WinAnsi literal string body, escaping delimiters and
/// writing non-ASCII bytes as octal escapes.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match win_ansi_byte(ch) {
            b @ (b'(' | b')' | b'\\') => {
                out.push('\\');
                out.push(char::from(b));
            }
            b @ 0x20..=0x7E => out.push(char::from(b)),
            b => out.push_str(&format!("\\{b:03o}")),
        }
    }
    out
}

fn win_ansi_byte(ch: char) -> u8 {
    match ch {
        ' '..='~' => ch as u8,
        '\t' => b' ',
        '€' => 0x80,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '™' => 0x99,
        '\u{A0}'..='\u{FF}' => u8::try_from(u32::from(ch)).unwrap_or(b'?'),
        _ => b'?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::layout::PlacedLine;
    use planner_core::model::{WeekEntry, week_label};
    use planner_core::time::fixed_now;

    fn as_text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn document_is_framed() {
        let bytes = render_pdf(&Plan::default(), "Plan: x", fixed_now());
        let text = as_text(&bytes);

        assert!(bytes.starts_with(b"%PDF-1.4\n"));
        assert!(text.ends_with("%%EOF\n"));
        assert!(text.contains("/BaseFont /Helvetica-Bold"));
        assert!(text.contains("/MediaBox [0 0 612 792]"));
        assert!(text.contains("/Count 1"));
    }

    #[test]
    fn startxref_points_at_xref_table() {
        let bytes = render_pdf(&Plan::default(), "T", fixed_now());
        let text = as_text(&bytes);

        let tail = text.rsplit("startxref\n").next().unwrap();
        let offset: usize = tail.lines().next().unwrap().parse().unwrap();
        assert!(bytes[offset..].starts_with(b"xref\n"));
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let bytes = render_pdf(&Plan::default(), "T", fixed_now());
        let text = as_text(&bytes);

        let table = text.split("xref\n").nth(1).unwrap();
        let entries: Vec<usize> = table
            .lines()
            .skip(2)
            .take_while(|line| line.ends_with(" n "))
            .map(|line| line[..10].parse().unwrap())
            .collect();

        assert!(!entries.is_empty());
        for (index, offset) in entries.iter().enumerate() {
            let header = format!("{} 0 obj\n", index + 1);
            assert!(bytes[*offset..].starts_with(header.as_bytes()));
        }
    }

    #[test]
    fn text_is_escaped_and_encoded() {
        let page = Page {
            lines: vec![PlacedLine {
                x: 48,
                y: 700,
                font: Font::Regular,
                size: 11,
                text: "• call f(x) \\ café".into(),
            }],
        };
        let text = as_text(&write_pdf(&[page]));

        assert!(text.contains("BT /F1 11 Tf 48 700 Td (\\225 call f\\(x\\) \\\\ caf\\351) Tj ET"));
    }

    #[test]
    fn unsupported_characters_become_question_marks() {
        assert_eq!(escape_text("🌱 ok"), "? ok");
    }

    #[test]
    fn one_page_object_per_laid_out_page() {
        let mut plan = Plan::default();
        for n in 1..=8 {
            plan.weeks.insert(
                week_label(n),
                WeekEntry {
                    tasks: (0..10).map(|i| format!("task {i}")).collect(),
                    ..WeekEntry::default()
                },
            );
        }
        let pages = layout_plan(&plan, "T", fixed_now());
        let text = as_text(&write_pdf(&pages));

        assert!(pages.len() > 1);
        assert_eq!(text.matches("/Type /Page ").count(), pages.len());
        assert!(text.contains(&format!("/Count {}", pages.len())));
    }
}
