//! Snapshot tests for the read-only preview, rendered through a compact
//! textual dump so structure and styling are reviewable at a glance.

use quillbar_engine::{InlineSpan, PreviewBlock, render_preview, snippet};

fn dump_spans(spans: &[InlineSpan]) -> String {
    spans
        .iter()
        .map(|s| match s {
            InlineSpan::Text(t) => t.clone(),
            InlineSpan::Bold(t) => format!("<b>{t}</b>"),
            InlineSpan::Italic(t) => format!("<i>{t}</i>"),
            InlineSpan::Code(t) => format!("<code>{t}</code>"),
        })
        .collect()
}

fn dump(content: &str) -> String {
    render_preview(content)
        .iter()
        .map(|block| match block {
            PreviewBlock::Spacer => "~".to_string(),
            PreviewBlock::Heading { spans } => format!("# {}", dump_spans(spans)),
            PreviewBlock::Bullets { items } => items
                .iter()
                .map(|item| format!("* {}", dump_spans(item)))
                .collect::<Vec<_>>()
                .join("\n"),
            PreviewBlock::Paragraph { spans } => dump_spans(spans),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn preview_full_note() {
    insta::assert_snapshot!(
        dump("## Title\n\n- a **x**\n- b\n\npara *i* and `cmd`"),
        @r"
    # Title
    ~
    * a <b>x</b>
    * b
    ~
    para <i>i</i> and <code>cmd</code>
    "
    );
}

#[test]
fn preview_degrades_malformed_markup_to_text() {
    insta::assert_snapshot!(
        dump("#### deep\n`open **half\n\n****"),
        @r"
    #### deep `open <i></i>half
    ~
    <b></b>
    "
    );
}

#[test]
fn snippet_matches_preview_first_line() {
    assert_eq!(snippet("## Title\n\nbody"), "Title");
}
