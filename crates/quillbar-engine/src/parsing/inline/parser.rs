use super::{cursor::Cursor, types::InlineSpan};

/// Tokenizes one line into a sequence of [`InlineSpan`]s.
///
/// Scans left to right with greedy, non-nested matching. At each position
/// the delimiters are tried in precedence order: `` ` `` (raw zone), then
/// `**`, then a lone `*`. Whichever delimiter the scanner reaches first
/// wins; there is no global lookahead to infer "intended" structure for
/// malformed input.
///
/// An opening delimiter with no closing partner is literal text, with one
/// consequence of the precedence order worth knowing at the API: a `**`
/// with no closing `**` is not literal, because the lone-star rule then
/// pairs the two adjacent stars into an empty `Italic` span (so
/// `"**x"` yields `Italic("")` then `Text("x")`). Content between
/// delimiters is taken verbatim, never re-tokenized.
///
/// Total over arbitrary input: never panics, and any string produces at
/// least an empty span list. Adjacent plain text coalesces into a single
/// `Text` span.
pub fn tokenize(line: &str) -> Vec<InlineSpan> {
    let mut cur = Cursor::new(line);
    let mut out = vec![];
    let mut text_start = cur.pos();

    // Flush the plain-text run accumulated since the last styled span
    fn flush_text(out: &mut Vec<InlineSpan>, line: &str, start: usize, end: usize) {
        if end > start {
            out.push(InlineSpan::Text(line[start..end].to_string()));
        }
    }

    while !cur.eof() {
        let at = cur.pos();
        // Precedence: code spans first, then ** before *
        if let Some(span) = try_parse_code(&mut cur) {
            flush_text(&mut out, line, text_start, at);
            text_start = cur.pos();
            out.push(span);
            continue;
        }
        if let Some(span) = try_parse_bold(&mut cur) {
            flush_text(&mut out, line, text_start, at);
            text_start = cur.pos();
            out.push(span);
            continue;
        }
        if let Some(span) = try_parse_italic(&mut cur) {
            flush_text(&mut out, line, text_start, at);
            text_start = cur.pos();
            out.push(span);
            continue;
        }
        cur.bump();
    }

    flush_text(&mut out, line, text_start, cur.pos());
    out
}

/// Attempts to parse a backtick code span at the current position.
///
/// Returns `None` if not at a backtick or if no closing backtick exists;
/// the cursor is only advanced on success.
fn try_parse_code(cur: &mut Cursor<'_>) -> Option<InlineSpan> {
    if cur.peek() != Some(b'`') {
        return None;
    }
    let inner = &cur.rest()[1..];
    let close = inner.find('`')?;
    cur.bump_n(1 + close + 1);
    Some(InlineSpan::Code(inner[..close].to_string()))
}

/// Attempts to parse a `**bold**` span at the current position.
fn try_parse_bold(cur: &mut Cursor<'_>) -> Option<InlineSpan> {
    if !cur.starts_with(b"**") {
        return None;
    }
    let inner = &cur.rest()[2..];
    let close = inner.find("**")?;
    cur.bump_n(2 + close + 2);
    Some(InlineSpan::Bold(inner[..close].to_string()))
}

/// Attempts to parse a `*italic*` span at the current position.
///
/// Only reached once `**` has failed to match, so a lone `*` pairs with
/// the next `*` wherever it is.
fn try_parse_italic(cur: &mut Cursor<'_>) -> Option<InlineSpan> {
    if cur.peek() != Some(b'*') {
        return None;
    }
    let inner = &cur.rest()[1..];
    let close = inner.find('*')?;
    cur.bump_n(1 + close + 1);
    Some(InlineSpan::Italic(inner[..close].to_string()))
}
