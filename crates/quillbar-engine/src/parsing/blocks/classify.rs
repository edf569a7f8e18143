/// Classification of a single line containing only local facts.
///
/// This is phase 1 of block parsing: each line is classified independently,
/// without reference to surrounding context. Grouping (bullet runs,
/// paragraph continuation) happens in phase 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty after trimming.
    Blank,
    /// `#`, `##` or `###` followed by whitespace; payload has the marker
    /// stripped and is trimmed.
    Heading(&'a str),
    /// `-` or `*` followed by whitespace; payload has the marker stripped
    /// and is trimmed.
    Bullet(&'a str),
    /// Anything else: a paragraph line, kept raw so authored spacing
    /// survives the parse. Display layers trim where they need to.
    Text(&'a str),
}

/// Classifies one line. Total over arbitrary input.
pub fn classify(line: &str) -> LineKind<'_> {
    if line.trim().is_empty() {
        return LineKind::Blank;
    }
    if let Some(text) = strip_heading_marker(line) {
        return LineKind::Heading(text);
    }
    if let Some(item) = strip_bullet_marker(line) {
        return LineKind::Bullet(item);
    }
    LineKind::Text(line)
}

/// Strips a `#`/`##`/`###` marker plus required whitespace, if present.
///
/// Longest marker first, so `### x` is a level-3 heading and not a level-1
/// heading with `## x` as content. Four or more hashes are not a heading.
fn strip_heading_marker(line: &str) -> Option<&str> {
    for marker in ["###", "##", "#"] {
        if let Some(rest) = line.strip_prefix(marker) {
            if rest.starts_with(char::is_whitespace) {
                return Some(rest.trim());
            }
            // `####...` falls through here for the shorter markers too;
            // a hash run longer than the marker is never a heading.
            return None;
        }
    }
    None
}

/// Strips a `-` or `*` bullet marker plus required whitespace, if present.
fn strip_bullet_marker(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('-').or_else(|| line.strip_prefix('*'))?;
    if rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", LineKind::Blank)]
    #[case("   ", LineKind::Blank)]
    #[case("\t", LineKind::Blank)]
    #[case("# Title", LineKind::Heading("Title"))]
    #[case("## Title", LineKind::Heading("Title"))]
    #[case("### Title", LineKind::Heading("Title"))]
    #[case("###  padded  ", LineKind::Heading("padded"))]
    #[case("#### too deep", LineKind::Text("#### too deep"))]
    #[case("#nospace", LineKind::Text("#nospace"))]
    #[case("#", LineKind::Text("#"))]
    #[case("- item", LineKind::Bullet("item"))]
    #[case("* item", LineKind::Bullet("item"))]
    #[case("-item", LineKind::Text("-item"))]
    #[case("*italic* start", LineKind::Text("*italic* start"))]
    #[case("plain", LineKind::Text("plain"))]
    #[case("a  ", LineKind::Text("a  "))]
    #[case("  indented", LineKind::Text("  indented"))]
    fn classifies_lines(#[case] line: &str, #[case] expected: LineKind<'_>) {
        assert_eq!(classify(line), expected);
    }
}
