use serde::{Deserialize, Serialize};

/// A styled or plain run of text within a single line.
///
/// The payload of `Bold`/`Italic`/`Code` is unparsed plain text; inline
/// styles never nest. Saved notes depend on this flattening, so the
/// tokenizer must not be "improved" into recursive parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum InlineSpan {
    /// Plain text that isn't part of any styled run.
    Text(String),
    /// `**text**`
    Bold(String),
    /// `*text*`
    Italic(String),
    /// `` `text` ``, a raw zone whose content is taken verbatim.
    Code(String),
}

impl InlineSpan {
    /// The payload text, with style markers removed.
    pub fn text(&self) -> &str {
        match self {
            InlineSpan::Text(t)
            | InlineSpan::Bold(t)
            | InlineSpan::Italic(t)
            | InlineSpan::Code(t) => t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Host UIs consume spans as JSON; the kind/text shape is part of the
    // bridge contract.
    #[test]
    fn spans_serialize_with_kind_and_text_fields() {
        assert_eq!(
            serde_json::to_value(InlineSpan::Bold("b".to_string())).unwrap(),
            json!({"kind": "bold", "text": "b"})
        );
        assert_eq!(
            serde_json::to_value(InlineSpan::Text("plain".to_string())).unwrap(),
            json!({"kind": "text", "text": "plain"})
        );
    }

    #[test]
    fn spans_deserialize_from_the_bridge_shape() {
        let span: InlineSpan =
            serde_json::from_value(json!({"kind": "code", "text": "ls -la"})).unwrap();
        assert_eq!(span, InlineSpan::Code("ls -la".to_string()));
    }
}
