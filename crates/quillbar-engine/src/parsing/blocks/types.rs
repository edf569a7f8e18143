use serde::{Deserialize, Serialize};

/// A structural unit of note text.
///
/// Blocks are derived from the persisted text on every parse and never
/// stored themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A vertical-space marker for an empty line.
    Blank,
    /// A heading line. Input levels 1-3 are recognised but the level is
    /// not retained; all headings normalise to one visual weight.
    Heading { text: String },
    /// A contiguous run of `-`/`*` bullet lines, one entry per line.
    BulletList { items: Vec<String> },
    /// One or more consecutive plain lines, joined with a single space.
    Paragraph { text: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blocks_serialize_with_a_type_tag() {
        assert_eq!(
            serde_json::to_value(Block::Heading {
                text: "T".to_string()
            })
            .unwrap(),
            json!({"type": "heading", "text": "T"})
        );
        assert_eq!(
            serde_json::to_value(Block::Blank).unwrap(),
            json!({"type": "blank"})
        );
        assert_eq!(
            serde_json::to_value(Block::BulletList {
                items: vec!["a".to_string()]
            })
            .unwrap(),
            json!({"type": "bullet_list", "items": ["a"]})
        );
    }

    #[test]
    fn blocks_round_trip_through_json() {
        let block = Block::Paragraph {
            text: "line one line two".to_string(),
        };
        let wire = serde_json::to_string(&block).unwrap();
        assert_eq!(serde_json::from_str::<Block>(&wire).unwrap(), block);
    }
}
