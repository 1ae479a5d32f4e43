//! # Frontmatter
//!
//! A note may open with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Project Alpha
//! tags:
//! - work
//! ---
//! # Project Alpha
//! ```
//!
//! [`split`] separates that block from the body and [`compose`] puts them back
//! together. The two are inverses for any metadata made of scalars and lists
//! of scalars: `split(&compose(&m, b)?)` yields `m` and `b` again.
//!
//! Decoding never fails outward. A block that is present but malformed yields
//! empty metadata and the body after the block; the decode error is kept on
//! the [`Split`] so callers that care can report it.

use crate::error::Result;
use crate::model::Metadata;
use once_cell::sync::Lazy;
use regex::Regex;

/// Opening fence, YAML payload (lazy), closing fence, body.
static FRONTMATTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\A---[ \t]*\r?\n(.*?)\r?\n---[ \t]*(?:\r?\n|\z)(.*)\z")
        .expect("frontmatter regex")
});

pub const DELIMITER: &str = "---";

/// The result of separating a note's raw text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Split {
    pub metadata: Metadata,
    pub body: String,
    /// Set when a metadata block was present but could not be decoded.
    pub error: Option<String>,
}

/// Separate raw note text into metadata and body.
pub fn split(raw: &str) -> Split {
    if raw.is_empty() {
        return Split::default();
    }

    let Some(caps) = FRONTMATTER_RE.captures(raw) else {
        return Split {
            metadata: Metadata::new(),
            body: raw.to_string(),
            error: None,
        };
    };

    // The regex eats the payload's last line break as the closing fence's
    // lead-in. Block scalars need it back to keep their trailing newlines.
    let yaml = format!("{}\n", caps.get(1).map_or("", |m| m.as_str()));
    let body = caps.get(2).map_or("", |m| m.as_str()).to_string();

    match decode(&yaml) {
        Ok(metadata) => Split {
            metadata,
            body,
            error: None,
        },
        Err(error) => Split {
            metadata: Metadata::new(),
            body,
            error: Some(error),
        },
    }
}

/// Build raw note text from metadata and body.
///
/// Empty metadata produces the body verbatim, with no fences.
pub fn compose(metadata: &Metadata, body: &str) -> Result<String> {
    if metadata.is_empty() {
        return Ok(body.to_string());
    }
    let yaml = encode(metadata)?;
    Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n{body}"))
}

fn decode(yaml: &str) -> std::result::Result<Metadata, String> {
    let value: serde_yaml::Value = serde_yaml::from_str(yaml).map_err(|e| e.to_string())?;
    match value {
        // Empty or comment-only block.
        serde_yaml::Value::Null => Ok(Metadata::new()),
        serde_yaml::Value::Mapping(mapping) => Metadata::try_from(mapping),
        other => Err(format!(
            "expected a mapping, found {}",
            crate::model::yaml_kind(&other)
        )),
    }
}

fn encode(metadata: &Metadata) -> Result<String> {
    let mapping = serde_yaml::Mapping::from(metadata);
    let mut yaml = serde_yaml::to_string(&mapping)?;
    if !yaml.ends_with('\n') {
        yaml.push('\n');
    }
    Ok(yaml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MetaValue;
    use proptest::prelude::*;

    #[test]
    fn splits_metadata_and_body() {
        let raw = "---\ntitle: Test Note\ntags:\n  - test\n  - example\n---\nThis is the body.";
        let split = split(raw);

        assert_eq!(
            split.metadata.get("title"),
            Some(&MetaValue::String("Test Note".into()))
        );
        assert!(split.metadata.has_tag("test"));
        assert!(split.metadata.has_tag("example"));
        assert_eq!(split.body, "This is the body.");
        assert!(split.error.is_none());
    }

    #[test]
    fn text_without_fence_is_all_body() {
        let raw = "# Heading\n\nJust text [[Link]].\n";
        let split = split(raw);
        assert!(split.metadata.is_empty());
        assert_eq!(split.body, raw);
    }

    #[test]
    fn empty_text_gives_empty_parts() {
        assert_eq!(split(""), Split::default());
    }

    #[test]
    fn unclosed_fence_is_all_body() {
        let raw = "---\ntitle: nope\nno closing fence\n";
        let split = split(raw);
        assert!(split.metadata.is_empty());
        assert_eq!(split.body, raw);
    }

    #[test]
    fn fence_must_start_the_text() {
        let raw = "\n---\ntitle: x\n---\nbody";
        let split = split(raw);
        assert!(split.metadata.is_empty());
        assert_eq!(split.body, raw);
    }

    #[test]
    fn fences_allow_trailing_whitespace() {
        let split = split("---  \nstatus: done\n--- \t\nbody\n");
        assert_eq!(
            split.metadata.get("status"),
            Some(&MetaValue::String("done".into()))
        );
        assert_eq!(split.body, "body\n");
    }

    #[test]
    fn accepts_crlf_line_endings() {
        let split = split("---\r\nstatus: done\r\n---\r\nbody\r\n");
        assert_eq!(
            split.metadata.get("status"),
            Some(&MetaValue::String("done".into()))
        );
        assert_eq!(split.body, "body\r\n");
    }

    #[test]
    fn closing_fence_at_end_of_text() {
        let split = split("---\nstatus: done\n---");
        assert_eq!(split.metadata.len(), 1);
        assert_eq!(split.body, "");
    }

    #[test]
    fn blank_block_is_empty_metadata() {
        let split = split("---\n\n---\nbody");
        assert!(split.metadata.is_empty());
        assert!(split.error.is_none());
        assert_eq!(split.body, "body");
    }

    #[test]
    fn malformed_yaml_recovers_with_empty_metadata() {
        let split = split("---\ntitle: [unclosed\n---\nbody");
        assert!(split.metadata.is_empty());
        assert_eq!(split.body, "body");
        assert!(split.error.is_some());
    }

    #[test]
    fn non_mapping_block_recovers_with_empty_metadata() {
        let split = split("---\n- just\n- a list\n---\nbody");
        assert!(split.metadata.is_empty());
        assert_eq!(split.body, "body");
        assert!(split.error.unwrap().contains("sequence"));
    }

    #[test]
    fn compose_without_metadata_is_verbatim() {
        let raw = compose(&Metadata::new(), "plain body").unwrap();
        assert_eq!(raw, "plain body");
    }

    #[test]
    fn compose_writes_fenced_block() {
        let mut metadata = Metadata::new();
        metadata.insert("status", "draft");
        let raw = compose(&metadata, "Body").unwrap();
        assert_eq!(raw, "---\nstatus: draft\n---\nBody");
    }

    #[test]
    fn compose_then_split_round_trips() {
        let mut metadata = Metadata::new();
        metadata.insert("title", "My Title");
        metadata.insert("date", "2026-01-06");
        metadata.insert("tags", vec!["test", "example"]);
        metadata.insert("draft", true);
        metadata.insert("priority", 3i64);
        metadata.insert("weight", 0.5f64);
        metadata.insert("version", "1.0");
        let body = "# Heading\n\nSee [[Other]].\n";

        let raw = compose(&metadata, body).unwrap();
        let split = split(&raw);

        assert_eq!(split.metadata, metadata);
        assert_eq!(split.body, body);
        assert!(split.error.is_none());
    }

    #[test]
    fn round_trip_keeps_tricky_strings_as_strings() {
        let mut metadata = Metadata::new();
        metadata.insert("fence", "---");
        metadata.insert("looks_bool", "true");
        metadata.insert("looks_int", "42");
        metadata.insert("multi", "line one\nline two");
        metadata.insert("empty", "");

        let raw = compose(&metadata, "").unwrap();
        let split = split(&raw);

        assert_eq!(split.metadata, metadata);
        assert_eq!(split.body, "");
    }

    #[test]
    fn round_trip_keeps_trailing_newlines() {
        let mut metadata = Metadata::new();
        metadata.insert("one", "a\n");
        metadata.insert("two", "a\n\n");
        metadata.insert("only", "\n");
        metadata.insert("crlf", "a\r\n");
        metadata.insert("inner", "a\nb\n");

        let raw = compose(&metadata, "body").unwrap();
        let split = split(&raw);

        assert_eq!(split.metadata, metadata);
        assert_eq!(split.body, "body");
        assert!(split.error.is_none());
    }

    #[test]
    fn hand_written_block_scalar_keeps_newline() {
        let split = split("---\nk: |\n  a\n---\nbody");
        assert_eq!(split.metadata.get("k"), Some(&MetaValue::String("a\n".into())));
        assert_eq!(split.body, "body");
    }

    fn text() -> impl Strategy<Value = String> {
        "[ -~\t\r\n]{0,24}"
    }

    fn value() -> impl Strategy<Value = MetaValue> {
        prop_oneof![
            text().prop_map(MetaValue::String),
            (text(), prop_oneof![Just("\n"), Just("\r\n"), Just("\n\n")])
                .prop_map(|(s, end)| MetaValue::String(s + end)),
            any::<i64>().prop_map(MetaValue::Integer),
            any::<bool>().prop_map(MetaValue::Bool),
            prop::collection::vec(text().prop_map(MetaValue::String), 0..4).prop_map(MetaValue::List),
        ]
    }

    fn metadata() -> impl Strategy<Value = Metadata> {
        prop::collection::btree_map("[a-z_][a-z0-9_]{0,11}", value(), 1..6)
            .prop_map(|map| map.into_iter().collect())
    }

    proptest! {
        #[test]
        fn any_metadata_and_body_round_trip(meta in metadata(), body in any::<String>()) {
            let raw = compose(&meta, &body).unwrap();
            let split = split(&raw);
            prop_assert_eq!(split.error, None);
            prop_assert_eq!(split.metadata, meta);
            prop_assert_eq!(split.body, body);
        }
    }
}
