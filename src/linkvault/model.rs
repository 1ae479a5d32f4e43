use crate::error::Result;
use crate::frontmatter::{self, Split};
use crate::links;
use chrono::{DateTime, Utc};
use once_cell::unsync::OnceCell;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Key under which a note lists its tags.
pub const TAGS_KEY: &str = "tags";

/// A frontmatter value.
///
/// Closed over what YAML scalars, sequences and mappings can express, so any
/// value that parses can be written back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Null,
    Bool(bool),
    Integer(i64),
    /// Integers above `i64::MAX`.
    Unsigned(u64),
    Float(f64),
    String(String),
    List(Vec<MetaValue>),
    Map(Metadata),
}

impl MetaValue {
    /// Interpret user input as YAML, falling back to a plain string.
    ///
    /// `true` becomes a bool, `3` an integer, `[a, b]` a list; anything that
    /// is not valid YAML (or is blank) stays a string.
    pub fn parse(input: &str) -> Self {
        if input.trim().is_empty() {
            return MetaValue::String(input.to_string());
        }
        serde_yaml::from_str::<serde_yaml::Value>(input)
            .ok()
            .and_then(|value| MetaValue::try_from(value).ok())
            .unwrap_or_else(|| MetaValue::String(input.to_string()))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[MetaValue]> {
        match self {
            MetaValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// True for a string equal to `needle`, or a list holding such a string.
    pub fn contains_str(&self, needle: &str) -> bool {
        match self {
            MetaValue::String(s) => s == needle,
            MetaValue::List(items) => items.iter().any(|item| item.as_str() == Some(needle)),
            _ => false,
        }
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Null => write!(f, "~"),
            MetaValue::Bool(b) => write!(f, "{}", b),
            MetaValue::Integer(i) => write!(f, "{}", i),
            MetaValue::Unsigned(u) => write!(f, "{}", u),
            MetaValue::Float(x) => write!(f, "{}", x),
            MetaValue::String(s) => write!(f, "{}", s),
            MetaValue::List(items) => {
                let parts: Vec<String> = items.iter().map(|item| item.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            MetaValue::Map(map) => {
                let parts: Vec<String> = map.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::String(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::String(value)
    }
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        MetaValue::Bool(value)
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        MetaValue::Integer(value)
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        MetaValue::Float(value)
    }
}

impl<T: Into<MetaValue>> From<Vec<T>> for MetaValue {
    fn from(values: Vec<T>) -> Self {
        MetaValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<Metadata> for MetaValue {
    fn from(value: Metadata) -> Self {
        MetaValue::Map(value)
    }
}

impl TryFrom<serde_yaml::Value> for MetaValue {
    type Error = String;

    fn try_from(value: serde_yaml::Value) -> std::result::Result<Self, Self::Error> {
        use serde_yaml::Value;
        match value {
            Value::Null => Ok(MetaValue::Null),
            Value::Bool(b) => Ok(MetaValue::Bool(b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(MetaValue::Integer(i))
                } else if let Some(u) = n.as_u64() {
                    Ok(MetaValue::Unsigned(u))
                } else {
                    n.as_f64()
                        .map(MetaValue::Float)
                        .ok_or_else(|| format!("unsupported number {}", n))
                }
            }
            Value::String(s) => Ok(MetaValue::String(s)),
            Value::Sequence(items) => items
                .into_iter()
                .map(MetaValue::try_from)
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(MetaValue::List),
            Value::Mapping(mapping) => Metadata::try_from(mapping).map(MetaValue::Map),
            Value::Tagged(tagged) => Err(format!("unsupported tagged value {}", tagged.tag)),
        }
    }
}

impl From<&MetaValue> for serde_yaml::Value {
    fn from(value: &MetaValue) -> Self {
        use serde_yaml::Value;
        match value {
            MetaValue::Null => Value::Null,
            MetaValue::Bool(b) => Value::Bool(*b),
            MetaValue::Integer(i) => Value::Number((*i).into()),
            MetaValue::Unsigned(u) => Value::Number((*u).into()),
            MetaValue::Float(x) => Value::Number((*x).into()),
            MetaValue::String(s) => Value::String(s.clone()),
            MetaValue::List(items) => Value::Sequence(items.iter().map(Value::from).collect()),
            MetaValue::Map(map) => Value::Mapping(serde_yaml::Mapping::from(map)),
        }
    }
}

/// Human name of a YAML node kind, for error messages.
pub(crate) fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    use serde_yaml::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// A note's frontmatter: string keys, kept in sorted order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metadata(BTreeMap<String, MetaValue>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> Option<MetaValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<MetaValue> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetaValue)> {
        self.0.iter()
    }

    /// Tags as strings. A scalar `tags: work` counts as one tag; non-string
    /// entries are skipped.
    pub fn tags(&self) -> Vec<&str> {
        match self.get(TAGS_KEY) {
            Some(MetaValue::String(tag)) => vec![tag.as_str()],
            Some(MetaValue::List(items)) => items.iter().filter_map(MetaValue::as_str).collect(),
            _ => Vec::new(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.get(TAGS_KEY).is_some_and(|tags| tags.contains_str(tag))
    }
}

impl<K: Into<String>, V: Into<MetaValue>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl TryFrom<serde_yaml::Mapping> for Metadata {
    type Error = String;

    fn try_from(mapping: serde_yaml::Mapping) -> std::result::Result<Self, Self::Error> {
        use serde_yaml::Value;
        let mut map = BTreeMap::new();
        for (key, value) in mapping {
            let key = match key {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => return Err(format!("unsupported {} key", yaml_kind(&other))),
            };
            if map.contains_key(&key) {
                return Err(format!("duplicate key '{}'", key));
            }
            map.insert(key, MetaValue::try_from(value)?);
        }
        Ok(Self(map))
    }
}

impl From<&Metadata> for serde_yaml::Mapping {
    fn from(metadata: &Metadata) -> Self {
        metadata
            .iter()
            .map(|(k, v)| (serde_yaml::Value::String(k.clone()), serde_yaml::Value::from(v)))
            .collect()
    }
}

/// One note file.
///
/// The raw text is the source of truth. Metadata and body are split out of it
/// the first time either is asked for and kept until the raw text changes;
/// every mutation rewrites the raw text and drops the split form.
#[derive(Debug, Clone)]
pub struct Note {
    path: PathBuf,
    raw: String,
    parsed: OnceCell<Split>,
    modified: Option<DateTime<Utc>>,
}

impl Note {
    pub fn new(path: impl Into<PathBuf>, raw: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            raw: raw.into(),
            parsed: OnceCell::new(),
            modified: None,
        }
    }

    /// Build a note from parts, fencing the metadata if there is any.
    pub fn compose(path: impl Into<PathBuf>, metadata: &Metadata, body: &str) -> Result<Self> {
        Ok(Self::new(path, frontmatter::compose(metadata, body)?))
    }

    pub fn with_modified(mut self, modified: Option<DateTime<Utc>>) -> Self {
        self.modified = modified;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without its extension.
    pub fn name(&self) -> String {
        note_name(&self.path)
    }

    pub fn raw_text(&self) -> &str {
        &self.raw
    }

    pub fn modified(&self) -> Option<DateTime<Utc>> {
        self.modified
    }

    /// Replace the full text; metadata and body are re-derived on next access.
    pub fn set_raw_text(&mut self, raw: impl Into<String>) {
        self.raw = raw.into();
        self.parsed = OnceCell::new();
    }

    fn split(&self) -> &Split {
        self.parsed.get_or_init(|| {
            let split = frontmatter::split(&self.raw);
            if let Some(error) = &split.error {
                tracing::warn!(path = %self.path.display(), %error, "ignoring malformed frontmatter");
            }
            split
        })
    }

    pub fn is_parsed(&self) -> bool {
        self.parsed.get().is_some()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.split().metadata
    }

    pub fn body(&self) -> &str {
        &self.split().body
    }

    /// Why the frontmatter block was discarded, if it was.
    pub fn frontmatter_error(&self) -> Option<&str> {
        self.split().error.as_deref()
    }

    pub fn tags(&self) -> Vec<&str> {
        self.metadata().tags()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.metadata().has_tag(tag)
    }

    /// Names this note links to, in order, duplicates kept.
    pub fn wiki_links(&self) -> Vec<String> {
        links::extract(self.body())
    }

    /// Whether the body holds a wiki-link to exactly `name`.
    pub fn links_to(&self, name: &str) -> bool {
        links::iter(self.body()).any(|link| link == name)
    }

    /// Set one frontmatter field, rewriting the raw text.
    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> Result<()> {
        let mut metadata = self.metadata().clone();
        metadata.insert(key, value);
        let body = self.body().to_string();
        self.rewrite(&metadata, &body)
    }

    /// Remove one frontmatter field, rewriting the raw text.
    pub fn remove_metadata(&mut self, key: &str) -> Result<Option<MetaValue>> {
        let mut metadata = self.metadata().clone();
        let removed = metadata.remove(key);
        if removed.is_some() {
            let body = self.body().to_string();
            self.rewrite(&metadata, &body)?;
        }
        Ok(removed)
    }

    /// Replace the body, keeping the frontmatter.
    pub fn set_body(&mut self, body: &str) -> Result<()> {
        let metadata = self.metadata().clone();
        self.rewrite(&metadata, body)
    }

    fn rewrite(&mut self, metadata: &Metadata, body: &str) -> Result<()> {
        let raw = frontmatter::compose(metadata, body)?;
        self.set_raw_text(raw);
        Ok(())
    }

    /// Notes in `vault` that link here. Re-reads the vault.
    pub fn get_backlinks<S: crate::store::NoteStore>(
        &self,
        vault: &crate::api::Vault<S>,
    ) -> Result<Vec<Note>> {
        vault.get_backlinks(self)
    }
}

/// Note name for a path: the file name without its final extension.
pub fn note_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_strips_extension() {
        let note = Note::new("/vault/sub/test_note.md", "Test content");
        assert_eq!(note.name(), "test_note");
        assert_eq!(note.body(), "Test content");
    }

    #[test]
    fn name_keeps_inner_dots() {
        let note = Note::new("/vault/v1.2 notes.md", "");
        assert_eq!(note.name(), "v1.2 notes");
    }

    #[test]
    fn parses_lazily() {
        let note = Note::new("a.md", "---\nstatus: open\n---\nbody");
        assert!(!note.is_parsed());
        assert_eq!(note.body(), "body");
        assert!(note.is_parsed());
    }

    #[test]
    fn replacing_raw_text_reparses() {
        let mut note = Note::new("a.md", "---\nstatus: open\n---\nfirst");
        assert_eq!(note.body(), "first");

        note.set_raw_text("second");
        assert!(!note.is_parsed());
        assert!(note.metadata().is_empty());
        assert_eq!(note.body(), "second");
    }

    #[test]
    fn empty_note_has_nothing() {
        let note = Note::new("empty.md", "");
        assert_eq!(note.body(), "");
        assert!(note.metadata().is_empty());
        assert!(note.wiki_links().is_empty());
    }

    #[test]
    fn set_metadata_adds_fence_to_plain_note() {
        let mut note = Note::new("a.md", "Content");
        note.set_metadata("status", "completed").unwrap();

        assert_eq!(
            note.metadata().get("status"),
            Some(&MetaValue::String("completed".into()))
        );
        assert_eq!(note.body(), "Content");
        assert_eq!(note.raw_text(), "---\nstatus: completed\n---\nContent");
    }

    #[test]
    fn set_metadata_overwrites_existing_key() {
        let mut note = Note::new("a.md", "---\nstatus: open\ntags:\n- x\n---\nBody");
        note.set_metadata("status", "done").unwrap();

        assert_eq!(
            note.metadata().get("status"),
            Some(&MetaValue::String("done".into()))
        );
        assert!(note.has_tag("x"));
        assert_eq!(note.body(), "Body");
    }

    #[test]
    fn removing_last_key_drops_fence() {
        let mut note = Note::new("a.md", "---\nstatus: open\n---\nBody");
        let removed = note.remove_metadata("status").unwrap();

        assert_eq!(removed, Some(MetaValue::String("open".into())));
        assert_eq!(note.raw_text(), "Body");
    }

    #[test]
    fn removing_missing_key_leaves_text_alone() {
        let raw = "---\nstatus:   open\n---\nBody";
        let mut note = Note::new("a.md", raw);
        assert_eq!(note.remove_metadata("nope").unwrap(), None);
        assert_eq!(note.raw_text(), raw);
    }

    #[test]
    fn set_body_keeps_metadata() {
        let mut note = Note::new("a.md", "---\nstatus: open\n---\nold");
        note.set_body("new [[Link]]").unwrap();
        assert_eq!(note.body(), "new [[Link]]");
        assert_eq!(note.wiki_links(), vec!["Link"]);
        assert!(note.metadata().contains_key("status"));
    }

    #[test]
    fn malformed_frontmatter_is_reported_not_raised() {
        let note = Note::new("bad.md", "---\nkey: [oops\n---\nbody");
        assert!(note.metadata().is_empty());
        assert_eq!(note.body(), "body");
        assert!(note.frontmatter_error().is_some());
    }

    #[test]
    fn tags_accept_scalar_or_list() {
        let list = Note::new("a.md", "---\ntags: [work, urgent]\n---\n");
        let scalar = Note::new("b.md", "---\ntags: work\n---\n");
        let other = Note::new("c.md", "---\ntags: [personal]\n---\n");

        assert!(list.has_tag("work"));
        assert!(scalar.has_tag("work"));
        assert!(!other.has_tag("work"));
        assert_eq!(list.tags(), vec!["work", "urgent"]);
        assert_eq!(scalar.tags(), vec!["work"]);
    }

    #[test]
    fn tag_match_is_exact() {
        let note = Note::new("a.md", "---\ntags: [Work, workshop]\n---\n");
        assert!(!note.has_tag("work"));
    }

    #[test]
    fn links_to_uses_exact_name() {
        let note = Note::new("a.md", "see [[Project Alpha|the project]]");
        assert!(note.links_to("Project Alpha"));
        assert!(!note.links_to("project alpha"));
        assert!(!note.links_to("the project"));
    }

    #[test]
    fn meta_value_parse_reads_yaml_scalars() {
        assert_eq!(MetaValue::parse("true"), MetaValue::Bool(true));
        assert_eq!(MetaValue::parse("42"), MetaValue::Integer(42));
        assert_eq!(MetaValue::parse("2.5"), MetaValue::Float(2.5));
        assert_eq!(
            MetaValue::parse("[a, b]"),
            MetaValue::from(vec!["a", "b"])
        );
        assert_eq!(
            MetaValue::parse("in progress"),
            MetaValue::String("in progress".into())
        );
        assert_eq!(MetaValue::parse(""), MetaValue::String(String::new()));
        assert_eq!(
            MetaValue::parse("[unclosed"),
            MetaValue::String("[unclosed".into())
        );
    }

    #[test]
    fn numeric_keys_become_strings() {
        let note = Note::new("a.md", "---\n2024: year\n---\n");
        assert_eq!(
            note.metadata().get("2024"),
            Some(&MetaValue::String("year".into()))
        );
    }

    #[test]
    fn nested_mappings_are_kept() {
        let note = Note::new("a.md", "---\nauthor:\n  name: Ada\n  langs: [en, fr]\n---\n");
        match note.metadata().get("author") {
            Some(MetaValue::Map(author)) => {
                assert_eq!(author.get("name"), Some(&MetaValue::String("Ada".into())));
                assert_eq!(author.get("langs"), Some(&MetaValue::from(vec!["en", "fr"])));
            }
            other => panic!("expected mapping, got {:?}", other),
        }
    }

    #[test]
    fn display_renders_lists_inline() {
        assert_eq!(MetaValue::from(vec!["a", "b"]).to_string(), "[a, b]");
        assert_eq!(MetaValue::Null.to_string(), "~");
    }

    #[test]
    fn large_unsigned_integers_survive_rewrite() {
        let mut note = Note::new("a.md", "---\nid: 18446744073709551615\n---\nbody");
        assert_eq!(note.metadata().get("id"), Some(&MetaValue::Unsigned(u64::MAX)));

        note.set_metadata("status", "done").unwrap();
        assert_eq!(
            note.raw_text(),
            "---\nid: 18446744073709551615\nstatus: done\n---\nbody"
        );
    }

    #[test]
    fn keys_colliding_after_stringify_are_malformed() {
        let note = Note::new("a.md", "---\n1: int\n'1': str\n---\nbody");
        assert!(note.metadata().is_empty());
        assert_eq!(note.body(), "body");
        assert!(note.frontmatter_error().unwrap().contains("duplicate key '1'"));
    }
}
