use super::helpers::load_all;
use crate::error::Result;
use crate::model::Note;
use crate::store::NoteStore;
use std::collections::BTreeMap;

/// A note carries `tag` when its `tags` field is that string, or a list
/// holding it. Comparison is exact.
pub fn matches(note: &Note, tag: &str) -> bool {
    note.has_tag(tag)
}

pub fn run<S: NoteStore>(store: &S, tag: &str) -> Result<Vec<Note>> {
    Ok(load_all(store)?
        .into_iter()
        .filter(|note| matches(note, tag))
        .collect())
}

/// Every tag in use with the number of notes carrying it.
pub fn counts(notes: &[Note]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for note in notes {
        let mut seen: Vec<&str> = Vec::new();
        for tag in note.tags() {
            if !seen.contains(&tag) {
                seen.push(tag);
                *counts.entry(tag.to_string()).or_insert(0) += 1;
            }
        }
    }
    counts
}
