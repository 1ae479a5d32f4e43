use super::helpers::load_all;
use crate::error::Result;
use crate::model::Note;
use crate::store::NoteStore;

/// Case-insensitive substring match over the note's full text, frontmatter
/// included. `query_lower` must already be lowercased.
pub fn matches(note: &Note, query_lower: &str) -> bool {
    note.raw_text().to_lowercase().contains(query_lower)
}

pub fn run<S: NoteStore>(store: &S, query: &str) -> Result<Vec<Note>> {
    let query_lower = query.to_lowercase();
    let found: Vec<Note> = load_all(store)?
        .into_iter()
        .filter(|note| matches(note, &query_lower))
        .collect();
    tracing::debug!(query, hits = found.len(), "searched notes");
    Ok(found)
}
