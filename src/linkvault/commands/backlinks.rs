use super::helpers::load_all;
use crate::error::Result;
use crate::model::Note;
use crate::store::NoteStore;

/// Whether `note` links to `target_name`. Exact, case-sensitive comparison
/// against the name, never the path.
pub fn matches(note: &Note, target_name: &str) -> bool {
    note.links_to(target_name)
}

/// Notes linking to `target`, found by scanning every note.
///
/// A note that links to itself is included.
pub fn run<S: NoteStore>(store: &S, target: &Note) -> Result<Vec<Note>> {
    let name = target.name();
    let found: Vec<Note> = load_all(store)?
        .into_iter()
        .filter(|note| matches(note, &name))
        .collect();
    tracing::debug!(note = %name, count = found.len(), "resolved backlinks");
    Ok(found)
}
