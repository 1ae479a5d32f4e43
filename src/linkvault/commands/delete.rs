use super::get;
use crate::error::Result;
use crate::store::NoteStore;

/// Delete the note `get` resolves `name` to. Returns false if there is none.
pub fn run<S: NoteStore>(store: &S, name: &str) -> Result<bool> {
    let Some(note) = get::run(store, name)? else {
        return Ok(false);
    };
    store.delete_note(note.path())?;
    tracing::debug!(name, path = %note.path().display(), "deleted note");
    Ok(true)
}
