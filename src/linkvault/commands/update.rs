use super::get;
use crate::error::{Result, VaultError};
use crate::model::{MetaValue, Note};
use crate::store::NoteStore;

/// Write a note's current text back to its path.
pub fn save<S: NoteStore>(store: &S, note: &Note) -> Result<()> {
    if !note.path().starts_with(store.root()) {
        return Err(VaultError::Store(format!(
            "{} is outside the vault root {}",
            note.path().display(),
            store.root().display()
        )));
    }
    store.write_note(note.path(), note.raw_text())?;
    tracing::debug!(path = %note.path().display(), "saved note");
    Ok(())
}

/// Set one frontmatter field on the named note and save it.
/// Returns the updated note, or `None` if no note has that name.
pub fn set_metadata<S: NoteStore>(
    store: &S,
    name: &str,
    key: &str,
    value: MetaValue,
) -> Result<Option<Note>> {
    let Some(mut note) = get::run(store, name)? else {
        return Ok(None);
    };
    note.set_metadata(key, value)?;
    save(store, &note)?;
    Ok(Some(note))
}

/// Remove one frontmatter field from the named note, saving only if the
/// field was there. Returns the note, or `None` if no note has that name.
pub fn remove_metadata<S: NoteStore>(store: &S, name: &str, key: &str) -> Result<Option<Note>> {
    let Some(mut note) = get::run(store, name)? else {
        return Ok(None);
    };
    if note.remove_metadata(key)?.is_some() {
        save(store, &note)?;
    }
    Ok(Some(note))
}
