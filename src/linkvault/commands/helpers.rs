use crate::error::{Result, VaultError};
use crate::model::Note;
use crate::store::NoteStore;
use std::path::{Component, Path, PathBuf};

/// File name for a note name: `.` components are dropped, then the store's
/// extension is appended unless already present.
pub fn note_file_name(name: &str, ext: &str) -> String {
    let name = normalize_name(name);
    if name.ends_with(ext) {
        name
    } else {
        format!("{}{}", name, ext)
    }
}

/// `name` without `.` components, so `./Note` and `Note` are one note.
pub fn normalize_name(name: &str) -> String {
    Path::new(name)
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect::<PathBuf>()
        .to_string_lossy()
        .into_owned()
}

/// Reject names that would escape the vault root or name nothing.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(VaultError::InvalidNoteName(
            "name cannot be empty".to_string(),
        ));
    }
    let path = Path::new(name);
    if !path.components().any(|c| matches!(c, Component::Normal(_))) {
        return Err(VaultError::InvalidNoteName(format!(
            "'{}' does not name a note",
            name
        )));
    }
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            _ => {
                return Err(VaultError::InvalidNoteName(format!(
                    "'{}' must be relative to the vault root",
                    name
                )))
            }
        }
    }
    Ok(())
}

/// Note paths in lexicographic order.
///
/// Stores list in whatever order the underlying system gives; sorting here
/// makes "first match" well defined when names repeat across folders.
pub fn sorted_paths<S: NoteStore>(store: &S) -> Result<Vec<PathBuf>> {
    let mut paths = store.list_notes()?;
    paths.sort();
    Ok(paths)
}

/// Read one note from the store.
pub fn load_note<S: NoteStore>(store: &S, path: &Path) -> Result<Note> {
    let raw = store.read_note(path)?;
    let modified = store.modified(path)?;
    Ok(Note::new(path, raw).with_modified(modified))
}

/// Read every note in the vault, in sorted path order.
pub fn load_all<S: NoteStore>(store: &S) -> Result<Vec<Note>> {
    sorted_paths(store)?
        .iter()
        .map(|path| load_note(store, path))
        .collect()
}
