use super::helpers::{load_note, note_file_name, sorted_paths};
use crate::error::Result;
use crate::model::Note;
use crate::store::NoteStore;
use std::path::Path;

/// Whether the note file at `path` answers to `file_name` (a note name with
/// its extension already applied).
///
/// A bare name is compared against file names only, so a note in any folder
/// can match. A name with folders in it (`projects/Plan.md`) must match the
/// path relative to `root` exactly.
pub fn matches(root: &Path, path: &Path, file_name: &str) -> bool {
    let wanted = Path::new(file_name);
    if wanted.components().count() > 1 {
        path.strip_prefix(root)
            .is_ok_and(|relative| relative == wanted)
    } else {
        path.file_name() == Some(wanted.as_os_str())
    }
}

/// Find a note by name, with or without the note extension.
///
/// When several folders hold the same name, the first in sorted path order
/// wins. Only the matching file is read.
pub fn run<S: NoteStore>(store: &S, name: &str) -> Result<Option<Note>> {
    let file_name = note_file_name(name, store.file_ext());
    let found = sorted_paths(store)?
        .into_iter()
        .find(|path| matches(store.root(), path, &file_name));

    match found {
        Some(path) => load_note(store, &path).map(Some),
        None => {
            tracing::debug!(name, "note not found");
            Ok(None)
        }
    }
}
