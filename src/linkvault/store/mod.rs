//! # Storage Layer
//!
//! The vault never touches the filesystem directly. Everything it needs from
//! its environment goes through the [`NoteStore`] trait:
//!
//! - recursive listing of note files under the root
//! - reading and writing a note's full text
//! - deleting a note
//! - existence checks
//!
//! ## Implementations
//!
//! - [`fs::FsStore`]: Production store over a local directory
//!   - Recursive listing via `walkdir`, filtered by note extension
//!   - Writes go to a temp file and are renamed into place
//!
//! - [`memory::MemStore`]: In-memory store for testing
//!   - No persistence
//!   - Can simulate write failures
//!
//! Paths handed out by a store are absolute within the store's namespace and
//! always lie under [`NoteStore::root`]. Listing order is up to the store;
//! the vault sorts before it picks anything.

use crate::error::Result;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

pub mod fs;
pub mod memory;

/// Abstract interface for note file I/O.
///
/// All methods take `&self`; stores that keep state use interior mutability.
pub trait NoteStore {
    /// The vault root all note paths live under.
    fn root(&self) -> &Path;

    /// Extension (with leading dot) that marks a file as a note.
    fn file_ext(&self) -> &str;

    /// Every note file under the root, recursively.
    fn list_notes(&self) -> Result<Vec<PathBuf>>;

    /// Full text of a note.
    fn read_note(&self, path: &Path) -> Result<String>;

    /// Write a note's full text, creating parent directories as needed.
    fn write_note(&self, path: &Path, content: &str) -> Result<()>;

    /// Remove a note file.
    fn delete_note(&self, path: &Path) -> Result<()>;

    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Last modification time, when the store tracks one.
    fn modified(&self, path: &Path) -> Result<Option<DateTime<Utc>>>;
}

/// Whether `path` carries the note extension `ext` (e.g. `.md`).
pub fn has_note_ext(path: &Path, ext: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.len() > ext.len() && name.ends_with(ext))
}

/// Normalize an extension to start with a dot.
pub fn normalize_ext(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{}", ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_ext_matches_suffix() {
        assert!(has_note_ext(Path::new("/v/a.md"), ".md"));
        assert!(has_note_ext(Path::new("/v/sub/a b.md"), ".md"));
        assert!(!has_note_ext(Path::new("/v/a.txt"), ".md"));
        assert!(!has_note_ext(Path::new("/v/a.MD"), ".md"));
        assert!(!has_note_ext(Path::new("/v/.md"), ".md"));
    }

    #[test]
    fn ext_gets_leading_dot() {
        assert_eq!(normalize_ext("md"), ".md");
        assert_eq!(normalize_ext(".txt"), ".txt");
    }
}
