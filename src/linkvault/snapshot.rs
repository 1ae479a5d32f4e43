//! A point-in-time copy of every note in a vault.
//!
//! [`Vault`](crate::api::Vault) re-reads the store on every call. A
//! [`VaultSnapshot`] reads it once and answers the same queries from memory,
//! which suits callers that run many lookups at once (backlink panes, tag
//! clouds, link checkers). It never notices later changes on disk; take a new
//! one to refresh.

use crate::commands::{backlinks, get, helpers::note_file_name, search, tags};
use crate::model::Note;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct VaultSnapshot {
    root: PathBuf,
    file_ext: String,
    notes: Vec<Note>,
}

impl VaultSnapshot {
    /// `notes` must already be in sorted path order.
    pub fn new(root: impl Into<PathBuf>, file_ext: impl Into<String>, notes: Vec<Note>) -> Self {
        Self {
            root: root.into(),
            file_ext: file_ext.into(),
            notes,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Same lookup rules as [`Vault::get_note`](crate::api::Vault::get_note).
    pub fn get_note(&self, name: &str) -> Option<&Note> {
        let file_name = note_file_name(name, &self.file_ext);
        self.notes
            .iter()
            .find(|note| get::matches(&self.root, note.path(), &file_name))
    }

    pub fn search_notes(&self, query: &str) -> Vec<&Note> {
        let query_lower = query.to_lowercase();
        self.notes
            .iter()
            .filter(|note| search::matches(note, &query_lower))
            .collect()
    }

    pub fn get_notes_by_tag(&self, tag: &str) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|note| tags::matches(note, tag))
            .collect()
    }

    pub fn get_backlinks(&self, note: &Note) -> Vec<&Note> {
        let name = note.name();
        self.notes
            .iter()
            .filter(|candidate| backlinks::matches(candidate, &name))
            .collect()
    }

    /// Each distinct wiki-link target in `note`, in first-seen order, paired
    /// with whether a note by that name exists.
    pub fn resolve_links(&self, note: &Note) -> Vec<(String, bool)> {
        let mut resolved: Vec<(String, bool)> = Vec::new();
        for link in note.wiki_links() {
            if resolved.iter().any(|(seen, _)| *seen == link) {
                continue;
            }
            let exists = self.get_note(&link).is_some();
            resolved.push((link, exists));
        }
        resolved
    }

    /// Every tag in use with the number of notes carrying it.
    pub fn tag_counts(&self) -> BTreeMap<String, usize> {
        tags::counts(&self.notes)
    }
}
