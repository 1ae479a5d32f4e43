use super::helpers::{note_file_name, validate_name};
use crate::error::Result;
use crate::model::{Metadata, Note};
use crate::store::NoteStore;

/// Write a note at `<root>/<name><ext>`, replacing any file already there.
///
/// A frontmatter block is written only when `metadata` is given and non-empty.
/// No folder lookup happens: a same-named note elsewhere in the vault is left
/// alone.
pub fn run<S: NoteStore>(
    store: &S,
    name: &str,
    content: &str,
    metadata: Option<&Metadata>,
) -> Result<Note> {
    validate_name(name)?;
    let path = store.root().join(note_file_name(name, store.file_ext()));

    let note = match metadata {
        Some(metadata) => Note::compose(&path, metadata, content)?,
        None => Note::new(&path, content),
    };
    store.write_note(&path, note.raw_text())?;
    tracing::debug!(name, path = %path.display(), "created note");

    let modified = store.modified(&path)?;
    Ok(note.with_modified(modified))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::get;
    use crate::error::VaultError;
    use crate::model::MetaValue;
    use crate::store::memory::MemStore;

    #[test]
    fn creates_plain_note() {
        let store = MemStore::new();
        let note = run(&store, "Test Note", "Test content", None).unwrap();

        assert_eq!(note.name(), "Test Note");
        assert_eq!(note.path(), store.root().join("Test Note.md"));
        assert!(store.exists(note.path()));
        assert_eq!(store.read_note(note.path()).unwrap(), "Test content");
    }

    #[test]
    fn creates_note_with_frontmatter() {
        let store = MemStore::new();
        let metadata: Metadata = [
            ("title", MetaValue::from("My Title")),
            ("tags", MetaValue::from(vec!["test", "example"])),
            ("date", MetaValue::from("2026-01-06")),
        ]
        .into_iter()
        .collect();

        run(&store, "Frontmatter Note", "Body content", Some(&metadata)).unwrap();

        let loaded = get::run(&store, "Frontmatter Note").unwrap().unwrap();
        assert_eq!(
            loaded.metadata().get("title"),
            Some(&MetaValue::String("My Title".into()))
        );
        assert!(loaded.has_tag("test"));
        assert_eq!(loaded.body(), "Body content");
        assert_eq!(loaded.metadata(), &metadata);
    }

    #[test]
    fn empty_metadata_writes_no_fence() {
        let store = MemStore::new();
        let note = run(&store, "Plain", "body", Some(&Metadata::new())).unwrap();
        assert_eq!(store.read_note(note.path()).unwrap(), "body");
    }

    #[test]
    fn overwrites_existing_note() {
        let store = MemStore::new();
        run(&store, "Same", "first", None).unwrap();
        run(&store, "Same", "second", None).unwrap();

        assert_eq!(store.file_count(), 1);
        let note = get::run(&store, "Same").unwrap().unwrap();
        assert_eq!(note.body(), "second");
    }

    #[test]
    fn writes_at_root_even_if_name_exists_in_subfolder() {
        let store = MemStore::new();
        store.add_file("archive/Idea.md", "old");

        let note = run(&store, "Idea", "new", None).unwrap();
        assert_eq!(note.path(), store.root().join("Idea.md"));
        assert_eq!(
            store.read_note(&store.root().join("archive/Idea.md")).unwrap(),
            "old"
        );
    }

    #[test]
    fn name_with_extension_is_not_doubled() {
        let store = MemStore::new();
        let note = run(&store, "Done.md", "", None).unwrap();
        assert_eq!(note.path(), store.root().join("Done.md"));
    }

    #[test]
    fn current_dir_prefix_writes_at_root() {
        let store = MemStore::new();
        let note = run(&store, "./Note", "body", None).unwrap();
        assert_eq!(note.path(), store.root().join("Note.md"));

        let found = get::run(&store, "./Note").unwrap().unwrap();
        assert_eq!(found.path(), note.path());
        assert_eq!(get::run(&store, "Note").unwrap().unwrap().body(), "body");
    }

    #[test]
    fn rejects_names_outside_root() {
        let store = MemStore::new();
        assert!(matches!(
            run(&store, "../outside", "", None),
            Err(VaultError::InvalidNoteName(_))
        ));
        assert!(matches!(
            run(&store, "", "", None),
            Err(VaultError::InvalidNoteName(_))
        ));
        assert_eq!(store.file_count(), 0);
    }

    #[test]
    fn write_errors_propagate() {
        let store = MemStore::new();
        store.set_simulate_write_error(true);
        assert!(matches!(
            run(&store, "Nope", "", None),
            Err(VaultError::Store(_))
        ));
    }
}
