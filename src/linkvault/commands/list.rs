use super::helpers::load_all;
use crate::error::Result;
use crate::model::Note;
use crate::store::NoteStore;

/// Every note under the vault root, in sorted path order.
pub fn run<S: NoteStore>(store: &S) -> Result<Vec<Note>> {
    let notes = load_all(store)?;
    tracing::debug!(count = notes.len(), "loaded notes");
    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemStore;

    #[test]
    fn lists_notes_recursively() {
        let store = MemStore::new();
        store.add_file("Note 1.md", "Content 1");
        store.add_file("projects/Note 2.md", "Content 2");
        store.add_file("projects/deep/Note 3.md", "Content 3");
        store.add_file("attachments/diagram.png", "binary");

        let notes = run(&store).unwrap();
        let names: Vec<String> = notes.iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["Note 1", "Note 2", "Note 3"]);
    }

    #[test]
    fn empty_vault_lists_nothing() {
        let store = MemStore::new();
        assert!(run(&store).unwrap().is_empty());
    }

    #[test]
    fn duplicate_names_are_both_listed() {
        let store = MemStore::new();
        store.add_file("a/Same.md", "first");
        store.add_file("b/Same.md", "second");

        let notes = run(&store).unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].body(), "first");
        assert_eq!(notes[1].body(), "second");
    }
}
