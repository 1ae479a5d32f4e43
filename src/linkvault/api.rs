//! # Vault Facade
//!
//! [`Vault`] is the single entry point for all note operations. It is a thin
//! facade: each method dispatches to a function in `commands/`.
//!
//! ## Cost Contract
//!
//! **There is no index and no cache.** Every call lists the store and reads
//! the notes it needs from scratch, so a call always reflects what is on disk
//! at that moment, including edits made by other programs. The price is that
//! `search_notes`, `get_notes_by_tag` and `get_backlinks` read every note in
//! the vault on every call.
//!
//! Callers that want to run many queries against one consistent view should
//! take a [`VaultSnapshot`] with [`Vault::snapshot`] and query that instead.
//!
//! ## Generic Over NoteStore
//!
//! - Production: `Vault<FsStore>`, built with [`Vault::open`]
//! - Testing: `Vault<MemStore>`, built with [`Vault::new`]
//!
//! ## Concurrency
//!
//! None. A `Vault` is meant for one thread, and nothing guards against other
//! processes writing the same files between calls.

use crate::commands;
use crate::config::Config;
use crate::error::{Result, VaultError};
use crate::model::{MetaValue, Metadata, Note};
use crate::snapshot::VaultSnapshot;
use crate::store::fs::FsStore;
use crate::store::NoteStore;
use std::fs;
use std::path::{Path, PathBuf};

pub struct Vault<S: NoteStore> {
    store: S,
    config: Config,
}

impl Vault<FsStore> {
    /// Open the vault rooted at `root`, reading its `.linkvault/config.json`.
    ///
    /// Fails with [`VaultError::InvalidRoot`] if `root` is missing or is not a
    /// directory.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = check_root(root.as_ref())?;
        let config = Config::load_for_vault(&root)?;
        Self::open_with_config(root, &config)
    }

    /// Open the vault rooted at `root` with an explicit config.
    pub fn open_with_config(root: impl AsRef<Path>, config: &Config) -> Result<Self> {
        let root = check_root(root.as_ref())?;
        let store = FsStore::new(root).with_file_ext(config.file_ext());
        Self::with_config(store, config.clone())
    }
}

fn check_root(root: &Path) -> Result<PathBuf> {
    if !root.exists() {
        return Err(invalid_root(root, "path does not exist"));
    }
    if !root.is_dir() {
        return Err(invalid_root(root, "path is not a directory"));
    }
    fs::canonicalize(root).map_err(VaultError::Io)
}

fn invalid_root(path: &Path, reason: &str) -> VaultError {
    VaultError::InvalidRoot {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

impl<S: NoteStore> Vault<S> {
    /// Wrap a store. Fails if the store's root is not an existing directory.
    pub fn new(store: S) -> Result<Self> {
        let mut config = Config::default();
        config.set_file_ext(store.file_ext());
        Self::with_config(store, config)
    }

    fn with_config(store: S, config: Config) -> Result<Self> {
        let root = store.root();
        if !store.exists(root) {
            return Err(invalid_root(root, "path does not exist"));
        }
        if !store.is_dir(root) {
            return Err(invalid_root(root, "path is not a directory"));
        }
        tracing::debug!(root = %root.display(), ext = store.file_ext(), "opened vault");
        Ok(Self { store, config })
    }

    pub fn root(&self) -> &Path {
        self.store.root()
    }

    pub fn file_ext(&self) -> &str {
        self.store.file_ext()
    }

    /// Settings the vault was opened with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Look up a note by name (extension optional). First match in sorted
    /// path order wins when the name repeats across folders.
    pub fn get_note(&self, name: &str) -> Result<Option<Note>> {
        commands::get::run(&self.store, name)
    }

    /// Every note under the root, recursively, sorted by path.
    pub fn get_all_notes(&self) -> Result<Vec<Note>> {
        commands::list::run(&self.store)
    }

    /// Write `<root>/<name>`, overwriting. Frontmatter is written only for
    /// non-empty `metadata`.
    pub fn create_note(
        &self,
        name: &str,
        content: &str,
        metadata: Option<&Metadata>,
    ) -> Result<Note> {
        commands::create::run(&self.store, name, content, metadata)
    }

    /// Delete the note `get_note(name)` resolves to. False if none.
    pub fn delete_note(&self, name: &str) -> Result<bool> {
        commands::delete::run(&self.store, name)
    }

    /// Notes whose full text (frontmatter included) contains `query`,
    /// ignoring case.
    pub fn search_notes(&self, query: &str) -> Result<Vec<Note>> {
        commands::search::run(&self.store, query)
    }

    /// Notes whose `tags` field is `tag` or a list containing it.
    pub fn get_notes_by_tag(&self, tag: &str) -> Result<Vec<Note>> {
        commands::tags::run(&self.store, tag)
    }

    /// Notes whose body links to `note` by name.
    pub fn get_backlinks(&self, note: &Note) -> Result<Vec<Note>> {
        commands::backlinks::run(&self.store, note)
    }

    /// Write a (possibly mutated) note back to its file.
    pub fn save_note(&self, note: &Note) -> Result<()> {
        commands::update::save(&self.store, note)
    }

    /// Set one frontmatter field on the named note and save it.
    pub fn update_metadata(
        &self,
        name: &str,
        key: &str,
        value: impl Into<MetaValue>,
    ) -> Result<Option<Note>> {
        commands::update::set_metadata(&self.store, name, key, value.into())
    }

    /// Remove one frontmatter field from the named note and save it.
    pub fn remove_metadata(&self, name: &str, key: &str) -> Result<Option<Note>> {
        commands::update::remove_metadata(&self.store, name, key)
    }

    /// Read every note once into a snapshot for repeated querying.
    pub fn snapshot(&self) -> Result<VaultSnapshot> {
        let notes = self.get_all_notes()?;
        Ok(VaultSnapshot::new(self.root(), self.file_ext(), notes))
    }
}
