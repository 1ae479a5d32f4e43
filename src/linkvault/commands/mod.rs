//! # Command Layer
//!
//! Each vault operation lives in its own submodule as plain functions over a
//! [`NoteStore`](crate::store::NoteStore). The [`Vault`](crate::api::Vault)
//! facade only dispatches here.
//!
//! ## Shape of a command
//!
//! Query commands are split in two:
//! - a pure predicate (`matches`) over one [`Note`](crate::model::Note), used both
//!   by the command and by [`VaultSnapshot`](crate::snapshot::VaultSnapshot)
//! - a `run` function that materializes every note once via
//!   [`helpers::load_all`] and filters with the predicate
//!
//! Nothing here caches. Every `run` lists and reads the store afresh, so edits
//! made outside the process are always seen.
//!
//! ## What Commands Do NOT Do
//!
//! - **Terminal I/O**: No stdout, stderr or formatting
//! - **Exit codes**: Return `Result`, let the caller decide
//!
//! ## Testing Strategy
//!
//! Command tests use [`MemStore`](crate::store::memory::MemStore) and cover
//! the edge cases; filesystem behavior is covered by the integration tests.
//!
//! ## Command Modules
//!
//! - [`get`]: Look up one note by name
//! - [`list`]: Every note in the vault
//! - [`create`]: Write a new note (overwrites)
//! - [`delete`]: Remove a note by name
//! - [`search`]: Case-insensitive substring search
//! - [`tags`]: Filter by frontmatter tag
//! - [`backlinks`]: Notes linking to a note
//! - [`update`]: Save notes and edit frontmatter fields
//! - [`helpers`]: Name normalization and note loading

pub mod backlinks;
pub mod create;
pub mod delete;
pub mod get;
pub mod helpers;
pub mod list;
pub mod search;
pub mod tags;
pub mod update;
