//! # Linkvault Architecture
//!
//! Linkvault treats a directory tree of Markdown files as a queryable set of
//! notes. Each note may start with a YAML frontmatter block and may link to
//! other notes with `[[Name]]` or `[[Name|label]]`. Queries cover lookup by
//! name, full-text search, tag filtering and backlinks.
//!
//! It is a library first; the `linkvault` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs, snapshot.rs)                            │
//! │  - Vault facade over commands                               │
//! │  - VaultSnapshot for many queries over one read             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Predicates over Notes plus a `run` that rescans the store│
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - NoteStore trait                                          │
//! │  - FsStore (production), MemStore (testing)                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Notes Are Parsed Lazily
//!
//! A [`model::Note`] is built from its path and raw text. The frontmatter is
//! split off the first time metadata or body is asked for, then kept.
//! Malformed frontmatter never fails a read: the note gets empty metadata and
//! the text after the block as body, while the parse error is kept on the
//! note and logged as a warning.
//!
//! ## No Index
//!
//! Nothing is cached between calls. See [`api`] for the cost this implies
//! and [`snapshot`] for the alternative.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): Unit tests over `MemStore`; most edge
//!    cases live here.
//! 2. **API** (`api.rs`): Dispatch and end-to-end flows over `MemStore`.
//! 3. **Integration** (`tests/`): Real directories via `tempfile`, and the
//!    binary via `assert_cmd`.
//!
//! ## Module Overview
//!
//! - [`api`]: The `Vault` facade, entry point for all operations
//! - [`snapshot`]: In-memory copy of a vault for repeated queries
//! - [`commands`]: Logic for each operation
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: `Note`, `Metadata` and `MetaValue`
//! - [`frontmatter`]: Splitting and composing the YAML block
//! - [`links`]: Wiki-link extraction
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod frontmatter;
pub mod links;
pub mod model;
pub mod snapshot;
pub mod store;
