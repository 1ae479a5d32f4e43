//! # CLI Behavior
//!
//! The binary is a thin client over [`linkvault::api::Vault`]. All terminal
//! I/O, exit codes and argument parsing live here.
//!
//! ## Naked Execution (`linkvault`)
//!
//! Running with no subcommand lists every note in the vault.
//!
//! ## Picking the Vault
//!
//! 1. `--vault <PATH>`
//! 2. `$LINKVAULT_DIR`
//! 3. `default_vault` from the user config (`linkvault config --user`)
//! 4. The current directory
//!
//! `init` and `config` work before the vault directory exists; every other
//! command fails with an invalid-root error if it is missing.
//!
//! ## Create
//!
//! The body comes from the second argument, or from stdin when piped:
//!
//! ```text
//! echo "see [[Plan]]" | linkvault create Meeting -t work -m status=draft
//! ```
//!
//! `--meta` and `set` values are read as YAML, so `-m priority=2` stores an
//! integer and `-m "aliases=[a, b]"` a list.
//!
//! ## Logging
//!
//! Diagnostics go to stderr through `tracing`. `RUST_LOG` picks the level;
//! `-v` turns on debug output.

mod commands;
mod print;
pub mod setup;

pub use commands::run;
