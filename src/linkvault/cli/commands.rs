//! # CLI Layer
//!
//! This module is **one possible UI client** for linkvault; it is not the
//! application itself. It is the only place that:
//! - Parses arguments
//! - Installs the tracing subscriber
//! - Writes to stdout
//! - Turns "no such note" into an error
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `resolve_vault_root()`: Picks the vault directory
//! - `handle_*()`: Per-command handlers that call the API and print

use super::print::{
    print_config, print_info, print_links, print_note, print_notes, print_success, print_warning,
};
use super::setup::{Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use linkvault::api::Vault;
use linkvault::config::{Config, CONFIG_FILENAME, VAULT_CONFIG_DIR};
use linkvault::error::{Result, VaultError};
use linkvault::model::{MetaValue, Metadata, Note, TAGS_KEY};
use linkvault::store::fs::FsStore;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Vault root when `--vault` is not given.
pub const VAULT_ENV: &str = "LINKVAULT_DIR";
/// Overrides the user config directory.
pub const CONFIG_DIR_ENV: &str = "LINKVAULT_CONFIG_DIR";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let root = resolve_vault_root(cli.vault.clone())?;
    tracing::debug!(root = %root.display(), "resolved vault root");

    match cli.command.unwrap_or(Commands::List { tag: None }) {
        Commands::Init => handle_init(&root),
        Commands::Config { user, key, value } => handle_config(&root, user, key, value),
        command => {
            let vault = Vault::open(&root)?;
            dispatch(&vault, command)
        }
    }
}

fn dispatch(vault: &Vault<FsStore>, command: Commands) -> Result<()> {
    match command {
        Commands::List { tag } => handle_list(vault, tag),
        Commands::Show { name, raw } => handle_show(vault, &name, raw),
        Commands::Create {
            name,
            body,
            tags,
            meta,
        } => handle_create(vault, &name, body, tags, meta),
        Commands::Delete { name } => handle_delete(vault, &name),
        Commands::Search { query } => handle_search(vault, &query),
        Commands::Tag { tag } => handle_list(vault, Some(tag)),
        Commands::Backlinks { name } => handle_backlinks(vault, &name),
        Commands::Links { name } => handle_links(vault, &name),
        Commands::Set { name, key, value } => handle_set(vault, &name, &key, &value),
        Commands::Unset { name, key } => handle_unset(vault, &name, &key),
        Commands::Init | Commands::Config { .. } => Ok(()),
    }
}

/// `RUST_LOG` when set, otherwise warnings only. `--verbose` forces debug
/// output for this crate.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("linkvault=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn user_config_dir() -> Option<PathBuf> {
    std::env::var(CONFIG_DIR_ENV)
        .ok()
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            ProjectDirs::from("", "", "linkvault").map(|dirs| dirs.config_dir().to_path_buf())
        })
}

/// `--vault`, then `$LINKVAULT_DIR`, then the user config's `default_vault`,
/// then the current directory.
fn resolve_vault_root(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }
    if let Some(path) = std::env::var(VAULT_ENV).ok().filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    if let Some(dir) = user_config_dir() {
        if let Some(path) = Config::load(&dir)?.default_vault {
            return Ok(path);
        }
    }
    Ok(std::env::current_dir()?)
}

fn require(note: Option<Note>, name: &str) -> Result<Note> {
    note.ok_or_else(|| VaultError::NoteNotFound(name.to_string()))
}

fn handle_list(vault: &Vault<FsStore>, tag: Option<String>) -> Result<()> {
    let notes = match tag {
        Some(tag) => vault.get_notes_by_tag(&tag)?,
        None => vault.get_all_notes()?,
    };
    print_notes(vault.root(), &notes);
    Ok(())
}

fn handle_show(vault: &Vault<FsStore>, name: &str, raw: bool) -> Result<()> {
    let note = require(vault.get_note(name)?, name)?;
    if raw {
        print!("{}", note.raw_text());
    } else {
        print_note(vault.root(), &note);
    }
    Ok(())
}

fn handle_create(
    vault: &Vault<FsStore>,
    name: &str,
    body: Option<String>,
    tags: Vec<String>,
    meta: Vec<(String, String)>,
) -> Result<()> {
    let body = match body {
        Some(body) => body,
        None => read_piped_input()?,
    };

    let mut metadata = Metadata::new();
    for (key, value) in meta {
        metadata.insert(key, MetaValue::parse(&value));
    }
    if !tags.is_empty() {
        metadata.insert(TAGS_KEY, tags);
    }

    let metadata = (!metadata.is_empty()).then_some(metadata);
    let note = vault.create_note(name, &body, metadata.as_ref())?;
    print_success(&format!("Created note: {}", note.name()));
    print_info(&note.path().display().to_string());
    Ok(())
}

fn read_piped_input() -> Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }
    let mut buffer = String::new();
    stdin.read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn handle_delete(vault: &Vault<FsStore>, name: &str) -> Result<()> {
    if !vault.delete_note(name)? {
        return Err(VaultError::NoteNotFound(name.to_string()));
    }
    print_success(&format!("Deleted note: {}", name));
    Ok(())
}

fn handle_search(vault: &Vault<FsStore>, query: &str) -> Result<()> {
    let notes = vault.search_notes(query)?;
    print_notes(vault.root(), &notes);
    Ok(())
}

fn handle_backlinks(vault: &Vault<FsStore>, name: &str) -> Result<()> {
    let note = require(vault.get_note(name)?, name)?;
    let backlinks = note.get_backlinks(vault)?;
    print_notes(vault.root(), &backlinks);
    Ok(())
}

fn handle_links(vault: &Vault<FsStore>, name: &str) -> Result<()> {
    let snapshot = vault.snapshot()?;
    let note = snapshot
        .get_note(name)
        .ok_or_else(|| VaultError::NoteNotFound(name.to_string()))?;
    print_links(&snapshot.resolve_links(note));
    Ok(())
}

fn handle_set(vault: &Vault<FsStore>, name: &str, key: &str, value: &str) -> Result<()> {
    let note = require(vault.update_metadata(name, key, MetaValue::parse(value))?, name)?;
    print_success(&format!("Set {} on {}", key, note.name()));
    Ok(())
}

fn handle_unset(vault: &Vault<FsStore>, name: &str, key: &str) -> Result<()> {
    let before = require(vault.get_note(name)?, name)?;
    if !before.metadata().contains_key(key) {
        print_warning(&format!("{} has no field {}", before.name(), key));
        return Ok(());
    }
    let note = require(vault.remove_metadata(name, key)?, name)?;
    print_success(&format!("Removed {} from {}", key, note.name()));
    Ok(())
}

fn handle_config(root: &Path, user: bool, key: Option<String>, value: Option<String>) -> Result<()> {
    let dir = if user {
        user_config_dir().ok_or_else(|| {
            VaultError::Config("could not determine the user config directory".to_string())
        })?
    } else {
        root.join(VAULT_CONFIG_DIR)
    };
    let mut config = Config::load(&dir)?;

    match (key, value) {
        (None, _) => print_config(&config.entries()),
        (Some(key), None) => print_config(&[(key.as_str(), config.get(&key)?)]),
        (Some(key), Some(value)) => {
            config.set(&key, &value)?;
            config.save(&dir)?;
            print_success(&format!("Set {} = {}", key, value));
        }
    }
    Ok(())
}

fn handle_init(root: &Path) -> Result<()> {
    std::fs::create_dir_all(root)?;
    let dir = root.join(VAULT_CONFIG_DIR);
    if dir.join(CONFIG_FILENAME).exists() {
        print_info(&format!("Vault already initialized at {}", root.display()));
        return Ok(());
    }
    Config::default().save(&dir)?;
    print_success(&format!("Initialized vault at {}", root.display()));
    Ok(())
}
