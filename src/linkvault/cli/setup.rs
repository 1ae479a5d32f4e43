use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "linkvault", bin_name = "linkvault", version)]
#[command(
    about = "Query a folder of Markdown notes by frontmatter, tags and wiki-links",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Vault root directory (defaults to $LINKVAULT_DIR, then the configured
    /// default vault, then the current directory)
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub vault: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// List notes
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Only notes carrying this tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Print a note
    #[command(alias = "v", display_order = 2)]
    Show {
        /// Note name, with or without extension
        name: String,

        /// Print the file text as stored
        #[arg(long)]
        raw: bool,
    },

    /// Create or overwrite a note
    #[command(alias = "n", display_order = 3)]
    Create {
        /// Note name, relative to the vault root
        name: String,

        /// Note body (read from stdin when piped and omitted)
        body: Option<String>,

        /// Tag to add (repeatable)
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Frontmatter field as key=value (repeatable)
        #[arg(short, long = "meta", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        meta: Vec<(String, String)>,
    },

    /// Delete a note
    #[command(alias = "rm", display_order = 4)]
    Delete { name: String },

    /// Find notes containing text (case-insensitive)
    #[command(display_order = 5)]
    Search { query: String },

    /// List notes carrying a tag
    #[command(display_order = 6)]
    Tag { tag: String },

    /// List notes linking to a note
    #[command(alias = "bl", display_order = 7)]
    Backlinks { name: String },

    /// List a note's wiki-links and whether each target exists
    #[command(display_order = 8)]
    Links { name: String },

    /// Set a frontmatter field (value is read as YAML)
    #[command(display_order = 9)]
    Set {
        name: String,
        key: String,
        value: String,
    },

    /// Remove a frontmatter field
    #[command(display_order = 10)]
    Unset { name: String, key: String },

    /// Show or change configuration
    #[command(display_order = 20)]
    Config {
        /// Use the user config instead of the vault's
        #[arg(long)]
        user: bool,

        key: Option<String>,
        value: Option<String>,
    },

    /// Create the vault directory and its config file
    #[command(display_order = 21)]
    Init,
}

fn parse_key_value(input: &str) -> Result<(String, String), String> {
    match input.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", input)),
    }
}
