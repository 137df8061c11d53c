// Passbox — CLI module
//
// Command-line interface using clap derive macros.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::execute;

/// Passbox — a local password manager.
#[derive(Parser, Debug)]
#[command(name = "passbox")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Override the database file location (defaults to the platform data
    /// directory).
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the data directory and database, and print where they live.
    Init,

    /// Add a new entry to the store.
    Add {
        /// The service the credential belongs to (e.g., "github").
        #[arg(long)]
        service: String,

        /// The account username or email.
        #[arg(long)]
        username: String,

        /// The password. Omit it and pass --generate to have one made up.
        #[arg(long)]
        secret: Option<String>,

        /// Generate a random password instead of supplying one.
        #[arg(long)]
        generate: bool,

        /// The login page URL.
        #[arg(long)]
        url: Option<String>,

        /// Free-form notes.
        #[arg(long)]
        notes: Option<String>,
    },

    /// List all entries, most recently updated first.
    List {
        /// Emit the full records as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Search entries by service or username substring (case-insensitive).
    Search {
        /// The text to look for.
        query: String,

        /// Emit the matches as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show one entry, including its password.
    Show {
        /// The id of the entry to show.
        id: String,

        /// Emit the record as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Update fields of an existing entry.
    Update {
        /// The id of the entry to update.
        id: String,

        #[arg(long)]
        service: Option<String>,

        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        secret: Option<String>,

        #[arg(long)]
        url: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete an entry by id. Deleting a missing entry is not an error.
    Delete {
        /// The id of the entry to delete.
        id: String,
    },

    /// Show how many entries are stored.
    Stats,

    /// Remove every entry from the store.
    Clear {
        /// Confirm the wipe; without this flag nothing happens.
        #[arg(long)]
        yes: bool,
    },

    /// Generate a random password without storing anything.
    Generate {
        /// Password length.
        #[arg(long, default_value = "16")]
        length: usize,

        /// Leave out symbol characters.
        #[arg(long)]
        no_symbols: bool,

        /// Leave out digits.
        #[arg(long)]
        no_digits: bool,

        /// Leave out uppercase letters.
        #[arg(long)]
        no_uppercase: bool,
    },

    /// Write every entry (secrets included) to a JSON backup.
    Export {
        /// Destination file; stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Restore entries from a JSON backup produced by `export`.
    Import {
        /// The backup file to read.
        file: PathBuf,
    },
}
