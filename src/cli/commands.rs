// Passbox — CLI command handlers
//
// Each function handles one subcommand against the shared store handle.
// The store auto-initializes on first use: every command opens (creating
// if absent) the database, so `init` is only needed to see where it lives.

use std::path::PathBuf;

use uuid::Uuid;

use crate::error::PassboxError;
use crate::generator::{generate_password, PasswordSpec};
use crate::store::{Entry, EntryPatch, NewEntry, Store};

use super::{Cli, Commands};

/// Default directory for passbox data files.
fn data_dir() -> PathBuf {
    let base = dirs_next::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("passbox")
}

/// Resolve the database path, honoring the --db override.
fn db_path(override_path: Option<PathBuf>) -> PathBuf {
    override_path.unwrap_or_else(|| data_dir().join("passbox.db"))
}

/// Open (creating if absent) the store at the resolved path.
fn open_store(override_path: Option<PathBuf>) -> Result<Store, PassboxError> {
    let path = db_path(override_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(Store::open(&path)?)
}

/// Execute the parsed CLI command.
pub async fn execute(cli: Cli) -> Result<(), PassboxError> {
    let db = cli.db;
    match cli.command {
        Commands::Init => cmd_init(db),
        Commands::Add {
            service,
            username,
            secret,
            generate,
            url,
            notes,
        } => cmd_add(db, service, username, secret, generate, url, notes).await,
        Commands::List { json } => cmd_list(db, json).await,
        Commands::Search { query, json } => cmd_search(db, query, json).await,
        Commands::Show { id, json } => cmd_show(db, id, json).await,
        Commands::Update {
            id,
            service,
            username,
            secret,
            url,
            notes,
        } => cmd_update(db, id, service, username, secret, url, notes).await,
        Commands::Delete { id } => cmd_delete(db, id).await,
        Commands::Stats => cmd_stats(db).await,
        Commands::Clear { yes } => cmd_clear(db, yes).await,
        Commands::Generate {
            length,
            no_symbols,
            no_digits,
            no_uppercase,
        } => cmd_generate(length, no_symbols, no_digits, no_uppercase),
        Commands::Export { output } => cmd_export(db, output).await,
        Commands::Import { file } => cmd_import(db, file).await,
    }
}

// ─── Init ────────────────────────────────────────────────────────────────────

fn cmd_init(db: Option<PathBuf>) -> Result<(), PassboxError> {
    let path = db_path(db.clone());
    let _store = open_store(db)?;

    println!("✓ passbox initialized");
    println!("  Database: {}", path.display());
    println!();
    println!("Next: add an entry with `passbox add --service <name> --username <user> --secret <password>`");

    Ok(())
}

// ─── Add ─────────────────────────────────────────────────────────────────────

async fn cmd_add(
    db: Option<PathBuf>,
    service: String,
    username: String,
    secret: Option<String>,
    generate: bool,
    url: Option<String>,
    notes: Option<String>,
) -> Result<(), PassboxError> {
    let (secret, generated) = match (secret, generate) {
        (Some(s), false) => (s, false),
        (None, true) => (generate_password(&PasswordSpec::default())?, true),
        (Some(_), true) => {
            return Err(PassboxError::Other(
                "pass either --secret or --generate, not both".to_string(),
            ))
        }
        (None, false) => {
            return Err(PassboxError::Other(
                "a password is required: pass --secret <value> or --generate".to_string(),
            ))
        }
    };

    let store = open_store(db)?;
    let entry = store
        .add(NewEntry {
            service: service.clone(),
            username,
            secret: secret.clone(),
            url,
            notes,
        })
        .await?;

    println!("✓ Entry stored");
    println!("  ID:      {}", entry.id);
    println!("  Service: {}", service);
    if generated {
        println!("  Password (generated): {}", secret);
    }

    Ok(())
}

// ─── List & search ───────────────────────────────────────────────────────────

fn print_entries(entries: &[Entry]) {
    for entry in entries {
        println!(
            "  {} │ {:16} │ {:16} │ updated {}",
            entry.id,
            entry.service,
            entry.username,
            entry.updated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        );
    }
}

async fn cmd_list(db: Option<PathBuf>, json: bool) -> Result<(), PassboxError> {
    let store = open_store(db)?;
    let entries = store.list().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No entries stored yet.");
        println!("Add one with: passbox add --service <name> --username <user> --secret <password>");
        return Ok(());
    }

    println!("Stored entries ({}):\n", entries.len());
    print_entries(&entries);
    Ok(())
}

async fn cmd_search(db: Option<PathBuf>, query: String, json: bool) -> Result<(), PassboxError> {
    let store = open_store(db)?;
    let entries = store.search(&query).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No entries match '{}'.", query.trim());
        return Ok(());
    }

    println!("Matches for '{}' ({}):\n", query.trim(), entries.len());
    print_entries(&entries);
    Ok(())
}

// ─── Show ────────────────────────────────────────────────────────────────────

async fn cmd_show(db: Option<PathBuf>, id_str: String, json: bool) -> Result<(), PassboxError> {
    let id = parse_id(&id_str)?;
    let store = open_store(db)?;

    let Some(entry) = store.get(&id).await? else {
        println!("Entry not found: {}", id);
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
        return Ok(());
    }

    println!("Entry details:\n");
    println!("  ID:       {}", entry.id);
    println!("  Service:  {}", entry.service);
    println!("  Username: {}", entry.username);
    println!("  Password: {}", entry.secret);
    if let Some(ref url) = entry.url {
        println!("  URL:      {}", url);
    }
    if let Some(ref notes) = entry.notes {
        println!("  Notes:    {}", notes);
    }
    println!("  Created:  {}", entry.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("  Updated:  {}", entry.updated_at.format("%Y-%m-%d %H:%M:%S UTC"));

    Ok(())
}

// ─── Update ──────────────────────────────────────────────────────────────────

async fn cmd_update(
    db: Option<PathBuf>,
    id_str: String,
    service: Option<String>,
    username: Option<String>,
    secret: Option<String>,
    url: Option<String>,
    notes: Option<String>,
) -> Result<(), PassboxError> {
    let id = parse_id(&id_str)?;
    let patch = EntryPatch {
        service,
        username,
        secret,
        url,
        notes,
    };
    if patch.is_empty() {
        return Err(PassboxError::Other(
            "nothing to update: pass at least one field flag".to_string(),
        ));
    }

    let store = open_store(db)?;
    let entry = store.update(&id, patch).await?;

    println!("✓ Entry {} updated", entry.id);
    println!("  Service:  {}", entry.service);
    println!("  Username: {}", entry.username);
    println!("  Updated:  {}", entry.updated_at.format("%Y-%m-%d %H:%M:%S UTC"));

    Ok(())
}

// ─── Delete ──────────────────────────────────────────────────────────────────

async fn cmd_delete(db: Option<PathBuf>, id_str: String) -> Result<(), PassboxError> {
    let id = parse_id(&id_str)?;
    let store = open_store(db)?;

    if store.delete(&id).await? {
        println!("✓ Entry {} deleted", id);
    } else {
        println!("Entry not found: {} (nothing to delete)", id);
    }

    Ok(())
}

// ─── Stats & clear ───────────────────────────────────────────────────────────

async fn cmd_stats(db: Option<PathBuf>) -> Result<(), PassboxError> {
    let store = open_store(db)?;
    let stats = store.stats().await?;

    println!("Entries stored: {}", stats.total);
    if !stats.has_entries {
        println!("The store is empty.");
    }

    Ok(())
}

async fn cmd_clear(db: Option<PathBuf>, yes: bool) -> Result<(), PassboxError> {
    if !yes {
        return Err(PassboxError::Other(
            "this removes every entry; re-run with --yes to confirm".to_string(),
        ));
    }

    let store = open_store(db)?;
    store.clear().await?;
    println!("✓ All entries removed");

    Ok(())
}

// ─── Generate ────────────────────────────────────────────────────────────────

fn cmd_generate(
    length: usize,
    no_symbols: bool,
    no_digits: bool,
    no_uppercase: bool,
) -> Result<(), PassboxError> {
    let spec = PasswordSpec {
        length,
        lowercase: true,
        uppercase: !no_uppercase,
        digits: !no_digits,
        symbols: !no_symbols,
    };
    println!("{}", generate_password(&spec)?);
    Ok(())
}

// ─── Export & import ─────────────────────────────────────────────────────────

async fn cmd_export(db: Option<PathBuf>, output: Option<PathBuf>) -> Result<(), PassboxError> {
    let store = open_store(db)?;
    let entries = store.list().await?;
    let json = serde_json::to_string_pretty(&entries)?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)?;
            println!("✓ Exported {} entries to {}", entries.len(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

async fn cmd_import(db: Option<PathBuf>, file: PathBuf) -> Result<(), PassboxError> {
    let data = std::fs::read_to_string(&file)?;
    let entries: Vec<Entry> = serde_json::from_str(&data)?;

    let store = open_store(db)?;
    for entry in &entries {
        store.restore(entry).await?;
    }

    println!("✓ Imported {} entries from {}", entries.len(), file.display());
    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn parse_id(raw: &str) -> Result<Uuid, PassboxError> {
    Uuid::parse_str(raw).map_err(|e| PassboxError::Other(format!("invalid entry id: {}", e)))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
