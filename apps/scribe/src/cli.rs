//! # CLI Commands
//!
//! Each command is a plain function taking values, so integration tests can
//! call them directly without spawning the binary.
//!
//! Two backends are recognized by name:
//! - `file` - the whole store is a snapshot file; load into a `MemoryStore`,
//!   mutate, write back
//! - `redb` - operations go straight to the embedded database

use scribe_core::formats::{decode_snapshot, encode_snapshot, FormatError, StoreSnapshot};
use scribe_core::{MemoryStore, Post, PostDraft, PostId, PostStore, RedbStore, StoreError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The store backend reported a failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A snapshot file could not be encoded or decoded.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Reading or writing a snapshot file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output could not be rendered.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend name is not `file` or `redb`.
    #[error("unknown backend {0:?}, expected \"file\" or \"redb\"")]
    UnknownBackend(String),

    /// `init` refused to clobber an existing database.
    #[error("database already exists at {0} (use --force to overwrite)")]
    AlreadyExists(PathBuf),
}

// =============================================================================
// STORE HANDLE
// =============================================================================

/// An open store plus enough context to persist it again.
///
/// The redb backend persists on every operation; the file backend persists
/// only when [`save_store`] is called after mutation.
pub enum StoreHandle {
    /// Snapshot-file backend, held in memory between load and save.
    File {
        /// The loaded store.
        store: MemoryStore,
        /// Where the snapshot is written back to.
        path: PathBuf,
    },
    /// Direct redb backend.
    Redb(RedbStore),
}

impl StoreHandle {
    /// The store as the persistence-collaborator trait object.
    pub fn store(&self) -> &dyn PostStore {
        match self {
            Self::File { store, .. } => store,
            Self::Redb(store) => store,
        }
    }

    /// Mutable access to the store.
    pub fn store_mut(&mut self) -> &mut dyn PostStore {
        match self {
            Self::File { store, .. } => store,
            Self::Redb(store) => store,
        }
    }
}

/// Load a store from disk, or start an empty one if the path is missing.
pub fn load_or_create_store(db_path: &Path, backend: &str) -> Result<StoreHandle, CliError> {
    match backend {
        "file" => {
            let store = if db_path.exists() {
                let bytes = std::fs::read(db_path)?;
                let snapshot = decode_snapshot(&bytes)?;
                debug!(posts = snapshot.posts.len(), "loaded snapshot");
                MemoryStore::from_snapshot(snapshot)
            } else {
                MemoryStore::new()
            };
            Ok(StoreHandle::File {
                store,
                path: db_path.to_path_buf(),
            })
        }
        "redb" => Ok(StoreHandle::Redb(RedbStore::open(db_path)?)),
        other => Err(CliError::UnknownBackend(other.to_string())),
    }
}

/// Persist a store after mutation.
///
/// No-op for the redb backend, which commits on every operation.
pub fn save_store(handle: &StoreHandle) -> Result<(), CliError> {
    match handle {
        StoreHandle::File { store, path } => {
            let bytes = encode_snapshot(&store.to_snapshot())?;
            std::fs::write(path, bytes)?;
            debug!(path = %path.display(), "wrote snapshot");
            Ok(())
        }
        StoreHandle::Redb(_) => Ok(()),
    }
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

fn print_post(post: &Post, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(post)?);
    } else {
        println!("post {}: {}", post.id, post.summary());
        println!("  title:       {}", post.title);
        println!("  description: {}", post.description);
        println!("  created_at:  {}", post.created_at.as_secs());
    }
    Ok(())
}

fn print_missing(json: bool) -> Result<(), CliError> {
    if json {
        println!("null");
    } else {
        println!("no post found");
    }
    Ok(())
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Initialize a new database file.
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn cmd_init(db_path: &Path, backend: &str, force: bool) -> Result<(), CliError> {
    if db_path.exists() {
        if !force {
            return Err(CliError::AlreadyExists(db_path.to_path_buf()));
        }
        std::fs::remove_file(db_path)?;
    }

    match backend {
        "file" => {
            let bytes = encode_snapshot(&StoreSnapshot::empty())?;
            std::fs::write(db_path, bytes)?;
        }
        "redb" => {
            let _store = RedbStore::open(db_path)?;
        }
        other => return Err(CliError::UnknownBackend(other.to_string())),
    }

    info!(path = %db_path.display(), backend, "initialized database");
    println!("initialized {} database at {}", backend, db_path.display());
    Ok(())
}

/// Create a post from the two field values and print it.
pub fn cmd_create(
    db_path: &Path,
    backend: &str,
    json: bool,
    title: &str,
    description: &str,
) -> Result<(), CliError> {
    let mut handle = load_or_create_store(db_path, backend)?;

    let post = handle
        .store_mut()
        .create(PostDraft::new(title, description))?;
    save_store(&handle)?;

    info!(id = post.id.0, "created post");
    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
    } else {
        println!("created post {}: {}", post.id, post.summary());
    }
    Ok(())
}

/// Show one post by id.
pub fn cmd_show(db_path: &Path, backend: &str, json: bool, id: u64) -> Result<(), CliError> {
    let handle = load_or_create_store(db_path, backend)?;

    match handle.store().get(PostId(id))? {
        Some(post) => print_post(&post, json),
        None => print_missing(json),
    }
}

/// Show the most recently created post.
pub fn cmd_last(db_path: &Path, backend: &str, json: bool) -> Result<(), CliError> {
    let handle = load_or_create_store(db_path, backend)?;

    match handle.store().last()? {
        Some(post) => print_post(&post, json),
        None => print_missing(json),
    }
}

/// List all posts in id order.
pub fn cmd_list(db_path: &Path, backend: &str, json: bool) -> Result<(), CliError> {
    let handle = load_or_create_store(db_path, backend)?;
    let posts = handle.store().all()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
    } else if posts.is_empty() {
        println!("no posts");
    } else {
        for post in &posts {
            println!("post {}: {}", post.id, post.summary());
        }
    }
    Ok(())
}

/// Print just the derived summary of one post.
pub fn cmd_summary(db_path: &Path, backend: &str, json: bool, id: u64) -> Result<(), CliError> {
    let handle = load_or_create_store(db_path, backend)?;

    match handle.store().get(PostId(id))? {
        Some(post) => {
            if json {
                println!("{}", serde_json::json!({ "summary": post.summary() }));
            } else {
                println!("{}", post.summary());
            }
            Ok(())
        }
        None => print_missing(json),
    }
}

/// Delete one post by id.
pub fn cmd_delete(db_path: &Path, backend: &str, id: u64) -> Result<(), CliError> {
    let mut handle = load_or_create_store(db_path, backend)?;

    let removed = handle.store_mut().delete(PostId(id))?;
    save_store(&handle)?;

    if removed {
        info!(id, "deleted post");
        println!("deleted post {id}");
    } else {
        println!("no post with id {id}");
    }
    Ok(())
}

/// Print store status: backend, path, post count.
pub fn cmd_status(db_path: &Path, backend: &str, json: bool) -> Result<(), CliError> {
    let handle = load_or_create_store(db_path, backend)?;
    let count = handle.store().len()?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "backend": backend,
                "path": db_path.display().to_string(),
                "posts": count,
            })
        );
    } else {
        println!("backend: {backend}");
        println!("path:    {}", db_path.display());
        println!("posts:   {count}");
    }
    Ok(())
}
