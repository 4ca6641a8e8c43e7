//! # Store Contract
//!
//! The persistence collaborator for posts.
//!
//! [`PostStore`] is the explicit, injected replacement for the usual
//! inherited-base-class persistence: anything that can create, fetch, and
//! delete posts satisfies it. The trait is object safe and every backend
//! shares the concrete [`StoreError`], so callers can hold a
//! `Box<dyn PostStore>` opened from configuration.

use crate::post::{Post, PostDraft, PostId};
use thiserror::Error;

// =============================================================================
// ERRORS
// =============================================================================

/// Rejection of a draft by the store.
///
/// The store defines no validation rules today, so this is API surface
/// rather than a reachable failure: `validate_draft` accepts every draft.
/// The variant exists so callers handle rejection uniformly if rules are
/// ever added.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid post: {reason}")]
pub struct ValidationError {
    /// Human-readable reason the draft was rejected.
    pub reason: String,
}

/// Errors surfaced by store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The draft was rejected before persisting.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backing database could not be opened or created.
    #[error("database error: {0}")]
    Database(#[from] redb::DatabaseError),

    /// A transaction could not be started.
    #[error("transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    /// The posts table could not be opened.
    #[error("table error: {0}")]
    Table(#[from] redb::TableError),

    /// Reading or writing the underlying storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] redb::StorageError),

    /// A transaction commit failed.
    #[error("commit error: {0}")]
    Commit(#[from] redb::CommitError),

    /// A stored record could not be encoded or decoded.
    #[error("codec error: {0}")]
    Codec(#[from] postcard::Error),
}

/// Validate a draft before it is persisted.
///
/// The tutorial contract defines no rules, so every draft passes; empty
/// strings are explicitly legal. Backends still route creation through
/// here so the rejection path stays uniform.
pub fn validate_draft(_draft: &PostDraft) -> Result<(), ValidationError> {
    Ok(())
}

// =============================================================================
// POSTSTORE TRAIT
// =============================================================================

/// The persistence collaborator contract.
///
/// Ids are assigned monotonically by the store, so "most recently created"
/// and "highest id" are the same post. Reads never mutate the store.
pub trait PostStore {
    /// Validate and persist a draft.
    ///
    /// Assigns the next id and both timestamps. Fails with
    /// [`StoreError::Validation`] when the draft is rejected.
    fn create(&mut self, draft: PostDraft) -> Result<Post, StoreError>;

    /// Fetch a post by id.
    fn get(&self, id: PostId) -> Result<Option<Post>, StoreError>;

    /// Fetch the most recently created post, if any.
    fn last(&self) -> Result<Option<Post>, StoreError>;

    /// Fetch all posts in ascending id order.
    fn all(&self) -> Result<Vec<Post>, StoreError>;

    /// Delete a post by id. Returns `false` when the id was absent.
    fn delete(&mut self, id: PostId) -> Result<bool, StoreError>;

    /// Number of stored posts.
    fn len(&self) -> Result<u64, StoreError>;

    /// Whether the store holds no posts.
    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

// =============================================================================
// TESTS
// =============================================================================
