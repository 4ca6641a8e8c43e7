//! # Post Entity
//!
//! The single persisted entity of the system.
//!
//! A [`Post`] carries two textual fields plus store-assigned identity and
//! timestamps. The one derived value, [`Post::summary`], is computed on
//! demand from the in-memory fields and is never cached or persisted.

use serde::{Deserialize, Serialize};

/// Separator placed between title and description in a summary.
pub const SUMMARY_SEPARATOR: &str = " - ";

// =============================================================================
// IDENTITY AND TIME
// =============================================================================

/// Store-assigned post identifier.
///
/// Identifiers are assigned monotonically by the store backend, so a higher
/// id always means a later creation. Application code never picks ids.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct PostId(pub u64);

impl PostId {
    /// The next id in sequence, saturating at the maximum.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Creation/modification time in whole seconds since the Unix epoch.
///
/// Timestamps are assigned by the store's [`Clock`](crate::clock::Clock) on
/// creation; application logic never sets them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Seconds since the Unix epoch.
    #[must_use]
    pub fn as_secs(self) -> u64 {
        self.0
    }
}

// =============================================================================
// DRAFT AND ENTITY
// =============================================================================

/// Field values for a post that has not been persisted yet.
///
/// Both fields are non-optional: an "absent" title or description is
/// unrepresentable by construction. Empty strings are legal input and the
/// summary concatenation rule applies to them literally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    /// Post title, free-form text, no length constraint.
    pub title: String,

    /// Post description, free-form text, no length constraint.
    pub description: String,
}

impl PostDraft {
    /// Create a draft from the two field values.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// A persisted post.
///
/// Values of this type only come out of a store: the id and both timestamps
/// are assigned during [`PostStore::create`](crate::store::PostStore::create).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Store-assigned identifier.
    pub id: PostId,

    /// Post title.
    pub title: String,

    /// Post description.
    pub description: String,

    /// Set once, when the post is created.
    pub created_at: Timestamp,

    /// Equal to `created_at` until a modification operation exists.
    pub updated_at: Timestamp,
}

impl Post {
    /// Assemble a post from a draft plus store-assigned identity and time.
    ///
    /// Store backends call this during `create`; it is not an entry point
    /// for application code.
    #[must_use]
    pub fn from_draft(id: PostId, draft: PostDraft, created_at: Timestamp) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            created_at,
            updated_at: created_at,
        }
    }

    /// The derived summary: `title`, the literal `" - "`, then `description`.
    ///
    /// Pure function of the current in-memory field values. It is recomputed
    /// on every call, never cached, and never written to storage.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out =
            String::with_capacity(self.title.len() + SUMMARY_SEPARATOR.len() + self.description.len());
        out.push_str(&self.title);
        out.push_str(SUMMARY_SEPARATOR);
        out.push_str(&self.description);
        out
    }
}

// =============================================================================
// TESTS
// =============================================================================
