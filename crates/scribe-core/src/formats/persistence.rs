//! Binary snapshot format: a fixed header followed by postcard bytes.
//!
//! Layout:
//! - bytes 0..4: magic `SCRB`
//! - byte 4: format version
//! - bytes 5..: postcard encoding of [`StoreSnapshot`]
//!
//! The header makes stale or foreign files fail loudly instead of decoding
//! into garbage posts.

use crate::post::{Post, PostId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Magic bytes at the start of every snapshot file.
pub const SNAPSHOT_MAGIC: [u8; 4] = *b"SCRB";

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u8 = 1;

/// Serializable contents of a memory store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// All posts, ascending id order.
    pub posts: Vec<Post>,

    /// The id the next created post will receive.
    pub next_id: PostId,
}

impl StoreSnapshot {
    /// An empty snapshot, as written by a fresh `init`.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            posts: Vec::new(),
            next_id: PostId(1),
        }
    }
}

/// Errors produced while encoding or decoding snapshots.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The input is shorter than the fixed header.
    #[error("snapshot truncated: {len} bytes, header needs {}", HEADER_LEN)]
    Truncated {
        /// Number of bytes actually present.
        len: usize,
    },

    /// The magic bytes do not match; this is not a snapshot file.
    #[error("bad magic: not a scribe snapshot")]
    BadMagic,

    /// The file was written by an unknown format version.
    #[error("unsupported snapshot version {0}, expected {SNAPSHOT_VERSION}")]
    UnsupportedVersion(u8),

    /// The payload failed to encode or decode.
    #[error("codec error: {0}")]
    Codec(#[from] postcard::Error),
}

const HEADER_LEN: usize = SNAPSHOT_MAGIC.len() + 1;

/// Encode a snapshot with the versioned header.
pub fn encode_snapshot(snapshot: &StoreSnapshot) -> Result<Vec<u8>, FormatError> {
    let payload = postcard::to_allocvec(snapshot)?;

    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(&SNAPSHOT_MAGIC);
    out.push(SNAPSHOT_VERSION);
    out.extend_from_slice(&payload);
    Ok(out)
}

/// Decode a snapshot, checking magic and version first.
pub fn decode_snapshot(bytes: &[u8]) -> Result<StoreSnapshot, FormatError> {
    if bytes.len() < HEADER_LEN {
        return Err(FormatError::Truncated { len: bytes.len() });
    }
    if bytes[..SNAPSHOT_MAGIC.len()] != SNAPSHOT_MAGIC {
        return Err(FormatError::BadMagic);
    }
    let version = bytes[SNAPSHOT_MAGIC.len()];
    if version != SNAPSHOT_VERSION {
        return Err(FormatError::UnsupportedVersion(version));
    }

    Ok(postcard::from_bytes(&bytes[HEADER_LEN..])?)
}

// =============================================================================
// TESTS
// =============================================================================
