//! redb-backed implementation of [`PostStore`].
//!
//! One table, keyed by post id, values postcard-encoded [`Post`] records.
//! Since ids are assigned in ascending order, the table's maximum key is
//! always the most recently created post, so `last()` is a single B-tree
//! descent rather than a scan.

use crate::clock::{Clock, SystemClock};
use crate::post::{Post, PostDraft, PostId};
use crate::store::{validate_draft, PostStore, StoreError};
use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use std::path::Path;

/// The posts table: id -> postcard-encoded post.
const POSTS: TableDefinition<u64, &[u8]> = TableDefinition::new("posts");

/// Disk-backed post store.
///
/// Every operation runs in its own transaction; a failed create leaves the
/// database untouched.
pub struct RedbStore {
    db: Database,
    clock: Box<dyn Clock>,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore")
            .field("clock", &self.clock)
            .finish()
    }
}

impl RedbStore {
    /// Open (or create) a database at the given path, on the system clock.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open_with_clock(path, Box::new(SystemClock))
    }

    /// Open (or create) a database with an injected clock.
    ///
    /// The posts table is created up front so later read transactions never
    /// observe a missing table.
    pub fn open_with_clock(
        path: impl AsRef<Path>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, StoreError> {
        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        write_txn.open_table(POSTS)?;
        write_txn.commit()?;

        Ok(Self { db, clock })
    }

    fn decode(bytes: &[u8]) -> Result<Post, StoreError> {
        Ok(postcard::from_bytes(bytes)?)
    }
}

impl PostStore for RedbStore {
    fn create(&mut self, draft: PostDraft) -> Result<Post, StoreError> {
        validate_draft(&draft)?;

        let write_txn = self.db.begin_write()?;
        let post = {
            let mut table = write_txn.open_table(POSTS)?;

            let id = match table.last()? {
                Some((key, _)) => PostId(key.value()).next(),
                None => PostId(1),
            };

            let post = Post::from_draft(id, draft, self.clock.now());
            let bytes = postcard::to_allocvec(&post)?;
            table.insert(id.0, bytes.as_slice())?;
            post
        };
        write_txn.commit()?;

        Ok(post)
    }

    fn get(&self, id: PostId) -> Result<Option<Post>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(POSTS)?;

        match table.get(id.0)? {
            Some(guard) => Ok(Some(Self::decode(guard.value())?)),
            None => Ok(None),
        }
    }

    fn last(&self) -> Result<Option<Post>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(POSTS)?;

        match table.last()? {
            Some((_, guard)) => Ok(Some(Self::decode(guard.value())?)),
            None => Ok(None),
        }
    }

    fn all(&self) -> Result<Vec<Post>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(POSTS)?;

        let mut posts = Vec::new();
        for entry in table.iter()? {
            let (_, guard) = entry?;
            posts.push(Self::decode(guard.value())?);
        }
        Ok(posts)
    }

    fn delete(&mut self, id: PostId) -> Result<bool, StoreError> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(POSTS)?;
            table.remove(id.0)?.is_some()
        };
        write_txn.commit()?;

        Ok(removed)
    }

    fn len(&self) -> Result<u64, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(POSTS)?;
        Ok(table.len()?)
    }
}

// =============================================================================
// TESTS
// =============================================================================
