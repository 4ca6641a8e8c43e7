//! # Memory Backend
//!
//! `BTreeMap`-backed post store.
//!
//! The in-memory backend is the deterministic reference implementation of
//! [`PostStore`]: iteration order is the id order, the next-id counter is
//! explicit state, and the clock is injected. It also converts to and from
//! [`StoreSnapshot`] so the app layer can persist it as a flat file.

use crate::clock::{Clock, SystemClock};
use crate::formats::StoreSnapshot;
use crate::post::{Post, PostDraft, PostId};
use crate::store::{validate_draft, PostStore, StoreError};
use std::collections::BTreeMap;

/// In-memory post store.
///
/// Uses `BTreeMap` for deterministic ordering; `all()` comes out sorted
/// by id with no extra work.
#[derive(Debug)]
pub struct MemoryStore {
    /// Post storage: id -> post.
    posts: BTreeMap<PostId, Post>,

    /// The id the next created post will receive.
    next_id: PostId,

    /// Timestamp source for `create`.
    clock: Box<dyn Clock>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store on the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    /// Create an empty store with an injected clock.
    #[must_use]
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            posts: BTreeMap::new(),
            next_id: PostId(1),
            clock,
        }
    }

    /// Capture the store contents as a snapshot for serialization.
    #[must_use]
    pub fn to_snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            posts: self.posts.values().cloned().collect(),
            next_id: self.next_id,
        }
    }

    /// Rebuild a store from a snapshot, on the system clock.
    #[must_use]
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self::from_snapshot_with_clock(snapshot, Box::new(SystemClock))
    }

    /// Rebuild a store from a snapshot with an injected clock.
    ///
    /// The next-id counter is taken from the snapshot but never allowed to
    /// fall at or below the highest stored id, so a hand-edited snapshot
    /// cannot make `create` reuse an identifier.
    #[must_use]
    pub fn from_snapshot_with_clock(snapshot: StoreSnapshot, clock: Box<dyn Clock>) -> Self {
        let mut posts = BTreeMap::new();
        let mut floor = PostId(1);
        for post in snapshot.posts {
            if post.id >= floor {
                floor = post.id.next();
            }
            posts.insert(post.id, post);
        }

        Self {
            posts,
            next_id: snapshot.next_id.max(floor),
            clock,
        }
    }
}

impl PostStore for MemoryStore {
    fn create(&mut self, draft: PostDraft) -> Result<Post, StoreError> {
        validate_draft(&draft)?;

        let id = self.next_id;
        self.next_id = self.next_id.next();

        let post = Post::from_draft(id, draft, self.clock.now());
        self.posts.insert(id, post.clone());
        Ok(post)
    }

    fn get(&self, id: PostId) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.get(&id).cloned())
    }

    fn last(&self) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.values().next_back().cloned())
    }

    fn all(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self.posts.values().cloned().collect())
    }

    fn delete(&mut self, id: PostId) -> Result<bool, StoreError> {
        Ok(self.posts.remove(&id).is_some())
    }

    fn len(&self) -> Result<u64, StoreError> {
        Ok(self.posts.len() as u64)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::post::Timestamp;

    fn fixed_store(secs: u64) -> MemoryStore {
        MemoryStore::with_clock(Box::new(FixedClock::at(secs)))
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let mut store = fixed_store(10);

        let first = store.create(PostDraft::new("a", "1")).expect("create");
        let second = store.create(PostDraft::new("b", "2")).expect("create");

        assert_eq!(first.id, PostId(1));
        assert_eq!(second.id, PostId(2));
    }

    #[test]
    fn create_assigns_clock_timestamps() {
        let mut store = fixed_store(1_234);

        let post = store.create(PostDraft::new("t", "d")).expect("create");

        assert_eq!(post.created_at, Timestamp(1_234));
        assert_eq!(post.updated_at, Timestamp(1_234));
    }

    #[test]
    fn last_after_single_creation_matches_created_post() {
        let mut store = fixed_store(5);

        let created = store
            .create(PostDraft::new("My title", "The post description"))
            .expect("create");
        let fetched = store.last().expect("last").expect("some post");

        assert_eq!(fetched, created);
        assert_eq!(fetched.summary(), "My title - The post description");
    }

    #[test]
    fn last_returns_newest_of_many() {
        let mut store = fixed_store(5);
        store.create(PostDraft::new("a", "1")).expect("create");
        let newest = store.create(PostDraft::new("b", "2")).expect("create");

        assert_eq!(store.last().expect("last"), Some(newest));
    }

    #[test]
    fn last_on_empty_store_is_none() {
        let store = fixed_store(5);
        assert_eq!(store.last().expect("last"), None);
    }

    #[test]
    fn all_returns_posts_in_id_order() {
        let mut store = fixed_store(5);
        store.create(PostDraft::new("a", "1")).expect("create");
        store.create(PostDraft::new("b", "2")).expect("create");
        store.create(PostDraft::new("c", "3")).expect("create");

        let ids: Vec<_> = store.all().expect("all").iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PostId(1), PostId(2), PostId(3)]);
    }

    #[test]
    fn get_missing_id_is_none() {
        let store = fixed_store(5);
        assert_eq!(store.get(PostId(999)).expect("get"), None);
    }

    #[test]
    fn delete_removes_and_reports_absence() {
        let mut store = fixed_store(5);
        let post = store.create(PostDraft::new("t", "d")).expect("create");

        assert!(store.delete(post.id).expect("delete"));
        assert!(!store.delete(post.id).expect("delete"));
        assert!(store.is_empty().expect("is_empty"));
    }

    #[test]
    fn deleted_ids_are_not_reused() {
        let mut store = fixed_store(5);
        let first = store.create(PostDraft::new("a", "1")).expect("create");
        store.delete(first.id).expect("delete");

        let second = store.create(PostDraft::new("b", "2")).expect("create");
        assert_eq!(second.id, PostId(2));
    }

    #[test]
    fn snapshot_roundtrip_preserves_posts_and_counter() {
        let mut store = fixed_store(5);
        store.create(PostDraft::new("a", "1")).expect("create");
        let second = store.create(PostDraft::new("b", "2")).expect("create");

        let restored = MemoryStore::from_snapshot_with_clock(
            store.to_snapshot(),
            Box::new(FixedClock::at(9)),
        );

        assert_eq!(restored.all().expect("all"), store.all().expect("all"));
        assert_eq!(restored.last().expect("last"), Some(second));

        let mut restored = restored;
        let third = restored.create(PostDraft::new("c", "3")).expect("create");
        assert_eq!(third.id, PostId(3));
    }

    #[test]
    fn from_snapshot_repairs_stale_counter() {
        let mut store = fixed_store(5);
        store.create(PostDraft::new("a", "1")).expect("create");
        store.create(PostDraft::new("b", "2")).expect("create");

        let mut snapshot = store.to_snapshot();
        snapshot.next_id = PostId(1); // stale counter

        let mut restored = MemoryStore::from_snapshot_with_clock(snapshot, Box::new(FixedClock::at(9)));
        let created = restored.create(PostDraft::new("c", "3")).expect("create");
        assert_eq!(created.id, PostId(3));
    }
}
