//! Deferred object deletion
//!
//! [`Scene::destroy_object`] only queues objects. Whatever owns the queue
//! reclaims them later, once no traversal of the current frame can still be
//! holding their handles.

use std::collections::BTreeSet;

use crate::foundation::collections::ObjectId;
use super::Scene;

/// Registry of objects awaiting reclamation
pub trait DeletionQueue {
    /// Queue an object; returns `false` if it was already queued
    fn enqueue_for_deletion(&mut self, object: ObjectId) -> bool;

    /// Whether an object is queued
    fn is_pending(&self, object: ObjectId) -> bool;
}

/// Set-backed [`DeletionQueue`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingDeletions {
    pending: BTreeSet<ObjectId>,
}

impl PendingDeletions {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued objects
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Queued objects in handle order
    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.pending.iter().copied()
    }

    /// Reclaim every queued object from `scene` and empty the registry
    ///
    /// Must run between frames. Handles that no longer resolve are skipped.
    /// Returns the number of objects reclaimed.
    pub fn drain_into(&mut self, scene: &mut Scene) -> usize {
        let mut reclaimed = 0;
        for object in std::mem::take(&mut self.pending) {
            if !scene.contains_object(object) {
                continue;
            }
            match scene.reclaim_object(object) {
                Ok(_) => reclaimed += 1,
                Err(e) => log::warn!("Failed to reclaim object {:?}: {}", object, e),
            }
        }
        if reclaimed > 0 {
            log::debug!("Reclaimed {} pending object(s)", reclaimed);
        }
        reclaimed
    }
}

impl DeletionQueue for PendingDeletions {
    fn enqueue_for_deletion(&mut self, object: ObjectId) -> bool {
        self.pending.insert(object)
    }

    fn is_pending(&self, object: ObjectId) -> bool {
        self.pending.contains(&object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enqueue_is_idempotent() {
        let mut scene = Scene::new();
        let object = scene.spawn_object();
        let mut pending = PendingDeletions::new();

        assert!(pending.enqueue_for_deletion(object));
        assert!(!pending.enqueue_for_deletion(object));
        assert_eq!(pending.len(), 1);
        assert_eq!(pending.iter().collect::<Vec<_>>(), vec![object]);
    }

    #[test]
    fn test_drain_reclaims_and_empties() {
        let mut scene = Scene::new();
        let keep = scene.spawn_object_with_root();
        let doomed = scene.spawn_object_with_root();
        let mut pending = PendingDeletions::new();
        pending.enqueue_for_deletion(doomed);

        assert_eq!(pending.drain_into(&mut scene), 1);
        assert!(pending.is_empty());
        assert!(scene.contains_object(keep));
        assert!(!scene.contains_object(doomed));
        assert_eq!(scene.component_count(), 1);
    }

    #[test]
    fn test_drain_skips_stale_handles() {
        let mut scene = Scene::new();
        let object = scene.spawn_object();
        let mut pending = PendingDeletions::new();
        pending.enqueue_for_deletion(object);
        scene.reclaim_object(object).unwrap();

        assert_eq!(pending.drain_into(&mut scene), 0);
        assert!(pending.is_empty());
    }
}
