//! Frame driver
//!
//! Bundles a [`Scene`] with the deletion registry that object destruction
//! feeds, and sequences a frame: update every live object, then reclaim
//! whatever was destroyed during the frame.

use crate::config::RuntimeConfig;
use crate::foundation::collections::ObjectId;
use crate::scene::{DeletionQueue, PendingDeletions, Scene, SceneResult};

/// Scene plus pending-deletion bookkeeping
#[derive(Debug, Default)]
pub struct World {
    scene: Scene,
    pending: PendingDeletions,
    frame_count: u64,
}

impl World {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a world with arenas sized from the runtime config
    pub fn with_config(config: &RuntimeConfig) -> Self {
        Self {
            scene: Scene::with_capacity(config.object_capacity, config.component_capacity),
            ..Self::default()
        }
    }

    /// Borrow the scene
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutably borrow the scene
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Objects queued for reclamation
    pub fn pending(&self) -> &PendingDeletions {
        &self.pending
    }

    /// Number of completed frames
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Run one update pass over every object not awaiting deletion
    ///
    /// Returns the number of objects updated.
    pub fn update(&mut self) -> usize {
        let mut updated = 0;
        for object in self.scene.object_ids() {
            if self.pending.is_pending(object) {
                continue;
            }
            match self.scene.update_object(object) {
                Ok(()) => updated += 1,
                Err(e) => log::warn!("Skipping update of {:?}: {}", object, e),
            }
        }
        log::trace!("Frame {}: updated {} object(s)", self.frame_count, updated);
        updated
    }

    /// Queue an object and its descendants for reclamation at the end of the frame
    pub fn destroy_object(&mut self, object: ObjectId) -> SceneResult<usize> {
        self.scene.destroy_object(object, &mut self.pending)
    }

    /// Reclaim pending objects and advance the frame counter
    ///
    /// Returns the number of objects reclaimed.
    pub fn end_frame(&mut self) -> usize {
        let reclaimed = self.pending.drain_into(&mut self.scene);
        self.frame_count += 1;
        reclaimed
    }

    /// Update then end the frame
    pub fn tick(&mut self) -> usize {
        self.update();
        self.end_frame()
    }
}
