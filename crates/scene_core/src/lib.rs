//! # Scene Core
//!
//! Entity/component/transform layer of a minimal 2D scene-graph runtime.
//!
//! ## Features
//!
//! - **Objects and Components**: Objects own behaviour units that update once per frame
//! - **Scene Hierarchy**: Scene components compose local transforms up to their object
//! - **Object Hierarchy**: Objects form their own parent/child tree
//! - **Deferred Deletion**: Destroyed object subtrees are reclaimed between frames
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_core::prelude::*;
//!
//! fn main() -> Result<(), SceneError> {
//!     let mut world = World::new();
//!     let ship = world.scene_mut().spawn_object_with_root();
//!     world.scene_mut().set_object_local_position(ship, Vec2::new(10.0, 0.0))?;
//!
//!     let turret = world.scene_mut().construct_scene_component(ship, SceneComponent)?;
//!     let root = world.scene_mut().root(ship)?.ok_or(SceneError::MissingRoot(ship))?;
//!     world.scene_mut().attach_component(turret, root)?;
//!     world.scene_mut().set_local_position(turret, Vec2::new(0.0, 2.0))?;
//!     assert_eq!(world.scene().world_position(turret)?, Vec2::new(10.0, 2.0));
//!
//!     world.destroy_object(ship)?;
//!     world.tick();
//!     assert_eq!(world.scene().object_count(), 0);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod scene;
pub mod world;

pub use world::World;

/// Common imports for runtime users
pub mod prelude {
    pub use crate::{
        World,
        config::{Config, ConfigError, ConfigFormat, RuntimeConfig},
        foundation::{
            collections::{ComponentId, ObjectId},
            math::{Transform2D, Vec2, distance, rotate_vector},
        },
        scene::{
            Component, DeletionQueue, PendingDeletions, Scene, SceneComponent, SceneError,
            SceneResult,
        },
    };
}
