//! Object/component scene model
//!
//! Objects own components. Scene components carry local transforms and form
//! a tree whose world transforms are composed by walking up to the owning
//! object. Objects form a second, independent tree.
//!
//! Everything lives in one [`Scene`] arena addressed by generational handles.
//! Component destruction is immediate; object destruction is deferred
//! through a [`DeletionQueue`].
//!
//! Nothing here guards against mutating a tree while iterating it. Iterate
//! over a snapshot (for example `object_components(id)?.iter().copied().collect::<Vec<_>>()`)
//! before attaching, detaching, or destroying.

pub mod arena;
pub mod component;
pub mod deletion;
pub mod error;
pub mod object;
pub mod scene_component;

#[cfg(test)]
mod tests;

pub use arena::Scene;
pub use component::{Component, ComponentEntry, SceneComponent};
pub use deletion::{DeletionQueue, PendingDeletions};
pub use error::{SceneError, SceneResult};
pub use object::ObjectNode;
pub use scene_component::SceneNode;
