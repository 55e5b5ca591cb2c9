//! Component trait and type-erased component storage

use std::any::{Any, type_name};

use crate::foundation::collections::ObjectId;
use super::scene_component::SceneNode;

/// A behaviour unit owned by an object
///
/// `update` runs once per frame for every component of a live object. The
/// default body does nothing.
pub trait Component: Any {
    /// Per-frame hook
    fn update(&mut self) {}
}

/// Pure spatial component with no behaviour of its own
///
/// Used as the root of an object's scene hierarchy when nothing more
/// specific is needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneComponent;

impl Component for SceneComponent {}

fn update_erased<T: Component>(behaviour: &mut dyn Any) {
    if let Some(component) = behaviour.downcast_mut::<T>() {
        component.update();
    }
}

/// Arena slot for a single component
///
/// Holds the owner back-reference, the boxed behaviour, and, for scene
/// components, the transform node.
pub struct ComponentEntry {
    pub(crate) owner: Option<ObjectId>,
    pub(crate) node: Option<SceneNode>,
    behaviour: Box<dyn Any>,
    update_fn: fn(&mut dyn Any),
    type_name: &'static str,
}

impl ComponentEntry {
    /// Wrap a behaviour as a plain (non-spatial) component
    pub(crate) fn plain<T: Component>(behaviour: T) -> Self {
        Self {
            owner: None,
            node: None,
            behaviour: Box::new(behaviour),
            update_fn: update_erased::<T>,
            type_name: type_name::<T>(),
        }
    }

    /// Wrap a behaviour as a scene component with an identity transform
    pub(crate) fn spatial<T: Component>(behaviour: T) -> Self {
        Self {
            node: Some(SceneNode::default()),
            ..Self::plain(behaviour)
        }
    }

    /// Object this component is registered with, if any
    pub fn owner(&self) -> Option<ObjectId> {
        self.owner
    }

    /// Transform node, present only for scene components
    pub fn node(&self) -> Option<&SceneNode> {
        self.node.as_ref()
    }

    /// Whether this component participates in the transform hierarchy
    pub fn is_spatial(&self) -> bool {
        self.node.is_some()
    }

    /// Name of the concrete behaviour type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Borrow the behaviour as its concrete type
    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.behaviour.downcast_ref::<T>()
    }

    /// Mutably borrow the behaviour as its concrete type
    pub fn downcast_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.behaviour.downcast_mut::<T>()
    }

    /// Run the behaviour's per-frame hook
    pub fn update(&mut self) {
        (self.update_fn)(self.behaviour.as_mut());
    }
}

impl std::fmt::Debug for ComponentEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentEntry")
            .field("type_name", &self.type_name)
            .field("owner", &self.owner)
            .field("node", &self.node)
            .finish_non_exhaustive()
    }
}
