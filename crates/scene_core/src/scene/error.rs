//! Scene errors

use crate::foundation::collections::{ComponentId, ObjectId};
use thiserror::Error;

/// Precondition failures reported by [`Scene`](super::Scene) operations
///
/// Every variant leaves the scene untouched: an operation either fully
/// applies or returns one of these.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// The object handle is stale or was never issued by this scene
    #[error("Unknown object: {0:?}")]
    UnknownObject(ObjectId),

    /// The component handle is stale or was never issued by this scene
    #[error("Unknown component: {0:?}")]
    UnknownComponent(ComponentId),

    /// A spatial operation was requested on a component with no transform
    #[error("Component {0:?} is not a scene component")]
    NotSpatial(ComponentId),

    /// Detach requested from a component that is not the child's parent
    #[error("Component {child:?} is not attached to {parent:?}")]
    ComponentNotAttached {
        /// Component being detached
        child: ComponentId,
        /// Parent named by the caller
        parent: ComponentId,
    },

    /// Detach requested from an object that is not the child's parent
    #[error("Object {child:?} is not attached to {parent:?}")]
    ObjectNotAttached {
        /// Object being detached
        child: ObjectId,
        /// Parent named by the caller
        parent: ObjectId,
    },

    /// Attaching would make a component its own ancestor
    #[error("Attaching component {child:?} to {parent:?} would create a cycle")]
    ComponentCycle {
        /// Component being attached
        child: ComponentId,
        /// Requested parent
        parent: ComponentId,
    },

    /// Attaching would make an object its own ancestor
    #[error("Attaching object {child:?} to {parent:?} would create a cycle")]
    ObjectCycle {
        /// Object being attached
        child: ObjectId,
        /// Requested parent
        parent: ObjectId,
    },

    /// The object has no root scene component to read or write a transform through
    #[error("Object {0:?} has no root scene component")]
    MissingRoot(ObjectId),

    /// The proposed root is not registered in the object's component set
    #[error("Component {component:?} is not registered in object {object:?}")]
    RootNotOwned {
        /// Object whose root was being set
        object: ObjectId,
        /// Proposed root
        component: ComponentId,
    },
}

/// Result alias for scene operations
pub type SceneResult<T> = Result<T, SceneError>;
