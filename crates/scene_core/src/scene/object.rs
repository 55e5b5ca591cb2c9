//! Objects and the object hierarchy
//!
//! Objects own a set of components and form their own parent/child tree,
//! independent of the scene component tree. An object's transform is the
//! local transform of its root scene component; attaching objects to one
//! another never touches roots or component ownership.

use std::collections::{BTreeSet, VecDeque};
use std::ops::Add;

use crate::foundation::collections::{ComponentId, ObjectId};
use crate::foundation::math::{Transform2D, Vec2};
use super::component::SceneComponent;
use super::deletion::DeletionQueue;
use super::error::{SceneError, SceneResult};
use super::Scene;

/// Arena slot for a single object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectNode {
    pub(crate) root: Option<ComponentId>,
    pub(crate) components: BTreeSet<ComponentId>,
    pub(crate) parent: Option<ObjectId>,
    pub(crate) children: BTreeSet<ObjectId>,
}

impl ObjectNode {
    /// Root scene component
    pub fn root(&self) -> Option<ComponentId> {
        self.root
    }

    /// Every component registered with this object, root included
    pub fn components(&self) -> &BTreeSet<ComponentId> {
        &self.components
    }

    /// Parent object
    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    /// Direct child objects
    pub fn children(&self) -> &BTreeSet<ObjectId> {
        &self.children
    }
}

impl Scene {
    pub(crate) fn object(&self, id: ObjectId) -> SceneResult<&ObjectNode> {
        self.objects.get(id).ok_or(SceneError::UnknownObject(id))
    }

    pub(crate) fn object_mut(&mut self, id: ObjectId) -> SceneResult<&mut ObjectNode> {
        self.objects.get_mut(id).ok_or(SceneError::UnknownObject(id))
    }

    /// Create an empty object with no root
    pub fn spawn_object(&mut self) -> ObjectId {
        self.objects.insert(ObjectNode::default())
    }

    /// Create an object whose root is a fresh [`SceneComponent`]
    pub fn spawn_object_with_root(&mut self) -> ObjectId {
        let id = self.spawn_object();
        let root = self.create_scene_component(SceneComponent);
        self.components[root].owner = Some(id);
        let node = &mut self.objects[id];
        node.components.insert(root);
        node.root = Some(root);
        id
    }

    /// Number of live objects, pending deletions included
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Whether the handle refers to a live object
    pub fn contains_object(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Handles of every live object, in arena order
    pub fn object_ids(&self) -> Vec<ObjectId> {
        self.objects.keys().collect()
    }

    /// Borrow an object slot
    pub fn object_node(&self, id: ObjectId) -> SceneResult<&ObjectNode> {
        self.object(id)
    }

    /// Root scene component of an object
    pub fn root(&self, id: ObjectId) -> SceneResult<Option<ComponentId>> {
        Ok(self.object(id)?.root)
    }

    /// Make a registered scene component the object's root
    pub fn set_root(&mut self, id: ObjectId, component: ComponentId) -> SceneResult<()> {
        self.node(component)?;
        let node = self.object_mut(id)?;
        if !node.components.contains(&component) {
            return Err(SceneError::RootNotOwned { object: id, component });
        }
        node.root = Some(component);
        Ok(())
    }

    /// Components registered with an object
    pub fn object_components(&self, id: ObjectId) -> SceneResult<&BTreeSet<ComponentId>> {
        Ok(&self.object(id)?.components)
    }

    /// Parent of an object
    pub fn object_parent(&self, id: ObjectId) -> SceneResult<Option<ObjectId>> {
        Ok(self.object(id)?.parent)
    }

    /// Direct children of an object
    pub fn object_children(&self, id: ObjectId) -> SceneResult<&BTreeSet<ObjectId>> {
        Ok(&self.object(id)?.children)
    }

    fn root_of(&self, id: ObjectId) -> SceneResult<ComponentId> {
        self.object(id)?.root.ok_or(SceneError::MissingRoot(id))
    }

    /// Local transform of an object, read through its root
    pub fn object_local_transform(&self, id: ObjectId) -> SceneResult<Transform2D> {
        self.local_transform(self.root_of(id)?)
    }

    /// Local position of an object
    pub fn object_local_position(&self, id: ObjectId) -> SceneResult<Vec2> {
        self.local_position(self.root_of(id)?)
    }

    /// Local rotation of an object, in degrees
    pub fn object_local_rotation(&self, id: ObjectId) -> SceneResult<f32> {
        self.local_rotation(self.root_of(id)?)
    }

    /// Local scale of an object
    pub fn object_local_scale(&self, id: ObjectId) -> SceneResult<Vec2> {
        self.local_scale(self.root_of(id)?)
    }

    /// Set the local position of an object
    pub fn set_object_local_position(&mut self, id: ObjectId, position: Vec2) -> SceneResult<()> {
        let root = self.root_of(id)?;
        self.set_local_position(root, position)
    }

    /// Set the local rotation of an object, in degrees
    pub fn set_object_local_rotation(&mut self, id: ObjectId, rotation: f32) -> SceneResult<()> {
        let root = self.root_of(id)?;
        self.set_local_rotation(root, rotation)
    }

    /// Set the local scale of an object
    pub fn set_object_local_scale(&mut self, id: ObjectId, scale: Vec2) -> SceneResult<()> {
        let root = self.root_of(id)?;
        self.set_local_scale(root, scale)
    }

    /// Offset the local position of an object
    pub fn add_object_position(&mut self, id: ObjectId, delta: Vec2) -> SceneResult<()> {
        let root = self.root_of(id)?;
        self.add_position(root, delta)
    }

    /// Offset the local rotation of an object
    pub fn add_object_rotation(&mut self, id: ObjectId, delta: f32) -> SceneResult<()> {
        let root = self.root_of(id)?;
        self.add_rotation(root, delta)
    }

    /// World position of an object
    pub fn object_world_position(&self, id: ObjectId) -> SceneResult<Vec2> {
        self.compose_object(id, |t| t.position)
    }

    /// World rotation of an object, in degrees
    pub fn object_world_rotation(&self, id: ObjectId) -> SceneResult<f32> {
        self.compose_object(id, |t| t.rotation)
    }

    /// World scale of an object
    ///
    /// Scales compose by addition, like positions.
    pub fn object_world_scale(&self, id: ObjectId) -> SceneResult<Vec2> {
        self.compose_object(id, |t| t.scale)
    }

    fn compose_object<T, F>(&self, id: ObjectId, field: F) -> SceneResult<T>
    where
        T: Copy + Add<Output = T>,
        F: Fn(&Transform2D) -> T,
    {
        let mut chain = vec![id];
        let mut current = self.object(id)?.parent;
        while let Some(parent) = current {
            chain.push(parent);
            current = self.object(parent)?.parent;
        }

        let mut world: Option<T> = None;
        for &object in chain.iter().rev() {
            let local = field(&self.object_local_transform(object)?);
            world = Some(world.map_or(local, |acc| acc + local));
        }
        world.ok_or(SceneError::UnknownObject(id))
    }

    /// Whether `ancestor` appears on the parent chain of `id`
    pub fn is_object_ancestor(&self, ancestor: ObjectId, id: ObjectId) -> SceneResult<bool> {
        let mut current = self.object(id)?.parent;
        while let Some(parent) = current {
            if parent == ancestor {
                return Ok(true);
            }
            current = self.object(parent)?.parent;
        }
        Ok(false)
    }

    /// Attach `child` under `parent` in the object tree
    ///
    /// A child that already has another parent is moved.
    pub fn attach_object(&mut self, child: ObjectId, parent: ObjectId) -> SceneResult<()> {
        let previous = self.object(child)?.parent;
        self.object(parent)?;

        if child == parent || self.is_object_ancestor(child, parent)? {
            return Err(SceneError::ObjectCycle { child, parent });
        }
        if previous == Some(parent) {
            return Ok(());
        }

        if let Some(previous) = previous {
            self.object_mut(previous)?.children.remove(&child);
        }
        self.object_mut(parent)?.children.insert(child);
        self.object_mut(child)?.parent = Some(parent);

        log::debug!("Attached object {:?} to {:?}", child, parent);
        Ok(())
    }

    /// Detach `child` from `parent` in the object tree
    pub fn detach_object(&mut self, child: ObjectId, parent: ObjectId) -> SceneResult<()> {
        self.object(parent)?;
        if self.object(child)?.parent != Some(parent) {
            return Err(SceneError::ObjectNotAttached { child, parent });
        }

        self.object_mut(parent)?.children.remove(&child);
        self.object_mut(child)?.parent = None;

        log::debug!("Detached object {:?} from {:?}", child, parent);
        Ok(())
    }

    /// Run the per-frame hook of every component of an object
    ///
    /// Components run in handle order. The set is snapshotted first.
    pub fn update_object(&mut self, id: ObjectId) -> SceneResult<()> {
        let components: Vec<ComponentId> = self.object(id)?.components.iter().copied().collect();
        for component in components {
            if let Some(entry) = self.components.get_mut(component) {
                entry.update();
            }
        }
        Ok(())
    }

    /// Request destruction of an object and all of its descendants
    ///
    /// The object is unlinked from its parent immediately. It and every
    /// descendant object are then handed to `pending`, breadth first, for
    /// reclamation between frames; nothing is freed here. Returns how many
    /// objects were newly queued.
    pub fn destroy_object<Q>(&mut self, id: ObjectId, pending: &mut Q) -> SceneResult<usize>
    where
        Q: DeletionQueue + ?Sized,
    {
        if let Some(parent) = self.object(id)?.parent {
            self.detach_object(id, parent)?;
        }

        let mut queued = 0usize;
        let mut frontier = VecDeque::from([id]);
        while let Some(current) = frontier.pop_front() {
            if pending.enqueue_for_deletion(current) {
                queued += 1;
            }
            if let Some(node) = self.objects.get(current) {
                frontier.extend(node.children.iter().copied());
            }
        }

        log::debug!("Queued object {:?} and {} descendant(s) for deletion", id, queued.saturating_sub(1));
        Ok(queued)
    }
}
