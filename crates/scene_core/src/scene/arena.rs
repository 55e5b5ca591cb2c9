//! Scene arena
//!
//! Owns every object and component slot. All cross references between them
//! are generational handles, so a destroyed slot can never be reached through
//! a stale parent or owner link.

use crate::foundation::collections::{ComponentId, ComponentMap, ObjectId, ObjectMap};
use super::component::{Component, ComponentEntry};
use super::error::{SceneError, SceneResult};
use super::object::ObjectNode;

/// Arena holding objects and their components
#[derive(Debug, Default)]
pub struct Scene {
    pub(crate) objects: ObjectMap<ObjectNode>,
    pub(crate) components: ComponentMap<ComponentEntry>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty scene with reserved slots
    pub fn with_capacity(objects: usize, components: usize) -> Self {
        Self {
            objects: ObjectMap::with_capacity_and_key(objects),
            components: ComponentMap::with_capacity_and_key(components),
        }
    }

    pub(crate) fn entry(&self, id: ComponentId) -> SceneResult<&ComponentEntry> {
        self.components.get(id).ok_or(SceneError::UnknownComponent(id))
    }

    pub(crate) fn entry_mut(&mut self, id: ComponentId) -> SceneResult<&mut ComponentEntry> {
        self.components.get_mut(id).ok_or(SceneError::UnknownComponent(id))
    }

    /// Number of live components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Whether the handle refers to a live component
    pub fn contains_component(&self, id: ComponentId) -> bool {
        self.components.contains_key(id)
    }

    /// Borrow a component slot
    pub fn component_entry(&self, id: ComponentId) -> SceneResult<&ComponentEntry> {
        self.entry(id)
    }

    /// Borrow a component's behaviour as its concrete type
    pub fn component<T: Component>(&self, id: ComponentId) -> Option<&T> {
        self.components.get(id)?.downcast_ref::<T>()
    }

    /// Mutably borrow a component's behaviour as its concrete type
    pub fn component_mut<T: Component>(&mut self, id: ComponentId) -> Option<&mut T> {
        self.components.get_mut(id)?.downcast_mut::<T>()
    }

    /// Object a component is registered with
    pub fn component_owner(&self, id: ComponentId) -> SceneResult<Option<ObjectId>> {
        Ok(self.entry(id)?.owner)
    }

    /// Whether the component participates in the transform hierarchy
    pub fn is_spatial(&self, id: ComponentId) -> SceneResult<bool> {
        Ok(self.entry(id)?.is_spatial())
    }

    /// Allocate an ownerless plain component
    pub fn create_component<T: Component>(&mut self, behaviour: T) -> ComponentId {
        self.components.insert(ComponentEntry::plain(behaviour))
    }

    /// Allocate an ownerless scene component with an identity transform
    pub fn create_scene_component<T: Component>(&mut self, behaviour: T) -> ComponentId {
        self.components.insert(ComponentEntry::spatial(behaviour))
    }

    /// Allocate a plain component, bind it to `owner` and register it
    pub fn construct_component<T: Component>(&mut self, owner: ObjectId, behaviour: T) -> SceneResult<ComponentId> {
        self.insert_owned(owner, ComponentEntry::plain(behaviour))
    }

    /// Allocate a scene component, bind it to `owner` and register it
    ///
    /// The new component starts detached with an identity transform.
    pub fn construct_scene_component<T: Component>(&mut self, owner: ObjectId, behaviour: T) -> SceneResult<ComponentId> {
        self.insert_owned(owner, ComponentEntry::spatial(behaviour))
    }

    fn insert_owned(&mut self, owner: ObjectId, entry: ComponentEntry) -> SceneResult<ComponentId> {
        self.object(owner)?;
        let type_name = entry.type_name();
        let id = self.components.insert(entry);
        self.register_component(owner, id)?;
        log::trace!("Constructed {} {:?} for object {:?}", type_name, id, owner);
        Ok(id)
    }

    /// Add a component to an object's component set
    ///
    /// Returns `false` when it was already registered there. A component
    /// registered elsewhere is moved out of its previous owner first, so it
    /// never sits in two sets. A scene component is cut from its parent and
    /// moves together with its whole subtree.
    pub fn register_component(&mut self, object: ObjectId, id: ComponentId) -> SceneResult<bool> {
        self.object(object)?;
        if self.entry(id)?.owner == Some(object) && self.object(object)?.components.contains(&id) {
            return Ok(false);
        }

        if self.entry(id)?.is_spatial() {
            self.unlink_from_parent(id)?;
            self.transfer_subtree(id, Some(object))?;
        } else {
            self.bind_owner(object, id)?;
        }
        Ok(true)
    }

    /// Remove a component from an object's component set
    ///
    /// Returns `false` when it was not registered there. The component loses
    /// its owner; if it was the object's root, the object loses its root. A
    /// scene component is cut from its parent and its whole subtree becomes
    /// ownerless with it.
    pub fn unregister_component(&mut self, object: ObjectId, id: ComponentId) -> SceneResult<bool> {
        if !self.object(object)?.components.contains(&id) {
            return Ok(false);
        }

        if self.entry(id)?.is_spatial() {
            self.unlink_from_parent(id)?;
            self.transfer_subtree(id, None)?;
        } else {
            self.unbind_owner(object, id)?;
        }
        Ok(true)
    }

    /// Point a single component at `object` and add it to the object's set
    pub(crate) fn bind_owner(&mut self, object: ObjectId, id: ComponentId) -> SceneResult<()> {
        self.object(object)?;
        if let Some(previous) = self.entry(id)?.owner.filter(|&previous| previous != object) {
            self.unbind_owner(previous, id)?;
        }
        self.entry_mut(id)?.owner = Some(object);
        self.object_mut(object)?.components.insert(id);
        Ok(())
    }

    /// Drop a single component from `object`'s set and clear its owner
    pub(crate) fn unbind_owner(&mut self, object: ObjectId, id: ComponentId) -> SceneResult<()> {
        let node = self.object_mut(object)?;
        node.components.remove(&id);
        if node.root == Some(id) {
            node.root = None;
            log::warn!("Component {:?} left object {:?} while being its root", id, object);
        }

        if let Some(entry) = self.components.get_mut(id) {
            if entry.owner == Some(object) {
                entry.owner = None;
            }
        }
        Ok(())
    }

    /// Unregister a component from its owner (if any) and free its slot
    pub(crate) fn release_component(&mut self, id: ComponentId) -> Option<ComponentEntry> {
        let owner = self.components.get(id)?.owner;
        if let Some(owner) = owner {
            if let Some(object) = self.objects.get_mut(owner) {
                object.components.remove(&id);
                if object.root == Some(id) {
                    object.root = None;
                }
            }
        }
        self.components.remove(id)
    }

    /// Destroy a component
    ///
    /// A plain component is unregistered from its owner and released. A
    /// scene component is unlinked from its parent and released together
    /// with its whole subtree. Ownerless components are simply released.
    /// Returns the number of components released; the handle (and those of
    /// any released descendants) is stale afterwards.
    pub fn destruct_component(&mut self, id: ComponentId) -> SceneResult<usize> {
        if self.entry(id)?.is_spatial() {
            return self.destruct_scene_subtree(id);
        }
        let released = self.release_component(id).ok_or(SceneError::UnknownComponent(id))?;
        log::debug!("Destructed {} {:?}", released.type_name(), id);
        Ok(1)
    }

    /// Run one component's per-frame hook
    pub fn update_component(&mut self, id: ComponentId) -> SceneResult<()> {
        self.entry_mut(id)?.update();
        Ok(())
    }

    /// Release an object and everything registered with it
    ///
    /// Unlinks the object from its parent and orphans its child objects,
    /// destructs all of its components, then frees the object slot. Returns
    /// the number of components released. Only called while draining pending
    /// deletions, between frames.
    pub fn reclaim_object(&mut self, id: ObjectId) -> SceneResult<usize> {
        let node = self.object(id)?;
        let parent = node.parent;
        let children: Vec<ObjectId> = node.children.iter().copied().collect();
        let components: Vec<ComponentId> = node.components.iter().copied().collect();

        if let Some(parent) = parent.and_then(|parent| self.objects.get_mut(parent)) {
            parent.children.remove(&id);
        }
        for child in children {
            if let Some(child) = self.objects.get_mut(child) {
                child.parent = None;
            }
        }

        let mut released = 0;
        for component in components {
            // Earlier subtree destruction may already have released it
            if self.contains_component(component) {
                released += self.destruct_component(component)?;
            }
        }

        self.objects.remove(id);
        log::debug!("Reclaimed object {:?} ({} component(s))", id, released);
        Ok(released)
    }
}
