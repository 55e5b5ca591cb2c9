//! Scene component hierarchy
//!
//! Scene components form a tree of local transforms. Tree edges are stored
//! as handles in both directions and are always kept symmetric:
//! `child ∈ parent.children ⟺ child.parent == Some(parent)`.
//!
//! World-space queries walk up the parent chain. A chain that tops out at a
//! component owned by an object continues through that object's world
//! transform; an ownerless top uses its own local value.

use std::collections::BTreeSet;
use std::ops::Add;

use crate::foundation::collections::{ComponentId, ObjectId};
use crate::foundation::math::{Transform2D, Vec2};
use super::error::{SceneError, SceneResult};
use super::Scene;

/// Transform node carried by every scene component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneNode {
    pub(crate) transform: Transform2D,
    pub(crate) parent: Option<ComponentId>,
    pub(crate) children: BTreeSet<ComponentId>,
}

impl SceneNode {
    /// Local transform
    pub fn transform(&self) -> &Transform2D {
        &self.transform
    }

    /// Parent in the component tree
    pub fn parent(&self) -> Option<ComponentId> {
        self.parent
    }

    /// Direct children in the component tree
    pub fn children(&self) -> &BTreeSet<ComponentId> {
        &self.children
    }
}

impl Scene {
    pub(crate) fn node(&self, id: ComponentId) -> SceneResult<&SceneNode> {
        self.entry(id)?.node.as_ref().ok_or(SceneError::NotSpatial(id))
    }

    pub(crate) fn node_mut(&mut self, id: ComponentId) -> SceneResult<&mut SceneNode> {
        self.entry_mut(id)?.node.as_mut().ok_or(SceneError::NotSpatial(id))
    }

    /// Parent of a scene component
    pub fn component_parent(&self, id: ComponentId) -> SceneResult<Option<ComponentId>> {
        Ok(self.node(id)?.parent)
    }

    /// Direct children of a scene component
    pub fn component_children(&self, id: ComponentId) -> SceneResult<&BTreeSet<ComponentId>> {
        Ok(&self.node(id)?.children)
    }

    /// Local transform of a scene component
    pub fn local_transform(&self, id: ComponentId) -> SceneResult<Transform2D> {
        Ok(self.node(id)?.transform)
    }

    /// Local position of a scene component
    pub fn local_position(&self, id: ComponentId) -> SceneResult<Vec2> {
        Ok(self.node(id)?.transform.position)
    }

    /// Local rotation of a scene component, in degrees
    pub fn local_rotation(&self, id: ComponentId) -> SceneResult<f32> {
        Ok(self.node(id)?.transform.rotation)
    }

    /// Local scale of a scene component
    pub fn local_scale(&self, id: ComponentId) -> SceneResult<Vec2> {
        Ok(self.node(id)?.transform.scale)
    }

    /// Replace the local transform of a scene component
    pub fn set_local_transform(&mut self, id: ComponentId, transform: Transform2D) -> SceneResult<()> {
        self.node_mut(id)?.transform = transform;
        Ok(())
    }

    /// Set the local position of a scene component
    pub fn set_local_position(&mut self, id: ComponentId, position: Vec2) -> SceneResult<()> {
        self.node_mut(id)?.transform.position = position;
        Ok(())
    }

    /// Set the local rotation of a scene component, in degrees
    pub fn set_local_rotation(&mut self, id: ComponentId, rotation: f32) -> SceneResult<()> {
        self.node_mut(id)?.transform.rotation = rotation;
        Ok(())
    }

    /// Set the local scale of a scene component
    pub fn set_local_scale(&mut self, id: ComponentId, scale: Vec2) -> SceneResult<()> {
        self.node_mut(id)?.transform.scale = scale;
        Ok(())
    }

    /// Offset the local position of a scene component
    pub fn add_position(&mut self, id: ComponentId, delta: Vec2) -> SceneResult<()> {
        self.node_mut(id)?.transform.position += delta;
        Ok(())
    }

    /// Offset the local rotation of a scene component
    pub fn add_rotation(&mut self, id: ComponentId, delta: f32) -> SceneResult<()> {
        self.node_mut(id)?.transform.rotation += delta;
        Ok(())
    }

    /// World position of a scene component
    pub fn world_position(&self, id: ComponentId) -> SceneResult<Vec2> {
        self.compose_component(id, |t| t.position, Self::object_world_position)
    }

    /// World rotation of a scene component, in degrees
    pub fn world_rotation(&self, id: ComponentId) -> SceneResult<f32> {
        self.compose_component(id, |t| t.rotation, Self::object_world_rotation)
    }

    /// World scale of a scene component
    ///
    /// Scales compose by addition along the chain, the same way positions do.
    pub fn world_scale(&self, id: ComponentId) -> SceneResult<Vec2> {
        self.compose_component(id, |t| t.scale, Self::object_world_scale)
    }

    /// Sum one transform field from the top of the chain down to `id`
    fn compose_component<T, F, W>(&self, id: ComponentId, field: F, owner_world: W) -> SceneResult<T>
    where
        T: Copy + Add<Output = T>,
        F: Fn(&Transform2D) -> T,
        W: Fn(&Self, ObjectId) -> SceneResult<T>,
    {
        let mut locals = Vec::new();
        let mut current = id;
        loop {
            let node = self.node(current)?;
            match node.parent {
                Some(parent) => {
                    locals.push(field(&node.transform));
                    current = parent;
                }
                None => {
                    let base = match self.entry(current)?.owner {
                        Some(owner) => owner_world(self, owner)?,
                        None => field(&node.transform),
                    };
                    return Ok(locals.into_iter().rev().fold(base, |acc, local| acc + local));
                }
            }
        }
    }

    /// Whether `ancestor` appears on the parent chain of `id`
    pub fn is_component_ancestor(&self, ancestor: ComponentId, id: ComponentId) -> SceneResult<bool> {
        let mut current = self.node(id)?.parent;
        while let Some(parent) = current {
            if parent == ancestor {
                return Ok(true);
            }
            current = self.node(parent)?.parent;
        }
        Ok(false)
    }

    /// Attach `child` under `parent`
    ///
    /// A child that already has another parent is moved. The child and its
    /// whole subtree join the parent's owning object, or become ownerless
    /// when the parent has no owner.
    pub fn attach_component(&mut self, child: ComponentId, parent: ComponentId) -> SceneResult<()> {
        let previous = self.node(child)?.parent;
        self.node(parent)?;

        if child == parent || self.is_component_ancestor(child, parent)? {
            return Err(SceneError::ComponentCycle { child, parent });
        }
        if previous == Some(parent) {
            return Ok(());
        }

        if let Some(previous) = previous {
            self.node_mut(previous)?.children.remove(&child);
        }
        self.node_mut(parent)?.children.insert(child);
        self.node_mut(child)?.parent = Some(parent);

        let owner = self.entry(parent)?.owner;
        self.transfer_subtree(child, owner)?;

        log::debug!("Attached component {:?} to {:?} (owner {:?})", child, parent, owner);
        Ok(())
    }

    /// Detach `child` from `parent`
    ///
    /// The detached subtree becomes ownerless until it is attached again or
    /// destroyed.
    pub fn detach_component(&mut self, child: ComponentId, parent: ComponentId) -> SceneResult<()> {
        self.node(parent)?;
        if self.node(child)?.parent != Some(parent) {
            return Err(SceneError::ComponentNotAttached { child, parent });
        }

        self.node_mut(parent)?.children.remove(&child);
        self.node_mut(child)?.parent = None;
        self.transfer_subtree(child, None)?;

        log::debug!("Detached component {:?} from {:?}", child, parent);
        Ok(())
    }

    /// Collect `root` and all of its descendants, parents before children
    pub(crate) fn component_subtree(&self, root: ComponentId) -> SceneResult<Vec<ComponentId>> {
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            order.push(current);
            stack.extend(self.node(current)?.children.iter().rev().copied());
        }
        Ok(order)
    }

    /// Rebind every component of a subtree to `owner`
    pub(crate) fn transfer_subtree(&mut self, root: ComponentId, owner: Option<ObjectId>) -> SceneResult<()> {
        for id in self.component_subtree(root)? {
            let previous = self.entry(id)?.owner;
            match owner {
                Some(owner) => self.bind_owner(owner, id)?,
                None => {
                    if let Some(previous) = previous {
                        self.unbind_owner(previous, id)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Cut the edge between a scene component and its parent, if any
    pub(crate) fn unlink_from_parent(&mut self, id: ComponentId) -> SceneResult<()> {
        if let Some(parent) = self.node(id)?.parent {
            self.node_mut(parent)?.children.remove(&id);
            self.node_mut(id)?.parent = None;
            log::debug!("Component {:?} cut from parent {:?}", id, parent);
        }
        Ok(())
    }

    /// Destroy a scene component together with its whole subtree
    ///
    /// The component is first unlinked from its parent. Descendants are
    /// released before their ancestors using an explicit stack, so depth is
    /// bounded by the heap rather than the call stack. Returns the number of
    /// components released.
    pub(crate) fn destruct_scene_subtree(&mut self, id: ComponentId) -> SceneResult<usize> {
        if let Some(parent) = self.node(id)?.parent {
            self.node_mut(parent)?.children.remove(&id);
        }

        let mut released = 0usize;
        let mut stack = vec![(id, false)];
        while let Some((current, expanded)) = stack.pop() {
            if expanded {
                if self.release_component(current).is_some() {
                    released += 1;
                }
                continue;
            }
            stack.push((current, true));
            if let Some(node) = self.components.get(current).and_then(|entry| entry.node.as_ref()) {
                stack.extend(node.children.iter().rev().map(|&child| (child, false)));
            }
        }

        log::debug!("Destructed scene component {:?} and {} descendant(s)", id, released.saturating_sub(1));
        Ok(released)
    }
}
