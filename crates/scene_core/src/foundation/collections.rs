//! Handle types for the scene arenas

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Generational handle to an [`ObjectNode`](crate::scene::ObjectNode) slot
    pub struct ObjectId;

    /// Generational handle to a [`ComponentEntry`](crate::scene::ComponentEntry) slot
    pub struct ComponentId;
}

/// Handle-based map of objects
pub type ObjectMap<T> = SlotMap<ObjectId, T>;

/// Handle-based map of components
pub type ComponentMap<T> = SlotMap<ComponentId, T>;
