//! Integration scenarios spanning objects, components and deferred deletion

mod hierarchy_integration;
