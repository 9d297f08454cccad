//! The entity registry — tracks every entity a device has advertised during
//! discovery. Single owner (the session task), never shared across tasks, so
//! this is a plain `HashMap` pair rather than a concurrent map.

use std::collections::HashMap;

use esphome_proto::entity::Entity;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no entity with key {0}")]
    UnknownKey(u32),
    #[error("no entity with id {0:?}")]
    UnknownId(String),
}

/// Maps entity `key` and derived string id to the entity descriptor received
/// during discovery. Sealed once `ListEntitiesDoneResponse` arrives: further
/// inserts still overwrite (the device is authoritative) but consumers
/// should treat a sealed registry as the stable entity set for the session.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    by_key: HashMap<u32, Entity>,
    by_id: HashMap<String, Entity>,
    sealed: bool,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards every entity and un-seals the registry. Called at the start
    /// of each discovery cycle (fresh connect or reconnect).
    pub fn clear(&mut self) {
        self.by_key.clear();
        self.by_id.clear();
        self.sealed = false;
    }

    /// Insert or overwrite a discovered entity. Collisions by key overwrite
    /// silently — the device is authoritative about its own entity set.
    /// Returns `true` if this insert replaced an existing entry for `key`,
    /// so the caller (which owns the `Logger`) can report it; this crate
    /// has no logging sink of its own to call.
    pub fn insert(&mut self, entity: Entity) -> bool {
        let key = entity.key();
        let id = entity.string_id();
        let replaced = self.by_key.contains_key(&key);
        self.by_key.insert(key, entity.clone());
        self.by_id.insert(id, entity);
        replaced
    }

    /// Mark discovery complete. `ListEntitiesDoneResponse` triggers this.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn get_by_key(&self, key: u32) -> Option<&Entity> {
        self.by_key.get(&key)
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Entity> {
        self.by_id.get(id)
    }

    pub fn require_by_key(&self, key: u32) -> Result<&Entity, RegistryError> {
        self.get_by_key(key).ok_or(RegistryError::UnknownKey(key))
    }

    pub fn require_by_id(&self, id: &str) -> Result<&Entity, RegistryError> {
        self.get_by_id(id).ok_or_else(|| RegistryError::UnknownId(id.to_string()))
    }

    /// Resolve a command target that may be given as either a numeric key
    /// or a derived string id, preferring the key when both would match.
    pub fn resolve(&self, key: Option<u32>, id: Option<&str>) -> Result<&Entity, RegistryError> {
        if let Some(key) = key {
            return self.require_by_key(key);
        }
        if let Some(id) = id {
            return self.require_by_id(id);
        }
        Err(RegistryError::UnknownKey(0))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.by_key.values()
    }
}
