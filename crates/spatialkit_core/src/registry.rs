//! Named, reference-counted asset storage
//!
//! Every asset kind (mesh, texture, shader, material, font, model, sprite)
//! gets its own [`Registry`] instance with an identical lifecycle contract:
//!
//! - `create(id, payload)` registers a new entry with a ref count of 1.
//!   Duplicate ids are rejected; callers that want find-or-create semantics
//!   guard with [`Registry::find`] first.
//! - `find(id)` returns the existing handle and bumps the ref count.
//! - `release(key)` drops one reference; the payload is destroyed exactly
//!   when the count reaches 0, and the id becomes available for reuse.
//!
//! Handles are generational [`slotmap`] keys, one key type per asset kind
//! (`new_key_type!`), so a mesh handle can never be passed where a texture
//! handle is expected. A handle is either dead or refers to a live entry
//! with ref count >= 1; handles compare by identity.
//!
//! Releasing more times than matching create/find calls would corrupt the
//! count invisibly, so a release (or mutation) through a dead handle panics
//! rather than being ignored.

use std::collections::HashMap;

use slotmap::{Key, SlotMap};

use crate::error::AssetError;

/// Internal storage for one registered asset
struct Entry<T> {
    /// The id this entry was registered under
    id: String,
    /// Number of live references (create + find + addref - release)
    refs: u32,
    /// The asset payload
    payload: T,
}

/// A by-id store of reference-counted assets of one kind
pub struct Registry<K: Key, T> {
    entries: SlotMap<K, Entry<T>>,
    /// Reverse index from id to handle, for `find` deduplication
    by_id: HashMap<String, K>,
}

impl<K: Key, T> Default for Registry<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key, T> Registry<K, T> {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            by_id: HashMap::new(),
        }
    }

    /// Register a new asset under `id` with a ref count of 1
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::DuplicateId`] when the id is already live in
    /// this registry. A second create with the same id is never silently
    /// accepted, even with identical parameters.
    pub fn create(&mut self, id: &str, payload: T) -> Result<K, AssetError> {
        if self.by_id.contains_key(id) {
            return Err(AssetError::DuplicateId(id.to_string()));
        }
        let key = self.entries.insert(Entry {
            id: id.to_string(),
            refs: 1,
            payload,
        });
        self.by_id.insert(id.to_string(), key);
        Ok(key)
    }

    /// Look up an asset by id, taking a new reference on hit
    ///
    /// Never allocates, and is safe to call before any matching `create`
    /// (it just returns `None`).
    pub fn find(&mut self, id: &str) -> Option<K> {
        let key = *self.by_id.get(id)?;
        self.entries[key].refs += 1;
        Some(key)
    }

    /// Take an additional reference on a live handle
    ///
    /// Used when another asset stores this handle (a material holding a
    /// texture, a model holding a mesh).
    ///
    /// # Panics
    ///
    /// Panics when the handle is dead.
    pub fn addref(&mut self, key: K) {
        match self.entries.get_mut(key) {
            Some(entry) => entry.refs += 1,
            None => panic!("addref on a dead asset handle"),
        }
    }

    /// Drop one reference; destroys the entry when the count reaches 0
    ///
    /// Returns the payload when this release freed the asset, so the caller
    /// can release any handles the payload was itself holding.
    ///
    /// # Panics
    ///
    /// Panics when the handle is dead — releasing more times than matching
    /// create/find/addref calls is a caller contract violation.
    pub fn release(&mut self, key: K) -> Option<T> {
        let entry = self
            .entries
            .get_mut(key)
            .unwrap_or_else(|| panic!("release on a dead asset handle (double release?)"));
        entry.refs -= 1;
        if entry.refs > 0 {
            return None;
        }
        let entry = self.entries.remove(key)?;
        self.by_id.remove(&entry.id);
        Some(entry.payload)
    }

    /// Get the payload behind a handle, or `None` when it is dead
    pub fn get(&self, key: K) -> Option<&T> {
        self.entries.get(key).map(|e| &e.payload)
    }

    /// Get the payload behind a handle mutably, or `None` when it is dead
    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        self.entries.get_mut(key).map(|e| &mut e.payload)
    }

    /// Get the payload behind a handle that must be live
    ///
    /// # Panics
    ///
    /// Panics when the handle is dead: mutating a released asset is a
    /// caller contract violation.
    pub fn payload_mut(&mut self, key: K) -> &mut T {
        match self.entries.get_mut(key) {
            Some(entry) => &mut entry.payload,
            None => panic!("asset handle is dead (use after release?)"),
        }
    }

    /// Current reference count for a handle, or `None` when it is dead
    pub fn ref_count(&self, key: K) -> Option<u32> {
        self.entries.get(key).map(|e| e.refs)
    }

    /// The id a handle was registered under, or `None` when it is dead
    pub fn id_of(&self, key: K) -> Option<&str> {
        self.entries.get(key).map(|e| e.id.as_str())
    }

    /// Number of live assets in this registry
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether this registry holds no live assets
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
