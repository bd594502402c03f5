//! Singleton registry backing a container
//!
//! Candidate instances live in write-once slots created up front, one per
//! candidate, so the key set never changes and a slot is never overwritten.
//! Dependencies built outside the candidate set go to a separate `DashMap`.

use crate::candidate::CandidateSet;
use crate::descriptor::{AnyInstance, TypeKey};
use crate::options::TransitivePolicy;
use ahash::RandomState;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::Arc;

pub(crate) struct Registry {
    /// One slot per candidate, keyed by type
    slots: HashMap<TypeKey, OnceCell<AnyInstance>, RandomState>,
    /// Instances of non-candidate dependencies
    transitive: DashMap<TypeKey, AnyInstance, RandomState>,
    /// Whether `get` may answer from `transitive`
    expose_transitive: bool,
}

impl Registry {
    pub fn new(candidates: &CandidateSet, policy: TransitivePolicy) -> Self {
        let mut slots = HashMap::with_capacity_and_hasher(candidates.len(), RandomState::new());
        for key in candidates {
            slots.insert(*key, OnceCell::new());
        }

        Self {
            slots,
            // Few shards: transitive dependencies are rare and written once
            transitive: DashMap::with_capacity_and_hasher_and_shard_amount(
                0,
                RandomState::new(),
                4,
            ),
            expose_transitive: policy == TransitivePolicy::Register,
        }
    }

    #[inline]
    pub fn is_candidate(&self, key: &TypeKey) -> bool {
        self.slots.contains_key(key)
    }

    /// Public lookup: candidates, plus registered transitive instances
    #[inline]
    pub fn get(&self, key: &TypeKey) -> Option<AnyInstance> {
        if let Some(slot) = self.slots.get(key) {
            return slot.get().map(Arc::clone);
        }
        if self.expose_transitive {
            return self.transitive.get(key).map(|r| Arc::clone(r.value()));
        }
        None
    }

    /// Resolver lookup: any instance built so far, visible or not
    #[inline]
    pub fn lookup(&self, key: &TypeKey) -> Option<AnyInstance> {
        match self.slots.get(key) {
            Some(slot) => slot.get().map(Arc::clone),
            None => self.transitive.get(key).map(|r| Arc::clone(r.value())),
        }
    }

    /// Store a freshly built instance.
    ///
    /// Returns the instance that ends up registered: if the slot was already
    /// filled the existing one is kept and returned.
    pub fn store(&self, key: TypeKey, instance: AnyInstance) -> AnyInstance {
        match self.slots.get(&key) {
            Some(slot) => Arc::clone(slot.get_or_init(|| instance)),
            None => Arc::clone(self.transitive.entry(key).or_insert(instance).value()),
        }
    }

    /// Candidate keys whose slot is filled
    pub fn built_candidates(&self) -> Vec<TypeKey> {
        self.slots
            .iter()
            .filter(|(_, slot)| slot.get().is_some())
            .map(|(key, _)| *key)
            .collect()
    }

    /// Number of filled candidate slots
    pub fn built_count(&self) -> usize {
        self.slots.values().filter(|slot| slot.get().is_some()).count()
    }

    /// Number of non-candidate instances
    #[inline]
    pub fn transitive_count(&self) -> usize {
        self.transitive.len()
    }

    /// Keys visible through `get`
    pub fn visible_types(&self) -> Vec<TypeKey> {
        let mut keys = self.built_candidates();
        if self.expose_transitive {
            keys.extend(self.transitive.iter().map(|r| *r.key()));
        }
        keys
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("candidates", &self.slots.len())
            .field("built", &self.built_count())
            .field("transitive", &self.transitive_count())
            .finish()
    }
}
