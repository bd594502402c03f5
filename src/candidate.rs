//! The fixed set of types a container manages

use crate::descriptor::TypeKey;
use ahash::RandomState;
use std::collections::HashSet;

/// Insertion-ordered, de-duplicated set of candidate types.
///
/// Produced by whatever discovers eligible types (a scanner, a registration
/// list, a test fixture) and handed to the container, which never changes it.
#[derive(Clone, Default)]
pub struct CandidateSet {
    keys: Vec<TypeKey>,
    seen: HashSet<TypeKey, RandomState>,
}

impl CandidateSet {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `T` (builder style)
    #[inline]
    pub fn with<T: 'static>(mut self) -> Self {
        self.insert::<T>();
        self
    }

    /// Add `T`. Returns `false` if it was already present.
    #[inline]
    pub fn insert<T: 'static>(&mut self) -> bool {
        self.insert_key(TypeKey::of::<T>())
    }

    /// Add a key. Returns `false` if it was already present.
    pub fn insert_key(&mut self, key: TypeKey) -> bool {
        if self.seen.insert(key) {
            self.keys.push(key);
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.seen.contains(key)
    }

    #[inline]
    pub fn contains_type<T: 'static>(&self) -> bool {
        self.contains(&TypeKey::of::<T>())
    }

    /// Keys in insertion order
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, TypeKey> {
        self.keys.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[TypeKey] {
        &self.keys
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Extend<TypeKey> for CandidateSet {
    fn extend<I: IntoIterator<Item = TypeKey>>(&mut self, iter: I) {
        for key in iter {
            self.insert_key(key);
        }
    }
}

impl FromIterator<TypeKey> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = TypeKey>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a TypeKey;
    type IntoIter = std::slice::Iter<'a, TypeKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Debug for CandidateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.keys.iter().map(|k| k.name())).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct A;
    struct B;

    #[test]
    fn test_duplicates_are_ignored() {
        let mut set = CandidateSet::new().with::<A>().with::<B>();
        assert!(!set.insert::<A>());
        assert_eq!(set.len(), 2);
        assert_eq!(set.as_slice(), &[TypeKey::of::<A>(), TypeKey::of::<B>()]);
    }

    #[test]
    fn test_from_iterator_preserves_order() {
        let set: CandidateSet = [TypeKey::of::<B>(), TypeKey::of::<A>(), TypeKey::of::<B>()]
            .into_iter()
            .collect();

        let names: Vec<_> = set.iter().map(|k| k.name()).collect();
        assert_eq!(names, vec![std::any::type_name::<B>(), std::any::type_name::<A>()]);
        assert!(set.contains_type::<A>());
        assert!(!set.contains_type::<u8>());
    }
}
