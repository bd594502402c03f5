//! Instance construction
//!
//! The builder resolves a type by selecting its constructor, resolving each
//! parameter (from the registry, or by building it first) and invoking the
//! constructor with the arguments in declared order.
//!
//! Resolution keeps an explicit path of the types currently being built. A
//! type that shows up twice on the path is a cycle and fails with
//! [`DiError::CircularDependency`] instead of recursing forever.

use crate::descriptor::{AnyInstance, Constructor, TypeKey};
use crate::options::ContainerOptions;
use crate::params::Arguments;
use crate::provider::TypeMetadataProvider;
use crate::selector::select_constructor;
use crate::storage::Registry;
use crate::{DiError, Result};

#[cfg(feature = "logging")]
use tracing::{debug, trace};

/// Label used as `required_by` for top-level candidates
const CANDIDATE_SET: &str = "candidate set";

pub(crate) struct InstanceBuilder<'a> {
    provider: &'a dyn TypeMetadataProvider,
    registry: &'a Registry,
    options: &'a ContainerOptions,
    /// Types currently under construction, outermost first
    path: Vec<TypeKey>,
    /// Instances built by this builder
    built: usize,
}

impl<'a> InstanceBuilder<'a> {
    pub fn new(
        provider: &'a dyn TypeMetadataProvider,
        registry: &'a Registry,
        options: &'a ContainerOptions,
    ) -> Self {
        Self {
            provider,
            registry,
            options,
            path: Vec::with_capacity(8),
            built: 0,
        }
    }

    /// Number of instances this builder has constructed
    #[inline]
    pub fn built(&self) -> usize {
        self.built
    }

    /// Return the registered instance for `key`, building and storing it
    /// first if there is none yet.
    pub fn get_or_build(&mut self, key: TypeKey) -> Result<AnyInstance> {
        if let Some(existing) = self.registry.lookup(&key) {
            #[cfg(feature = "logging")]
            trace!(
                target: "eager_injector",
                service = key.name(),
                depth = self.path.len(),
                "Reusing already built instance"
            );
            return Ok(existing);
        }

        let instance = self.create_instance(key)?;
        Ok(self.registry.store(key, instance))
    }

    /// Build a new instance of `key`. The result is not stored.
    pub fn create_instance(&mut self, key: TypeKey) -> Result<AnyInstance> {
        if self.path.contains(&key) {
            return Err(DiError::circular(&self.path, key));
        }
        if self.path.len() >= self.options.max_depth() {
            return Err(DiError::DepthExceeded {
                type_name: key.name(),
                max_depth: self.options.max_depth(),
            });
        }

        // Copy the provider reference out so the descriptor borrow is tied
        // to 'a rather than to `self`
        let provider = self.provider;
        let descriptor = provider.describe(&key).ok_or_else(|| DiError::Unresolvable {
            type_name: key.name(),
            required_by: self.path.last().map_or(CANDIDATE_SET, |owner| owner.name()),
        })?;
        let constructor = select_constructor(descriptor, self.options.constructor_policy())?;

        self.path.push(key);
        let result = self.construct(key, constructor);
        self.path.pop();
        result
    }

    fn construct(&mut self, key: TypeKey, constructor: &Constructor) -> Result<AnyInstance> {
        let mut values = Vec::with_capacity(constructor.arity());
        for param in constructor.params() {
            values.push((*param, self.get_or_build(*param)?));
        }

        let instance = constructor.invoke(Arguments::new(key, values))?;
        if (*instance).type_id() != key.id() {
            return Err(DiError::creation_failed_for(
                key,
                "constructor produced a value of a different type",
            ));
        }

        self.built += 1;

        #[cfg(feature = "logging")]
        debug!(
            target: "eager_injector",
            service = key.name(),
            arity = constructor.arity(),
            depth = self.path.len(),
            candidate = self.registry.is_candidate(&key),
            "Instance built"
        );

        Ok(instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{ConstructorPolicy, TransitivePolicy};
    use crate::{CandidateSet, Constructor, TypeCatalog, TypeDescriptor};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct Leaf;
    struct Middle {
        leaf: Arc<Leaf>,
    }
    struct Top {
        middle: Arc<Middle>,
        leaf: Arc<Leaf>,
    }

    fn catalog() -> TypeCatalog {
        let mut catalog = TypeCatalog::new();
        catalog.insert(TypeDescriptor::of::<Leaf>().constructor(Constructor::new(|(): ()| Leaf)));
        catalog.insert(
            TypeDescriptor::of::<Middle>().constructor(Constructor::new(|leaf: Arc<Leaf>| Middle { leaf })),
        );
        catalog.insert(TypeDescriptor::of::<Top>().constructor(Constructor::new(
            |(middle, leaf): (Arc<Middle>, Arc<Leaf>)| Top { middle, leaf },
        )));
        catalog
    }

    #[test]
    fn test_transitive_dependencies_are_shared() {
        let catalog = catalog();
        let candidates = CandidateSet::new().with::<Top>();
        let registry = Registry::new(&candidates, TransitivePolicy::Private);
        let options = ContainerOptions::default();
        let mut builder = InstanceBuilder::new(&catalog, &registry, &options);

        let top = builder
            .get_or_build(TypeKey::of::<Top>())
            .unwrap()
            .downcast::<Top>()
            .unwrap();

        assert!(Arc::ptr_eq(&top.leaf, &top.middle.leaf));
        assert_eq!(builder.built(), 3);
        assert_eq!(registry.transitive_count(), 2);
    }

    #[test]
    fn test_create_instance_does_not_store() {
        let catalog = catalog();
        let candidates = CandidateSet::new().with::<Leaf>();
        let registry = Registry::new(&candidates, TransitivePolicy::Private);
        let options = ContainerOptions::default();
        let mut builder = InstanceBuilder::new(&catalog, &registry, &options);

        builder.create_instance(TypeKey::of::<Leaf>()).unwrap();
        assert!(registry.get(&TypeKey::of::<Leaf>()).is_none());
    }

    #[test]
    fn test_missing_metadata_names_the_dependent() {
        let mut catalog = TypeCatalog::new();
        catalog.insert(
            TypeDescriptor::of::<Middle>().constructor(Constructor::new(|leaf: Arc<Leaf>| Middle { leaf })),
        );
        let registry = Registry::new(&CandidateSet::new(), TransitivePolicy::Private);
        let options = ContainerOptions::default();
        let mut builder = InstanceBuilder::new(&catalog, &registry, &options);

        let err = builder.get_or_build(TypeKey::of::<Middle>()).unwrap_err();
        assert_eq!(
            err,
            DiError::Unresolvable {
                type_name: std::any::type_name::<Leaf>(),
                required_by: std::any::type_name::<Middle>(),
            }
        );
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        struct Ouroboros;

        let mut catalog = TypeCatalog::new();
        catalog.insert(
            TypeDescriptor::of::<Ouroboros>()
                .constructor(Constructor::new(|_me: Arc<Ouroboros>| Ouroboros)),
        );
        let registry = Registry::new(&CandidateSet::new(), TransitivePolicy::Private);
        let options = ContainerOptions::default();
        let mut builder = InstanceBuilder::new(&catalog, &registry, &options);

        let err = builder.get_or_build(TypeKey::of::<Ouroboros>()).unwrap_err();
        match err {
            DiError::CircularDependency { path, .. } => assert_eq!(path.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_depth_bound() {
        let catalog = catalog();
        let registry = Registry::new(&CandidateSet::new(), TransitivePolicy::Private);
        let options = ContainerOptions::default().with_max_depth(2);
        let mut builder = InstanceBuilder::new(&catalog, &registry, &options);

        let err = builder.get_or_build(TypeKey::of::<Top>()).unwrap_err();
        assert_eq!(
            err,
            DiError::DepthExceeded {
                type_name: std::any::type_name::<Leaf>(),
                max_depth: 2,
            }
        );
    }

    #[test]
    fn test_constructor_of_wrong_type_is_rejected() {
        let mut catalog = TypeCatalog::new();
        catalog.insert(TypeDescriptor::of::<Leaf>().constructor(Constructor::new(|(): ()| 7u32)));
        let registry = Registry::new(&CandidateSet::new(), TransitivePolicy::Private);
        let options = ContainerOptions::default();
        let mut builder = InstanceBuilder::new(&catalog, &registry, &options);

        let err = builder.get_or_build(TypeKey::of::<Leaf>()).unwrap_err();
        assert!(matches!(err, DiError::CreationFailed { .. }));
    }

    #[test]
    fn test_failure_is_not_retried_with_another_constructor() {
        static CALLS: AtomicU32 = AtomicU32::new(0);

        let mut catalog = TypeCatalog::new();
        catalog.insert(
            TypeDescriptor::of::<Leaf>()
                .constructor(Constructor::try_new(|(): ()| {
                    CALLS.fetch_add(1, Ordering::SeqCst);
                    Err::<Leaf, _>("refused")
                }))
                .constructor(Constructor::new(|(): ()| Leaf)),
        );
        let registry = Registry::new(&CandidateSet::new(), TransitivePolicy::Private);
        let options = ContainerOptions::default().with_constructor_policy(ConstructorPolicy::FirstDeclared);
        let mut builder = InstanceBuilder::new(&catalog, &registry, &options);

        assert!(builder.get_or_build(TypeKey::of::<Leaf>()).is_err());
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
        assert!(registry.lookup(&TypeKey::of::<Leaf>()).is_none());
    }
}
