//! Eager singleton container
//!
//! The `Container` owns the registry for a fixed set of candidate types,
//! builds every candidate once during [`Container::initialize`] and answers
//! lookups afterwards.

use crate::candidate::CandidateSet;
use crate::descriptor::{AnyInstance, TypeKey};
use crate::factory::InstanceBuilder;
use crate::options::ContainerOptions;
use crate::provider::{Component, TypeCatalog, TypeMetadataProvider};
use crate::storage::Registry;
use crate::{DiError, Injectable, Result, TypeDescriptor};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

#[cfg(feature = "logging")]
use tracing::{debug, trace, warn};

/// Lifecycle of a container's registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum InitState {
    /// Created, nothing built yet
    Pending = 0,
    /// `initialize` is running
    Initializing = 1,
    /// Every candidate is built
    Ready = 2,
    /// `initialize` returned an error; the registry may be partial
    Failed = 3,
}

impl InitState {
    #[inline]
    fn from_u8(value: u8) -> Self {
        match value {
            0 => InitState::Pending,
            1 => InitState::Initializing,
            2 => InitState::Ready,
            _ => InitState::Failed,
        }
    }
}

struct Inner {
    provider: Arc<dyn TypeMetadataProvider>,
    candidates: CandidateSet,
    registry: Registry,
    options: ContainerOptions,
    state: AtomicU8,
}

/// Moves the state out of `Initializing` when `initialize` leaves
struct InitGuard<'a> {
    state: &'a AtomicU8,
    finished: bool,
}

impl InitGuard<'_> {
    fn finish(mut self) {
        self.finished = true;
        self.state.store(InitState::Ready as u8, Ordering::Release);
    }
}

impl Drop for InitGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.state.store(InitState::Failed as u8, Ordering::Release);
        }
    }
}

/// Eager, singleton, constructor-injection container.
///
/// Cloning is cheap and every clone shares the same registry.
///
/// The registry is filled by exactly one call to [`initialize`](Self::initialize).
/// Lookups are safe from any thread at any time, but they only see
/// instances that were already built; callers that need a complete graph
/// should check [`is_ready`](Self::is_ready) or use [`ContainerBuilder::build`].
///
/// # Examples
///
/// ```rust
/// use eager_injector::{CandidateSet, Component, Constructor, Container, TypeCatalog, TypeDescriptor};
/// use std::sync::Arc;
///
/// struct UserService;
///
/// impl Component for UserService {
///     fn descriptor() -> TypeDescriptor {
///         TypeDescriptor::of::<Self>().constructor(Constructor::new(|(): ()| UserService))
///     }
/// }
///
/// struct UserController {
///     service: Arc<UserService>,
/// }
///
/// impl Component for UserController {
///     fn descriptor() -> TypeDescriptor {
///         TypeDescriptor::of::<Self>().constructor(
///             Constructor::new(|service: Arc<UserService>| UserController { service }).inject(),
///         )
///     }
/// }
///
/// let catalog = TypeCatalog::new().with::<UserController>().with::<UserService>();
/// let candidates = CandidateSet::new().with::<UserController>().with::<UserService>();
///
/// let container = Container::new(catalog, candidates);
/// container.initialize().unwrap();
///
/// let controller = container.get_bean::<UserController>().unwrap();
/// let service = container.get_bean::<UserService>().unwrap();
/// assert!(Arc::ptr_eq(&controller.service, &service));
/// assert!(container.get_bean::<String>().is_none());
/// ```
#[derive(Clone)]
pub struct Container {
    inner: Arc<Inner>,
}

impl Container {
    /// Create a container with default options. Nothing is built yet.
    pub fn new<P: TypeMetadataProvider + 'static>(provider: P, candidates: CandidateSet) -> Self {
        Self::with_options(provider, candidates, ContainerOptions::default())
    }

    /// Create a container with explicit options. Nothing is built yet.
    pub fn with_options<P: TypeMetadataProvider + 'static>(
        provider: P,
        candidates: CandidateSet,
        options: ContainerOptions,
    ) -> Self {
        Self::from_shared(Arc::new(provider), candidates, options)
    }

    /// Create a container over a shared metadata provider
    pub fn from_shared(
        provider: Arc<dyn TypeMetadataProvider>,
        candidates: CandidateSet,
        options: ContainerOptions,
    ) -> Self {
        #[cfg(feature = "logging")]
        debug!(
            target: "eager_injector",
            candidates = candidates.len(),
            known_types = provider.known_types().len(),
            ?options,
            "Creating new DI container"
        );

        let registry = Registry::new(&candidates, options.transitive_policy());
        Self {
            inner: Arc::new(Inner {
                provider,
                candidates,
                registry,
                options,
                state: AtomicU8::new(InitState::Pending as u8),
            }),
        }
    }

    /// Create and initialize in one step
    pub fn initialized<P: TypeMetadataProvider + 'static>(
        provider: P,
        candidates: CandidateSet,
    ) -> Result<Self> {
        let container = Self::new(provider, candidates);
        container.initialize()?;
        Ok(container)
    }

    /// Start a [`ContainerBuilder`]
    #[inline]
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Build every candidate type.
    ///
    /// Candidates are visited in set order; any that were already built as a
    /// dependency of an earlier candidate are skipped. The first failure
    /// aborts initialization and is returned unchanged. Instances stored
    /// before the failure stay in place, and the container is left in
    /// [`InitState::Failed`].
    ///
    /// May run once per container: any later (or concurrent) call returns
    /// [`DiError::AlreadyInitialized`].
    pub fn initialize(&self) -> Result<()> {
        let inner = &*self.inner;
        inner
            .state
            .compare_exchange(
                InitState::Pending as u8,
                InitState::Initializing as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map_err(|_| DiError::AlreadyInitialized)?;

        #[cfg(feature = "logging")]
        debug!(
            target: "eager_injector",
            candidates = inner.candidates.len(),
            "Initializing container"
        );

        // Reports Failed unless disarmed, including when a constructor panics
        let guard = InitGuard {
            state: &inner.state,
            finished: false,
        };

        let mut builder = InstanceBuilder::new(&*inner.provider, &inner.registry, &inner.options);
        for key in &inner.candidates {
            if inner.registry.get(key).is_some() {
                #[cfg(feature = "logging")]
                trace!(
                    target: "eager_injector",
                    service = key.name(),
                    "Candidate already built as a dependency"
                );
                continue;
            }

            if let Err(err) = builder.get_or_build(*key) {
                #[cfg(feature = "logging")]
                warn!(
                    target: "eager_injector",
                    service = key.name(),
                    error = %err,
                    "Container initialization failed"
                );
                return Err(err);
            }
        }

        guard.finish();

        #[cfg(feature = "logging")]
        debug!(
            target: "eager_injector",
            candidates = inner.candidates.len(),
            built = builder.built(),
            transitive = inner.registry.transitive_count(),
            "Container initialized"
        );

        Ok(())
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// The singleton for `T`, or `None` if `T` is not managed here.
    ///
    /// Never fails and has no side effects.
    #[inline]
    pub fn get_bean<T: Injectable>(&self) -> Option<Arc<T>> {
        self.get_bean_by_key(&TypeKey::of::<T>())
            .and_then(|any| any.downcast::<T>().ok())
    }

    /// Type-erased form of [`get_bean`](Self::get_bean)
    #[inline]
    pub fn get_bean_by_key(&self, key: &TypeKey) -> Option<AnyInstance> {
        let found = self.inner.registry.get(key);

        #[cfg(feature = "logging")]
        if found.is_none() {
            trace!(
                target: "eager_injector",
                service = key.name(),
                "Bean not managed by this container"
            );
        }

        found
    }

    /// Like [`get_bean`](Self::get_bean), with [`DiError::NotFound`] instead of `None`
    #[inline]
    pub fn get<T: Injectable>(&self) -> Result<Arc<T>> {
        self.get_bean::<T>().ok_or_else(DiError::not_found::<T>)
    }

    /// Whether a built instance of `T` is available
    #[inline]
    pub fn contains<T: Injectable>(&self) -> bool {
        self.inner.registry.get(&TypeKey::of::<T>()).is_some()
    }

    /// Whether `T` is in the candidate set
    #[inline]
    pub fn is_candidate<T: 'static>(&self) -> bool {
        self.is_candidate_key(&TypeKey::of::<T>())
    }

    #[inline]
    pub fn is_candidate_key(&self, key: &TypeKey) -> bool {
        self.inner.registry.is_candidate(key)
    }

    /// Number of instances visible through `get_bean`
    pub fn len(&self) -> usize {
        self.registered_types().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Types visible through `get_bean`
    pub fn registered_types(&self) -> Vec<TypeKey> {
        self.inner.registry.visible_types()
    }

    #[inline]
    pub fn candidates(&self) -> &CandidateSet {
        &self.inner.candidates
    }

    #[inline]
    pub fn candidate_count(&self) -> usize {
        self.inner.candidates.len()
    }

    #[inline]
    pub fn options(&self) -> &ContainerOptions {
        &self.inner.options
    }

    #[inline]
    pub fn state(&self) -> InitState {
        InitState::from_u8(self.inner.state.load(Ordering::Acquire))
    }

    /// Whether `initialize` completed successfully
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.state() == InitState::Ready
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("candidates", &self.inner.candidates)
            .field("registry", &self.inner.registry)
            .field("state", &self.state())
            .finish()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Fluent setup for a [`Container`].
///
/// Collects type metadata into a [`TypeCatalog`] (unless a custom provider
/// is supplied), the candidate set and the options, then builds and
/// initializes the container.
///
/// # Examples
///
/// ```rust
/// use eager_injector::{Component, Constructor, Container, TypeDescriptor};
/// use std::sync::Arc;
///
/// struct Clock;
///
/// impl Component for Clock {
///     fn descriptor() -> TypeDescriptor {
///         TypeDescriptor::of::<Self>().constructor(Constructor::new(|(): ()| Clock))
///     }
/// }
///
/// struct Scheduler {
///     clock: Arc<Clock>,
/// }
///
/// impl Component for Scheduler {
///     fn descriptor() -> TypeDescriptor {
///         TypeDescriptor::of::<Self>().constructor(Constructor::new(|clock: Arc<Clock>| Scheduler { clock }))
///     }
/// }
///
/// let container = Container::builder()
///     .component::<Scheduler>()
///     .dependency::<Clock>()
///     .build()
///     .unwrap();
///
/// assert!(container.get_bean::<Scheduler>().is_some());
/// // Clock was built for Scheduler but is not a candidate
/// assert!(container.get_bean::<Clock>().is_none());
/// ```
#[derive(Default)]
pub struct ContainerBuilder {
    catalog: TypeCatalog,
    provider: Option<Arc<dyn TypeMetadataProvider>>,
    candidates: CandidateSet,
    options: ContainerOptions,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T`'s metadata and make it a candidate
    pub fn component<T: Component>(mut self) -> Self {
        self.catalog.register::<T>();
        self.candidates.insert::<T>();
        self
    }

    /// Register `T`'s metadata without making it a candidate
    pub fn dependency<T: Component>(mut self) -> Self {
        self.catalog.register::<T>();
        self
    }

    /// Register a hand-written descriptor without making it a candidate
    pub fn descriptor(mut self, descriptor: TypeDescriptor) -> Self {
        self.catalog.insert(descriptor);
        self
    }

    /// Make `T` a candidate; its metadata must come from elsewhere
    pub fn candidate<T: 'static>(mut self) -> Self {
        self.candidates.insert::<T>();
        self
    }

    /// Add a whole candidate set
    pub fn candidates(mut self, candidates: CandidateSet) -> Self {
        self.candidates.extend(candidates.iter().copied());
        self
    }

    /// Use a custom metadata provider instead of the builder's catalog.
    ///
    /// Descriptors registered on the builder are ignored once a provider is set.
    pub fn provider<P: TypeMetadataProvider + 'static>(mut self, provider: P) -> Self {
        self.provider = Some(Arc::new(provider));
        self
    }

    pub fn options(mut self, options: ContainerOptions) -> Self {
        self.options = options;
        self
    }

    /// Create the container without initializing it
    pub fn build_uninitialized(self) -> Container {
        let provider = match self.provider {
            Some(provider) => provider,
            None => Arc::new(self.catalog) as Arc<dyn TypeMetadataProvider>,
        };
        Container::from_shared(provider, self.candidates, self.options)
    }

    /// Create the container and run [`Container::initialize`]
    pub fn build(self) -> Result<Container> {
        let container = self.build_uninitialized();
        container.initialize()?;
        Ok(container)
    }
}

impl std::fmt::Debug for ContainerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerBuilder")
            .field("catalog", &self.catalog)
            .field("custom_provider", &self.provider.is_some())
            .field("candidates", &self.candidates)
            .field("options", &self.options)
            .finish()
    }
}
