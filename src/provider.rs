//! Provider traits for constructor injection
//!
//! These traits define which types can be managed and where the container
//! gets its type metadata from.

use crate::descriptor::{TypeDescriptor, TypeKey};
use ahash::RandomState;
use std::collections::HashMap;
use std::sync::Arc;

/// Marker trait for types that can be built and shared by the container.
///
/// This is automatically implemented for all types that are `Send + Sync + 'static`.
/// You never need to implement this manually.
pub trait Injectable: Send + Sync + 'static {
    /// Returns the key of this type (for internal use)
    #[inline]
    fn type_key_of() -> TypeKey
    where
        Self: Sized,
    {
        TypeKey::of::<Self>()
    }
}

// Blanket implementation - everything that's Send + Sync + 'static is Injectable
impl<T: Send + Sync + 'static> Injectable for T {}

/// A type that describes its own constructors.
///
/// Implement by hand, or with `#[derive(Component)]` when the `derive`
/// feature is enabled.
///
/// # Examples
///
/// ```rust
/// use eager_injector::{Component, Constructor, TypeDescriptor};
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
/// ```
pub trait Component: Injectable + Sized {
    /// Constructors of this type, in declaration order
    fn descriptor() -> TypeDescriptor;
}

/// Source of type metadata consumed by the container.
///
/// The container asks for a descriptor every time it has to build a type
/// that is not in its registry yet. A `None` answer makes that type
/// unresolvable.
pub trait TypeMetadataProvider: Send + Sync {
    /// Descriptor for `key`, if the type is known
    fn describe(&self, key: &TypeKey) -> Option<&TypeDescriptor>;

    /// All types this provider can describe
    fn known_types(&self) -> Vec<TypeKey>;
}

impl<P: TypeMetadataProvider + ?Sized> TypeMetadataProvider for Arc<P> {
    #[inline]
    fn describe(&self, key: &TypeKey) -> Option<&TypeDescriptor> {
        (**self).describe(key)
    }

    #[inline]
    fn known_types(&self) -> Vec<TypeKey> {
        (**self).known_types()
    }
}

/// Registration-table implementation of [`TypeMetadataProvider`].
///
/// Filled once at startup, read-only afterwards.
#[derive(Clone, Default)]
pub struct TypeCatalog {
    types: HashMap<TypeKey, TypeDescriptor, RandomState>,
}

impl TypeCatalog {
    /// Create an empty catalog
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-allocated capacity
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            types: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    /// Register a component's descriptor (builder style)
    #[inline]
    pub fn with<T: Component>(mut self) -> Self {
        self.register::<T>();
        self
    }

    /// Register a component's descriptor
    #[inline]
    pub fn register<T: Component>(&mut self) -> &mut Self {
        self.insert(T::descriptor());
        self
    }

    /// Insert a descriptor, replacing any previous one for the same type
    pub fn insert(&mut self, descriptor: TypeDescriptor) -> Option<TypeDescriptor> {
        self.types.insert(descriptor.key(), descriptor)
    }

    #[inline]
    pub fn contains<T: 'static>(&self) -> bool {
        self.types.contains_key(&TypeKey::of::<T>())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeMetadataProvider for TypeCatalog {
    #[inline]
    fn describe(&self, key: &TypeKey) -> Option<&TypeDescriptor> {
        self.types.get(key)
    }

    fn known_types(&self) -> Vec<TypeKey> {
        self.types.keys().copied().collect()
    }
}

impl Extend<TypeDescriptor> for TypeCatalog {
    fn extend<I: IntoIterator<Item = TypeDescriptor>>(&mut self, iter: I) {
        for descriptor in iter {
            self.insert(descriptor);
        }
    }
}

impl FromIterator<TypeDescriptor> for TypeCatalog {
    fn from_iter<I: IntoIterator<Item = TypeDescriptor>>(iter: I) -> Self {
        let mut catalog = Self::new();
        catalog.extend(iter);
        catalog
    }
}

impl std::fmt::Debug for TypeCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeCatalog")
            .field("count", &self.len())
            .finish()
    }
}
