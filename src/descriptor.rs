//! Type metadata: type keys, constructors and type descriptors
//!
//! A [`TypeDescriptor`] is the container's whole view of a type: which
//! constructors it has, what each constructor needs, and how to call it.
//! Descriptors are plain values registered up front, so no runtime
//! reflection is involved.

use crate::params::{Arguments, Params};
use crate::{DiError, Injectable, Result};
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A constructed, type-erased instance as stored by the container.
pub type AnyInstance = Arc<dyn Any + Send + Sync>;

/// Opaque handle identifying a type.
///
/// Equality and hashing use the `TypeId` only; the name is carried along
/// for diagnostics.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key for type `T`
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The underlying `TypeId`
    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this key identifies `T`
    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeKey {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Type-erased constructor function
type InvokeFn = Arc<dyn Fn(Arguments) -> Result<AnyInstance> + Send + Sync>;

/// One way of constructing a type.
///
/// Holds the ordered parameter types, the inject marker and the function
/// that turns resolved arguments into an instance.
///
/// # Examples
///
/// ```rust
/// use eager_injector::{Constructor, TypeKey};
/// use std::sync::Arc;
///
/// struct Service;
/// struct Controller {
///     service: Arc<Service>,
/// }
///
/// let ctor = Constructor::new(|(service,): (Arc<Service>,)| Controller { service }).inject();
///
/// assert!(ctor.has_inject_marker());
/// assert_eq!(ctor.params(), &[TypeKey::of::<Service>()]);
/// ```
#[derive(Clone)]
pub struct Constructor {
    params: Vec<TypeKey>,
    inject: bool,
    label: Option<&'static str>,
    invoke: InvokeFn,
}

impl Constructor {
    /// Constructor from an infallible closure.
    ///
    /// The parameter list is derived from `P`: `()`, `Arc<A>`, or a tuple
    /// `(Arc<A>, Arc<B>, ...)`.
    pub fn new<T, P, F>(f: F) -> Self
    where
        T: Injectable,
        P: Params,
        F: Fn(P) -> T + Send + Sync + 'static,
    {
        Self::try_new(move |params: P| Ok::<T, std::convert::Infallible>(f(params)))
    }

    /// Constructor from a fallible closure.
    ///
    /// An `Err` is reported as [`DiError::CreationFailed`] carrying the
    /// error's display text.
    pub fn try_new<T, P, E, F>(f: F) -> Self
    where
        T: Injectable,
        P: Params,
        E: fmt::Display,
        F: Fn(P) -> std::result::Result<T, E> + Send + Sync + 'static,
    {
        Self {
            params: P::keys(),
            inject: false,
            label: None,
            invoke: Arc::new(move |args: Arguments| {
                let params = P::from_arguments(args)?;
                f(params)
                    .map(|instance| Arc::new(instance) as AnyInstance)
                    .map_err(|e| DiError::creation_failed::<T>(e.to_string()))
            }),
        }
    }

    /// Constructor with an explicit parameter list and an untyped body.
    ///
    /// Useful when descriptors are generated at runtime. The body is
    /// responsible for reading its [`Arguments`].
    pub fn raw<F>(params: Vec<TypeKey>, f: F) -> Self
    where
        F: Fn(Arguments) -> Result<AnyInstance> + Send + Sync + 'static,
    {
        Self {
            params,
            inject: false,
            label: None,
            invoke: Arc::new(f),
        }
    }

    /// Mark this constructor for injection
    #[inline]
    pub fn inject(mut self) -> Self {
        self.inject = true;
        self
    }

    /// Attach a label shown in logs and debug output
    #[inline]
    pub fn labeled(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    /// Ordered parameter types
    #[inline]
    pub fn params(&self) -> &[TypeKey] {
        &self.params
    }

    /// Number of parameters
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Whether this constructor carries the inject marker
    #[inline]
    pub fn has_inject_marker(&self) -> bool {
        self.inject
    }

    #[inline]
    pub fn label(&self) -> Option<&'static str> {
        self.label
    }

    #[inline]
    pub(crate) fn invoke(&self, args: Arguments) -> Result<AnyInstance> {
        (self.invoke)(args)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("params", &self.params)
            .field("inject", &self.inject)
            .field("label", &self.label)
            .finish()
    }
}

/// Everything the container knows about one type
#[derive(Clone, Debug)]
pub struct TypeDescriptor {
    key: TypeKey,
    constructors: Vec<Constructor>,
}

impl TypeDescriptor {
    /// Empty descriptor for `T`
    #[inline]
    pub fn of<T: Injectable>() -> Self {
        Self::for_key(T::type_key_of())
    }

    /// Empty descriptor for an arbitrary key
    #[inline]
    pub fn for_key(key: TypeKey) -> Self {
        Self {
            key,
            constructors: Vec::new(),
        }
    }

    /// Add a constructor (builder style). Declaration order is preserved.
    #[inline]
    pub fn constructor(mut self, constructor: Constructor) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Add a constructor in place
    #[inline]
    pub fn push_constructor(&mut self, constructor: Constructor) {
        self.constructors.push(constructor);
    }

    #[inline]
    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Constructors in declaration order
    #[inline]
    pub fn constructors(&self) -> &[Constructor] {
        &self.constructors
    }
}
