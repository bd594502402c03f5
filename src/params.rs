//! Constructor parameter lists
//!
//! [`Params`] maps a Rust type (`()`, `Arc<T>` or a tuple of `Arc`s) to the
//! ordered list of type keys a constructor declares, and rebuilds that value
//! from the resolved [`Arguments`] at construction time.

use crate::descriptor::{AnyInstance, TypeKey};
use crate::{DiError, Injectable, Result};
use std::sync::Arc;

/// Resolved arguments for one constructor call, in declaration order.
pub struct Arguments {
    owner: TypeKey,
    len: usize,
    position: usize,
    values: std::vec::IntoIter<(TypeKey, AnyInstance)>,
}

impl Arguments {
    /// Arguments for a constructor of `owner`
    pub fn new(owner: TypeKey, values: Vec<(TypeKey, AnyInstance)>) -> Self {
        Self {
            owner,
            len: values.len(),
            position: 0,
            values: values.into_iter(),
        }
    }

    /// The type being constructed
    #[inline]
    pub fn owner(&self) -> TypeKey {
        self.owner
    }

    /// Total number of arguments, consumed or not
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Fail unless exactly `expected` arguments were supplied
    pub fn expect_arity(&self, expected: usize) -> Result<()> {
        if self.len == expected {
            Ok(())
        } else {
            Err(DiError::ArityMismatch {
                type_name: self.owner.name(),
                expected,
                found: self.len,
            })
        }
    }

    /// Take the next argument as `Arc<T>`
    pub fn next<T: Injectable>(&mut self) -> Result<Arc<T>> {
        let position = self.position;
        let (key, value) = self.values.next().ok_or(DiError::ArityMismatch {
            type_name: self.owner.name(),
            expected: position + 1,
            found: self.len,
        })?;
        self.position += 1;

        value.downcast::<T>().map_err(|_| DiError::ArgumentMismatch {
            type_name: self.owner.name(),
            position,
            expected: std::any::type_name::<T>(),
            found: key.name(),
        })
    }

    /// Take the next argument without a type check
    pub fn next_any(&mut self) -> Result<AnyInstance> {
        let (_, value) = self.values.next().ok_or(DiError::ArityMismatch {
            type_name: self.owner.name(),
            expected: self.position + 1,
            found: self.len,
        })?;
        self.position += 1;
        Ok(value)
    }

    /// Fail if any argument was left unconsumed
    pub fn finish(self) -> Result<()> {
        if self.position == self.len {
            Ok(())
        } else {
            Err(DiError::ArityMismatch {
                type_name: self.owner.name(),
                expected: self.position,
                found: self.len,
            })
        }
    }
}

impl std::fmt::Debug for Arguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arguments")
            .field("owner", &self.owner)
            .field("len", &self.len)
            .field("position", &self.position)
            .finish()
    }
}

/// A constructor's parameter list as a Rust type.
///
/// Implemented for:
/// - `()` - no parameters
/// - `Arc<T>` - one parameter
/// - `(Arc<A>,)` up to `(Arc<A>, ..., Arc<L>)` - 1 to 12 parameters
pub trait Params: Sized + 'static {
    /// Parameter types in declaration order
    fn keys() -> Vec<TypeKey>;

    /// Rebuild the parameter value from resolved arguments
    fn from_arguments(args: Arguments) -> Result<Self>;
}

impl Params for () {
    #[inline]
    fn keys() -> Vec<TypeKey> {
        Vec::new()
    }

    #[inline]
    fn from_arguments(args: Arguments) -> Result<Self> {
        args.expect_arity(0)?;
        args.finish()
    }
}

impl<T: Injectable> Params for Arc<T> {
    #[inline]
    fn keys() -> Vec<TypeKey> {
        vec![TypeKey::of::<T>()]
    }

    #[inline]
    fn from_arguments(mut args: Arguments) -> Result<Self> {
        args.expect_arity(1)?;
        let value = args.next::<T>()?;
        args.finish()?;
        Ok(value)
    }
}

macro_rules! count {
    () => { 0usize };
    ($head:ident $($tail:ident)*) => { 1usize + count!($($tail)*) };
}

// Tuple implementations (1-12 elements)
macro_rules! impl_params_tuple {
    ($($T:ident),+) => {
        impl<$($T: Injectable),+> Params for ($(Arc<$T>,)+) {
            #[inline]
            fn keys() -> Vec<TypeKey> {
                vec![$(TypeKey::of::<$T>()),+]
            }

            #[inline]
            fn from_arguments(mut args: Arguments) -> Result<Self> {
                args.expect_arity(count!($($T)+))?;
                let params = ($(args.next::<$T>()?,)+);
                args.finish()?;
                Ok(params)
            }
        }
    };
}

impl_params_tuple!(A);
impl_params_tuple!(A, B);
impl_params_tuple!(A, B, C);
impl_params_tuple!(A, B, C, D);
impl_params_tuple!(A, B, C, D, E);
impl_params_tuple!(A, B, C, D, E, F);
impl_params_tuple!(A, B, C, D, E, F, G);
impl_params_tuple!(A, B, C, D, E, F, G, H);
impl_params_tuple!(A, B, C, D, E, F, G, H, I);
impl_params_tuple!(A, B, C, D, E, F, G, H, I, J);
impl_params_tuple!(A, B, C, D, E, F, G, H, I, J, K);
impl_params_tuple!(A, B, C, D, E, F, G, H, I, J, K, L);
