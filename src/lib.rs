//! # Eager Injector - Constructor Injection for Rust
//!
//! A small dependency injection container with exactly one strategy: every
//! managed type is built once, eagerly, by calling one of its constructors
//! with arguments resolved by type from the same container.
//!
//! ## Features
//!
//! - 🏗️ **Eager** - The whole object graph is built by [`Container::initialize`]
//! - ♻️ **Singleton** - One shared `Arc<T>` per type across the graph
//! - 🔌 **Constructor injection** - Parameters are resolved recursively by type
//! - 🔁 **Cycle detection** - Circular dependencies fail with the full path
//! - 🧾 **No reflection** - Types describe their constructors in a registration table
//! - 📊 **Observable** - Optional tracing integration with JSON or pretty output
//!
//! ## Quick Start
//!
//! ```rust
//! use eager_injector::{Component, Constructor, Container, TypeDescriptor};
//! use std::sync::Arc;
//!
//! struct UserService;
//!
//! impl Component for UserService {
//!     fn descriptor() -> TypeDescriptor {
//!         TypeDescriptor::of::<Self>().constructor(Constructor::new(|(): ()| UserService))
//!     }
//! }
//!
//! struct UserController {
//!     service: Arc<UserService>,
//! }
//!
//! impl Component for UserController {
//!     fn descriptor() -> TypeDescriptor {
//!         TypeDescriptor::of::<Self>().constructor(
//!             Constructor::new(|service: Arc<UserService>| UserController { service }).inject(),
//!         )
//!     }
//! }
//!
//! let container = Container::builder()
//!     .component::<UserController>()
//!     .component::<UserService>()
//!     .build()
//!     .unwrap();
//!
//! let controller = container.get_bean::<UserController>().unwrap();
//! let service = container.get_bean::<UserService>().unwrap();
//! assert!(Arc::ptr_eq(&controller.service, &service));
//! ```
//!
//! ## Constructor Selection
//!
//! A constructor marked with [`Constructor::inject`] is always preferred.
//! Without a marker the first declared constructor is used, or, with
//! [`ConstructorPolicy::RequireUnambiguous`], a type declaring several
//! constructors is rejected.
//!
//! ## Failure Model
//!
//! Wiring errors are never deferred: a missing type, a failing constructor
//! or a cycle makes [`Container::initialize`] return the error and the
//! container is left in [`InitState::Failed`]. Lookups never fail; a type
//! the container does not manage is simply absent.
//!
//! ## Concurrency
//!
//! Initialization runs on the calling thread. After it completes the
//! registry is read-only and `Container` can be cloned and shared freely.

mod candidate;
mod container;
mod descriptor;
mod error;
mod factory;
#[cfg(feature = "logging")]
pub mod logging;
mod options;
mod params;
mod provider;
mod selector;
mod storage;

pub use candidate::*;
pub use container::*;
pub use descriptor::*;
pub use error::*;
pub use options::*;
pub use params::*;
pub use provider::*;
pub use selector::select_constructor;

#[cfg(feature = "derive")]
pub use eager_injector_derive::Component;

// Re-export tracing macros for convenience when logging feature is enabled
#[cfg(feature = "logging")]
pub use tracing::{debug, error, info, trace, warn};

// Re-export for convenience
pub use std::sync::Arc;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        CandidateSet, Component, Constructor, ConstructorPolicy, Container, ContainerBuilder,
        ContainerOptions, DiError, Injectable, Result, TransitivePolicy, TypeCatalog,
        TypeDescriptor, TypeKey, TypeMetadataProvider,
    };
    pub use std::sync::Arc;
}
