//! Error types for constructor injection

use crate::TypeKey;
use thiserror::Error;

/// Errors that can occur while wiring or querying a container
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiError {
    /// Type is not a candidate, or has not been built yet
    #[error("Service not found: {type_name}")]
    NotFound { type_name: &'static str },

    /// Type metadata lists no constructor at all
    #[error("No constructor available for {type_name}")]
    NoConstructor { type_name: &'static str },

    /// Constructor choice is not well defined
    #[error("Ambiguous constructor for {type_name}: {count} candidates and no single inject marker")]
    AmbiguousConstructor {
        type_name: &'static str,
        count: usize,
    },

    /// A type has no metadata, so it cannot be built
    #[error("Unresolvable dependency {type_name} (required by {required_by})")]
    Unresolvable {
        type_name: &'static str,
        required_by: &'static str,
    },

    /// Circular dependency detected during resolution
    #[error("Circular dependency detected while resolving {type_name}: {}", .path.join(" -> "))]
    CircularDependency {
        type_name: &'static str,
        path: Vec<&'static str>,
    },

    /// Resolution went deeper than the configured bound
    #[error("Dependency depth {max_depth} exceeded while resolving {type_name}")]
    DepthExceeded {
        type_name: &'static str,
        max_depth: usize,
    },

    /// Constructor failed to create the instance
    #[error("Failed to create service {type_name}: {reason}")]
    CreationFailed {
        type_name: &'static str,
        reason: String,
    },

    /// Constructor received the wrong number of arguments
    #[error("Constructor of {type_name} expects {expected} argument(s), got {found}")]
    ArityMismatch {
        type_name: &'static str,
        expected: usize,
        found: usize,
    },

    /// Constructor received an argument of the wrong type
    #[error("Argument {position} of {type_name} constructor: expected {expected}, found {found}")]
    ArgumentMismatch {
        type_name: &'static str,
        position: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// `initialize` may only run once per container
    #[error("Container has already been initialized")]
    AlreadyInitialized,
}

impl DiError {
    /// Create a NotFound error for a type
    #[inline]
    pub fn not_found<T: 'static>() -> Self {
        Self::NotFound {
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Create a CreationFailed error
    #[inline]
    pub fn creation_failed<T: 'static>(reason: impl Into<String>) -> Self {
        Self::creation_failed_for(TypeKey::of::<T>(), reason)
    }

    /// Create a CreationFailed error for a type-erased key
    #[inline]
    pub fn creation_failed_for(key: TypeKey, reason: impl Into<String>) -> Self {
        Self::CreationFailed {
            type_name: key.name(),
            reason: reason.into(),
        }
    }

    /// Create a CircularDependency error from the current resolution path.
    ///
    /// `path` is the chain of types being built, outermost first; `repeated`
    /// is the type that re-entered it.
    pub fn circular(path: &[TypeKey], repeated: TypeKey) -> Self {
        let start = path.iter().position(|k| *k == repeated).unwrap_or(0);
        let mut names: Vec<&'static str> = path[start..].iter().map(|k| k.name()).collect();
        names.push(repeated.name());
        Self::CircularDependency {
            type_name: repeated.name(),
            path: names,
        }
    }

    /// Whether this error was raised while building the object graph
    /// (as opposed to a lookup or lifecycle error).
    pub fn is_wiring_error(&self) -> bool {
        !matches!(self, Self::NotFound { .. } | Self::AlreadyInitialized)
    }
}

/// Result type alias for DI operations
pub type Result<T> = std::result::Result<T, DiError>;

#[cfg(test)]
mod tests {
    use super::*;

    struct Alpha;
    struct Beta;

    #[test]
    fn test_circular_path_starts_at_repeated_type() {
        let path = [TypeKey::of::<u8>(), TypeKey::of::<Alpha>(), TypeKey::of::<Beta>()];
        let err = DiError::circular(&path, TypeKey::of::<Alpha>());

        match &err {
            DiError::CircularDependency { type_name, path } => {
                assert_eq!(*type_name, std::any::type_name::<Alpha>());
                assert_eq!(path.len(), 3);
                assert_eq!(path[0], path[2]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains(" -> "));
    }

    #[test]
    fn test_wiring_error_classification() {
        assert!(!DiError::not_found::<Alpha>().is_wiring_error());
        assert!(!DiError::AlreadyInitialized.is_wiring_error());
        assert!(DiError::creation_failed::<Beta>("boom").is_wiring_error());
    }

    #[test]
    fn test_creation_failed_message() {
        let err = DiError::creation_failed::<Beta>("disk full");
        assert!(err.to_string().ends_with("disk full"));
    }
}
