//! Constructor selection

use crate::descriptor::{Constructor, TypeDescriptor};
use crate::options::ConstructorPolicy;
use crate::{DiError, Result};

#[cfg(feature = "logging")]
use tracing::trace;

/// Pick the constructor the container will call for `descriptor`.
///
/// A single inject-marked constructor always wins. Without a marker the
/// only constructor is used, and with several the outcome depends on
/// `policy`. More than one marked constructor, or none at all, is an error.
pub fn select_constructor(
    descriptor: &TypeDescriptor,
    policy: ConstructorPolicy,
) -> Result<&Constructor> {
    let key = descriptor.key();
    let constructors = descriptor.constructors();

    let mut marked = constructors.iter().filter(|c| c.has_inject_marker());
    if let Some(chosen) = marked.next() {
        let extra = marked.count();
        if extra > 0 {
            return Err(DiError::AmbiguousConstructor {
                type_name: key.name(),
                count: extra + 1,
            });
        }

        #[cfg(feature = "logging")]
        trace!(
            target: "eager_injector",
            service = key.name(),
            arity = chosen.arity(),
            "Selected inject-marked constructor"
        );
        return Ok(chosen);
    }

    match (constructors, policy) {
        ([], _) => Err(DiError::NoConstructor {
            type_name: key.name(),
        }),
        ([only], _) => Ok(only),
        ([first, ..], ConstructorPolicy::FirstDeclared) => {
            #[cfg(feature = "logging")]
            trace!(
                target: "eager_injector",
                service = key.name(),
                declared = constructors.len(),
                "No inject marker, falling back to first declared constructor"
            );
            Ok(first)
        }
        (_, ConstructorPolicy::RequireUnambiguous) => Err(DiError::AmbiguousConstructor {
            type_name: key.name(),
            count: constructors.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Repo;
    struct Service;

    fn zero_arg(label: &'static str) -> Constructor {
        Constructor::new(|(): ()| Service).labeled(label)
    }

    #[test]
    fn test_marker_wins_over_declaration_order() {
        let descriptor = TypeDescriptor::of::<Service>()
            .constructor(zero_arg("plain"))
            .constructor(Constructor::new(|_repo: Arc<Repo>| Service).labeled("marked").inject());

        for policy in [ConstructorPolicy::FirstDeclared, ConstructorPolicy::RequireUnambiguous] {
            let chosen = select_constructor(&descriptor, policy).unwrap();
            assert_eq!(chosen.label(), Some("marked"));
        }
    }

    #[test]
    fn test_first_declared_fallback() {
        let descriptor = TypeDescriptor::of::<Service>()
            .constructor(zero_arg("first"))
            .constructor(zero_arg("second"));

        let chosen = select_constructor(&descriptor, ConstructorPolicy::FirstDeclared).unwrap();
        assert_eq!(chosen.label(), Some("first"));
    }

    #[test]
    fn test_strict_policy_rejects_ambiguity() {
        let descriptor = TypeDescriptor::of::<Service>()
            .constructor(zero_arg("first"))
            .constructor(zero_arg("second"));

        let err = select_constructor(&descriptor, ConstructorPolicy::RequireUnambiguous).unwrap_err();
        assert!(matches!(err, DiError::AmbiguousConstructor { count: 2, .. }));
    }

    #[test]
    fn test_single_constructor_under_strict_policy() {
        let descriptor = TypeDescriptor::of::<Service>().constructor(zero_arg("only"));
        let chosen = select_constructor(&descriptor, ConstructorPolicy::RequireUnambiguous).unwrap();
        assert_eq!(chosen.label(), Some("only"));
    }

    #[test]
    fn test_two_markers_are_ambiguous() {
        let descriptor = TypeDescriptor::of::<Service>()
            .constructor(zero_arg("a").inject())
            .constructor(zero_arg("b").inject());

        let err = select_constructor(&descriptor, ConstructorPolicy::FirstDeclared).unwrap_err();
        assert!(matches!(err, DiError::AmbiguousConstructor { count: 2, .. }));
    }

    #[test]
    fn test_no_constructor() {
        let descriptor = TypeDescriptor::of::<Service>();
        let err = select_constructor(&descriptor, ConstructorPolicy::FirstDeclared).unwrap_err();
        assert!(matches!(err, DiError::NoConstructor { .. }));
    }
}
