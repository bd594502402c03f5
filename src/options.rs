//! Container configuration

/// Default bound on nested constructor resolution
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// How a constructor is picked when a type declares several
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConstructorPolicy {
    /// The inject-marked constructor, else the first declared one
    #[default]
    FirstDeclared,
    /// The inject-marked constructor, else the only one; several unmarked
    /// constructors are an error
    RequireUnambiguous,
}

/// What happens to a dependency that is built but is not a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransitivePolicy {
    /// Built once and shared by its dependents, but `get_bean` stays absent
    #[default]
    Private,
    /// Built once and queryable through `get_bean` like a candidate
    Register,
}

/// Container configuration
///
/// # Example
///
/// ```rust
/// use eager_injector::{ConstructorPolicy, ContainerOptions, TransitivePolicy};
///
/// let options = ContainerOptions::new()
///     .with_constructor_policy(ConstructorPolicy::RequireUnambiguous)
///     .with_transitive_policy(TransitivePolicy::Register)
///     .with_max_depth(16);
///
/// assert_eq!(options.max_depth(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerOptions {
    constructor_policy: ConstructorPolicy,
    transitive_policy: TransitivePolicy,
    max_depth: usize,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            constructor_policy: ConstructorPolicy::default(),
            transitive_policy: TransitivePolicy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ContainerOptions {
    /// Create options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject unmarked multi-constructor types
    pub fn strict() -> Self {
        Self::default().with_constructor_policy(ConstructorPolicy::RequireUnambiguous)
    }

    pub fn with_constructor_policy(mut self, policy: ConstructorPolicy) -> Self {
        self.constructor_policy = policy;
        self
    }

    pub fn with_transitive_policy(mut self, policy: TransitivePolicy) -> Self {
        self.transitive_policy = policy;
        self
    }

    /// Set the resolution depth bound (clamped to at least 1)
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    #[inline]
    pub fn constructor_policy(&self) -> ConstructorPolicy {
        self.constructor_policy
    }

    #[inline]
    pub fn transitive_policy(&self) -> TransitivePolicy {
        self.transitive_policy
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ContainerOptions::default();
        assert_eq!(options.constructor_policy(), ConstructorPolicy::FirstDeclared);
        assert_eq!(options.transitive_policy(), TransitivePolicy::Private);
        assert_eq!(options.max_depth(), DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_builder_chain() {
        let options = ContainerOptions::strict()
            .with_transitive_policy(TransitivePolicy::Register)
            .with_max_depth(0);

        assert_eq!(options.constructor_policy(), ConstructorPolicy::RequireUnambiguous);
        assert_eq!(options.transitive_policy(), TransitivePolicy::Register);
        assert_eq!(options.max_depth(), 1);
    }
}
