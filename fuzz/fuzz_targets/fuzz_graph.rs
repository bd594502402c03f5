//! Fuzz target for random dependency graphs
//!
//! Builds a catalog from arbitrary edges over a fixed pool of node types and
//! initializes a container over an arbitrary candidate subset. Wiring may
//! fail (cycles, missing types, ambiguous constructors) but must never panic,
//! and a successful initialization must expose every candidate.

#![no_main]

use arbitrary::Arbitrary;
use eager_injector::{
    AnyInstance, CandidateSet, Constructor, ConstructorPolicy, Container, ContainerOptions,
    TransitivePolicy, TypeCatalog, TypeDescriptor, TypeKey,
};
use libfuzzer_sys::fuzz_target;
use std::sync::Arc;

struct Node<const N: usize>;

fn make<const N: usize>() -> AnyInstance {
    Arc::new(Node::<N>)
}

const POOL: usize = 8;

const MAKE: [fn() -> AnyInstance; POOL] = [
    make::<0>, make::<1>, make::<2>, make::<3>, make::<4>, make::<5>, make::<6>, make::<7>,
];

fn keys() -> [TypeKey; POOL] {
    [
        TypeKey::of::<Node<0>>(),
        TypeKey::of::<Node<1>>(),
        TypeKey::of::<Node<2>>(),
        TypeKey::of::<Node<3>>(),
        TypeKey::of::<Node<4>>(),
        TypeKey::of::<Node<5>>(),
        TypeKey::of::<Node<6>>(),
        TypeKey::of::<Node<7>>(),
    ]
}

#[derive(Debug, Arbitrary)]
struct CtorSpec {
    params: Vec<u8>,
    inject: bool,
    fail: bool,
}

#[derive(Debug, Arbitrary)]
struct NodeSpec {
    // Absent from the catalog when false
    described: bool,
    ctors: Vec<CtorSpec>,
}

#[derive(Debug, Arbitrary)]
struct Input {
    nodes: [NodeSpec; POOL],
    candidates: Vec<u8>,
    strict: bool,
    register_transitive: bool,
    max_depth: u8,
}

fuzz_target!(|input: Input| {
    let keys = keys();

    let mut catalog = TypeCatalog::new();
    for (i, node) in input.nodes.iter().enumerate() {
        if !node.described {
            continue;
        }
        let mut descriptor = TypeDescriptor::for_key(keys[i]);
        for ctor in node.ctors.iter().take(4) {
            let params: Vec<TypeKey> = ctor
                .params
                .iter()
                .take(6)
                .map(|p| keys[*p as usize % POOL])
                .collect();
            let make = MAKE[i];
            let fail = ctor.fail;
            let mut built = Constructor::raw(params, move |mut args| {
                while args.next_any().is_ok() {}
                if fail {
                    Err(eager_injector::DiError::creation_failed_for(
                        args.owner(),
                        "fuzzed failure",
                    ))
                } else {
                    Ok(make())
                }
            });
            if ctor.inject {
                built = built.inject();
            }
            descriptor.push_constructor(built);
        }
        catalog.insert(descriptor);
    }

    let candidates: CandidateSet = input
        .candidates
        .iter()
        .map(|c| keys[*c as usize % POOL])
        .collect();

    let policy = if input.strict {
        ConstructorPolicy::RequireUnambiguous
    } else {
        ConstructorPolicy::FirstDeclared
    };
    let transitive = if input.register_transitive {
        TransitivePolicy::Register
    } else {
        TransitivePolicy::Private
    };
    let options = ContainerOptions::new()
        .with_constructor_policy(policy)
        .with_transitive_policy(transitive)
        .with_max_depth(input.max_depth as usize);

    let container = Container::with_options(catalog, candidates.clone(), options);

    match container.initialize() {
        Ok(()) => {
            for key in candidates.iter() {
                assert!(container.get_bean_by_key(key).is_some());
            }
            assert!(container.len() >= candidates.len());
            // Second call must be rejected, not rebuild
            assert!(container.initialize().is_err());
        }
        Err(_) => {
            assert!(!container.is_ready());
        }
    }
});
