//! Fuzz target for concurrent lookups
//!
//! Initializes a small fixed graph, then hammers `get_bean` from several
//! threads with arbitrary lookup sequences. Every thread must observe the
//! same instance for the same type.

#![no_main]

use arbitrary::Arbitrary;
use eager_injector::{CandidateSet, Component, Constructor, Container, TypeCatalog, TypeDescriptor};
use libfuzzer_sys::fuzz_target;
use std::sync::Arc;
use std::thread;

struct Config;

impl Component for Config {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::of::<Self>().constructor(Constructor::new(|(): ()| Config))
    }
}

struct Repository {
    _config: Arc<Config>,
}

impl Component for Repository {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::of::<Self>()
            .constructor(Constructor::new(|config: Arc<Config>| Repository { _config: config }))
    }
}

struct Service {
    repository: Arc<Repository>,
}

impl Component for Service {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::of::<Self>().constructor(
            Constructor::new(|(repository, _config): (Arc<Repository>, Arc<Config>)| Service {
                repository,
            })
            .inject(),
        )
    }
}

#[derive(Debug, Arbitrary)]
enum Lookup {
    Config,
    Repository,
    Service,
    Missing,
}

#[derive(Debug, Arbitrary)]
struct Input {
    threads: [Vec<Lookup>; 4],
    with_repository: bool,
}

fuzz_target!(|input: Input| {
    let catalog = TypeCatalog::new()
        .with::<Config>()
        .with::<Repository>()
        .with::<Service>();

    let mut candidates = CandidateSet::new().with::<Service>().with::<Config>();
    if input.with_repository {
        candidates.insert::<Repository>();
    }

    let Ok(container) = Container::initialized(catalog, candidates) else {
        return;
    };

    let service = container.get_bean::<Service>();
    let handles: Vec<_> = input
        .threads
        .into_iter()
        .map(|lookups| {
            let container = container.clone();
            let expected = service.clone();
            thread::spawn(move || {
                for lookup in lookups.iter().take(64) {
                    match lookup {
                        Lookup::Config => assert!(container.get_bean::<Config>().is_some()),
                        Lookup::Repository => {
                            let found = container.get_bean::<Repository>();
                            if let (Some(found), Some(expected)) = (&found, &expected) {
                                assert!(Arc::ptr_eq(found, &expected.repository));
                            }
                        }
                        Lookup::Service => {
                            let found = container.get_bean::<Service>();
                            match (&found, &expected) {
                                (Some(a), Some(b)) => assert!(Arc::ptr_eq(a, b)),
                                _ => panic!("service missing after initialization"),
                            }
                        }
                        Lookup::Missing => assert!(container.get_bean::<String>().is_none()),
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        let _ = handle.join();
    }
});
