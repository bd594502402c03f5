//! Example demonstrating logging capabilities
//!
//! Run with JSON logging (production):
//! ```bash
//! cargo run --example logging --features logging-json
//! ```
//!
//! Run with pretty logging (development):
//! ```bash
//! cargo run --example logging --features logging-pretty
//! ```

use eager_injector::{Constructor, Container, TypeDescriptor};
use std::sync::Arc;

struct Database;
struct Cache;
struct UserService {
    _db: Arc<Database>,
    _cache: Arc<Cache>,
}
struct Loop;

fn main() {
    // TRACE shows constructor selection and registry hits as well
    eager_injector::logging::builder()
        .trace()
        .injector_only()
        .pretty()
        .init();

    println!("=== Eager Injector Logging Demo ===\n");

    // Logs: "Creating new DI container", "Initializing container",
    // one "Instance built" per type, then "Container initialized"
    let container = Container::builder()
        .descriptor(TypeDescriptor::of::<Database>().constructor(Constructor::new(|(): ()| Database)))
        .descriptor(TypeDescriptor::of::<Cache>().constructor(Constructor::new(|(): ()| Cache)))
        .descriptor(TypeDescriptor::of::<UserService>().constructor(
            Constructor::new(|(db, cache): (Arc<Database>, Arc<Cache>)| UserService {
                _db: db,
                _cache: cache,
            })
            .inject(),
        ))
        .candidate::<UserService>()
        .candidate::<Database>()
        .build();

    match container {
        Ok(container) => {
            // Logs: "Bean not managed by this container"
            assert!(container.get_bean::<Cache>().is_none());
            assert!(container.get_bean::<UserService>().is_some());
        }
        Err(err) => eprintln!("unexpected: {err}"),
    }

    // Logs: "Container initialization failed" with the cycle path
    let broken = Container::builder()
        .descriptor(TypeDescriptor::of::<Loop>().constructor(Constructor::new(|_l: Arc<Loop>| Loop)))
        .candidate::<Loop>()
        .build();
    if let Err(err) = broken {
        println!("\nExpected failure: {err}");
    }

    println!("\n=== Demo Complete ===");
    println!("\nTip: Use --features logging-json for production (JSON output)");
    println!("     Use --features logging-pretty for development (colorful output)");
}
