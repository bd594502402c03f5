//! Example demonstrating the #[derive(Component)] macro
//!
//! Run with:
//!   cargo run --example derive --features derive

use eager_injector::{Component, Container, ContainerOptions};
use std::sync::Arc;

#[derive(Component)]
struct Database {
    url: String,
}

#[derive(Component)]
struct Cache;

// Service with injected dependencies
#[derive(Component)]
struct UserService {
    #[inject]
    db: Arc<Database>,
    #[inject]
    cache: Arc<Cache>,
    // Non-injected field uses Default
    request_count: u64,
}

impl UserService {
    fn describe(&self) -> String {
        format!(
            "UserService on '{}' with cache at {:p} (requests: {})",
            self.db.url,
            Arc::as_ptr(&self.cache),
            self.request_count
        )
    }
}

// Nested injection
#[derive(Component)]
struct ApiController {
    #[inject]
    user_service: Arc<UserService>,
    #[inject]
    db: Arc<Database>,
}

fn main() -> eager_injector::Result<()> {
    println!("=== Eager Injector Derive Macro Demo ===\n");

    let container = Container::builder()
        .component::<ApiController>()
        .component::<UserService>()
        // Built for UserService, but not queryable
        .dependency::<Database>()
        .dependency::<Cache>()
        .options(ContainerOptions::strict())
        .build()?;

    let controller = container.get::<ApiController>()?;
    println!("  {}", controller.user_service.describe());
    println!(
        "  controller and service share one Database: {}",
        Arc::ptr_eq(&controller.db, &controller.user_service.db)
    );
    println!(
        "  Database visible through get_bean: {}",
        container.get_bean::<Database>().is_some()
    );

    println!("\n=== Demo Complete ===");
    println!("\nThe #[derive(Component)] macro generated a descriptor that:");
    println!("  - Declares one inject-marked constructor");
    println!("  - Takes the #[inject] fields as parameters, in field order");
    println!("  - Uses Default::default() for the remaining fields");
    Ok(())
}
