//! Wiring a controller to its service
//!
//! Run with:
//!   cargo run --example wiring

use eager_injector::{CandidateSet, Component, Constructor, Container, TypeCatalog, TypeDescriptor};
use std::sync::Arc;

struct UserService {
    users: Vec<&'static str>,
}

impl UserService {
    fn new() -> Self {
        Self {
            users: vec!["ada", "grace", "linus"],
        }
    }

    fn find(&self, id: usize) -> Option<&'static str> {
        self.users.get(id).copied()
    }
}

impl Component for UserService {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::of::<Self>().constructor(Constructor::new(|(): ()| UserService::new()))
    }
}

struct UserController {
    user_service: Arc<UserService>,
}

impl UserController {
    fn new(user_service: Arc<UserService>) -> Self {
        Self { user_service }
    }

    fn show(&self, id: usize) -> String {
        match self.user_service.find(id) {
            Some(name) => format!("200 OK: {name}"),
            None => "404 Not Found".to_string(),
        }
    }
}

impl Component for UserController {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::of::<Self>()
            // Declared first, but the marked constructor below wins
            .constructor(Constructor::new(|(): ()| UserController::new(Arc::new(UserService::new()))))
            .constructor(Constructor::new(UserController::new).inject())
    }
}

struct HealthCheck;

fn main() {
    #[cfg(feature = "logging")]
    eager_injector::logging::init();

    println!("=== Eager Injector Wiring Demo ===\n");

    // Type discovery happens elsewhere; the container only sees the result
    let catalog = TypeCatalog::new().with::<UserController>().with::<UserService>();
    let candidates = CandidateSet::new().with::<UserController>().with::<UserService>();
    println!("Candidates: {candidates:?}");

    let container = match Container::initialized(catalog, candidates) {
        Ok(container) => container,
        Err(err) => {
            eprintln!("wiring failed: {err}");
            std::process::exit(1);
        }
    };

    let Some(controller) = container.get_bean::<UserController>() else {
        eprintln!("controller missing");
        std::process::exit(1);
    };
    let Some(service) = container.get_bean::<UserService>() else {
        eprintln!("service missing");
        std::process::exit(1);
    };

    println!("GET /users/1  -> {}", controller.show(1));
    println!("GET /users/9  -> {}", controller.show(9));
    println!(
        "controller shares the registered service: {}",
        Arc::ptr_eq(&controller.user_service, &service)
    );
    println!(
        "HealthCheck managed: {}",
        container.get_bean::<HealthCheck>().is_some()
    );

    println!("\n{container:#?}");
}
