//! Integration tests for `#[derive(Component)]`

use eager_injector::{Component, ConstructorPolicy, Container, ContainerOptions, TypeKey, select_constructor};
use std::sync::Arc;

#[derive(Component)]
struct Config;

#[derive(Component)]
struct Database {
    #[inject]
    config: Arc<Config>,
}

#[derive(Component)]
struct UserService {
    #[inject]
    db: Arc<Database>,
    #[inject]
    config: Arc<Config>,
    // Non-injected field uses Default
    request_count: u64,
}

#[derive(Component)]
struct UserController {
    #[inject]
    users: Arc<UserService>,
}

#[test]
fn derived_descriptor_lists_inject_fields_in_order() {
    let descriptor = UserService::descriptor();
    let chosen = select_constructor(&descriptor, ConstructorPolicy::RequireUnambiguous).unwrap();

    assert!(chosen.has_inject_marker());
    assert_eq!(
        chosen.params(),
        &[TypeKey::of::<Database>(), TypeKey::of::<Config>()]
    );
}

#[test]
fn unit_struct_has_zero_argument_constructor() {
    let descriptor = Config::descriptor();
    assert_eq!(descriptor.constructors().len(), 1);
    assert_eq!(descriptor.constructors()[0].arity(), 0);
}

#[test]
fn derived_components_wire_into_a_shared_graph() {
    let container = Container::builder()
        .component::<UserController>()
        .component::<UserService>()
        .component::<Database>()
        .component::<Config>()
        .options(ContainerOptions::strict())
        .build()
        .unwrap();

    let controller = container.get_bean::<UserController>().unwrap();
    let service = container.get_bean::<UserService>().unwrap();
    let config = container.get_bean::<Config>().unwrap();

    assert!(Arc::ptr_eq(&controller.users, &service));
    assert!(Arc::ptr_eq(&service.config, &config));
    assert!(Arc::ptr_eq(&service.db.config, &config));
    assert_eq!(service.request_count, 0);
}

#[test]
fn derived_dependency_outside_candidate_set_stays_private() {
    let container = Container::builder()
        .component::<UserController>()
        .dependency::<UserService>()
        .dependency::<Database>()
        .dependency::<Config>()
        .build()
        .unwrap();

    assert!(container.get_bean::<UserController>().is_some());
    assert!(container.get_bean::<Database>().is_none());
    assert_eq!(container.len(), 1);
}
