//! Benchmarks for the DI container

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use eager_injector::{
    AnyInstance, CandidateSet, Constructor, Container, ContainerOptions, TransitivePolicy,
    TypeCatalog, TypeDescriptor, TypeKey,
};
use std::hint::black_box;
use std::sync::Arc;

/// Chain node; `Node<N>` depends on `Node<N - 1>`
struct Node<const N: usize>;

fn make<const N: usize>() -> AnyInstance {
    Arc::new(Node::<N>)
}

const CHAIN: [fn() -> AnyInstance; 16] = [
    make::<0>, make::<1>, make::<2>, make::<3>, make::<4>, make::<5>, make::<6>, make::<7>,
    make::<8>, make::<9>, make::<10>, make::<11>, make::<12>, make::<13>, make::<14>, make::<15>,
];

fn keys() -> [TypeKey; 16] {
    [
        TypeKey::of::<Node<0>>(), TypeKey::of::<Node<1>>(), TypeKey::of::<Node<2>>(),
        TypeKey::of::<Node<3>>(), TypeKey::of::<Node<4>>(), TypeKey::of::<Node<5>>(),
        TypeKey::of::<Node<6>>(), TypeKey::of::<Node<7>>(), TypeKey::of::<Node<8>>(),
        TypeKey::of::<Node<9>>(), TypeKey::of::<Node<10>>(), TypeKey::of::<Node<11>>(),
        TypeKey::of::<Node<12>>(), TypeKey::of::<Node<13>>(), TypeKey::of::<Node<14>>(),
        TypeKey::of::<Node<15>>(),
    ]
}

/// Catalog for a chain of `len` nodes
fn chain_catalog(len: usize) -> TypeCatalog {
    let keys = keys();
    (0..len)
        .map(|i| {
            let params = if i == 0 { Vec::new() } else { vec![keys[i - 1]] };
            let make = CHAIN[i];
            TypeDescriptor::for_key(keys[i]).constructor(Constructor::raw(params, move |mut args| {
                while args.next_any().is_ok() {}
                Ok(make())
            }))
        })
        .collect()
}

#[allow(dead_code)]
struct Database {
    url: String,
}

#[allow(dead_code)]
struct UserService {
    db: Arc<Database>,
}

fn service_catalog() -> TypeCatalog {
    let mut catalog = TypeCatalog::new();
    catalog.insert(TypeDescriptor::of::<Database>().constructor(Constructor::new(|(): ()| Database {
        url: "postgres://localhost".into(),
    })));
    catalog.insert(
        TypeDescriptor::of::<UserService>()
            .constructor(Constructor::new(|db: Arc<Database>| UserService { db }).inject()),
    );
    catalog
}

fn bench_initialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("initialize");

    for len in [1usize, 4, 16] {
        let catalog = Arc::new(chain_catalog(len));
        let all: CandidateSet = keys()[..len].iter().copied().collect();
        let head_only: CandidateSet = [keys()[len - 1]].into_iter().collect();

        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("chain_all_candidates", len), &len, |b, _| {
            b.iter(|| {
                let container = Container::new(Arc::clone(&catalog), all.clone());
                container.initialize().unwrap();
                black_box(container)
            })
        });

        group.bench_with_input(BenchmarkId::new("chain_head_only", len), &len, |b, _| {
            b.iter(|| {
                let container = Container::new(Arc::clone(&catalog), head_only.clone());
                container.initialize().unwrap();
                black_box(container)
            })
        });
    }

    group.bench_function("service_pair", |b| {
        let catalog = Arc::new(service_catalog());
        let candidates = CandidateSet::new().with::<UserService>().with::<Database>();
        b.iter(|| {
            let container = Container::new(Arc::clone(&catalog), candidates.clone());
            container.initialize().unwrap();
            black_box(container)
        })
    });

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");

    let container = Container::initialized(
        service_catalog(),
        CandidateSet::new().with::<UserService>().with::<Database>(),
    )
    .unwrap();

    group.bench_function("get_bean_hit", |b| {
        b.iter(|| black_box(container.get_bean::<UserService>()))
    });

    group.bench_function("get_bean_miss", |b| {
        b.iter(|| black_box(container.get_bean::<String>()))
    });

    let options = ContainerOptions::new().with_transitive_policy(TransitivePolicy::Register);
    let exposed = Container::with_options(
        service_catalog(),
        CandidateSet::new().with::<UserService>(),
        options,
    );
    exposed.initialize().unwrap();

    group.bench_function("get_bean_transitive", |b| {
        b.iter(|| black_box(exposed.get_bean::<Database>()))
    });

    group.finish();
}

fn bench_concurrent(c: &mut Criterion) {
    use std::thread;

    let mut group = c.benchmark_group("concurrent");

    let container = Container::initialized(
        service_catalog(),
        CandidateSet::new().with::<UserService>().with::<Database>(),
    )
    .unwrap();

    group.bench_function("4_threads_get_bean", |b| {
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let container = container.clone();
                    thread::spawn(move || {
                        for _ in 0..100 {
                            black_box(container.get_bean::<UserService>());
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_initialize, bench_lookup, bench_concurrent);
criterion_main!(benches);
