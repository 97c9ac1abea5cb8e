use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use tomlkit::{from_str, parse_document, render, to_string, to_table, DateTime, Table};

#[derive(Serialize, Deserialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Deserialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Clone)]
struct Catalog {
    products: Vec<Product>,
}

#[derive(Serialize, Deserialize, Clone)]
struct NestedData {
    id: u32,
    metadata: Metadata,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone)]
struct Metadata {
    created: DateTime,
    updated: DateTime,
    version: u32,
}

fn user() -> User {
    User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    }
}

fn catalog(size: u32) -> Catalog {
    Catalog {
        products: (0..size)
            .map(|i| Product {
                sku: format!("SKU{}", i),
                name: format!("Product {}", i),
                price: 9.99 + f64::from(i),
                quantity: i,
            })
            .collect(),
    }
}

fn nested() -> NestedData {
    NestedData {
        id: 42,
        metadata: Metadata {
            created: "2023-01-01T00:00:00Z".parse().unwrap(),
            updated: "2023-12-31T23:59:59Z".parse().unwrap(),
            version: 3,
        },
        tags: vec![
            "important".to_string(),
            "verified".to_string(),
            "production".to_string(),
        ],
    }
}

fn benchmark_serialize_simple(c: &mut Criterion) {
    let user = user();
    c.bench_function("serialize_simple_struct", |b| {
        b.iter(|| to_string(black_box(&user)))
    });
}

fn benchmark_deserialize_simple(c: &mut Criterion) {
    let toml = "id = 123\nname = 'Alice'\nemail = 'alice@example.com'\nactive = true\n";
    c.bench_function("deserialize_simple_struct", |b| {
        b.iter(|| from_str::<User>(black_box(toml)))
    });
}

fn benchmark_serialize_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_table_array");

    for size in [10, 50, 100, 500].iter() {
        let catalog = catalog(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| to_string(black_box(&catalog)))
        });
    }
    group.finish();
}

fn benchmark_deserialize_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("deserialize_table_array");

    for size in [10, 50, 100, 500].iter() {
        let toml = to_string(&catalog(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &toml, |b, toml| {
            b.iter(|| from_str::<Catalog>(black_box(toml)))
        });
    }
    group.finish();
}

fn benchmark_nested(c: &mut Criterion) {
    let data = nested();
    let toml = to_string(&data).unwrap();

    c.bench_function("serialize_nested_struct", |b| {
        b.iter(|| to_string(black_box(&data)))
    });
    c.bench_function("deserialize_nested_struct", |b| {
        b.iter(|| from_str::<NestedData>(black_box(&toml)))
    });
}

fn benchmark_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree");
    let toml = to_string(&catalog(100)).unwrap();
    let table: Table = to_table(&catalog(100)).unwrap();

    group.bench_function("parse_document", |b| {
        b.iter(|| parse_document(black_box(&toml)))
    });
    group.bench_function("render", |b| b.iter(|| render(black_box(&table))));
    group.bench_function("deep_clone", |b| b.iter(|| black_box(&table).deep_clone()));
    group.bench_function("equality", |b| {
        let copy = table.deep_clone();
        b.iter(|| black_box(&table) == black_box(&copy))
    });

    group.finish();
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let user = user();
    let mut group = c.benchmark_group("comparison");

    group.bench_function("toml_serialize", |b| {
        b.iter(|| to_string(black_box(&user)))
    });

    group.bench_function("json_serialize", |b| {
        b.iter(|| serde_json::to_string(black_box(&user)))
    });

    let toml_str = to_string(&user).unwrap();
    let json_str = serde_json::to_string(&user).unwrap();

    group.bench_function("toml_deserialize", |b| {
        b.iter(|| from_str::<User>(black_box(&toml_str)))
    });

    group.bench_function("json_deserialize", |b| {
        b.iter(|| serde_json::from_str::<User>(black_box(&json_str)))
    });

    group.finish();
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let user = user();
    c.bench_function("roundtrip_simple", |b| {
        b.iter(|| {
            let serialized = to_string(black_box(&user)).unwrap();
            let _deserialized: User = from_str(black_box(&serialized)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    benchmark_serialize_simple,
    benchmark_deserialize_simple,
    benchmark_serialize_array,
    benchmark_deserialize_array,
    benchmark_nested,
    benchmark_tree,
    benchmark_comparison_with_json,
    benchmark_roundtrip
);
criterion_main!(benches);
