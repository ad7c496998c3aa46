/// Filter pipeline benchmarks
/// Measures injection detection, sanitizing and a full in-memory listing
use bson::{doc, DateTime};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use query_shield::application::ports::{CustomerRepository, OrderRepository};
use query_shield::application::use_cases::ListCustomersUseCase;
use query_shield::domain::entities::{Customer, Order};
use query_shield::domain::filtering::injection::DEFAULT_MAX_DEPTH;
use query_shield::domain::filtering::{sanitize, InjectionDetector, RawParameters, SafePattern};
use query_shield::infrastructure::persistence::InMemoryStore;
use std::hint::black_box;
use std::sync::Arc;
use tokio::runtime::Runtime;

fn detection_benchmarks(c: &mut Criterion) {
    let detector = InjectionDetector::new(DEFAULT_MAX_DEPTH);
    let mut group = c.benchmark_group("injection_detection");

    let clean = RawParameters::from_pairs([
        ("page", "3"),
        ("limit", "10"),
        ("sortField", "totalAmount"),
        ("sortOrder", "desc"),
        ("registrationDateFrom", "2023-01-01"),
        ("registrationDateTo", "2023-12-31"),
        ("search", "running shoes"),
    ]);
    group.bench_function("clean_parameters", |b| {
        b.iter(|| detector.inspect_parameters(black_box(&clean)))
    });

    let hostile = RawParameters::from_pairs([
        ("name[$ne]", "x"),
        ("search", "'; return this.password; var x='"),
    ]);
    group.bench_function("hostile_parameters", |b| {
        b.iter(|| detector.inspect_parameters(black_box(&hostile)))
    });

    for len in [16usize, 256, 4096] {
        let value = "a.b*c?".repeat(len / 6 + 1);
        group.throughput(Throughput::Bytes(value.len() as u64));
        group.bench_with_input(BenchmarkId::new("safe_pattern", len), &value, |b, v| {
            b.iter(|| SafePattern::new(black_box(v)).compile())
        });
    }

    group.finish();
}

fn sanitize_benchmarks(c: &mut Criterion) {
    let filter = doc! {
        "name": SafePattern::new("ada"),
        "createdAt": { "$gte": DateTime::from_millis(0), "$lte": DateTime::now() },
        "$where": "sleep(1000)",
        "$or": [
            { "name": { "$ne": "" } },
            { "lastOrder": { "$in": [1, 2, 3], "$nin": [4] } },
        ],
    };

    c.bench_function("sanitize_mixed_filter", |b| {
        b.iter(|| sanitize(black_box(filter.clone())))
    });
}

fn listing_benchmarks(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("list_customers");

    for size in [100usize, 1_000] {
        let store = InMemoryStore::new();
        for i in 0..size {
            let customer = Customer::registered_at(
                format!("Customer {}", i),
                format!("customer{}@example.com", i),
                DateTime::from_millis(i as i64 * 60_000),
            );
            let id = customer.id();
            store.insert_customer(customer);
            let address = if i % 10 == 0 { "Shoe Lane" } else { "Main Street" };
            store.insert_order(Order::new(id, address, i as f64, DateTime::from_millis(0)));
        }
        let store = Arc::new(store);
        let use_case = ListCustomersUseCase::new(
            Arc::clone(&store) as Arc<dyn CustomerRepository>,
            store as Arc<dyn OrderRepository>,
            InjectionDetector::new(DEFAULT_MAX_DEPTH),
        );
        let params = RawParameters::from_pairs([
            ("search", "shoe"),
            ("sortField", "totalAmount"),
            ("sortOrder", "desc"),
        ]);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("search", size), &params, |b, p| {
            b.to_async(&rt).iter(|| use_case.execute(p.clone()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    detection_benchmarks,
    sanitize_benchmarks,
    listing_benchmarks
);
criterion_main!(benches);
