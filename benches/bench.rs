// Criterion benchmarks for Detailing Nearby

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use detailing_nearby::core::{
    distance::{calculate_bounding_box, haversine_miles},
    find_nearby,
};
use detailing_nearby::models::{SearchFilters, ServiceLocation};
use detailing_nearby::services::InMemoryCatalog;
use detailing_nearby::NearbyLocator;
use std::sync::Arc;

const ORIGIN: (f64, f64) = (40.3469, -111.9047);

fn create_location(id: usize, lat: f64, lon: f64) -> ServiceLocation {
    ServiceLocation {
        id: format!("svc-{}", id),
        title: format!("Detail {}", id),
        category: if id % 3 == 0 { "interior" } else { "exterior" }.to_string(),
        address: format!("{} Main St", id),
        latitude: lat,
        longitude: lon,
        provider_name: None,
        price_from: Some(99.0),
    }
}

fn create_catalog(count: usize) -> Vec<ServiceLocation> {
    (0..count)
        .map(|i| {
            // Spread over roughly a 2 degree square around the origin
            let lat_offset = ((i * 37) % 2000) as f64 * 0.001 - 1.0;
            let lon_offset = ((i * 91) % 2000) as f64 * 0.001 - 1.0;
            create_location(i, ORIGIN.0 + lat_offset, ORIGIN.1 + lon_offset)
        })
        .collect()
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_miles", |b| {
        b.iter(|| {
            haversine_miles(
                black_box(ORIGIN.0),
                black_box(ORIGIN.1),
                black_box(40.3916),
                black_box(-111.8508),
            )
        });
    });
}

fn bench_bounding_box(c: &mut Criterion) {
    c.bench_function("bounding_box_calculation", |b| {
        b.iter(|| calculate_bounding_box(black_box(ORIGIN.0), black_box(ORIGIN.1), black_box(25.0)));
    });
}

fn bench_find_nearby(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_nearby");

    for count in [10, 100, 1000, 10_000].iter() {
        let catalog = create_catalog(*count);

        group.bench_with_input(BenchmarkId::new("full_scan", count), count, |b, _| {
            b.iter(|| find_nearby(black_box(&catalog), ORIGIN.0, ORIGIN.1, black_box(25.0)));
        });

        let locator = NearbyLocator::new(Arc::new(InMemoryCatalog::new(catalog.clone()).unwrap()));
        let filters = SearchFilters::default();
        group.bench_with_input(BenchmarkId::new("bbox_search", count), count, |b, _| {
            b.iter(|| locator.search(ORIGIN.0, ORIGIN.1, black_box(25.0), black_box(&filters), Some(50)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_haversine_distance, bench_bounding_box, bench_find_nearby);

criterion_main!(benches);
