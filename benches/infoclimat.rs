use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use infoclimat::{QueryParams, SortBy, StationFilters, StationSort, SyntheticSeries};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_synthetic(c: &mut Criterion) {
    c.bench_function("generate_synthetic_series", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| SyntheticSeries::generate_with(black_box(&mut rng)))
    });

    let series = SyntheticSeries::generate_with(&mut StdRng::seed_from_u64(1));
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default();
    let end = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap_or_default();
    c.bench_function("synthetic_to_national_indicator", |b| {
        b.iter(|| series.to_national_indicator(black_box(start), black_box(end)))
    });
}

fn bench_query(c: &mut Criterion) {
    let filters = StationFilters::builder()
        .department(75)
        .is_open(true)
        .lat_min(48.0)
        .lat_max(49.5)
        .search("paris")
        .ordering(SortBy::desc(StationSort::Altitude))
        .limit(100)
        .offset(200)
        .build();
    c.bench_function("station_filters_to_query_pairs", |b| {
        b.iter(|| black_box(&filters).to_query_pairs())
    });
}

criterion_group!(benches, bench_synthetic, bench_query);
criterion_main!(benches);
