use criterion::{Criterion, criterion_group, criterion_main};
use gapminder_chart::api::{
    AxisMapping, ChartSession, ChartSessionConfig, MarkStyle, build_population_scene,
    build_scatter,
};
use gapminder_chart::core::{ChartLayout, LinearScale, find_min_max};
use gapminder_chart::dataset::{CountryRecord, Dataset, RecordField};
use gapminder_chart::render::NullRenderer;
use std::hint::black_box;

fn synthetic_dataset(countries: usize, years: usize) -> Dataset {
    let mut records = Vec::with_capacity(countries * years);
    for country in 0..countries {
        for year in 0..years {
            let c = country as f64;
            let t = year as f64;
            records.push(CountryRecord::new(
                format!("Country {country}"),
                (1960 + year).to_string(),
                1.5 + (c * 0.37 + t * 0.11) % 6.0,
                40.0 + (c * 1.3 + t * 0.4) % 45.0,
                0.2 + c * 0.9 + t * 0.05,
            ));
        }
    }
    Dataset::from_records(records)
}

fn main_mapping(dataset: &Dataset) -> AxisMapping {
    let limits = find_min_max(
        &dataset.column(RecordField::Fertility),
        &dataset.column(RecordField::LifeExpectancy),
    );
    AxisMapping::build(
        limits,
        RecordField::Fertility,
        RecordField::LifeExpectancy,
        ChartLayout::MAIN,
    )
    .expect("valid mapping")
}

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let scale = LinearScale::new((0.5, 8.5), (50.0, 1450.0)).expect("valid scale");

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.map(black_box(4.321));
            let _ = scale.invert(px);
        })
    });
}

fn bench_scatter_projection_10k(c: &mut Criterion) {
    let dataset = synthetic_dataset(200, 50);
    let mapping = main_mapping(&dataset);

    c.bench_function("scatter_projection_10k", |b| {
        b.iter(|| {
            let _ = build_scatter(
                black_box(&dataset),
                black_box(&mapping),
                MarkStyle::default(),
            );
        })
    });
}

fn bench_population_scene(c: &mut Criterion) {
    let dataset = synthetic_dataset(200, 50);

    c.bench_function("population_scene_50_years", |b| {
        b.iter(|| {
            let _ = build_population_scene(
                black_box("Country 117"),
                black_box(&dataset),
                ChartLayout::DRILL_DOWN,
            )
            .expect("scene should build");
        })
    });
}

fn bench_session_snapshot_json(c: &mut Criterion) {
    let mut session = ChartSession::new(
        NullRenderer::default(),
        NullRenderer::default(),
        ChartSessionConfig::default(),
        synthetic_dataset(200, 50),
    )
    .expect("session init");
    session.hover_mark(1_020, 400.0, 300.0).expect("hover");

    c.bench_function("session_snapshot_json", |b| {
        b.iter(|| {
            let _ = session
                .snapshot_json_contract_v1_pretty()
                .expect("snapshot json should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_scatter_projection_10k,
    bench_population_scene,
    bench_session_snapshot_json
);
criterion_main!(benches);
