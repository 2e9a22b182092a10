use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use powercast::{forecast_series, parse_observations, ForecastOptions, PowerResponse};
use serde_json::json;

fn synthetic_response(days: usize) -> PowerResponse {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let mut soil = serde_json::Map::new();
    let mut temp = serde_json::Map::new();
    for (i, day) in start.iter_days().take(days).enumerate() {
        let key = day.format("%Y%m%d").to_string();
        soil.insert(key.clone(), json!(0.4 + (i as f64 / 50.0).sin() * 0.1));
        temp.insert(key, json!(10.0 + (i as f64 / 365.0).cos() * 8.0));
    }
    serde_json::from_value(json!({
        "properties": {"parameter": {"GWETPROF": soil, "T2M": temp}}
    }))
    .unwrap()
}

fn bench_powercast(c: &mut Criterion) {
    let response = synthetic_response(730);
    c.bench_function("parse_observations_730d", |b| {
        b.iter(|| parse_observations(black_box(response.clone())))
    });

    let table = parse_observations(response.clone()).unwrap();
    let series = table.series("GWETPROF");
    let options = ForecastOptions::default();
    c.bench_function("forecast_series_730d", |b| {
        b.iter(|| forecast_series(black_box(&series), black_box(&options)))
    });
}

criterion_group!(benches, bench_powercast);
criterion_main!(benches);
