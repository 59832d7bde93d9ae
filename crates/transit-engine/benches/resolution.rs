use std::hint::black_box;

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};
use transit_engine::{next_available, upcoming, Transport};

fn bench_resolution(c: &mut Criterion) {
    let reference = NaiveDate::from_ymd_opt(2025, 11, 1)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    let transports: Vec<Transport> = [
        "2,3,2025-03-01 06:00,30,90,DAILY",
        "1,2,2025-11-02 09:00,120,180,WEEKLY,2",
        "3,4,2025-01-01 08:00,0,120,MONTHLY,15",
    ]
    .iter()
    .map(|line| Transport::parse(line).unwrap())
    .collect();

    for t in &transports {
        let name = format!("next_available/{}", t.periodicity);
        c.bench_function(&name, |b| {
            b.iter(|| next_available(black_box(t), black_box(reference)).unwrap())
        });
    }

    c.bench_function("upcoming/weekly_52", |b| {
        b.iter(|| upcoming(black_box(&transports[1]), black_box(reference), 52).unwrap())
    });
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse/eight_fields", |b| {
        b.iter(|| Transport::parse(black_box("1,2,2025-11-02 08:00,0,60,MONTHLY,4,20")).unwrap())
    });
}

criterion_group!(benches, bench_resolution, bench_parse);
criterion_main!(benches);
