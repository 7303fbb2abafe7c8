//! Conflict Detection Benchmarks
//!
//! Measures the per-keystroke cost of re-running conflict detection and
//! resource projection over an already-fetched event list.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use famcal_core::time::parse_utc;
use famcal_core::Event;
use famcal_schedule::{detect_conflicts, project_events, Candidate, ProjectionMode};

fn fixture_events(count: usize) -> Vec<Event> {
    (0..count)
        .map(|i| {
            let hour = 8 + (i % 10);
            let attendee = (i % 4) as i64 + 1;
            serde_json::from_value(serde_json::json!({
                "id": i as i64,
                "title": format!("event-{}", i),
                "start_time": format!("2025-03-01T{:02}:00:00Z", hour),
                "end_time": format!("2025-03-01T{:02}:45:00Z", hour),
                "category": if i % 7 == 0 { "Family" } else { "General" },
                "attendees": [
                    {"id": attendee, "name": "member", "email": "m@example.com"}
                ],
            }))
            .unwrap()
        })
        .collect()
}

fn bench_detect_conflicts(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect_conflicts");

    for size in [10usize, 100, 500] {
        let events = fixture_events(size);
        let attendee_ids = [1i64];
        let candidate = Candidate {
            start: parse_utc("2025-03-01T10:00:00Z").unwrap(),
            end: parse_utc("2025-03-01T11:00:00Z").unwrap(),
            attendee_ids: &attendee_ids,
            category: "General",
        };

        group.bench_with_input(BenchmarkId::from_parameter(size), &events, |b, events| {
            b.iter(|| black_box(detect_conflicts(candidate, events)))
        });
    }

    group.finish();
}

fn bench_project_events(c: &mut Criterion) {
    let mut group = c.benchmark_group("project_events");

    let events = fixture_events(200);

    group.bench_function("unified", |b| {
        b.iter(|| black_box(project_events(&events, ProjectionMode::Unified)))
    });

    group.bench_function("by_resource", |b| {
        b.iter(|| black_box(project_events(&events, ProjectionMode::ByResource)))
    });

    group.finish();
}

criterion_group!(benches, bench_detect_conflicts, bench_project_events);
criterion_main!(benches);
