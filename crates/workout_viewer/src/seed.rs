//! Synthetic demo data for the in-memory backend.

use chrono::{DateTime, TimeDelta, Utc};
use health_store::memory::MemoryBackend;
use health_store::{ActivityKind, LocationSample, QuantityKind, QuantitySample, Route, Workout};
use rand::{RngExt, rng};

/// Seed a week of running data: one workout per evening on most days, each
/// with a recorded route, linked step samples and a heart-rate trace, plus
/// background daily steps.
pub fn seed_demo_data(backend: &MemoryBackend, now: DateTime<Utc>) {
    let mut rng = rng();

    for days_ago in 1..=6i64 {
        // background steps, present every day
        let day_start = (now - TimeDelta::days(days_ago))
            .date_naive()
            .and_hms_opt(8, 0, 0)
            .map(|t| t.and_utc());
        let Some(day_start) = day_start else { continue };
        backend.push_samples([sample(
            QuantityKind::StepCount,
            rng.random_range(2000..9000) as f64,
            day_start,
            day_start + TimeDelta::hours(10),
            "Phone",
            None,
        )]);

        // no run every single day
        if days_ago % 3 == 0 {
            continue;
        }

        let id = format!("run-{days_ago}");
        let start = day_start + TimeDelta::hours(10);
        let minutes = rng.random_range(25..55i64);
        let end = start + TimeDelta::minutes(minutes);
        backend.push_workout(Workout {
            id: id.clone(),
            kind: ActivityKind::Running,
            start,
            end,
            distance_meters: Some(rng.random_range(4000..12000) as f64),
            energy_kcal: Some(rng.random_range(250..800) as f64),
        });

        backend.push_route(
            Route {
                id: format!("{id}-route"),
                workout_id: id.clone(),
            },
            (0..minutes * 12)
                .map(|i| LocationSample {
                    latitude: 59.33 + i as f64 * 0.00004,
                    longitude: 18.06 + rng.random_range(-0.0001..0.0001),
                    altitude_meters: 12.0 + rng.random_range(-2.0..2.0),
                    recorded_at: start + TimeDelta::seconds(i * 5),
                })
                .collect(),
        );

        backend.push_samples([sample(
            QuantityKind::StepCount,
            rng.random_range(3000.0..8000.0),
            start,
            end,
            "Watch",
            Some(&id),
        )]);
        for minute in 0..minutes {
            backend.push_samples([sample(
                QuantityKind::HeartRate,
                rng.random_range(120.0..180.0),
                start + TimeDelta::minutes(minute),
                start + TimeDelta::minutes(minute),
                "Watch",
                None,
            )]);
        }
    }
}

fn sample(
    kind: QuantityKind,
    value: f64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    source: &str,
    workout_id: Option<&str>,
) -> QuantitySample {
    QuantitySample {
        kind,
        value,
        start,
        end,
        source: source.into(),
        workout_id: workout_id.map(Into::into),
    }
}
