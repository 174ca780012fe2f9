use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use health_store::config::Config;
use health_store::memory::MemoryBackend;
use health_store::store::HealthStore;
use health_store::{ActivityKind, HealthStoreError, QuantityKind, QuantitySample, Workout};

fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 20, h, m, 0).unwrap()
}

fn run_workout() -> Workout {
    Workout {
        id: "run-1".into(),
        kind: ActivityKind::Running,
        start: at(10, 0),
        end: at(11, 0),
        distance_meters: None,
        energy_kcal: None,
    }
}

fn beat(value: f64, start: DateTime<Utc>) -> QuantitySample {
    QuantitySample {
        kind: QuantityKind::HeartRate,
        value,
        start,
        end: start + TimeDelta::seconds(5),
        source: "Watch".into(),
        workout_id: None,
    }
}

#[tokio::test]
async fn empty_sample_set_summarizes_to_zero() {
    let backend = MemoryBackend::new();
    backend.push_workout(run_workout());
    let store = HealthStore::new(backend, Config::default());

    let hr = store.workout_heart_rate(&run_workout()).await.unwrap();
    assert_eq!(hr.min, 0);
    assert_eq!(hr.max, 0);
    assert_eq!(hr.avg, 0);
}

#[tokio::test]
async fn summary_tracks_min_max_and_average() {
    let backend = MemoryBackend::new();
    backend.push_workout(run_workout());
    backend.push_samples([
        beat(120.0, at(10, 5)),
        beat(180.0, at(10, 20)),
        beat(150.0, at(10, 40)),
    ]);
    let store = HealthStore::new(backend, Config::default());

    let hr = store.workout_heart_rate(&run_workout()).await.unwrap();
    assert_eq!(hr.min, 120);
    assert_eq!(hr.max, 180);
    assert_eq!(hr.avg, 150);
}

#[tokio::test]
async fn samples_ending_after_the_workout_are_excluded() {
    // The heart-rate query uses strict-end bounds: a reading that runs
    // past the workout end does not belong to it.
    let backend = MemoryBackend::new();
    backend.push_workout(run_workout());
    let straddling = QuantitySample {
        kind: QuantityKind::HeartRate,
        value: 200.0,
        start: at(10, 59),
        end: at(11, 0) + TimeDelta::seconds(30),
        source: "Watch".into(),
        workout_id: None,
    };
    backend.push_samples([beat(130.0, at(10, 30)), straddling]);
    let store = HealthStore::new(backend, Config::default());

    let hr = store.workout_heart_rate(&run_workout()).await.unwrap();
    assert_eq!(hr.max, 130);
}

#[tokio::test]
async fn backend_failure_propagates() {
    let backend = std::sync::Arc::new(MemoryBackend::new());
    let store = HealthStore::new(backend.clone(), Config::default());
    backend.fail_with("sensor unavailable");

    let err = store.workout_heart_rate(&run_workout()).await.unwrap_err();
    assert!(matches!(err, HealthStoreError::Backend(_)));
}
