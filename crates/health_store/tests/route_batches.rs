use chrono::{TimeDelta, TimeZone, Utc};
use futures_util::TryStreamExt;
use health_store::config::Config;
use health_store::memory::MemoryBackend;
use health_store::store::HealthStore;
use health_store::{ActivityKind, HealthStoreError, LocationSample, Route, Workout};

fn seeded(points: usize, page_size: usize) -> (HealthStore<MemoryBackend>, Workout, Route) {
    let start = Utc.with_ymd_and_hms(2026, 8, 20, 10, 0, 0).unwrap();
    let workout = Workout {
        id: "run-1".into(),
        kind: ActivityKind::Running,
        start,
        end: start + TimeDelta::hours(1),
        distance_meters: Some(10_000.0),
        energy_kcal: None,
    };
    let route = Route {
        id: "route-1".into(),
        workout_id: "run-1".into(),
    };
    let locations: Vec<LocationSample> = (0..points)
        .map(|i| LocationSample {
            latitude: 59.0 + i as f64 * 0.001,
            longitude: 18.0,
            altitude_meters: 10.0,
            recorded_at: start + TimeDelta::seconds(i as i64),
        })
        .collect();

    let backend = MemoryBackend::new();
    backend.set_location_page_size(page_size);
    backend.push_workout(workout.clone());
    backend.push_route(route.clone(), locations);
    (HealthStore::new(backend, Config::default()), workout, route)
}

#[tokio::test]
async fn accumulation_preserves_batch_arrival_order() {
    let (store, workout, _) = seeded(8, 3);
    let locations = store.workout_locations(&workout).await.unwrap();
    // 3 + 3 + 2: total length is the sum of each batch's length
    assert_eq!(locations.len(), 8);
    assert!(
        locations
            .windows(2)
            .all(|w| w[0].recorded_at < w[1].recorded_at)
    );
}

#[tokio::test]
async fn batches_arrive_page_sized_then_terminate() {
    let (store, _, route) = seeded(7, 3);
    let mut batches = store.route_locations(&route);
    assert_eq!(batches.next_batch().await.unwrap().unwrap().len(), 3);
    assert_eq!(batches.next_batch().await.unwrap().unwrap().len(), 3);
    assert_eq!(batches.next_batch().await.unwrap().unwrap().len(), 1);
    assert!(batches.next_batch().await.unwrap().is_none());
    // the sequence stays finished until restarted
    assert!(batches.next_batch().await.unwrap().is_none());
}

#[tokio::test]
async fn restart_replays_the_sequence_from_the_beginning() {
    let (store, _, route) = seeded(5, 2);
    let mut batches = store.route_locations(&route);
    let first_pass = batches.collect_all().await.unwrap();
    batches.restart();
    let second_pass = batches.collect_all().await.unwrap();
    assert_eq!(first_pass, second_pass);
    assert_eq!(first_pass.len(), 5);
}

#[tokio::test]
async fn stream_adapter_yields_every_batch() {
    let (store, _, route) = seeded(6, 4);
    let batches: Vec<Vec<LocationSample>> = store
        .route_locations(&route)
        .into_stream()
        .try_collect()
        .await
        .unwrap();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].len(), 4);
    assert_eq!(batches[1].len(), 2);
}

#[tokio::test]
async fn missing_page_payload_is_an_inconsistent_response() {
    let backend = std::sync::Arc::new(MemoryBackend::new());
    let route = Route {
        id: "route-1".into(),
        workout_id: "run-1".into(),
    };
    backend.push_route(route.clone(), Vec::new());
    let store = HealthStore::new(backend.clone(), Config::default());

    // Backend completes the query but hands back nothing; this surfaces
    // as a typed error, never a panic.
    backend.respond_empty();
    let mut batches = store.route_locations(&route);
    let err = batches.next_batch().await.unwrap_err();
    assert!(matches!(err, HealthStoreError::InconsistentResponse(_)));
}
