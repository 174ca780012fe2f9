//! Whole-pipeline test: seeded backend -> authorization -> list -> detail.

use chrono::Utc;
use health_store::config::Config;
use health_store::memory::MemoryBackend;
use health_store::store::HealthStore;
use std::sync::Arc;
use workout_viewer::detail::WorkoutDetail;
use workout_viewer::format::FormatConfig;
use workout_viewer::list::{load_step_rows, load_workout_rows};
use workout_viewer::seed::seed_demo_data;

#[tokio::test]
async fn seeded_viewer_renders_list_detail_and_step_history() {
    let now = Utc::now();
    let backend = Arc::new(MemoryBackend::new());
    seed_demo_data(&backend, now);
    let store = HealthStore::new(backend, Config::default());
    let fmt = FormatConfig::default();

    let rows = load_workout_rows(&store, &fmt).await;
    assert!(!rows.is_empty());
    assert!(store.is_authorized());
    // newest first
    assert!(
        rows.windows(2)
            .all(|w| w[0].workout.start >= w[1].workout.start)
    );

    let detail = WorkoutDetail::load(&store, &fmt, &rows[0].workout).await;
    assert_eq!(detail.metrics.len(), 8);
    let count: usize = detail
        .value_of("Count locations")
        .and_then(|v| v.parse().ok())
        .expect("location count metric");
    assert!(count > 0);

    let steps = load_step_rows(&store, now).await;
    assert!(!steps.is_empty());
    assert!(steps.len() <= 7);
    assert!(steps.iter().all(|row| row.count > 0));
}

#[tokio::test]
async fn viewer_on_unavailable_device_shows_nothing_and_queries_nothing() {
    let backend = Arc::new(MemoryBackend::new());
    seed_demo_data(&backend, Utc::now());
    backend.set_available(false);
    let store = HealthStore::new(backend.clone(), Config::default());

    let rows = load_workout_rows(&store, &FormatConfig::default()).await;
    assert!(rows.is_empty());
    assert_eq!(backend.queries_served(), 0);
}
