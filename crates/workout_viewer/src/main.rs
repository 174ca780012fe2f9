use std::sync::Arc;

use chrono::Utc;
use health_store::config::Config;
use health_store::memory::MemoryBackend;
use health_store::store::HealthStore;
use workout_viewer::detail::WorkoutDetail;
use workout_viewer::format::FormatConfig;
use workout_viewer::list::{load_step_rows, load_workout_rows};
use workout_viewer::seed;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configure logging from env var `HEALTH_LOG_LEVEL` (or fallback to `RUST_LOG`, default `info`).
    let log_env = std::env::var("HEALTH_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(&log_env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();

    let now = Utc::now();
    let backend = Arc::new(MemoryBackend::new());
    seed::seed_demo_data(&backend, now);

    let config = Config::from_env()?;
    tracing::info!(?config, "workout viewer starting against in-memory backend");
    let store = HealthStore::new(backend, config);
    let fmt = FormatConfig::default();

    let rows = load_workout_rows(&store, &fmt).await;
    println!("Running workouts");
    println!("================");
    for row in &rows {
        println!("{}", row.title);
        println!("    {}", row.subtitle);
    }

    if let Some(newest) = rows.first() {
        println!();
        println!("Latest run");
        println!("----------");
        let detail = WorkoutDetail::load(&store, &fmt, &newest.workout).await;
        for metric in &detail.metrics {
            println!("{:<18} {}", metric.title, metric.value);
        }
    }

    println!();
    println!("Steps, last {} days", store.config().window_days);
    println!("------------------");
    for row in load_step_rows(&store, now).await {
        println!("{:<12} {:>7}", row.day, row.count);
    }

    Ok(())
}
