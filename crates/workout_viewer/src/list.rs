//! List view models: the running-workout list and the daily-step list.
//!
//! Authorization or query failures degrade to an empty list with a logged
//! warning; the views never surface an error state of their own.

use crate::format::FormatConfig;
use chrono::{DateTime, Utc};
use health_store::store::HealthStore;
use health_store::{ActivityKind, HealthBackend, Workout};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct WorkoutRow {
    pub workout: Workout,
    /// "20 Aug 2026 10:00:00 - 10:40:05"
    pub title: String,
    /// "10.42 km - 00:40:05"
    pub subtitle: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct StepRow {
    pub day: String,
    pub count: u64,
}

/// Load the workout list: request authorization, then list running
/// workouts newest-first.
pub async fn load_workout_rows<B: HealthBackend>(
    store: &HealthStore<B>,
    fmt: &FormatConfig,
) -> Vec<WorkoutRow> {
    if let Err(err) = store.request_authorization().await {
        tracing::warn!(%err, "authorization failed, showing empty workout list");
        return Vec::new();
    }
    match store.workouts(ActivityKind::Running).await {
        Ok(workouts) => workouts.into_iter().map(|w| workout_row(w, fmt)).collect(),
        Err(err) => {
            tracing::warn!(%err, "workout query failed, showing empty workout list");
            Vec::new()
        }
    }
}

/// Load the steps variant of the list: one row per day with steps in the
/// configured window ending at `now`.
pub async fn load_step_rows<B: HealthBackend>(
    store: &HealthStore<B>,
    now: DateTime<Utc>,
) -> Vec<StepRow> {
    match store.daily_steps(now).await {
        Ok(buckets) => buckets
            .into_iter()
            .map(|b| StepRow {
                day: b.start.format("%d %b %Y").to_string(),
                count: b.count,
            })
            .collect(),
        Err(err) => {
            tracing::warn!(%err, "step history query failed, showing empty step list");
            Vec::new()
        }
    }
}

fn workout_row(workout: Workout, fmt: &FormatConfig) -> WorkoutRow {
    let title = fmt.span(workout.start, workout.end);
    let subtitle = format!(
        "{} - {}",
        fmt.distance(workout.distance_meters.unwrap_or(0.0)),
        fmt.duration(workout.duration())
    );
    WorkoutRow {
        workout,
        title,
        subtitle,
    }
}
