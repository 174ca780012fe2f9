//! Per-workout detail view model.

use crate::format::FormatConfig;
use health_store::store::HealthStore;
use health_store::{HealthBackend, HeartRateSummary, Workout};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct Metric {
    pub title: String,
    pub value: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct WorkoutDetail {
    pub metrics: Vec<Metric>,
}

impl WorkoutDetail {
    /// Build the detail metrics for one workout: route locations, step
    /// total (per the store's configured strategy) and heart-rate summary.
    /// A failed sub-query degrades to a zero value rather than failing the
    /// whole view.
    pub async fn load<B: HealthBackend>(
        store: &HealthStore<B>,
        fmt: &FormatConfig,
        workout: &Workout,
    ) -> Self {
        let locations = match store.workout_locations(workout).await {
            Ok(locations) => locations,
            Err(err) => {
                tracing::warn!(%err, workout = %workout.id, "route lookup failed");
                Vec::new()
            }
        };
        let steps = store.workout_steps(workout).await.unwrap_or_else(|err| {
            tracing::warn!(%err, workout = %workout.id, "step total failed");
            0.0
        });
        let heart = store
            .workout_heart_rate(workout)
            .await
            .unwrap_or_else(|err| {
                tracing::warn!(%err, workout = %workout.id, "heart rate summary failed");
                HeartRateSummary::default()
            });

        let metrics = vec![
            Metric {
                title: "Date".into(),
                value: fmt.span(workout.start, workout.end),
            },
            Metric {
                title: "Total Time".into(),
                value: fmt.duration(workout.duration()),
            },
            Metric {
                title: "Total Distance".into(),
                value: fmt.distance(workout.distance_meters.unwrap_or(0.0)),
            },
            Metric {
                title: "Count locations".into(),
                value: locations.len().to_string(),
            },
            Metric {
                title: "Total Energy".into(),
                value: fmt.energy(workout.energy_kcal.unwrap_or(0.0)),
            },
            Metric {
                title: "Avg. Heart Rate".into(),
                value: heart.avg.to_string(),
            },
            Metric {
                title: "Heart Rate Range".into(),
                value: format!("{} - {}", heart.min, heart.max),
            },
            Metric {
                title: "Steps count".into(),
                value: format!("{steps:.0}"),
            },
        ];
        Self { metrics }
    }

    pub fn value_of(&self, title: &str) -> Option<&str> {
        self.metrics
            .iter()
            .find(|m| m.title == title)
            .map(|m| m.value.as_str())
    }
}
