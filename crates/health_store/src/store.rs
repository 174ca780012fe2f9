//! Query-orchestration facade over a [`HealthBackend`].
//!
//! Each operation is a single independent request: no retries, no caching,
//! no cross-call consistency. Authorization is requested once per store
//! instance and gates queries by convention only — a query issued without a
//! granted authorization still runs, with a warning.

use crate::config::{Config, StepSource};
use crate::route::LocationBatches;
use crate::stats;
use crate::{
    ActivityKind, HealthBackend, HealthStoreError, HeartRateSummary, LocationSample, QuantityKind,
    QuantitySample, RangeBounds, Route, SamplePredicate, StepBucket, TimeRange, Workout,
    READ_KINDS,
};
use chrono::{DateTime, NaiveTime, TimeDelta, Utc};
use std::sync::atomic::{AtomicBool, Ordering};

pub struct HealthStore<B: HealthBackend> {
    backend: B,
    config: Config,
    authorized: AtomicBool,
}

impl<B: HealthBackend> HealthStore<B> {
    pub fn new(backend: B, config: Config) -> Self {
        Self {
            backend,
            config,
            authorized: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether a previous [`request_authorization`](Self::request_authorization)
    /// succeeded on this instance.
    pub fn is_authorized(&self) -> bool {
        self.authorized.load(Ordering::SeqCst)
    }

    /// Request read access for every data category this store queries.
    ///
    /// When no health data store is available at all this fails with
    /// [`HealthStoreError::Unavailable`] without touching the backend.
    pub async fn request_authorization(&self) -> Result<(), HealthStoreError> {
        if !self.backend.is_available() {
            return Err(HealthStoreError::Unavailable);
        }
        let granted = self.backend.request_read_authorization(&READ_KINDS).await?;
        self.authorized.store(granted, Ordering::SeqCst);
        if granted {
            tracing::debug!("health data read access granted");
            Ok(())
        } else {
            Err(HealthStoreError::NotAuthorized)
        }
    }

    /// All workouts of the given activity kind, sorted by start date
    /// descending, unbounded count.
    pub async fn workouts(&self, kind: ActivityKind) -> Result<Vec<Workout>, HealthStoreError> {
        self.trace_gate("workouts");
        let mut workouts = resolve(
            self.backend.workouts(kind).await?,
            "workout query completed without a result",
        )?;
        workouts.sort_by(|a, b| b.start.cmp(&a.start));
        tracing::debug!(count = workouts.len(), ?kind, "listed workouts");
        Ok(workouts)
    }

    /// Routes recorded for a workout; most have zero or one.
    pub async fn workout_routes(&self, workout: &Workout) -> Result<Vec<Route>, HealthStoreError> {
        self.trace_gate("workout_routes");
        resolve(
            self.backend.workout_routes(&workout.id).await?,
            "route query completed without a result",
        )
    }

    /// Lazy, restartable sequence of a route's location batches.
    pub fn route_locations(&self, route: &Route) -> LocationBatches<'_, B> {
        self.trace_gate("route_locations");
        LocationBatches::new(&self.backend, route.id.clone())
    }

    /// All locations of the workout's first route, accumulated across
    /// batches in arrival order. A workout without a route yields an empty
    /// vec rather than an error.
    pub async fn workout_locations(
        &self,
        workout: &Workout,
    ) -> Result<Vec<LocationSample>, HealthStoreError> {
        let routes = self.workout_routes(workout).await?;
        let Some(route) = routes.first() else {
            return Ok(Vec::new());
        };
        self.route_locations(route).collect_all().await
    }

    /// Step total for the workout using the configured [`StepSource`].
    pub async fn workout_steps(&self, workout: &Workout) -> Result<f64, HealthStoreError> {
        match &self.config.step_source {
            StepSource::Linked => self.linked_step_total(workout).await,
            StepSource::TimeRange { manual_source } => {
                self.ranged_step_total(workout, manual_source.as_deref())
                    .await
            }
        }
    }

    /// Sum of step samples saved against the workout object, unfiltered.
    pub async fn linked_step_total(&self, workout: &Workout) -> Result<f64, HealthStoreError> {
        self.trace_gate("linked_step_total");
        let samples = self
            .step_samples(&SamplePredicate::LinkedToWorkout(workout.id.clone()))
            .await?;
        Ok(stats::summarize(&samples).sum)
    }

    /// Sum of step samples inside the workout's time range. With a
    /// `manual_source`, only samples recorded by that source count.
    pub async fn ranged_step_total(
        &self,
        workout: &Workout,
        manual_source: Option<&str>,
    ) -> Result<f64, HealthStoreError> {
        self.trace_gate("ranged_step_total");
        let predicate = SamplePredicate::TimeRange {
            range: workout.time_range(),
            bounds: RangeBounds::Loose,
        };
        let mut samples = self.step_samples(&predicate).await?;
        if let Some(source) = manual_source {
            samples.retain(|s| s.source == source);
        }
        Ok(stats::summarize(&samples).sum)
    }

    /// Min/max/avg heart rate over the workout's time range. An empty
    /// sample set yields the all-zero summary.
    pub async fn workout_heart_rate(
        &self,
        workout: &Workout,
    ) -> Result<HeartRateSummary, HealthStoreError> {
        self.trace_gate("workout_heart_rate");
        let predicate = SamplePredicate::TimeRange {
            range: workout.time_range(),
            bounds: RangeBounds::StrictEnd,
        };
        let samples = resolve(
            self.backend
                .quantity_samples(QuantityKind::HeartRate, &predicate)
                .await?,
            "heart rate query completed without a result",
        )?;
        let s = stats::summarize(&samples);
        if s.count == 0 {
            return Ok(HeartRateSummary::default());
        }
        Ok(HeartRateSummary {
            min: s.min as u32,
            max: s.max as u32,
            avg: s.avg as u32,
        })
    }

    /// Daily step sums over the last `window_days` calendar days ending at
    /// `now`, anchored to the ISO-week Monday-midnight boundary grid.
    /// Returns at most `window_days` buckets; zero-count days are omitted.
    pub async fn daily_steps(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<StepBucket>, HealthStoreError> {
        self.trace_gate("daily_steps");
        let today = now.date_naive().and_time(NaiveTime::MIN).and_utc();
        let start = today - TimeDelta::days(i64::from(self.config.window_days) - 1);
        let range = TimeRange::new(start, now)?;
        let predicate = SamplePredicate::TimeRange {
            range,
            bounds: RangeBounds::Loose,
        };
        let samples = self.step_samples(&predicate).await?;
        let buckets = stats::bucket_sum(
            &samples,
            stats::week_anchor(now),
            TimeDelta::days(1),
            range,
        );
        tracing::debug!(buckets = buckets.len(), "bucketed daily steps");
        Ok(buckets)
    }

    async fn step_samples(
        &self,
        predicate: &SamplePredicate,
    ) -> Result<Vec<QuantitySample>, HealthStoreError> {
        resolve(
            self.backend
                .quantity_samples(QuantityKind::StepCount, predicate)
                .await?,
            "step query completed without a result",
        )
    }

    fn trace_gate(&self, operation: &str) {
        if !self.is_authorized() {
            tracing::warn!(operation, "query issued without granted authorization");
        }
    }
}

fn resolve<T>(value: Option<T>, context: &'static str) -> Result<T, HealthStoreError> {
    value.ok_or(HealthStoreError::InconsistentResponse(context))
}
