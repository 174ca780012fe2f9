//! Core types, the `HealthBackend` trait, and the `HealthStore` facade built on top of it.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod config;
pub mod memory;
pub mod route;
pub mod stats;
pub mod store;

#[derive(Debug, Error)]
pub enum HealthStoreError {
    #[error("health data store is not available")]
    Unavailable,
    #[error("read access to health data was not granted")]
    NotAuthorized,
    #[error("inconsistent backend response: {0}")]
    InconsistentResponse(&'static str),
    #[error("backend query failed: {0}")]
    Backend(String),
    #[error("configuration error: {0}")]
    Config(String),
}

/// Activity type attached to a recorded workout.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityKind {
    Running,
    Walking,
    Cycling,
    #[serde(other)]
    Other,
}

/// Quantity sample categories the backend can be queried for.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuantityKind {
    StepCount,
    HeartRate,
    Vo2Max,
}

/// Data categories a caller can request read access for.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadKind {
    StepCount,
    HeartRate,
    Vo2Max,
    Workout,
    WorkoutRoute,
    ActivitySummary,
}

/// Every category the facade requests on authorization.
pub const READ_KINDS: [ReadKind; 6] = [
    ReadKind::StepCount,
    ReadKind::HeartRate,
    ReadKind::Vo2Max,
    ReadKind::Workout,
    ReadKind::WorkoutRoute,
    ReadKind::ActivitySummary,
];

/// A recorded exercise session. Produced by the backend, read-only here.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Workout {
    pub id: String,
    pub kind: ActivityKind,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Total distance in meters, when the recording device captured one.
    pub distance_meters: Option<f64>,
    /// Total energy burned in kilocalories, when captured.
    pub energy_kcal: Option<f64>,
}

impl Workout {
    /// Wall-clock duration of the session, clamped at zero for malformed records.
    pub fn duration(&self) -> TimeDelta {
        (self.end - self.start).max(TimeDelta::zero())
    }

    /// The workout's own time span.
    pub fn time_range(&self) -> TimeRange {
        TimeRange {
            start: self.start,
            end: self.end.max(self.start),
        }
    }
}

/// A single quantity reading (steps, heart rate, ...) with its recording source.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct QuantitySample {
    pub kind: QuantityKind,
    pub value: f64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Name of the app or device that recorded the sample.
    pub source: String,
    /// Workout this sample was saved against, if any.
    pub workout_id: Option<String>,
}

/// Geographic point recorded along a workout route.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct LocationSample {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_meters: f64,
    pub recorded_at: DateTime<Utc>,
}

/// A recorded route; its location samples are fetched separately in pages.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct Route {
    pub id: String,
    pub workout_id: String,
}

/// One page of a route's location samples.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationPage {
    pub locations: Vec<LocationSample>,
    /// Cursor for the next page; `None` is the terminal "done" signal.
    pub next_cursor: Option<u64>,
}

/// Min/max/avg heart rate over a workout, in beats per minute.
/// An empty sample set yields the all-zero summary.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct HeartRateSummary {
    pub min: u32,
    pub max: u32,
    pub avg: u32,
}

/// Daily (or otherwise bucketed) step-count sum. Zero-count buckets are
/// never emitted by the aggregation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct StepBucket {
    pub start: DateTime<Utc>,
    pub count: u64,
}

/// Closed time span; construction rejects an end before the start.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, HealthStoreError> {
        if end < start {
            return Err(HealthStoreError::Config(format!(
                "time range ends before it starts: {start} > {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }
}

/// How a time-range predicate treats samples straddling the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeBounds {
    /// Any overlap with the range matches.
    Loose,
    /// The sample must start inside the range.
    StrictStart,
    /// The sample must end inside the range.
    StrictEnd,
}

/// Sample selection for quantity queries: either a time window or the set
/// of samples saved against a specific workout.
#[derive(Clone, Debug, PartialEq)]
pub enum SamplePredicate {
    TimeRange { range: TimeRange, bounds: RangeBounds },
    LinkedToWorkout(String),
}

impl SamplePredicate {
    pub fn matches(&self, sample: &QuantitySample) -> bool {
        match self {
            Self::TimeRange { range, bounds } => {
                let overlaps = sample.start < range.end && sample.end > range.start;
                match bounds {
                    RangeBounds::Loose => overlaps,
                    RangeBounds::StrictStart => overlaps && sample.start >= range.start,
                    RangeBounds::StrictEnd => overlaps && sample.end <= range.end,
                }
            }
            Self::LinkedToWorkout(id) => sample.workout_id.as_deref() == Some(id.as_str()),
        }
    }
}

/// Asynchronous boundary to the platform health-data store.
///
/// Query methods return `Ok(None)` when the platform reported success but
/// produced no payload; the facade maps that to
/// [`HealthStoreError::InconsistentResponse`] instead of treating it as an
/// impossible state.
#[async_trait]
pub trait HealthBackend: Send + Sync + 'static {
    /// Whether a health data store exists on this device at all.
    fn is_available(&self) -> bool;

    /// Ask the user for read access to the given categories.
    /// `Ok(false)` means the request completed but access was denied.
    async fn request_read_authorization(
        &self,
        kinds: &[ReadKind],
    ) -> Result<bool, HealthStoreError>;

    /// All workouts of the given activity kind, in no particular order.
    async fn workouts(
        &self,
        kind: ActivityKind,
    ) -> Result<Option<Vec<Workout>>, HealthStoreError>;

    /// Routes recorded for a workout (commonly zero or one).
    async fn workout_routes(
        &self,
        workout_id: &str,
    ) -> Result<Option<Vec<Route>>, HealthStoreError>;

    /// One page of a route's location samples, starting at `cursor`.
    async fn route_locations(
        &self,
        route_id: &str,
        cursor: u64,
    ) -> Result<Option<LocationPage>, HealthStoreError>;

    /// Quantity samples of `kind` matching `predicate`.
    async fn quantity_samples(
        &self,
        kind: QuantityKind,
        predicate: &SamplePredicate,
    ) -> Result<Option<Vec<QuantitySample>>, HealthStoreError>;
}

#[async_trait]
impl<B: HealthBackend + ?Sized> HealthBackend for std::sync::Arc<B> {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    async fn request_read_authorization(
        &self,
        kinds: &[ReadKind],
    ) -> Result<bool, HealthStoreError> {
        (**self).request_read_authorization(kinds).await
    }

    async fn workouts(
        &self,
        kind: ActivityKind,
    ) -> Result<Option<Vec<Workout>>, HealthStoreError> {
        (**self).workouts(kind).await
    }

    async fn workout_routes(
        &self,
        workout_id: &str,
    ) -> Result<Option<Vec<Route>>, HealthStoreError> {
        (**self).workout_routes(workout_id).await
    }

    async fn route_locations(
        &self,
        route_id: &str,
        cursor: u64,
    ) -> Result<Option<LocationPage>, HealthStoreError> {
        (**self).route_locations(route_id, cursor).await
    }

    async fn quantity_samples(
        &self,
        kind: QuantityKind,
        predicate: &SamplePredicate,
    ) -> Result<Option<Vec<QuantitySample>>, HealthStoreError> {
        (**self).quantity_samples(kind, predicate).await
    }
}
