//! Seedable in-memory `HealthBackend` used by tests and the demo binary.
//!
//! Serves route locations in pages of a configurable size and counts every
//! data query it answers, so tests can assert that a short-circuited
//! authorization issued no queries at all.

use crate::{
    ActivityKind, HealthBackend, HealthStoreError, LocationPage, LocationSample, QuantityKind,
    QuantitySample, ReadKind, Route, SamplePredicate, Workout,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

const DEFAULT_PAGE_SIZE: usize = 512;

#[derive(Default)]
struct Inner {
    workouts: Vec<Workout>,
    samples: Vec<QuantitySample>,
    routes: Vec<Route>,
    locations: HashMap<String, Vec<LocationSample>>,
    fail_next: Option<String>,
    empty_next: bool,
}

pub struct MemoryBackend {
    inner: RwLock<Inner>,
    available: AtomicBool,
    grant_authorization: AtomicBool,
    page_size: AtomicUsize,
    queries_served: AtomicU64,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            available: AtomicBool::new(true),
            grant_authorization: AtomicBool::new(true),
            page_size: AtomicUsize::new(DEFAULT_PAGE_SIZE),
            queries_served: AtomicU64::new(0),
        }
    }

    pub fn push_workout(&self, workout: Workout) {
        self.write().workouts.push(workout);
    }

    pub fn push_samples(&self, samples: impl IntoIterator<Item = QuantitySample>) {
        self.write().samples.extend(samples);
    }

    /// Register a route and its full, ordered location list. Pagination is
    /// applied when the locations are queried back.
    pub fn push_route(&self, route: Route, locations: Vec<LocationSample>) {
        let mut inner = self.write();
        inner.locations.insert(route.id.clone(), locations);
        inner.routes.push(route);
    }

    /// Simulate a device without a health data store.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Whether authorization requests are granted or denied.
    pub fn set_authorization(&self, grant: bool) {
        self.grant_authorization.store(grant, Ordering::SeqCst);
    }

    pub fn set_location_page_size(&self, size: usize) {
        self.page_size.store(size.max(1), Ordering::SeqCst);
    }

    /// Make the next data query fail with a backend error.
    pub fn fail_with(&self, message: impl Into<String>) {
        self.write().fail_next = Some(message.into());
    }

    /// Make the next data query report success without a payload, the
    /// "no error but no result" platform shape.
    pub fn respond_empty(&self) {
        self.write().empty_next = true;
    }

    /// Number of data queries answered so far (authorization requests are
    /// not data queries).
    pub fn queries_served(&self) -> u64 {
        self.queries_served.load(Ordering::SeqCst)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().expect("memory backend lock poisoned")
    }

    /// Count the query and apply any injected fault. `Ok(true)` means the
    /// query should report success without a payload.
    fn begin_query(&self) -> Result<bool, HealthStoreError> {
        self.queries_served.fetch_add(1, Ordering::SeqCst);
        let mut inner = self.write();
        if let Some(message) = inner.fail_next.take() {
            return Err(HealthStoreError::Backend(message));
        }
        Ok(std::mem::take(&mut inner.empty_next))
    }
}

#[async_trait]
impl HealthBackend for MemoryBackend {
    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn request_read_authorization(
        &self,
        _kinds: &[ReadKind],
    ) -> Result<bool, HealthStoreError> {
        Ok(self.grant_authorization.load(Ordering::SeqCst))
    }

    async fn workouts(
        &self,
        kind: ActivityKind,
    ) -> Result<Option<Vec<Workout>>, HealthStoreError> {
        if self.begin_query()? {
            return Ok(None);
        }
        let inner = self.inner.read().expect("memory backend lock poisoned");
        Ok(Some(
            inner
                .workouts
                .iter()
                .filter(|w| w.kind == kind)
                .cloned()
                .collect(),
        ))
    }

    async fn workout_routes(
        &self,
        workout_id: &str,
    ) -> Result<Option<Vec<Route>>, HealthStoreError> {
        if self.begin_query()? {
            return Ok(None);
        }
        let inner = self.inner.read().expect("memory backend lock poisoned");
        Ok(Some(
            inner
                .routes
                .iter()
                .filter(|r| r.workout_id == workout_id)
                .cloned()
                .collect(),
        ))
    }

    async fn route_locations(
        &self,
        route_id: &str,
        cursor: u64,
    ) -> Result<Option<LocationPage>, HealthStoreError> {
        if self.begin_query()? {
            return Ok(None);
        }
        let inner = self.inner.read().expect("memory backend lock poisoned");
        let all = inner.locations.get(route_id).map(Vec::as_slice).unwrap_or(&[]);
        let page_size = self.page_size.load(Ordering::SeqCst);
        let from = (cursor as usize).min(all.len());
        let to = (from + page_size).min(all.len());
        let next_cursor = (to < all.len()).then_some(to as u64);
        Ok(Some(LocationPage {
            locations: all[from..to].to_vec(),
            next_cursor,
        }))
    }

    async fn quantity_samples(
        &self,
        kind: QuantityKind,
        predicate: &SamplePredicate,
    ) -> Result<Option<Vec<QuantitySample>>, HealthStoreError> {
        if self.begin_query()? {
            return Ok(None);
        }
        let inner = self.inner.read().expect("memory backend lock poisoned");
        Ok(Some(
            inner
                .samples
                .iter()
                .filter(|s| s.kind == kind && predicate.matches(s))
                .cloned()
                .collect(),
        ))
    }
}
