//! Lazy, restartable iteration over a route's paginated location samples.
//!
//! The platform delivers route locations as a series of batches followed by a
//! terminal "done" signal. Instead of accumulating inside a callback, callers
//! pull batches one at a time (or through a stream adapter) and may restart
//! the sequence from the beginning.

use crate::{HealthBackend, HealthStoreError, LocationSample};
use futures_util::Stream;

pub struct LocationBatches<'a, B: HealthBackend> {
    backend: &'a B,
    route_id: String,
    cursor: u64,
    done: bool,
}

impl<'a, B: HealthBackend> LocationBatches<'a, B> {
    pub(crate) fn new(backend: &'a B, route_id: impl Into<String>) -> Self {
        Self {
            backend,
            route_id: route_id.into(),
            cursor: 0,
            done: false,
        }
    }

    /// Fetch the next batch of locations, or `Ok(None)` once the terminal
    /// signal has been seen. The sequence is finite: after `Ok(None)` every
    /// further call returns `Ok(None)` until [`restart`](Self::restart).
    pub async fn next_batch(&mut self) -> Result<Option<Vec<LocationSample>>, HealthStoreError> {
        if self.done {
            return Ok(None);
        }
        let page = self
            .backend
            .route_locations(&self.route_id, self.cursor)
            .await?
            .ok_or(HealthStoreError::InconsistentResponse(
                "route location query completed without a page",
            ))?;
        match page.next_cursor {
            Some(next) => self.cursor = next,
            None => self.done = true,
        }
        Ok(Some(page.locations))
    }

    /// Reset the cursor so the next call starts over from the first batch.
    pub fn restart(&mut self) {
        self.cursor = 0;
        self.done = false;
    }

    /// Accumulate every remaining batch in arrival order.
    pub async fn collect_all(&mut self) -> Result<Vec<LocationSample>, HealthStoreError> {
        let mut all = Vec::new();
        while let Some(batch) = self.next_batch().await? {
            all.extend(batch);
        }
        Ok(all)
    }

    /// Adapt the sequence into a `TryStream` of batches.
    pub fn into_stream(
        self,
    ) -> impl Stream<Item = Result<Vec<LocationSample>, HealthStoreError>> + 'a {
        futures_util::stream::try_unfold(self, |mut batches| async move {
            Ok(batches.next_batch().await?.map(|batch| (batch, batches)))
        })
    }
}
