//! Keyed query cache with in-flight de-duplication and invalidation.
//!
//! Every list fetch in the dashboard is identified by a [`QueryKey`]
//! (resource, page, search term). The cache is the single authoritative
//! in-memory copy of fetched data: views never patch it in place, they
//! mutate through the backend and then invalidate, forcing the next read
//! to re-fetch.
//!
//! Concurrency model:
//! - Identical keys issued concurrently share one in-flight request.
//! - Distinct keys are independent; the most recently resolved fetch for a
//!   given key wins.
//! - Each slot carries a generation counter, bumped on invalidation. A
//!   response that resolves against an older generation is discarded
//!   rather than committed, so superseded fetches can never clobber a
//!   fresher invalidation cycle.

use std::collections::HashMap;
use std::future::Future;

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use tokio::sync::{watch, Mutex};

use dealdesk_api::{ApiError, EntityKind, RecordPage};

/// Identifies one cached fetch: which resource, which page, which search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    /// Entity resource the fetch belongs to.
    pub resource: EntityKind,
    /// Page number (1-indexed).
    pub page: u32,
    /// Search term; empty string when unfiltered.
    pub search: String,
}

impl QueryKey {
    /// Create a key.
    pub fn new(resource: EntityKind, page: u32, search: impl Into<String>) -> Self {
        Self {
            resource,
            page,
            search: search.into(),
        }
    }
}

/// Snapshot of a cached query, as seen by a subscriber.
///
/// `data` and `error` may both be present: a failed re-fetch leaves the
/// previous (stale) data visible alongside the error.
#[derive(Debug, Clone, Default)]
pub struct QueryState {
    /// Last successfully fetched page, if any.
    pub data: Option<RecordPage>,
    /// Whether a fetch for this key is currently in flight.
    pub is_loading: bool,
    /// Error from the most recent failed fetch, if it failed.
    pub error: Option<ApiError>,
}

impl QueryState {
    /// Whether the most recent fetch failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

type FetchResult = Result<RecordPage, ApiError>;
type SharedFetch = Shared<BoxFuture<'static, FetchResult>>;

#[derive(Default)]
struct Slot {
    generation: u64,
    stale: bool,
    data: Option<RecordPage>,
    error: Option<ApiError>,
    in_flight: Option<SharedFetch>,
}

impl Slot {
    fn state(&self) -> QueryState {
        QueryState {
            data: self.data.clone(),
            is_loading: self.in_flight.is_some(),
            error: self.error.clone(),
        }
    }

    fn needs_fetch(&self) -> bool {
        self.stale || self.data.is_none()
    }
}

/// Process-wide keyed store of in-flight and completed fetches.
///
/// Constructed once at application start; [`reset`](Self::reset) clears all
/// slots between test runs. Watchers subscribe to a version channel that is
/// bumped on every commit and invalidation.
pub struct QueryCache {
    slots: Mutex<HashMap<QueryKey, Slot>>,
    version: watch::Sender<u64>,
}

impl QueryCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        let (version, _) = watch::channel(0);
        Self {
            slots: Mutex::new(HashMap::new()),
            version,
        }
    }

    /// Subscribe to change notifications. The carried value is a version
    /// counter; watchers re-read the keys they care about when it moves.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }

    /// Current version counter.
    #[must_use]
    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }

    fn bump(&self) {
        self.version.send_modify(|v| *v += 1);
    }

    /// Read through the cache for `key`.
    ///
    /// Fresh cached data is returned without invoking `fetcher`. Otherwise
    /// the fetcher runs, or, if an identical fetch is already in flight,
    /// this call joins it instead of issuing a second request. On success
    /// the result is committed unless an invalidation superseded it; on
    /// failure the error is recorded and stale data (if any) stays visible.
    pub async fn query<F, Fut>(&self, key: &QueryKey, fetcher: F) -> QueryState
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = FetchResult> + Send + 'static,
    {
        let (fetch, generation) = {
            let mut slots = self.slots.lock().await;
            let slot = slots.entry(key.clone()).or_default();

            if !slot.needs_fetch() {
                return slot.state();
            }

            match slot.in_flight.clone() {
                Some(fetch) => (fetch, slot.generation),
                None => {
                    let fetch: SharedFetch = fetcher().boxed().shared();
                    slot.in_flight = Some(fetch.clone());
                    (fetch, slot.generation)
                }
            }
        };

        let result = fetch.await;

        let state = {
            let mut slots = self.slots.lock().await;
            let slot = slots.entry(key.clone()).or_default();

            if slot.generation == generation {
                slot.in_flight = None;
                match result {
                    Ok(page) => {
                        slot.data = Some(page);
                        slot.error = None;
                        slot.stale = false;
                    }
                    Err(e) => {
                        // Keep stale data visible next to the error.
                        slot.error = Some(e);
                    }
                }
                slot.state()
            } else {
                // Superseded by an invalidation mid-flight: do not commit.
                log::debug!(
                    "discarding stale response for {}:{} (gen {generation} < {})",
                    key.resource,
                    key.page,
                    slot.generation
                );
                match result {
                    Ok(page) => QueryState {
                        data: Some(page),
                        is_loading: slot.in_flight.is_some(),
                        error: None,
                    },
                    Err(e) => QueryState {
                        data: slot.data.clone(),
                        is_loading: slot.in_flight.is_some(),
                        error: Some(e),
                    },
                }
            }
        };

        self.bump();
        state
    }

    /// Snapshot the current state for `key` without fetching.
    pub async fn peek(&self, key: &QueryKey) -> QueryState {
        let slots = self.slots.lock().await;
        slots.get(key).map(Slot::state).unwrap_or_default()
    }

    /// Invalidate a single key (exact match).
    pub async fn invalidate(&self, key: &QueryKey) {
        {
            let mut slots = self.slots.lock().await;
            if let Some(slot) = slots.get_mut(key) {
                Self::mark_stale(slot);
            }
        }
        self.bump();
    }

    /// Invalidate every key belonging to `resource` (prefix match).
    ///
    /// This is the invalidation mutations request: after a create, update
    /// or delete succeeds, every cached page of that resource (any page,
    /// any search term) must re-fetch on its next read.
    pub async fn invalidate_resource(&self, resource: EntityKind) {
        {
            let mut slots = self.slots.lock().await;
            for (key, slot) in slots.iter_mut() {
                if key.resource == resource {
                    Self::mark_stale(slot);
                }
            }
        }
        self.bump();
    }

    /// Drop all cached state. Intended for application shutdown and for
    /// isolation between test runs.
    pub async fn reset(&self) {
        self.slots.lock().await.clear();
        self.bump();
    }

    fn mark_stale(slot: &mut Slot) {
        slot.stale = true;
        slot.generation += 1;
        // Joiners of a dropped in-flight fetch still resolve, but the
        // generation bump prevents their result from committing.
        slot.in_flight = None;
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}
