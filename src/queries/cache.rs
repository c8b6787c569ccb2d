//! Process-wide query cache keyed by [`QueryKey`]

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::gateway::{GatewayError, GatewayResult};
use crate::models::Principal;

/// Every cacheable read, by entity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    PublicPackages,
    AllInquiries,
    CallerProfile(Principal),
    CallerIsAdmin(Principal),
    CallerRole(Principal),
}

/// Fetch behaviour attached to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryPolicy {
    /// Extra attempts after a failed fetch
    pub retries: u32,
}

impl QueryKey {
    /// Listings get one retry; profile and role answers are taken as
    /// authoritative on the first attempt.
    pub fn policy(&self) -> QueryPolicy {
        match self {
            QueryKey::PublicPackages | QueryKey::AllInquiries => QueryPolicy { retries: 1 },
            QueryKey::CallerProfile(_) | QueryKey::CallerIsAdmin(_) | QueryKey::CallerRole(_) => {
                QueryPolicy { retries: 0 }
            }
        }
    }

    /// Answers that belong to one principal. These age out of the cache and
    /// may be swept, the shared listings only change through invalidation.
    pub fn is_caller_scoped(&self) -> bool {
        !matches!(self, QueryKey::PublicPackages | QueryKey::AllInquiries)
    }
}

/// How long a caller-scoped answer is served before the gateway is asked again
pub const CALLER_MAX_AGE: Duration = Duration::from_secs(60);

/// Slot count past which stale caller-scoped slots are swept before a new key is added
pub const SLOT_CAPACITY: usize = 1024;

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::PublicPackages => f.write_str("publicPackages"),
            QueryKey::AllInquiries => f.write_str("allInquiries"),
            QueryKey::CallerProfile(principal) => write!(f, "currentUserProfile:{}", principal),
            QueryKey::CallerIsAdmin(principal) => write!(f, "isCallerAdmin:{}", principal),
            QueryKey::CallerRole(principal) => write!(f, "callerUserRole:{}", principal),
        }
    }
}

#[derive(Default)]
struct Slot {
    value: Option<Arc<dyn Any + Send + Sync>>,
    stored_at: Option<Instant>,
    /// Bumped on every invalidation so in-flight fetches can detect staleness
    generation: u64,
    fetch_lock: Arc<Mutex<()>>,
    fetches: u64,
    invalidations: u64,
}

impl Slot {
    fn is_fresh(&self, max_age: Option<Duration>) -> bool {
        match (self.value.is_some(), self.stored_at, max_age) {
            (false, _, _) => false,
            (true, Some(stored_at), Some(max_age)) => stored_at.elapsed() < max_age,
            (true, _, _) => true,
        }
    }

    fn cached<T: Clone + Send + Sync + 'static>(&self, max_age: Option<Duration>) -> Option<T> {
        if !self.is_fresh(max_age) {
            return None;
        }
        self.value
            .clone()
            .and_then(|value| value.downcast::<T>().ok())
            .map(|value| (*value).clone())
    }

    /// A reader holds a clone of the fetch lock for its whole fetch
    fn is_idle(&self) -> bool {
        Arc::strong_count(&self.fetch_lock) == 1
    }
}

/// Shared cache. Only mutation success handlers call [`QueryCache::invalidate`].
///
/// Caller-scoped answers expire after `caller_max_age`, so a role change made
/// directly at the gateway is picked up once the cached answer ages out.
#[derive(Clone)]
pub struct QueryCache {
    slots: Arc<Mutex<HashMap<QueryKey, Slot>>>,
    caller_max_age: Duration,
    capacity: usize,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::with_limits(CALLER_MAX_AGE, SLOT_CAPACITY)
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(caller_max_age: Duration, capacity: usize) -> Self {
        Self {
            slots: Arc::new(Mutex::new(HashMap::new())),
            caller_max_age,
            capacity,
        }
    }

    fn max_age(&self, key: &QueryKey) -> Option<Duration> {
        key.is_caller_scoped().then_some(self.caller_max_age)
    }

    /// Slot for `key`, sweeping stale caller-scoped slots first when adding
    /// the key would grow the map past capacity
    fn slot<'a>(&self, slots: &'a mut HashMap<QueryKey, Slot>, key: &QueryKey) -> &'a mut Slot {
        if !slots.contains_key(key) && slots.len() >= self.capacity {
            let before = slots.len();
            slots.retain(|cached, slot| {
                !cached.is_caller_scoped()
                    || !slot.is_idle()
                    || slot.is_fresh(Some(self.caller_max_age))
            });
            tracing::debug!(swept = before - slots.len(), remaining = slots.len(), "Query cache swept");
        }
        slots.entry(key.clone()).or_default()
    }

    /// Return the cached value for `key`, or run `fetch` (with the key's retry
    /// policy) and cache its result. Concurrent callers share one fetch.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: &QueryKey, fetch: F) -> GatewayResult<T>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn() -> Fut,
        Fut: Future<Output = GatewayResult<T>>,
    {
        let max_age = self.max_age(key);
        let fetch_lock = {
            let mut slots = self.slots.lock().await;
            let slot = self.slot(&mut slots, key);
            if let Some(value) = slot.cached::<T>(max_age) {
                return Ok(value);
            }
            slot.fetch_lock.clone()
        };

        let _in_flight = fetch_lock.lock().await;

        loop {
            let generation = {
                let mut slots = self.slots.lock().await;
                let slot = slots.entry(key.clone()).or_default();
                if let Some(value) = slot.cached::<T>(max_age) {
                    return Ok(value);
                }
                slot.generation
            };

            let fetched = fetch_with_retry(key, &fetch).await;

            let mut slots = self.slots.lock().await;
            let slot = slots.entry(key.clone()).or_default();
            slot.fetches += 1;
            let value = fetched?;

            if slot.generation == generation {
                slot.value = Some(Arc::new(value.clone()));
                slot.stored_at = Some(Instant::now());
                tracing::debug!(key = %key, "Query cached");
                return Ok(value);
            }

            tracing::debug!(key = %key, "Query invalidated while fetching, refetching");
        }
    }

    /// Drop the cached value so the next read goes to the gateway
    pub async fn invalidate(&self, key: &QueryKey) {
        let mut slots = self.slots.lock().await;
        let slot = self.slot(&mut slots, key);
        slot.value = None;
        slot.stored_at = None;
        slot.generation += 1;
        slot.invalidations += 1;
        tracing::debug!(key = %key, "Query invalidated");
    }

    /// Whether a read of `key` would be served without a gateway call
    pub async fn is_cached(&self, key: &QueryKey) -> bool {
        let max_age = self.max_age(key);
        self.slots
            .lock()
            .await
            .get(key)
            .map(|slot| slot.is_fresh(max_age))
            .unwrap_or(false)
    }

    pub async fn slot_count(&self) -> usize {
        self.slots.lock().await.len()
    }

    /// Number of invalidations `key` has received
    pub async fn invalidation_count(&self, key: &QueryKey) -> u64 {
        self.slots
            .lock()
            .await
            .get(key)
            .map(|slot| slot.invalidations)
            .unwrap_or(0)
    }

    /// Number of completed fetch cycles for `key`, retries included in one cycle
    pub async fn fetch_count(&self, key: &QueryKey) -> u64 {
        self.slots
            .lock()
            .await
            .get(key)
            .map(|slot| slot.fetches)
            .unwrap_or(0)
    }
}

async fn fetch_with_retry<T, F, Fut>(key: &QueryKey, fetch: &F) -> GatewayResult<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = GatewayResult<T>>,
{
    let retries = key.policy().retries;
    let mut attempt = 0;
    loop {
        match fetch().await {
            Ok(value) => return Ok(value),
            Err(GatewayError::Unavailable) => return Err(GatewayError::Unavailable),
            Err(err) if attempt < retries => {
                attempt += 1;
                tracing::warn!(key = %key, attempt, error = %err, "Query failed, retrying");
            }
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Query failed");
                return Err(err);
            }
        }
    }
}
