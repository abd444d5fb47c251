use chrono::{DateTime, Duration, Utc};
use medsync_core::models::appointment::ScheduleSnapshot;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone)]
struct CachedSchedule {
    snapshot: ScheduleSnapshot,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct CacheState {
    entry: Option<CachedSchedule>,
    /// Bumped by every invalidation.
    generation: u64,
}

/// Single-entry cache for the last resolved schedule.
///
/// Entries expire after `ttl`; every write path invalidates the entry before the
/// schedule is recomputed. A snapshot is only stored if no invalidation happened
/// since its reader took [`ScheduleCache::generation`].
#[derive(Debug)]
pub struct ScheduleCache {
    state: RwLock<CacheState>,
    ttl: Duration,
}

impl ScheduleCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            state: RwLock::new(CacheState::default()),
            ttl,
        }
    }

    pub fn from_secs(seconds: u64) -> Self {
        let ttl = i64::try_from(seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        Self::new(ttl)
    }

    pub async fn generation(&self) -> u64 {
        self.state.read().await.generation
    }

    pub async fn get(&self) -> Option<ScheduleSnapshot> {
        let state = self.state.read().await;
        match state.entry.as_ref() {
            Some(cached) if cached.expires_at > Utc::now() => Some(cached.snapshot.clone()),
            Some(_) => {
                debug!("Cached schedule expired");
                None
            }
            None => None,
        }
    }

    /// Stores `snapshot`, read at `generation`. Discarded when the cache was
    /// invalidated after that read.
    pub async fn put(&self, generation: u64, snapshot: ScheduleSnapshot) {
        if self.ttl <= Duration::zero() {
            return;
        }

        let mut state = self.state.write().await;
        if state.generation != generation {
            debug!(
                "Discarding schedule read at generation {} (now {})",
                generation, state.generation
            );
            return;
        }

        let expires_at = Utc::now()
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        state.entry = Some(CachedSchedule {
            snapshot,
            expires_at,
        });
    }

    pub async fn invalidate(&self) {
        let mut state = self.state.write().await;
        state.generation = state.generation.wrapping_add(1);
        if state.entry.take().is_some() {
            debug!("Invalidated cached schedule");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medsync_core::models::{appointment::Appointment, status::Status};

    fn snapshot() -> ScheduleSnapshot {
        let appointment = Appointment {
            id_patient: 1,
            id_doctor: 1,
            time: Some(9),
            status: Status::Green,
        };
        ScheduleSnapshot {
            appointments: vec![appointment.clone()],
            resolved_schedule: vec![appointment],
        }
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let cache = ScheduleCache::from_secs(60);
        assert!(cache.get().await.is_none());

        cache.put(cache.generation().await, snapshot()).await;
        assert_eq!(cache.get().await, Some(snapshot()));
    }

    #[tokio::test]
    async fn test_invalidate_drops_entry() {
        let cache = ScheduleCache::from_secs(60);
        cache.put(0, snapshot()).await;
        cache.invalidate().await;
        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn test_snapshot_read_before_invalidation_is_discarded() {
        let cache = ScheduleCache::from_secs(60);
        let generation = cache.generation().await;

        cache.invalidate().await;
        cache.put(generation, snapshot()).await;
        assert!(cache.get().await.is_none());

        cache.put(cache.generation().await, snapshot()).await;
        assert_eq!(cache.get().await, Some(snapshot()));
    }

    #[tokio::test]
    async fn test_zero_ttl_disables_caching() {
        let cache = ScheduleCache::from_secs(0);
        cache.put(0, snapshot()).await;
        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn test_expired_entry_is_not_served() {
        let cache = ScheduleCache::new(Duration::milliseconds(1));
        cache.put(0, snapshot()).await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        assert!(cache.get().await.is_none());
    }
}
