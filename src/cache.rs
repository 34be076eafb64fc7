//! TTL cache for the grouped todo view.
//!
//! Wraps the "read everything, group it" computation in a reader/writer
//! lock so concurrent page views of a fresh entry share a read lock, while
//! recomputation and invalidation take exclusive access.

use crate::error::Result;
use crate::model::TodoGroup;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry {
    groups: Vec<TodoGroup>,
    loaded_at: Instant,
}

/// A TTL memo of the most recently computed group sequence.
#[derive(Debug)]
pub struct GroupCache {
    ttl: Duration,
    state: RwLock<Option<CacheEntry>>,
}

impl GroupCache {
    /// Create an empty cache with the given TTL. A zero TTL means every
    /// call recomputes.
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self { ttl, state: RwLock::new(None) }
    }

    fn read_lock(&self) -> RwLockReadGuard<'_, Option<CacheEntry>> {
        // A writer that panicked left no partial entry; the value is
        // replaced wholesale, so the poison flag carries no information.
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, Option<CacheEntry>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cached groups if still fresh, otherwise run `compute`,
    /// store its result with the current time, and return it.
    ///
    /// # Errors
    ///
    /// Propagates any error from `compute`; the cached entry is left
    /// untouched in that case.
    pub fn get_or_compute<F>(&self, compute: F) -> Result<Vec<TodoGroup>>
    where
        F: FnOnce() -> Result<Vec<TodoGroup>>,
    {
        {
            let guard = self.read_lock();
            if let Some(entry) = guard.as_ref() {
                if entry.loaded_at.elapsed() < self.ttl {
                    return Ok(entry.groups.clone());
                }
            }
        }

        let groups = compute()?;

        let mut guard = self.write_lock();
        *guard = Some(CacheEntry { groups: groups.clone(), loaded_at: Instant::now() });
        Ok(groups)
    }

    /// Drop the cached entry so the next read recomputes regardless of age.
    pub fn invalidate(&self) {
        *self.write_lock() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Todo;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample_groups(tag: i64) -> Vec<TodoGroup> {
        vec![TodoGroup {
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            todos: vec![Todo {
                id: tag,
                task: format!("computed #{tag}"),
                priority: 0,
                due_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                completed: false,
            }],
        }]
    }

    #[test]
    fn test_second_call_within_ttl_skips_compute() {
        let cache = GroupCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);

        let compute = || {
            let n = calls.fetch_add(1, Ordering::SeqCst) as i64;
            Ok(sample_groups(n))
        };

        let first = cache.get_or_compute(compute).unwrap();
        let second = cache
            .get_or_compute(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(sample_groups(99))
            })
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalidate_forces_recompute() {
        let cache = GroupCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);

        cache
            .get_or_compute(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(sample_groups(1))
            })
            .unwrap();

        cache.invalidate();

        let groups = cache
            .get_or_compute(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(sample_groups(2))
            })
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(groups[0].todos[0].id, 2);
    }

    #[test]
    fn test_zero_ttl_always_recomputes() {
        let cache = GroupCache::new(Duration::ZERO);
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            cache
                .get_or_compute(|| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(sample_groups(0))
                })
                .unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_compute_error_leaves_cache_cold() {
        let cache = GroupCache::new(Duration::ZERO);

        let result = cache.get_or_compute(|| {
            Err(crate::error::Error::Template("boom".to_string()))
        });
        assert!(result.is_err());

        // A subsequent successful compute works normally
        let groups = cache.get_or_compute(|| Ok(sample_groups(7))).unwrap();
        assert_eq!(groups[0].todos[0].id, 7);
    }
}
