//! Query Cache
//!
//! Key-value cache for fetched collections with explicit invalidation.
//! Each key carries a generation counter so a fetch that started before an
//! invalidation cannot repopulate the cache with stale data.

use std::collections::HashMap;

use crate::models::Task;

/// Identifies a cached query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// `GET /api/tasks` for the signed-in user
    CurrentUserTasks,
}

#[derive(Debug, Default)]
struct CacheSlot {
    tasks: Option<Vec<Task>>,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct TaskCache {
    slots: HashMap<QueryKey, CacheSlot>,
}

impl TaskCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: QueryKey) -> Option<&[Task]> {
        self.slots.get(&key)?.tasks.as_deref()
    }

    pub fn is_cached(&self, key: QueryKey) -> bool {
        self.get(key).is_some()
    }

    /// Current generation; read it before starting a fetch
    pub fn generation(&self, key: QueryKey) -> u64 {
        self.slots.get(&key).map_or(0, |slot| slot.generation)
    }

    /// Store a fetch result unless the key was invalidated since
    /// `generation` was read. Returns whether the result was stored.
    pub fn put(&mut self, key: QueryKey, tasks: Vec<Task>, generation: u64) -> bool {
        let slot = self.slots.entry(key).or_default();
        if slot.generation != generation {
            return false;
        }
        slot.tasks = Some(tasks);
        true
    }

    pub fn invalidate(&mut self, key: QueryKey) {
        let slot = self.slots.entry(key).or_default();
        slot.tasks = None;
        slot.generation += 1;
    }

    /// Drop every entry (logout)
    pub fn clear(&mut self) {
        for slot in self.slots.values_mut() {
            slot.tasks = None;
            slot.generation += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::task;

    const KEY: QueryKey = QueryKey::CurrentUserTasks;

    #[test]
    fn test_put_then_get() {
        let mut cache = TaskCache::new();
        assert!(!cache.is_cached(KEY));

        let generation = cache.generation(KEY);
        assert!(cache.put(KEY, vec![task(1, "A", 0)], generation));
        assert_eq!(cache.get(KEY).map(<[Task]>::len), Some(1));
    }

    #[test]
    fn test_invalidate_forces_miss() {
        let mut cache = TaskCache::new();
        cache.put(KEY, vec![task(1, "A", 0)], 0);
        cache.invalidate(KEY);
        assert!(cache.get(KEY).is_none());
    }

    #[test]
    fn test_fetch_started_before_invalidation_is_not_cached() {
        let mut cache = TaskCache::new();
        let generation = cache.generation(KEY);

        // A mutation lands while the fetch is in flight
        cache.invalidate(KEY);

        assert!(!cache.put(KEY, vec![task(1, "stale", 0)], generation));
        assert!(!cache.is_cached(KEY));

        let fresh = cache.generation(KEY);
        assert!(cache.put(KEY, vec![task(1, "fresh", 0)], fresh));
    }

    #[test]
    fn test_clear_drops_entries() {
        let mut cache = TaskCache::new();
        cache.put(KEY, vec![task(1, "A", 0)], 0);
        let before = cache.generation(KEY);
        cache.clear();
        assert!(!cache.is_cached(KEY));
        assert!(cache.generation(KEY) > before);
    }
}
