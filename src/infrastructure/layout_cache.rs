use crate::domain::models::{DayLayout, DayTask};
use crate::infrastructure::error::InfraError;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

const DEFAULT_CAPACITY: usize = 32;

/// A computed layout together with the ordered snapshot it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedLayout {
    pub tasks: Vec<DayTask>,
    pub layout: DayLayout,
}

pub trait LayoutCacheRepository: Send + Sync {
    fn get(&self, fingerprint: u64) -> Result<Option<CachedLayout>, InfraError>;
    fn put(&self, fingerprint: u64, entry: &CachedLayout) -> Result<(), InfraError>;
    fn clear(&self) -> Result<(), InfraError>;
}

/// Memoized layouts keyed by snapshot fingerprint. When full, the whole map is dropped
/// rather than tracking recency.
#[derive(Debug)]
pub struct InMemoryLayoutCache {
    capacity: usize,
    layouts: Mutex<HashMap<u64, CachedLayout>>,
}

impl Default for InMemoryLayoutCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl InMemoryLayoutCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            layouts: Mutex::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> Result<usize, InfraError> {
        let layouts = self.lock()?;
        Ok(layouts.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<u64, CachedLayout>>, InfraError> {
        self.layouts
            .lock()
            .map_err(|error| InfraError::InvalidConfig(format!("layout cache lock poisoned: {error}")))
    }
}

impl LayoutCacheRepository for InMemoryLayoutCache {
    fn get(&self, fingerprint: u64) -> Result<Option<CachedLayout>, InfraError> {
        let layouts = self.lock()?;
        Ok(layouts.get(&fingerprint).cloned())
    }

    fn put(&self, fingerprint: u64, entry: &CachedLayout) -> Result<(), InfraError> {
        let mut layouts = self.lock()?;
        if layouts.len() >= self.capacity && !layouts.contains_key(&fingerprint) {
            layouts.clear();
        }
        layouts.insert(fingerprint, entry.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), InfraError> {
        let mut layouts = self.lock()?;
        layouts.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::TimelineExtent;
    use chrono::NaiveDate;

    fn sample_layout(day: u32) -> CachedLayout {
        CachedLayout {
            tasks: Vec::new(),
            layout: DayLayout {
                date: NaiveDate::from_ymd_opt(2026, 2, day).expect("valid date"),
                blocks: Vec::new(),
                extent: TimelineExtent {
                    width: 180.0,
                    height: 1920.0,
                    max_columns: 1,
                },
            },
        }
    }

    #[test]
    fn put_then_get_returns_layout() {
        let cache = InMemoryLayoutCache::default();
        cache.put(7, &sample_layout(16)).expect("put layout");
        assert_eq!(cache.get(7).expect("get layout"), Some(sample_layout(16)));
        assert_eq!(cache.get(8).expect("get missing"), None);
    }

    #[test]
    fn full_cache_is_reset_before_insert() {
        let cache = InMemoryLayoutCache::with_capacity(2);
        cache.put(1, &sample_layout(1)).expect("put 1");
        cache.put(2, &sample_layout(2)).expect("put 2");
        cache.put(2, &sample_layout(3)).expect("overwrite 2");
        assert_eq!(cache.len().expect("len"), 2);

        cache.put(3, &sample_layout(4)).expect("put 3");
        assert_eq!(cache.len().expect("len"), 1);
        assert_eq!(cache.get(1).expect("get evicted"), None);
        assert_eq!(cache.get(3).expect("get fresh"), Some(sample_layout(4)));
    }

    #[test]
    fn clear_removes_everything() {
        let cache = InMemoryLayoutCache::default();
        cache.put(1, &sample_layout(1)).expect("put layout");
        cache.clear().expect("clear");
        assert_eq!(cache.len().expect("len"), 0);
    }
}
