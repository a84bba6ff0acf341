//! Process-lifetime memo of provider positions.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use acg_lines::Equatorial;
use acg_time::UtcInstant;

use crate::body::Body;

type Key = (UtcInstant, Body);

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<Key, Equatorial>,
    order: VecDeque<Key>,
}

/// Bounded first-in first-out cache of `(instant, body) -> position`.
///
/// Capacity 0 disables caching. A poisoned lock is recovered.
#[derive(Debug)]
pub struct PositionCache {
    capacity: usize,
    state: Mutex<CacheState>,
}

impl PositionCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    pub fn get(&self, instant: UtcInstant, body: Body) -> Option<Equatorial> {
        if !self.is_enabled() {
            return None;
        }
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.entries.get(&(instant, body)).copied()
    }

    pub fn insert(&self, instant: UtcInstant, body: Body, position: Equatorial) {
        if !self.is_enabled() {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let key = (instant, body);
        if state.entries.insert(key, position).is_some() {
            return;
        }
        state.order.push_back(key);
        while state.order.len() > self.capacity {
            if let Some(oldest) = state.order.pop_front() {
                state.entries.remove(&oldest);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.entries.clear();
        state.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32) -> UtcInstant {
        UtcInstant::from_calendar(2024, 1, 1, hour, 0, 0.0).unwrap()
    }

    fn eq(ra: f64) -> Equatorial {
        Equatorial::new(ra, 0.0).unwrap()
    }

    #[test]
    fn evicts_oldest_beyond_capacity() {
        let cache = PositionCache::new(2);
        cache.insert(at(0), Body::Sun, eq(1.0));
        cache.insert(at(1), Body::Sun, eq(2.0));
        cache.insert(at(2), Body::Sun, eq(3.0));
        assert_eq!(cache.len(), 2);
        assert!(cache.get(at(0), Body::Sun).is_none());
        assert_eq!(cache.get(at(2), Body::Sun), Some(eq(3.0)));
    }

    #[test]
    fn reinsert_does_not_grow() {
        let cache = PositionCache::new(2);
        cache.insert(at(0), Body::Moon, eq(1.0));
        cache.insert(at(0), Body::Moon, eq(1.0));
        cache.insert(at(1), Body::Moon, eq(2.0));
        assert_eq!(cache.len(), 2);
        assert!(cache.get(at(0), Body::Moon).is_some());
    }

    #[test]
    fn zero_capacity_disables() {
        let cache = PositionCache::new(0);
        cache.insert(at(0), Body::Sun, eq(1.0));
        assert!(cache.is_empty());
        assert!(cache.get(at(0), Body::Sun).is_none());
    }
}
