use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use image::RgbImage;

use crate::models::StyleOption;

/// Fingerprint of a blend: character, preset style and alpha rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub character: char,
    pub style: StyleOption,
    pub alpha_hundredths: i64,
}

impl CacheKey {
    pub fn new(character: char, style: StyleOption, alpha: f64) -> Self {
        Self {
            character,
            style,
            alpha_hundredths: round_hundredths(alpha),
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha_hundredths as f64 / 100.0
    }
}

/// Decimal rounding of the exact binary value, as `round(alpha, 2)` does.
fn round_hundredths(alpha: f64) -> i64 {
    let formatted = format!("{:.2}", alpha);
    formatted
        .replace('.', "")
        .parse()
        .unwrap_or_else(|_| (alpha * 100.0).round() as i64)
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<CacheKey, RgbImage>,
    order: VecDeque<CacheKey>,
}

/// Process-local store of synthesized blends, before thickness adjustment.
///
/// Unbounded unless built with [`ResultCache::with_capacity`], in which case the
/// oldest-inserted entry is evicted first.
pub struct ResultCache {
    state: Mutex<CacheState>,
    capacity: Option<usize>,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl ResultCache {
    pub fn unbounded() -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
            capacity: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
            capacity: Some(capacity.max(1)),
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    fn state(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &CacheKey) -> Option<RgbImage> {
        self.state().entries.get(key).cloned()
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.state().entries.contains_key(key)
    }

    /// Inserts or overwrites. Overwriting keeps the entry's original eviction slot.
    pub fn put(&self, key: CacheKey, image: RgbImage) {
        let mut state = self.state();
        if state.entries.insert(key, image).is_none() {
            state.order.push_back(key);
        }
        if let Some(capacity) = self.capacity {
            while state.entries.len() > capacity {
                match state.order.pop_front() {
                    Some(oldest) => {
                        state.entries.remove(&oldest);
                        log::debug!(
                            "Evicted cached blend {} / {} / {:.2}",
                            oldest.character,
                            oldest.style,
                            oldest.alpha()
                        );
                    }
                    None => break,
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.state().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut state = self.state();
        state.entries.clear();
        state.order.clear();
    }
}
