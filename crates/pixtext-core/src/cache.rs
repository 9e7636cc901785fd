//! Styled glyph cache
//!
//! Each font handle keeps its own cache, so font identity and point size are
//! implied. The key carries the rest of what shapes a glyph. Handles still
//! clear the cache whenever style, outline, or hinting changes.

use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::types::{FontStyle, Glyph, Hinting};

/// Identifies one styled glyph within a font handle
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct GlyphKey {
    pub ch: char,
    pub style: FontStyle,
    pub outline: u32,
    pub hinting: Hinting,
}

/// Default number of glyphs kept per handle
const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(256) {
    Some(v) => v,
    None => unreachable!(),
};

/// Hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub size: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache of styled glyphs
pub struct GlyphCache {
    cache: Mutex<LruCache<GlyphKey, Arc<Glyph>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl GlyphCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY.get())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(DEFAULT_CAPACITY);
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, key: &GlyphKey) -> Option<Arc<Glyph>> {
        let found = self.cache.lock().get(key).cloned();
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    pub fn insert(&self, key: GlyphKey, glyph: Arc<Glyph>) {
        self.cache.lock().put(key, glyph);
    }

    /// Drops every entry; counters are kept
    pub fn clear(&self) {
        let mut cache = self.cache.lock();
        if !cache.is_empty() {
            log::debug!("Dropping {} cached glyphs", cache.len());
        }
        cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        let cache = self.cache.lock();
        CacheStats {
            size: cache.len(),
            capacity: cache.cap().get(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for GlyphCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GlyphCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphCache").field("stats", &self.stats()).finish()
    }
}
