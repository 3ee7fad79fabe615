//! Memo of code point to resolved face.
//!
//! The cache stores both hits and misses: `Some(face)` when a face in the
//! chain covers the code point, `None` when none does. Caching the misses
//! stops repeated full-chain scans for characters nothing can render.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use ahash::RandomState;

use super::traits::FontRef;

/// Code point to face-or-none memo owned by a fallback chain.
///
/// Lookups and inserts go through a read-write lock so resolution can run
/// through a shared reference. Invalidation is all-or-nothing and requires
/// exclusive access.
pub struct GlyphFontCache {
    entries: RwLock<HashMap<u32, Option<FontRef>, RandomState>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl GlyphFontCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns `Some(Some(face))` for a cached face, `Some(None)` for a
    /// cached miss, or `None` if the code point was never resolved.
    pub fn get(&self, code_point: u32) -> Option<Option<FontRef>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        match entries.get(&code_point) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Records the resolution for `code_point`. Pass `None` when no face
    /// covers it.
    pub fn insert(&self, code_point: u32, font: Option<FontRef>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(code_point, font);
    }

    pub fn contains(&self, code_point: u32) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&code_point)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry. Must be called whenever the face list changes.
    pub fn clear(&mut self) {
        self.entries
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        // Stats are cumulative and survive invalidation.
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for GlyphFontCache {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}
