//! Thread-safe compile cache keyed by grid content.
//!
//! Many casters may request the same spell at once. The cache guarantees a
//! grid is compiled at most once while it stays resident: lookups take a
//! shared read lock, and a miss compiles under the write lock after checking
//! again. Compilation is cheap and bounded, so serializing misses is fine.
//!
//! Failed compilations are not cached; they are cheap to reproduce and the
//! caller reports the error either way.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use spell_ir::SpellGrid;

use crate::artifact::CompiledSpell;
use crate::compiler::compile;
use crate::config::CompilerConfig;
use crate::errors::CompileError;

/// Default number of compiled spells kept resident.
pub const DEFAULT_CACHE_CAPACITY: usize = 128;

struct CacheEntry {
    spell: Arc<CompiledSpell>,
    /// Logical timestamp of the last hit, for eviction.
    last_used: AtomicU64,
}

/// Memoizes [`compile`] for one [`CompilerConfig`].
///
/// When full, the least recently used entry is evicted.
pub struct SpellCache {
    config: CompilerConfig,
    capacity: usize,
    entries: RwLock<FxHashMap<Arc<SpellGrid>, CacheEntry>>,
    clock: AtomicU64,
    /// Number of compilations actually performed.
    compiles: AtomicUsize,
}

impl SpellCache {
    pub fn new(config: CompilerConfig) -> Self {
        Self::with_capacity(config, DEFAULT_CACHE_CAPACITY)
    }

    /// A cache holding at most `capacity` spells (at least one).
    pub fn with_capacity(config: CompilerConfig, capacity: usize) -> Self {
        SpellCache {
            config,
            capacity: capacity.max(1),
            entries: RwLock::new(FxHashMap::default()),
            clock: AtomicU64::new(0),
            compiles: AtomicUsize::new(0),
        }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Return the compiled form of `grid`, compiling it on first request.
    ///
    /// Equal grids always yield the same `Arc` while the entry is resident.
    pub fn get_or_compile(&self, grid: &SpellGrid) -> Result<Arc<CompiledSpell>, CompileError> {
        // Fast path: already compiled
        {
            let guard = self.entries.read();
            if let Some(entry) = guard.get(grid) {
                entry.last_used.store(self.tick(), Ordering::Relaxed);
                tracing::trace!("spell cache hit");
                return Ok(Arc::clone(&entry.spell));
            }
        }

        // Slow path: compile under the write lock
        let mut guard = self.entries.write();

        // Double-check after acquiring write lock
        if let Some(entry) = guard.get(grid) {
            entry.last_used.store(self.tick(), Ordering::Relaxed);
            return Ok(Arc::clone(&entry.spell));
        }

        tracing::debug!(pieces = grid.len(), "spell cache miss");
        let program = Arc::new(grid.clone());
        let spell = Arc::new(compile(&program, &self.config)?);
        self.compiles.fetch_add(1, Ordering::Relaxed);

        if guard.len() >= self.capacity {
            evict_oldest(&mut guard);
        }
        guard.insert(
            program,
            CacheEntry {
                spell: Arc::clone(&spell),
                last_used: AtomicU64::new(self.tick()),
            },
        );
        Ok(spell)
    }

    /// Number of resident spells.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Number of compilations performed since creation.
    pub fn compile_count(&self) -> usize {
        self.compiles.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for SpellCache {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}

fn evict_oldest(entries: &mut FxHashMap<Arc<SpellGrid>, CacheEntry>) {
    let oldest = entries
        .iter()
        .min_by_key(|(_, entry)| entry.last_used.load(Ordering::Relaxed))
        .map(|(grid, _)| Arc::clone(grid));
    if let Some(grid) = oldest {
        entries.remove(&grid);
        tracing::trace!("evicted least recently used spell");
    }
}

#[cfg(test)]
mod tests;
