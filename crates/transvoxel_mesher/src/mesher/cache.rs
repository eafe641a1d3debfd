//! Vertex reuse caches.
//!
//! Both sweeps deduplicate vertices shared between neighboring cells by
//! remembering, per cell, the output indices of the vertices that cell
//! owns. Only the current and preceding deck (or row) are ever addressed,
//! so storage is two slices ping-ponged on the low bit of the sweep's
//! outermost-but-one coordinate:
//!
//! ```text
//! regular:    deck = z & 1     slot = y * size.x + x     4 entries per cell
//! transition: row  = fy & 1    slot = fx                10 entries per cell
//! ```
//!
//! Entries hold output vertex indices, `NO_VERTEX` when absent. `reset`
//! refills with `NO_VERTEX` and reallocates only when the block size grows;
//! meshing a stream of same-sized blocks touches the allocator once.

use glam::{IVec3, UVec3};

/// Marker for an empty cache entry (and an unresolved cell vertex).
pub const NO_VERTEX: i32 = -1;

/// Reuse entry for one regular cell: slot 0 holds the corner-7 vertex,
/// slots 1..4 the vertices on the three maximal edges.
#[derive(Clone, Copy)]
pub struct ReuseCell {
  pub vertices: [i32; 4],
}

impl ReuseCell {
  const EMPTY: Self = Self {
    vertices: [NO_VERTEX; 4],
  };
}

/// Reuse entry for one transition cell: up to 10 reusable vertices on the
/// cell's corners and maximal edges.
#[derive(Clone, Copy)]
pub struct ReuseTransitionCell {
  pub vertices: [i32; 10],
}

impl ReuseTransitionCell {
  const EMPTY: Self = Self {
    vertices: [NO_VERTEX; 10],
  };
}

/// Two-deck cache for the regular sweep.
#[derive(Default)]
pub struct RegularCache {
  decks: [Vec<ReuseCell>; 2],
  row_stride: i32,
}

impl RegularCache {
  pub fn new() -> Self {
    Self::default()
  }

  /// Size decks for a block and fill every entry with `NO_VERTEX`.
  pub fn reset(&mut self, block_size: UVec3) {
    let deck_area = (block_size.x * block_size.y) as usize;
    for deck in &mut self.decks {
      deck.clear();
      deck.resize(deck_area, ReuseCell::EMPTY);
    }
    self.row_stride = block_size.x as i32;
  }

  /// Entry for the cell at `pos` (padded block coordinates). The deck
  /// alternates on `z & 1`, so "the previous deck" is always intact while
  /// the current one is being overwritten.
  #[inline]
  pub fn cell(&mut self, pos: IVec3) -> &mut ReuseCell {
    let deck = (pos.z & 1) as usize;
    let i = (pos.y * self.row_stride + pos.x) as usize;
    &mut self.decks[deck][i]
  }
}

/// Two-row cache for the transition sweep, addressed in face space.
#[derive(Default)]
pub struct TransitionCache {
  rows: [Vec<ReuseTransitionCell>; 2],
}

impl TransitionCache {
  pub fn new() -> Self {
    Self::default()
  }

  /// Size rows for a face's x-extent and fill with `NO_VERTEX`.
  pub fn reset(&mut self, row_len: usize) {
    for row in &mut self.rows {
      row.clear();
      row.resize(row_len, ReuseTransitionCell::EMPTY);
    }
  }

  /// Entry for the transition cell at face coordinates `(fx, fy)`.
  #[inline]
  pub fn cell(&mut self, fx: i32, fy: i32) -> &mut ReuseTransitionCell {
    let row = (fy & 1) as usize;
    &mut self.rows[row][fx as usize]
  }
}

#[cfg(test)]
#[path = "cache_test.rs"]
mod cache_test;
