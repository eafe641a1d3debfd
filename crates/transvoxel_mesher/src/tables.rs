//! Lookup-table access for regular and transition cells.
//!
//! The triangulation tables are Lengyel's published Transvoxel data,
//! consumed through the `transvoxel_data` crate rather than re-derived:
//! they encode hand-verified topology choices (ambiguous-face resolution,
//! winding, vertex reuse assignments) that cannot be reconstructed from
//! first principles without reintroducing the cracks the algorithm exists
//! to avoid.
//!
//! # Encodings
//!
//! Cell data packs `counts = (vertex_count << 4) | triangle_count`, exposed
//! here through the crate's accessors.
//!
//! Regular vertex codes are 16-bit:
//!
//! ```text
//! 15       12 11        8 7         4 3         0
//! ├─ reuse dir ┼─ reuse slot ┼─── v0 ────┼─── v1 ────┤   (one nibble each)
//! ```
//!
//! `v0 < v1` are the corner indices of the crossed edge. Reuse-direction
//! bits 1, 2 and 4 mean "subtract one from x, y, z to reach the owning
//! cell"; bit 8 means the current cell owns the vertex and may cache it.
//!
//! Transition vertex codes use the same nibble order, with `v0`/`v1`
//! naming the 13 transition sample positions. Direction bits 1 and 2
//! subtract one from the face-space x and y; bit 4 marks an interior edge
//! whose vertex is never reusable; bit 8 marks a maximal edge whose vertex
//! is cached for the following cells.
//!
//! Transition corner codes are 8-bit `(reuse_dir << 4) | reuse_slot`,
//! used when interpolation lands exactly on a sample position.

use transvoxel_data::regular_cell_data::{
  REGULAR_CELL_CLASS, REGULAR_CELL_DATA, REGULAR_VERTEX_DATA,
};
use transvoxel_data::transition_cell_data::{
  TRANSITION_CELL_CLASS, TRANSITION_CELL_DATA, TRANSITION_CORNER_DATA, TRANSITION_VERTEX_DATA,
};

/// Highest valid transition cell class (after masking the winding bit).
pub const MAX_TRANSITION_CLASS: u8 = 55;

/// Equivalence class for an 8-bit regular case code.
#[inline]
pub fn regular_cell_class(case_code: u16) -> u8 {
  REGULAR_CELL_CLASS[case_code as usize]
}

/// `(vertex_count, triangle_count)` for a regular cell class.
#[inline]
pub fn regular_cell_counts(class: u8) -> (usize, usize) {
  let data = &REGULAR_CELL_DATA[class as usize];
  (
    data.get_vertex_count() as usize,
    data.get_triangle_count() as usize,
  )
}

/// `i`-th entry of a regular class's triangle index list
/// (`i < 3 * triangle_count`), indexing into the cell's vertex list.
#[inline]
pub fn regular_triangle_corner(class: u8, i: usize) -> usize {
  REGULAR_CELL_DATA[class as usize].vertex_index[i] as usize
}

/// Vertex code `i` for a regular case (`i < vertex_count`).
#[inline]
pub fn regular_vertex_data(case_code: u16, i: usize) -> RegularVertexCode {
  RegularVertexCode(REGULAR_VERTEX_DATA[case_code as usize][i])
}

/// Class for a 9-bit transition case code. Bit 7 of the result requests
/// flipped triangle winding; mask with `0x7f` before indexing class data.
#[inline]
pub fn transition_cell_class(case_code: u16) -> u8 {
  TRANSITION_CELL_CLASS[case_code as usize]
}

/// `(vertex_count, triangle_count)` for a (masked) transition cell class.
#[inline]
pub fn transition_cell_counts(class: u8) -> (usize, usize) {
  let data = &TRANSITION_CELL_DATA[class as usize];
  (
    data.get_vertex_count() as usize,
    data.get_triangle_count() as usize,
  )
}

/// `i`-th entry of a transition class's triangle index list.
#[inline]
pub fn transition_triangle_corner(class: u8, i: usize) -> usize {
  TRANSITION_CELL_DATA[class as usize].vertex_index[i] as usize
}

/// Vertex code `i` for a transition case (`i < vertex_count`).
#[inline]
pub fn transition_vertex_data(case_code: u16, i: usize) -> TransitionVertexCode {
  TransitionVertexCode(TRANSITION_VERTEX_DATA[case_code as usize][i])
}

/// Corner reuse code for one of the 13 transition sample positions.
#[inline]
pub fn transition_corner_data(sample_index: usize) -> TransitionCornerCode {
  TransitionCornerCode(TRANSITION_CORNER_DATA[sample_index])
}

/// Decoded view over a regular vertex code.
#[derive(Clone, Copy, Debug)]
pub struct RegularVertexCode(pub u16);

impl RegularVertexCode {
  /// Edge endpoints `(v0, v1)`, always ordered `v0 < v1` in valid data.
  #[inline]
  pub fn corners(self) -> (usize, usize) {
    (((self.0 >> 4) & 0xf) as usize, (self.0 & 0xf) as usize)
  }

  /// Direction nibble: bits 1/2/4 subtract one from x/y/z, bit 8 = owned.
  #[inline]
  pub fn reuse_dir(self) -> u8 {
    ((self.0 >> 12) & 0xf) as u8
  }

  /// Slot in the owning cell's reuse entry (0..4).
  #[inline]
  pub fn reuse_slot(self) -> usize {
    ((self.0 >> 8) & 0xf) as usize
  }
}

/// Decoded view over a transition vertex code.
#[derive(Clone, Copy, Debug)]
pub struct TransitionVertexCode(pub u16);

impl TransitionVertexCode {
  /// Sample-position endpoints `(v0, v1)`, each in 0..13.
  #[inline]
  pub fn corners(self) -> (usize, usize) {
    (((self.0 >> 4) & 0xf) as usize, (self.0 & 0xf) as usize)
  }

  /// Direction nibble: bits 1/2 subtract one from face x/y, bit 4 =
  /// interior (never cached), bit 8 = maximal edge (cached).
  #[inline]
  pub fn reuse_dir(self) -> u8 {
    ((self.0 >> 12) & 0xf) as u8
  }

  /// Slot in the owning cell's reuse entry (0..10).
  #[inline]
  pub fn reuse_slot(self) -> usize {
    ((self.0 >> 8) & 0xf) as usize
  }
}

/// Decoded view over a transition corner reuse code.
#[derive(Clone, Copy, Debug)]
pub struct TransitionCornerCode(pub u8);

impl TransitionCornerCode {
  #[inline]
  pub fn reuse_dir(self) -> u8 {
    self.0 >> 4
  }

  #[inline]
  pub fn reuse_slot(self) -> usize {
    (self.0 & 0xf) as usize
  }
}

#[cfg(test)]
#[path = "tables_test.rs"]
mod tables_test;
