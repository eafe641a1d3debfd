//! Core data types for Transvoxel meshing.

use glam::{Vec3, Vec4};

/// Conversion between raw channel bytes and the signed samples the
/// algorithm operates on.
///
/// A raw byte `u` maps to `s = (255 - u) - 128`, so raw 255 is the most
/// solid value (-128) and raw 0 the most open one (+127). Negative samples
/// are "solid", non-negative are "air". The inversion is a wire convention
/// shared with block storage; both directions are provided so tests and
/// sample generators can round-trip it.
pub mod sdf {
  /// Signed reinterpretation of a raw channel byte.
  #[inline(always)]
  pub fn to_signed(raw: u8) -> i8 {
    ((255 - raw as i32) - 128) as i8
  }

  /// Raw channel byte for a signed sample. Inverse of [`to_signed`].
  #[inline(always)]
  pub fn to_raw(s: i8) -> u8 {
    (127 - s as i32) as u8
  }

  /// Sample scaled to the unit range used for gradients.
  #[inline(always)]
  pub fn to_float(s: i8) -> f32 {
    s as f32 / 256.0
  }

  /// 1 for solid (negative) samples, 0 for air.
  #[inline(always)]
  pub fn sign_bit(s: i8) -> u8 {
    (s as u8) >> 7
  }
}

/// One of the six faces of a block, identifying a transition surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaceDirection {
  NegativeX,
  PositiveX,
  NegativeY,
  PositiveY,
  NegativeZ,
  PositiveZ,
}

impl FaceDirection {
  pub const ALL: [FaceDirection; 6] = [
    FaceDirection::NegativeX,
    FaceDirection::PositiveX,
    FaceDirection::NegativeY,
    FaceDirection::PositiveY,
    FaceDirection::NegativeZ,
    FaceDirection::PositiveZ,
  ];

  /// Stable index into per-face arrays such as [`BlockMesh::transitions`].
  #[inline]
  pub fn index(self) -> usize {
    self as usize
  }
}

/// One extracted surface.
///
/// Buffers are parallel: `vertices`, `normals`, `secondary` and `extra`
/// share indices; `indices` is a triangle list into them. `secondary` holds
/// the position a vertex shifts to when the block has to make room for a
/// transition mesh on one of its faces (equal to the primary position for
/// vertices away from every border).
#[derive(Clone, Debug, Default)]
pub struct MeshOutput {
  pub vertices: Vec<Vec3>,
  pub normals: Vec<Vec3>,
  pub secondary: Vec<Vec3>,
  /// Per-vertex `(0, texture_idx, 0, border_mask)` attribute.
  pub extra: Vec<Vec4>,
  pub indices: Vec<u32>,
}

impl MeshOutput {
  pub fn new() -> Self {
    Self::default()
  }

  /// Clear all buffers, preserving capacity. Retained capacity is what
  /// makes per-frame remeshing allocation-free once a block has been built
  /// once.
  pub fn clear(&mut self) {
    self.vertices.clear();
    self.normals.clear();
    self.secondary.clear();
    self.extra.clear();
    self.indices.clear();
  }

  /// Returns true if no geometry was generated.
  pub fn is_empty(&self) -> bool {
    self.vertices.is_empty()
  }

  /// Number of triangles in the surface.
  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }

  /// Scale primary and secondary positions in place. Used to bake the LOD
  /// factor into the output; normals and `extra` are left untouched.
  pub fn scale_positions(&mut self, factor: f32) {
    for v in &mut self.vertices {
      *v *= factor;
    }
    for v in &mut self.secondary {
      *v *= factor;
    }
  }
}

/// The full output for one block: the regular surface plus one transition
/// surface per face, indexed by [`FaceDirection::index`].
#[derive(Clone, Debug, Default)]
pub struct BlockMesh {
  pub regular: MeshOutput,
  pub transitions: [MeshOutput; 6],
}

impl BlockMesh {
  pub fn new() -> Self {
    Self::default()
  }

  /// Clear every surface, preserving capacity.
  pub fn clear(&mut self) {
    self.regular.clear();
    for surface in &mut self.transitions {
      surface.clear();
    }
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
