//! Border masks and secondary vertex positions.
//!
//! When a neighboring block renders at half resolution, a transition mesh
//! is inserted between the two, and the regular mesh's boundary cells have
//! to shrink to make room for it. Rather than rebuilding the mesh, every
//! boundary vertex carries a precomputed *secondary* position; the shader
//! slides vertices to it on the faces named by the border mask.
//!
//! The offset shrinks boundary cells by [`TRANSITION_CELL_SCALE`] of a
//! cell and is projected onto the plane perpendicular to the vertex normal
//! so the slide does not pull the surface away from the isosurface.

use glam::{IVec3, Vec3};

use crate::constants::TRANSITION_CELL_SCALE;

/// Face-membership mask of a padded-space position: bit `2i` when the
/// position lies on the minimal face of axis `i`, bit `2i + 1` on the
/// maximal face.
#[inline]
pub fn border_mask(pos: IVec3, min_pos: IVec3, max_pos: IVec3) -> u16 {
  let mut mask = 0;
  for i in 0..3 {
    if pos[i] == min_pos[i] {
      mask |= 1 << (i * 2);
    }
    if pos[i] == max_pos[i] {
      mask |= 1 << (i * 2 + 1);
    }
  }
  mask
}

/// Per-axis offset moving a boundary-cell position inward.
///
/// `lod` is the relative LOD of the cell being offset: the sweeps always
/// pass 0 (a full-resolution cell spans one voxel in local space), the
/// parameter exists because the math is defined for half-resolution cells
/// too. With `k = 2^lod`, positions inside the minimal cell of an axis are
/// pushed up by `(1 - p/k) * 0.25k` and positions inside the maximal cell
/// down by `(k*s - 1 - p) * 0.25k`.
pub fn border_offset(pos: Vec3, lod: u32, block_size: IVec3, min_pos: IVec3) -> Vec3 {
  let p2k = (1u32 << lod) as f32;
  let p2mk = 1.0 / p2k;
  let wk = TRANSITION_CELL_SCALE * p2k;

  let mut delta = Vec3::ZERO;
  for i in 0..3 {
    let p = pos[i] - min_pos[i] as f32;
    let s = block_size[i] as f32;
    if p < p2k {
      // Inside the minimal cell of this axis.
      delta[i] = (1.0 - p2mk * p) * wk;
    } else if p > p2k * (s - 1.0) {
      // Inside the maximal cell.
      delta[i] = (p2k * s - 1.0 - p) * wk;
    }
  }
  delta
}

/// Project an offset onto the plane perpendicular to the normal:
/// `delta - (delta . n) n`, the `I - n nᵀ` transform.
#[inline]
pub fn project_border_offset(delta: Vec3, normal: Vec3) -> Vec3 {
  delta - normal * normal.dot(delta)
}

/// Secondary position for a boundary vertex.
#[inline]
pub fn secondary_position(
  primary: Vec3,
  normal: Vec3,
  lod: u32,
  block_size: IVec3,
  min_pos: IVec3,
) -> Vec3 {
  primary + project_border_offset(border_offset(primary, lod, block_size, min_pos), normal)
}

#[cfg(test)]
#[path = "border_test.rs"]
mod border_test;
