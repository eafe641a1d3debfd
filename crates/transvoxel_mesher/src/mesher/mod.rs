//! Transvoxel polygonization.
//!
//! This module implements Lengyel's Transvoxel algorithm: Marching Cubes
//! driven by precomputed case tables, extended with *transition cells* that
//! stitch a block to a neighbor rendered at half resolution.
//!
//! # Processing Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        INPUT                                    │
//! │  view: VoxelView        - signed samples behind a channel id    │
//! │  lod: u32               - scale baked into output positions     │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                REGULAR SWEEP (one 3D pass)                      │
//! │  For each 2×2×2 cell in [min_pos, max_pos), z,y,x order:        │
//! │    Build 8-bit case code from corner sample signs               │
//! │    Early-out if homogeneous (code 0 or 255)                     │
//! │    Classify via case tables, then per table vertex:             │
//! │      reuse from preceding cell, or interpolate + emit           │
//! │    Emit the class's triangles                                   │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │            TRANSITION SWEEPS (one 2D pass per face)             │
//! │  For each 2×2 face cell, stepping by 2:                         │
//! │    Gather 9 full-res samples + 4 aliased half-res corners       │
//! │    Build 9-bit case code, early-out on 0 / 511                  │
//! │    Reuse / emit per table, honoring the winding-flip bit        │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        OUTPUT                                   │
//! │  Per surface: vertices, normals, secondary positions,           │
//! │  extra attributes, triangle indices                             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Traversal order
//!
//! Cells are visited in z,y,x order (z outermost) and face cells in fy,fx
//! order. The order is load-bearing: vertex reuse assumes the cells at
//! x-1, y-1 and z-1 (face-space x-1/y-1) have already been swept.
//!
//! Reference: Lengyel, E. (2010). Voxel-Based Terrain for Real-Time
//! Virtual Simulations. PhD thesis, University of California, Davis.

mod border;
mod cache;
mod face;
mod regular;
mod transition;

pub use border::{border_mask, border_offset, project_border_offset, secondary_position};
pub use cache::NO_VERTEX;

use glam::{IVec3, Vec3, Vec4};

use crate::constants::MIN_PADDING;
use crate::types::{BlockMesh, FaceDirection, MeshOutput};
use crate::voxel_view::VoxelView;

/// The polygonizer. Owns the vertex reuse caches so consecutive builds
/// reuse their allocations; hold one per meshing thread.
#[derive(Default)]
pub struct Mesher {
  regular_cache: cache::RegularCache,
  transition_cache: cache::TransitionCache,
}

impl Mesher {
  pub fn new() -> Self {
    Self::default()
  }

  /// Extract the regular surface of a block into `out` (cleared first,
  /// capacity preserved). `channel` selects the distance channel;
  /// `lod > 0` scales output positions by `2^lod`.
  pub fn build_regular(
    &mut self,
    view: &impl VoxelView,
    channel: usize,
    lod: u32,
    out: &mut MeshOutput,
  ) {
    out.clear();
    // A constant isolevel never crosses the threshold, no surface to find.
    if view.uniform(channel).is_some() {
      return;
    }
    regular::sweep(view, channel, &mut self.regular_cache, out);
    if lod > 0 {
      out.scale_positions((1u32 << lod) as f32);
    }
  }

  /// Extract the transition surface stitching one face of the block to a
  /// half-resolution neighbor.
  pub fn build_transition(
    &mut self,
    view: &impl VoxelView,
    channel: usize,
    direction: FaceDirection,
    lod: u32,
    out: &mut MeshOutput,
  ) {
    out.clear();
    if view.uniform(channel).is_some() {
      return;
    }
    transition::sweep(view, channel, direction, &mut self.transition_cache, out);
    if lod > 0 {
      out.scale_positions((1u32 << lod) as f32);
    }
  }

  /// Extract the regular surface plus all six transition surfaces.
  pub fn build_all(&mut self, view: &impl VoxelView, channel: usize, lod: u32, out: &mut BlockMesh) {
    self.build_regular(view, channel, lod, &mut out.regular);
    for direction in FaceDirection::ALL {
      self.build_transition(
        view,
        channel,
        direction,
        lod,
        &mut out.transitions[direction.index()],
      );
    }
  }
}

/// Normalize, falling back to +Y for zero-length input (flat regions have
/// no gradient to point along, but the output contract wants unit normals).
#[inline]
pub(crate) fn normalized_not_null(v: Vec3) -> Vec3 {
  let len_sq = v.length_squared();
  if len_sq == 0.0 {
    Vec3::Y
  } else {
    v / len_sq.sqrt()
  }
}

/// Offset to the preceding cell named by a reuse-direction nibble
/// (bits 1/2/4 subtract one from x/y/z).
#[inline]
fn prev_cell_offset(reuse_dir: u8) -> IVec3 {
  IVec3::new(
    -((reuse_dir & 1) as i32),
    -(((reuse_dir >> 1) & 1) as i32),
    -(((reuse_dir >> 2) & 1) as i32),
  )
}

/// Append one vertex to every output buffer, unpadding positions, and
/// return its index.
#[inline]
fn emit_vertex(
  out: &mut MeshOutput,
  primary: Vec3,
  normal: Vec3,
  border_mask: u16,
  secondary: Vec3,
  texture_idx: f32,
) -> i32 {
  let index = out.vertices.len() as i32;
  let pad = Vec3::splat(MIN_PADDING as f32);
  out.vertices.push(primary - pad);
  out.normals.push(normal);
  out.secondary.push(secondary - pad);
  out
    .extra
    .push(Vec4::new(0.0, texture_idx, 0.0, border_mask as f32));
  index
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
