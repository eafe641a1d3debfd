//! Transition cell sweep: 2D face kernel stitching a full-resolution block
//! to a half-resolution neighbor.
//!
//! Works in face space (see [`super::face`]): x/y span the face, z points
//! into the block. Each transition cell covers a 2×2 patch of face cells
//! and gathers 13 samples:
//!
//! ```text
//!   full resolution          half resolution (aliased)
//!   6───7───8                B───────C
//!   │   │   │                │       │
//!   3───4───5                │       │
//!   │   │   │                │       │
//!   0───1───2                9───────A
//! ```
//!
//! The half-resolution samples 9..C coincide with corners 0, 2, 6, 8: the
//! sweep reads the high-resolution side and uses it for both, which is
//! what lets transitions be built from the same block as the regular mesh.
//! Only full-resolution-side vertices receive border masks and secondary
//! positions; the half-resolution side must stay put so it keeps matching
//! the coarser neighbor.

use glam::{IVec3, Vec3};
use tracing::warn;

use super::cache::{TransitionCache, NO_VERTEX};
use super::{border, emit_vertex, face, normalized_not_null};
use crate::constants::{CHANNEL_TEXTURE, MAX_PADDING, MIN_PADDING};
use crate::tables;
use crate::types::{sdf, FaceDirection, MeshOutput};
use crate::voxel_view::VoxelView;

/// Face-space offsets of the 9 full-resolution samples, row by row.
const FACE_SAMPLE_OFFSETS: [(i32, i32); 9] = [
  (0, 0),
  (1, 0),
  (2, 0),
  (0, 1),
  (1, 1),
  (2, 1),
  (0, 2),
  (1, 2),
  (2, 2),
];

/// Full-resolution sample aliased by each half-resolution position 9..C.
const HALF_RES_ALIASES: [usize; 4] = [0, 2, 6, 8];

/// Case-code contribution order: sample 0 is the LSB, then clockwise
/// around the rim, middle sample last. Matches the transition tables'
/// indexing, which is not row-major.
const CASE_CODE_ORDER: [usize; 9] = [0, 1, 2, 5, 8, 7, 6, 3, 4];

pub(super) fn sweep(
  view: &impl VoxelView,
  channel: usize,
  direction: FaceDirection,
  cache: &mut TransitionCache,
  out: &mut MeshOutput,
) {
  let block_size = view.size().as_ivec3();
  if block_size.min_element() < 3 {
    warn!(?direction, "block too small for a transition sweep");
    return;
  }
  let unpadded_size = block_size - IVec3::splat(MIN_PADDING + MAX_PADDING);

  let min_pos = IVec3::splat(MIN_PADDING);
  let max_pos = block_size - IVec3::splat(MAX_PADDING);

  let (axis_x, axis_y) = face::face_axes(direction);
  let min_fpos_x = min_pos[axis_x];
  let min_fpos_y = min_pos[axis_y];
  // The 2D kernel is 3x3 samples, hence one more than the regular sweep.
  let max_fpos_x = max_pos[axis_x] - 1;
  let max_fpos_y = max_pos[axis_y] - 1;

  cache.reset(block_size[axis_x] as usize);

  let gradient_at = |p: IVec3| -> Vec3 {
    let nx = sdf::to_float(view.get_signed(p - IVec3::X, channel));
    let px = sdf::to_float(view.get_signed(p + IVec3::X, channel));
    let ny = sdf::to_float(view.get_signed(p - IVec3::Y, channel));
    let py = sdf::to_float(view.get_signed(p + IVec3::Y, channel));
    let nz = sdf::to_float(view.get_signed(p - IVec3::Z, channel));
    let pz = sdf::to_float(view.get_signed(p + IVec3::Z, channel));
    Vec3::new(nx - px, ny - py, nz - pz)
  };

  let fz = MIN_PADDING;

  for fy in (min_fpos_y..max_fpos_y).step_by(2) {
    for fx in (min_fpos_x..max_fpos_x).step_by(2) {
      let mut positions = [IVec3::ZERO; 13];
      let mut samples = [0i8; 13];
      for (i, (dx, dy)) in FACE_SAMPLE_OFFSETS.iter().enumerate() {
        positions[i] = face::face_to_block(fx + dx, fy + dy, fz, direction, block_size);
        samples[i] = view.get_signed(positions[i], channel);
      }
      for (i, &alias) in HALF_RES_ALIASES.iter().enumerate() {
        positions[9 + i] = positions[alias];
        samples[9 + i] = samples[alias];
      }

      let mut case_code = 0u16;
      for (bit, &sample) in CASE_CODE_ORDER.iter().enumerate() {
        case_code |= (sdf::sign_bit(samples[sample]) as u16) << bit;
      }

      cache.cell(fx, fy).vertices[0] = NO_VERTEX;

      if case_code == 0 || case_code == 511 {
        continue;
      }

      let texture_idx = view.get(positions[0].x, positions[0].y, positions[0].z, CHANNEL_TEXTURE)
        as f32;

      let mut gradients = [Vec3::ZERO; 13];
      for i in 0..9 {
        gradients[i] = gradient_at(positions[i]);
      }
      for (i, &alias) in HALF_RES_ALIASES.iter().enumerate() {
        gradients[9 + i] = gradients[alias];
      }

      let raw_class = tables::transition_cell_class(case_code);
      let class = raw_class & 0x7f;
      if class > tables::MAX_TRANSITION_CLASS {
        warn!(case_code, class, "transition class out of range, skipping cell");
        continue;
      }
      let flip_winding = raw_class & 0x80 != 0;

      let (vertex_count, triangle_count) = tables::transition_cell_counts(class);

      let validity_mask = (fx > min_fpos_x) as u8 | (((fy > min_fpos_y) as u8) << 1);

      // max_pos, not the last cell position: transition vertices genuinely
      // sit on the block sides.
      let cell_border_mask = border::border_mask(positions[0], min_pos, max_pos);

      let mut cell_vertex_indices = [NO_VERTEX; 12];

      for i in 0..vertex_count {
        let code = tables::transition_vertex_data(case_code, i);
        let (index_a, index_b) = code.corners();
        if index_a >= 13 || index_b >= 13 {
          warn!(case_code, index_a, index_b, "sample index out of range, skipping vertex");
          continue;
        }

        let d0 = samples[index_a] as i32;
        let d1 = samples[index_b] as i32;
        if d0 == d1 {
          warn!(fx, fy, ?direction, "equal samples on a crossing edge, skipping vertex");
          continue;
        }

        let t = (d1 << 8) / (d1 - d0);
        let t0 = t as f32 / 256.0;
        let t1 = (256 - t) as f32 / 256.0;

        if t & 0xff != 0 {
          // Vertex strictly inside the edge.
          let reuse_dir = code.reuse_dir();
          let reuse_slot = code.reuse_slot();

          let present = (reuse_dir & validity_mask) == reuse_dir;
          if present {
            if reuse_slot >= 10 {
              warn!(case_code, reuse_slot, "reuse slot out of range, skipping vertex");
              continue;
            }
            let prev = cache.cell(fx - (reuse_dir & 1) as i32, fy - ((reuse_dir >> 1) & 1) as i32);
            cell_vertex_indices[i] = prev.vertices[reuse_slot];
          }

          if !present || cell_vertex_indices[i] == NO_VERTEX {
            let p0 = positions[index_a].as_vec3();
            let p1 = positions[index_b].as_vec3();
            let primary = p0 * t0 + p1 * t1;
            let normal = normalized_not_null(gradients[index_a] * t0 + gradients[index_b] * t1);

            let full_res_side = index_a < 9 || index_b < 9;
            let (vertex_border_mask, secondary) = if full_res_side {
              let mask = cell_border_mask
                | ((border::border_mask(positions[index_a], min_pos, max_pos)
                  & border::border_mask(positions[index_b], min_pos, max_pos))
                  << 6);
              (
                mask,
                border::secondary_position(primary, normal, 0, unpadded_size, min_pos),
              )
            } else {
              // Half-resolution side: zero mask so the vertex never moves;
              // it has to keep matching the coarser neighbor's surface.
              (0, primary)
            };

            cell_vertex_indices[i] =
              emit_vertex(out, primary, normal, vertex_border_mask, secondary, texture_idx);

            if reuse_dir & 8 != 0 {
              if reuse_slot >= 10 {
                warn!(case_code, reuse_slot, "reuse slot out of range, not caching vertex");
              } else {
                cache.cell(fx, fy).vertices[reuse_slot] = cell_vertex_indices[i];
              }
            }
          }
        } else {
          // Vertex exactly on a sample position; corner reuse data says
          // where it lives.
          let index_vertex = if t == 0 { index_b } else { index_a };
          let corner = tables::transition_corner_data(index_vertex);
          let reuse_dir = corner.reuse_dir();
          let reuse_slot = corner.reuse_slot();
          if reuse_slot >= 10 {
            warn!(index_vertex, reuse_slot, "corner reuse slot out of range, skipping vertex");
            continue;
          }

          let present = (reuse_dir & validity_mask) == reuse_dir;
          if present {
            let prev = cache.cell(fx - (reuse_dir & 1) as i32, fy - ((reuse_dir >> 1) & 1) as i32);
            cell_vertex_indices[i] = prev.vertices[reuse_slot];
          }

          if !present || cell_vertex_indices[i] == NO_VERTEX {
            let primary = positions[index_vertex].as_vec3();
            let normal = normalized_not_null(gradients[index_vertex]);

            let full_res_side = index_vertex < 9;
            let (vertex_border_mask, secondary) = if full_res_side {
              let mask = cell_border_mask
                | (border::border_mask(positions[index_vertex], min_pos, max_pos) << 6);
              (
                mask,
                border::secondary_position(primary, normal, 0, unpadded_size, min_pos),
              )
            } else {
              (0, primary)
            };

            cell_vertex_indices[i] =
              emit_vertex(out, primary, normal, vertex_border_mask, secondary, texture_idx);

            // Corner vertices are always reusable by the following cells.
            cache.cell(fx, fy).vertices[reuse_slot] = cell_vertex_indices[i];
          }
        }
      }

      for ti in 0..triangle_count {
        let a = cell_vertex_indices[tables::transition_triangle_corner(class, ti * 3)];
        let b = cell_vertex_indices[tables::transition_triangle_corner(class, ti * 3 + 1)];
        let c = cell_vertex_indices[tables::transition_triangle_corner(class, ti * 3 + 2)];
        if a < 0 || b < 0 || c < 0 {
          warn!(fx, fy, ?direction, "triangle references a skipped vertex");
          continue;
        }
        // The tables are authored for one canonical face; the class's flip
        // bit restores outward winding for the mirrored ones.
        if flip_winding {
          out.indices.extend_from_slice(&[a as u32, b as u32, c as u32]);
        } else {
          out.indices.extend_from_slice(&[c as u32, b as u32, a as u32]);
        }
      }
    }
  }
}
