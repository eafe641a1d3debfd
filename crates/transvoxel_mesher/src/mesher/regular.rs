//! Regular cell sweep: Marching Cubes over 2×2×2 cells with vertex reuse.

use glam::{IVec3, Vec3};
use tracing::warn;

use super::cache::{RegularCache, NO_VERTEX};
use super::{border, emit_vertex, normalized_not_null, prev_cell_offset};
use crate::constants::{CHANNEL_TEXTURE, CORNER_OFFSETS, MAX_PADDING, MIN_PADDING};
use crate::tables;
use crate::types::{sdf, MeshOutput};
use crate::voxel_view::VoxelView;

pub(super) fn sweep(
  view: &impl VoxelView,
  channel: usize,
  cache: &mut RegularCache,
  out: &mut MeshOutput,
) {
  let block_size = view.size().as_ivec3();
  let unpadded_size = block_size - IVec3::splat(MIN_PADDING + MAX_PADDING);

  cache.reset(view.size());

  // Cells span [min_pos, max_pos); the cell border mask uses the last cell
  // position (max_pos - 1) while vertex endpoint masks use max_pos, the
  // last position a vertex can reach.
  let min_pos = IVec3::splat(MIN_PADDING);
  let max_pos = block_size - IVec3::splat(MAX_PADDING);
  let max_cell_pos = max_pos - IVec3::ONE;

  let gradient_at = |p: IVec3| -> Vec3 {
    let nx = sdf::to_float(view.get_signed(p - IVec3::X, channel));
    let px = sdf::to_float(view.get_signed(p + IVec3::X, channel));
    let ny = sdf::to_float(view.get_signed(p - IVec3::Y, channel));
    let py = sdf::to_float(view.get_signed(p + IVec3::Y, channel));
    let nz = sdf::to_float(view.get_signed(p - IVec3::Z, channel));
    let pz = sdf::to_float(view.get_signed(p + IVec3::Z, channel));
    Vec3::new(nx - px, ny - py, nz - pz)
  };

  for z in min_pos.z..max_pos.z {
    for y in min_pos.y..max_pos.y {
      for x in min_pos.x..max_pos.x {
        let pos = IVec3::new(x, y, z);

        let mut corner_positions = [IVec3::ZERO; 8];
        let mut samples = [0i8; 8];
        for i in 0..8 {
          corner_positions[i] = pos + CORNER_OFFSETS[i];
          samples[i] = view.get_signed(corner_positions[i], channel);
        }

        // Corner i contributes bit i; solid corners set their bit.
        let mut case_code = 0u16;
        for i in 0..8 {
          case_code |= (sdf::sign_bit(samples[i]) as u16) << i;
        }

        // Invalidate the corner slot before the early-out so a stale entry
        // from two decks ago can never be reused through this cell.
        cache.cell(pos).vertices[0] = NO_VERTEX;

        if case_code == 0 || case_code == 255 {
          continue;
        }

        let texture_idx = view.get(pos.x, pos.y, pos.z, CHANNEL_TEXTURE) as f32;

        let mut gradients = [Vec3::ZERO; 8];
        for i in 0..8 {
          gradients[i] = gradient_at(corner_positions[i]);
        }

        // Cells on the minimal boundaries have no preceding cell to reuse
        // from; the validity mask gates each reuse-direction bit.
        let validity_mask = (x > min_pos.x) as u8
          | (((y > min_pos.y) as u8) << 1)
          | (((z > min_pos.z) as u8) << 2);

        let class = tables::regular_cell_class(case_code);
        let (vertex_count, triangle_count) = tables::regular_cell_counts(class);

        let cell_border_mask = border::border_mask(pos, min_pos, max_cell_pos);

        let mut cell_vertex_indices = [NO_VERTEX; 12];

        for i in 0..vertex_count {
          let code = tables::regular_vertex_data(case_code, i);
          let (v0, v1) = code.corners();

          if v1 <= v0 || v1 >= 8 {
            warn!(case_code, vertex = i, "invalid edge descriptor, skipping vertex");
            continue;
          }

          let d0 = samples[v0] as i32;
          let d1 = samples[v1] as i32;
          if d0 == d1 {
            warn!(
              x = pos.x,
              y = pos.y,
              z = pos.z,
              "equal samples on a crossing edge, skipping vertex"
            );
            continue;
          }

          // 8-bit interpolation fraction: 257 possible positions along the
          // edge, endpoints included.
          let t = (d1 << 8) / (d1 - d0);
          let t0 = t as f32 / 256.0;
          let t1 = (256 - t) as f32 / 256.0;

          let p0 = corner_positions[v0];
          let p1 = corner_positions[v1];

          if t & 0xff != 0 {
            // Vertex strictly inside the edge.
            let reuse_dir = code.reuse_dir();
            let reuse_slot = code.reuse_slot();

            let present = (reuse_dir & validity_mask) == reuse_dir;
            if present {
              if reuse_slot >= 4 {
                warn!(case_code, reuse_slot, "reuse slot out of range, skipping vertex");
                continue;
              }
              let prev = cache.cell(pos + prev_cell_offset(reuse_dir));
              cell_vertex_indices[i] = prev.vertices[reuse_slot];
            }

            if !present || cell_vertex_indices[i] == NO_VERTEX {
              let primary = p0.as_vec3() * t0 + p1.as_vec3() * t1;
              let normal = normalized_not_null(gradients[v0] * t0 + gradients[v1] * t1);

              let mut vertex_border_mask = cell_border_mask;
              let mut secondary = primary;
              if cell_border_mask != 0 {
                secondary =
                  border::secondary_position(primary, normal, 0, unpadded_size, min_pos);
                vertex_border_mask |= (border::border_mask(p0, min_pos, max_pos)
                  & border::border_mask(p1, min_pos, max_pos))
                  << 6;
              }

              cell_vertex_indices[i] =
                emit_vertex(out, primary, normal, vertex_border_mask, secondary, texture_idx);

              if reuse_dir & 8 != 0 {
                if reuse_slot >= 4 {
                  warn!(case_code, reuse_slot, "reuse slot out of range, not caching vertex");
                } else {
                  // This cell owns the vertex; cache it for its successors.
                  cache.cell(pos).vertices[reuse_slot] = cell_vertex_indices[i];
                }
              }
            }
          } else if t == 0 && v1 == 7 {
            // Vertex exactly on corner 7, the cell's maximal corner: this
            // cell owns it and caches it in the corner slot.
            let primary = p1.as_vec3();
            let normal = normalized_not_null(gradients[v1]);

            let mut vertex_border_mask = cell_border_mask;
            let mut secondary = primary;
            if cell_border_mask != 0 {
              secondary = border::secondary_position(primary, normal, 0, unpadded_size, min_pos);
              vertex_border_mask |= border::border_mask(p1, min_pos, max_pos) << 6;
            }

            cell_vertex_indices[i] =
              emit_vertex(out, primary, normal, vertex_border_mask, secondary, texture_idx);
            cache.cell(pos).vertices[0] = cell_vertex_indices[i];
          } else {
            // Vertex exactly on one of the other corners. The owning cell's
            // direction is the corner index inverted (bitwise XOR with 7);
            // its corner slot is always slot 0.
            let endpoint = if t == 0 { v1 } else { v0 };
            let reuse_dir = (endpoint ^ 7) as u8;

            let present = (reuse_dir & validity_mask) == reuse_dir;
            if present {
              let prev = cache.cell(pos + prev_cell_offset(reuse_dir));
              cell_vertex_indices[i] = prev.vertices[0];
            }

            if !present || cell_vertex_indices[i] < 0 {
              // t is 0 or 256 here so the interpolation collapses onto the
              // endpoint exactly.
              let primary = p0.as_vec3() * t0 + p1.as_vec3() * t1;
              let normal = normalized_not_null(gradients[v0] * t0 + gradients[v1] * t1);

              let endpoint_pos = if t == 0 { p1 } else { p0 };
              let mut vertex_border_mask = cell_border_mask;
              let mut secondary = primary;
              if cell_border_mask != 0 {
                secondary = border::secondary_position(primary, normal, 0, unpadded_size, min_pos);
                vertex_border_mask |= border::border_mask(endpoint_pos, min_pos, max_pos) << 6;
              }

              cell_vertex_indices[i] =
                emit_vertex(out, primary, normal, vertex_border_mask, secondary, texture_idx);
            }
          }
        }

        for ti in 0..triangle_count {
          let a = cell_vertex_indices[tables::regular_triangle_corner(class, ti * 3)];
          let b = cell_vertex_indices[tables::regular_triangle_corner(class, ti * 3 + 1)];
          let c = cell_vertex_indices[tables::regular_triangle_corner(class, ti * 3 + 2)];
          if a < 0 || b < 0 || c < 0 {
            // A vertex was skipped above; drop the triangle rather than
            // emit a degenerate one.
            warn!(x = pos.x, y = pos.y, z = pos.z, "triangle references a skipped vertex");
            continue;
          }
          out.indices.extend_from_slice(&[a as u32, b as u32, c as u32]);
        }
      }
    }
  }
}
