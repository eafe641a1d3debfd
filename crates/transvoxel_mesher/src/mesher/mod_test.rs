use glam::{UVec3, Vec3};

use super::*;
use crate::constants::{BORDER_NEG_X, BORDER_POS_Z, CHANNEL_SDF, CHANNEL_TEXTURE};
use crate::voxel_view::VoxelBlock;

fn block(size: u32) -> VoxelBlock {
  VoxelBlock::new(UVec3::splat(size), 2)
}

fn fill_raw(block: &mut VoxelBlock, size: u32, f: impl Fn(i32, i32, i32) -> u8) {
  for z in 0..size as i32 {
    for y in 0..size as i32 {
      for x in 0..size as i32 {
        block.set(x, y, z, CHANNEL_SDF, f(x, y, z));
      }
    }
  }
}

/// 8x8x8 block, air below z = 4, solid above: one flat horizontal surface.
fn flat_interface_block() -> VoxelBlock {
  let mut b = block(8);
  fill_raw(&mut b, 8, |_, _, z| if z < 4 { 0 } else { 255 });
  b
}

fn sphere_block(size: u32, radius: f32) -> VoxelBlock {
  let mut b = VoxelBlock::new(UVec3::splat(size), 2);
  let center = size as f32 / 2.0;
  b.fill_signed_with(CHANNEL_SDF, |x, y, z| {
    let dx = x as f32 - center;
    let dy = y as f32 - center;
    let dz = z as f32 - center;
    let d = (dx * dx + dy * dy + dz * dz).sqrt() - radius;
    (d * 32.0).clamp(-127.0, 127.0) as i8
  });
  b
}

fn assert_invariants(output: &MeshOutput) {
  assert_eq!(output.vertices.len(), output.normals.len());
  assert_eq!(output.vertices.len(), output.secondary.len());
  assert_eq!(output.vertices.len(), output.extra.len());
  assert_eq!(output.indices.len() % 3, 0);
  for &index in &output.indices {
    assert!((index as usize) < output.vertices.len());
  }
  for normal in &output.normals {
    assert!((normal.length() - 1.0).abs() < 1e-4);
  }
}

// =============================================================================
// Uniform and sign-only blocks
// =============================================================================

#[test]
fn test_uniform_air_is_empty() {
  let b = block(8); // raw 0 everywhere
  let mut mesher = Mesher::new();
  let mut out = MeshOutput::new();

  mesher.build_regular(&b, CHANNEL_SDF, 0, &mut out);
  assert!(out.is_empty());
  assert!(out.indices.is_empty());
}

#[test]
fn test_uniform_solid_is_empty() {
  let mut b = block(8);
  b.fill_channel(CHANNEL_SDF, 255); // raw 255: signed -128, all solid
  let mut mesher = Mesher::new();
  let mut out = MeshOutput::new();

  mesher.build_regular(&b, CHANNEL_SDF, 0, &mut out);
  assert!(out.is_empty());

  for direction in FaceDirection::ALL {
    mesher.build_transition(&b, CHANNEL_SDF, direction, 0, &mut out);
    assert!(out.is_empty());
  }
}

#[test]
fn test_non_uniform_without_sign_change_is_empty() {
  // Two different raw values, both on the air side: the sweep runs but
  // every cell is case 0.
  let mut b = block(8);
  fill_raw(&mut b, 8, |x, _, _| if x < 4 { 0 } else { 1 });
  let mut mesher = Mesher::new();
  let mut out = MeshOutput::new();

  mesher.build_regular(&b, CHANNEL_SDF, 0, &mut out);
  assert!(out.is_empty());
}

// =============================================================================
// Flat interface (scenario: one quad per cell on the surface)
// =============================================================================

#[test]
fn test_flat_interface_geometry() {
  let b = flat_interface_block();
  let mut mesher = Mesher::new();
  let mut out = MeshOutput::new();
  mesher.build_regular(&b, CHANNEL_SDF, 0, &mut out);

  assert_invariants(&out);

  // 5x5 interface cells, two triangles each.
  assert_eq!(out.indices.len(), 25 * 2 * 3);
  // 6x6 grid of crossing edges; reuse misses on the -X/-Y boundary rows
  // re-create their vertices (9 + 5 + 5 duplicates over the 25 owned).
  assert_eq!(out.vertices.len(), 44);

  for (vertex, normal) in out.vertices.iter().zip(&out.normals) {
    // Interface sits between padded z = 3 and 4, midway (samples are
    // symmetric), so 2.5 after unpadding.
    assert!((vertex.z - 2.5).abs() < 1e-5);
    assert!(normal.z > 0.99, "expected +Z normal, got {normal:?}");
  }
}

#[test]
fn test_flat_interface_border_vertices_shift_tangentially() {
  let b = flat_interface_block();
  let mut mesher = Mesher::new();
  let mut out = MeshOutput::new();
  mesher.build_regular(&b, CHANNEL_SDF, 0, &mut out);

  let mut shifted = 0;
  for i in 0..out.vertices.len() {
    let mask = out.extra[i].w as u16;
    if mask == 0 {
      assert_eq!(out.secondary[i], out.vertices[i]);
    } else {
      // The surface faces +Z; border offsets act in x/y, tangent to it,
      // so boundary vertices keep their height but slide inward.
      assert!((out.secondary[i].z - out.vertices[i].z).abs() < 1e-5);
      if out.secondary[i] != out.vertices[i] {
        shifted += 1;
      }
    }
  }
  assert!(shifted > 0, "boundary vertices should have secondary offsets");
}

// =============================================================================
// Single solid voxel (single-bit case codes, full vertex reuse)
// =============================================================================

#[test]
fn test_single_solid_voxel() {
  let mut b = block(8);
  b.set(3, 3, 3, CHANNEL_SDF, 255);
  let mut mesher = Mesher::new();
  let mut out = MeshOutput::new();
  mesher.build_regular(&b, CHANNEL_SDF, 0, &mut out);

  assert_invariants(&out);

  // Eight cells see exactly one solid corner: one triangle each. The six
  // crossing edges around the voxel are shared through the reuse cache,
  // so each vertex is emitted exactly once.
  assert_eq!(out.indices.len(), 8 * 3);
  assert_eq!(out.vertices.len(), 6);
}

// =============================================================================
// Endpoint-exact interpolation on the minimal face
// =============================================================================

#[test]
fn test_endpoint_vertices_carry_min_face_border_bit() {
  // Zero-valued samples (raw 127) on the x = 1 plane against solid x >= 2:
  // interpolation lands exactly on the plane, which is the block's -X
  // border after unpadding.
  let mut b = block(8);
  fill_raw(&mut b, 8, |x, _, _| match x {
    0 => 0,
    1 => 127,
    _ => 255,
  });
  let mut mesher = Mesher::new();
  let mut out = MeshOutput::new();
  mesher.build_regular(&b, CHANNEL_SDF, 0, &mut out);

  assert_invariants(&out);
  assert!(!out.is_empty());

  // 25 interface cells, 2 triangles each; endpoint-exact vertices are not
  // cacheable, so every cell re-creates its four.
  assert_eq!(out.indices.len(), 25 * 2 * 3);
  assert_eq!(out.vertices.len(), 100);

  for i in 0..out.vertices.len() {
    assert_eq!(out.vertices[i].x, 0.0);
    let mask = out.extra[i].w as u16;
    assert_ne!(mask & BORDER_NEG_X, 0, "cell membership bit");
    assert_ne!((mask >> 6) & BORDER_NEG_X, 0, "endpoint seam bit");
  }
}

// =============================================================================
// LOD scaling and determinism
// =============================================================================

#[test]
fn test_lod_scales_positions_by_power_of_two() {
  let b = sphere_block(12, 4.0);
  let mut mesher = Mesher::new();

  let mut base = MeshOutput::new();
  mesher.build_regular(&b, CHANNEL_SDF, 0, &mut base);
  base.scale_positions(2.0);

  let mut lod1 = MeshOutput::new();
  mesher.build_regular(&b, CHANNEL_SDF, 1, &mut lod1);

  assert_eq!(base.vertices, lod1.vertices);
  assert_eq!(base.secondary, lod1.secondary);
  assert_eq!(base.normals, lod1.normals);
  assert_eq!(base.indices, lod1.indices);
}

#[test]
fn test_rebuild_is_identical() {
  let b = sphere_block(10, 3.0);
  let mut mesher = Mesher::new();

  let mut first = MeshOutput::new();
  mesher.build_regular(&b, CHANNEL_SDF, 0, &mut first);
  let snapshot = first.clone();

  mesher.build_regular(&b, CHANNEL_SDF, 0, &mut first);

  assert_eq!(first.vertices, snapshot.vertices);
  assert_eq!(first.normals, snapshot.normals);
  assert_eq!(first.secondary, snapshot.secondary);
  assert_eq!(first.extra, snapshot.extra);
  assert_eq!(first.indices, snapshot.indices);
}

// =============================================================================
// Interior surfaces
// =============================================================================

#[test]
fn test_interior_surface_has_no_border_masks() {
  // Small sphere well inside the block: nothing touches a border.
  let b = sphere_block(12, 2.5);
  let mut mesher = Mesher::new();
  let mut out = MeshOutput::new();
  mesher.build_regular(&b, CHANNEL_SDF, 0, &mut out);

  assert!(!out.is_empty());
  for i in 0..out.vertices.len() {
    assert_eq!(out.extra[i].w, 0.0);
    assert_eq!(out.secondary[i], out.vertices[i]);
  }
}

#[test]
fn test_texture_index_is_forwarded() {
  let mut b = sphere_block(10, 3.0);
  b.fill_channel(CHANNEL_TEXTURE, 7);
  let mut mesher = Mesher::new();
  let mut out = MeshOutput::new();
  mesher.build_regular(&b, CHANNEL_SDF, 0, &mut out);

  assert!(!out.is_empty());
  for extra in &out.extra {
    assert_eq!(extra.x, 0.0);
    assert_eq!(extra.y, 7.0);
    assert_eq!(extra.z, 0.0);
  }
}

// =============================================================================
// Transition surfaces
// =============================================================================

#[test]
fn test_transition_halfres_side_never_moves() {
  // Interface perpendicular to x crosses every face except +-X; build the
  // +Z transition and split vertices by side.
  let mut b = block(8);
  fill_raw(&mut b, 8, |x, _, _| if x < 4 { 0 } else { 255 });
  let mut mesher = Mesher::new();
  let mut out = MeshOutput::new();
  mesher.build_transition(&b, CHANNEL_SDF, FaceDirection::PositiveZ, 0, &mut out);

  assert_invariants(&out);
  assert!(!out.is_empty());

  let mut full_res = 0;
  let mut half_res = 0;
  for i in 0..out.vertices.len() {
    let mask = out.extra[i].w as u16;
    if mask == 0 {
      // Half-resolution side: pinned to the coarser neighbor's surface.
      half_res += 1;
      assert_eq!(out.secondary[i], out.vertices[i]);
    } else {
      full_res += 1;
      assert_ne!(mask & BORDER_POS_Z, 0, "full-res vertices sit on the +Z face");
    }
  }
  assert!(full_res > 0);
  assert!(half_res > 0);
}

#[test]
fn test_transition_face_without_crossing_is_empty() {
  // The flat z-interface never reaches the +Z face layer, which is
  // uniformly solid: every transition cell is the full sentinel case.
  let b = flat_interface_block();
  let mut mesher = Mesher::new();
  let mut out = MeshOutput::new();
  mesher.build_transition(&b, CHANNEL_SDF, FaceDirection::PositiveZ, 0, &mut out);
  assert!(out.is_empty());
}

#[test]
fn test_transitions_on_all_faces_of_a_sphere() {
  // Sphere large enough to poke through all six faces.
  let b = sphere_block(12, 5.5);
  let mut mesher = Mesher::new();
  let mut out = BlockMesh::new();
  mesher.build_all(&b, CHANNEL_SDF, 0, &mut out);

  assert!(!out.regular.is_empty());
  assert_invariants(&out.regular);
  for direction in FaceDirection::ALL {
    let surface = &out.transitions[direction.index()];
    assert!(!surface.is_empty(), "{direction:?} should emit geometry");
    assert_invariants(surface);
  }
}

#[test]
fn test_tiny_block_produces_nothing() {
  let b = block(3);
  let mut mesher = Mesher::new();
  let mut out = BlockMesh::new();
  mesher.build_all(&b, CHANNEL_SDF, 0, &mut out);

  assert!(out.regular.is_empty());
  assert!(out.transitions.iter().all(|s| s.is_empty()));
}

#[test]
fn test_non_cubic_block() {
  let mut b = VoxelBlock::new(UVec3::new(10, 8, 9), 2);
  let center = Vec3::new(5.0, 4.0, 4.5);
  b.fill_signed_with(CHANNEL_SDF, |x, y, z| {
    let d = (Vec3::new(x as f32, y as f32, z as f32) - center).length() - 3.0;
    (d * 32.0).clamp(-127.0, 127.0) as i8
  });

  let mut mesher = Mesher::new();
  let mut out = BlockMesh::new();
  mesher.build_all(&b, CHANNEL_SDF, 0, &mut out);

  assert!(!out.regular.is_empty());
  assert_invariants(&out.regular);
  for surface in &out.transitions {
    assert_invariants(surface);
  }
}
