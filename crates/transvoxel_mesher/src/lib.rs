//! transvoxel_mesher - engine-independent Transvoxel polygonization
//!
//! This crate converts blocks of signed-distance voxel samples into
//! watertight triangle meshes using Lengyel's Transvoxel algorithm:
//! table-driven Marching Cubes for the block interior, plus *transition*
//! meshes that stitch a block to neighbors rendered at half resolution
//! without T-junctions.
//!
//! # Features
//!
//! - **Regular surface extraction**: one 3D sweep with per-edge vertex
//!   reuse, gradient normals and fixed-point edge interpolation
//! - **Transition surfaces**: one 2D kernel serving all six block faces
//!   through axis remapping
//! - **Seam room**: boundary vertices carry secondary positions and border
//!   masks so a shader can shrink the mesh where transition cells sit
//! - **Allocation-free steady state**: output buffers and reuse caches are
//!   cleared, never freed, between builds
//!
//! # Example
//!
//! ```ignore
//! use glam::UVec3;
//! use transvoxel_mesher::{Mesher, MeshOutput, VoxelBlock, CHANNEL_SDF};
//!
//! // 8³ block, distance + texture channels; fill with a sphere...
//! let mut block = VoxelBlock::new(UVec3::splat(8), 2);
//!
//! let mut mesher = Mesher::new();
//! let mut output = MeshOutput::new();
//! mesher.build_regular(&block, CHANNEL_SDF, 0, &mut output);
//!
//! println!("{} vertices, {} triangles",
//!     output.vertices.len(), output.triangle_count());
//! ```

pub mod constants;
pub mod mesher;
pub mod tables;
pub mod types;
pub mod voxel_view;

// Re-export commonly used items
pub use constants::{
  CHANNEL_SDF, CHANNEL_TEXTURE, MAX_PADDING, MIN_PADDING, TRANSITION_CELL_SCALE,
};
pub use mesher::Mesher;
pub use types::{sdf, BlockMesh, FaceDirection, MeshOutput};
pub use voxel_view::{VoxelBlock, VoxelView};
