//! Block layout constants shared by the regular and transition sweeps.
//!
//! # Padding
//!
//! A meshed block carries apron voxels around the cells that actually
//! produce geometry:
//!
//! ```text
//! Sample index:  0     1     2    ...   S-3   S-2   S-1
//!                │     │                 │     │     │
//!                │     └── cell origins ─┘     │     │
//!                │         [1, S-2)            │     │
//!                │                             │     └─ forward gradient
//!                └─ backward gradient          └─ +1 corner lookup
//! ```
//!
//! - `[0]` one voxel of minimum padding, read by backward gradient sampling
//!   at the first cell corner,
//! - `[S-2, S-1]` two voxels of maximum padding: the last cell reaches one
//!   voxel further for its `+1` corner, and gradient sampling reaches one
//!   voxel beyond that.
//!
//! Both values are part of the wire contract with block-join callers and
//! must not change.
//!
//! # Border mask
//!
//! The low 6 bits of a vertex border mask record which block faces the
//! owning cell touches; bits 6..11 repeat the layout for the faces the
//! vertex itself sits on (AND of its two edge endpoints). The shader uses
//! the mask to decide which vertices slide to their secondary position when
//! a transition mesh needs room.

use glam::IVec3;

/// Minimum-side apron, in voxels. Backward gradient sampling reads into it.
pub const MIN_PADDING: i32 = 1;

/// Maximum-side apron, in voxels. Corner lookup plus forward gradient.
pub const MAX_PADDING: i32 = 2;

/// Fraction of a cell reserved for a transition cell on a bordering face.
pub const TRANSITION_CELL_SCALE: f32 = 0.25;

/// Channel holding raw signed-distance samples.
pub const CHANNEL_SDF: usize = 0;

/// Channel holding the per-voxel texture index forwarded in `extra`.
pub const CHANNEL_TEXTURE: usize = 1;

// Border mask face bits (cell membership in the low 6 bits; the same
// layout shifted by `BORDER_ENDPOINT_SHIFT` marks seam membership).
pub const BORDER_NEG_X: u16 = 1;
pub const BORDER_POS_X: u16 = 2;
pub const BORDER_NEG_Y: u16 = 4;
pub const BORDER_POS_Y: u16 = 8;
pub const BORDER_NEG_Z: u16 = 16;
pub const BORDER_POS_Z: u16 = 32;

/// Shift applied to the endpoint-AND face bits (mask bits 6..11).
pub const BORDER_ENDPOINT_SHIFT: u16 = 6;

/// Corner offsets within a cell. Corner `i` sits at
/// `origin + (i&1, (i>>1)&1, (i>>2)&1)`, so corner 0 is the cell origin and
/// corner 7 the maximal corner.
pub const CORNER_OFFSETS: [IVec3; 8] = [
  IVec3::new(0, 0, 0),
  IVec3::new(1, 0, 0),
  IVec3::new(0, 1, 0),
  IVec3::new(1, 1, 0),
  IVec3::new(0, 0, 1),
  IVec3::new(1, 0, 1),
  IVec3::new(0, 1, 1),
  IVec3::new(1, 1, 1),
];

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
