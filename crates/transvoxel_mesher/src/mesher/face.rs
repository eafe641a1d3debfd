//! Face-space remapping for the transition sweep.
//!
//! The transition kernel is written once, in a 2D "face space" whose x/y
//! axes span the face being stitched and whose z axis points into the
//! block (towards the full-resolution samples). These mappings carry face
//! space onto each of the six block faces.
//!
//! The per-face axis assignments are not arbitrary: x and y are chosen so
//! the kernel's triangle winding comes out matching the outward normal of
//! every face, which is why opposite faces swap their axes instead of
//! sharing them.

use glam::IVec3;

use crate::types::FaceDirection;

/// Block axes `(x, y)` spanned by a face's local x and y, as indices 0..3.
#[inline]
pub fn face_axes(direction: FaceDirection) -> (usize, usize) {
  match direction {
    FaceDirection::NegativeX => (1, 2),
    FaceDirection::PositiveX => (2, 1),
    FaceDirection::NegativeY => (2, 0),
    FaceDirection::PositiveY => (0, 2),
    FaceDirection::NegativeZ => (0, 1),
    FaceDirection::PositiveZ => (1, 0),
  }
}

/// Map a face-space position to padded block coordinates. `fz` grows away
/// from the face into the block, so `fz = 1` is the face's own padded
/// sample layer.
#[inline]
pub fn face_to_block(fx: i32, fy: i32, fz: i32, direction: FaceDirection, bs: IVec3) -> IVec3 {
  match direction {
    FaceDirection::NegativeX => IVec3::new(fz, fx, fy),
    FaceDirection::PositiveX => IVec3::new(bs.x - 1 - fz, fy, fx),
    FaceDirection::NegativeY => IVec3::new(fy, fz, fx),
    FaceDirection::PositiveY => IVec3::new(fx, bs.y - 1 - fz, fy),
    FaceDirection::NegativeZ => IVec3::new(fx, fy, fz),
    FaceDirection::PositiveZ => IVec3::new(fy, fx, bs.z - 1 - fz),
  }
}

#[cfg(test)]
#[path = "face_test.rs"]
mod face_test;
