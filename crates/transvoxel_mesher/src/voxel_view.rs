//! Read-only access to a block of voxel samples.
//!
//! The polygonizer does not own voxel storage; it reads samples through the
//! [`VoxelView`] trait. Coordinates are padded block-local (see
//! [`crate::constants`]); staying inside the padded sweep region is the
//! caller's responsibility, so implementations do not need bounds checks
//! beyond what their storage requires.

use glam::{IVec3, UVec3};

use crate::types::sdf;

/// A 3D grid of raw `u8` samples addressable by `(x, y, z, channel)`.
pub trait VoxelView {
  /// Padded block size in samples.
  fn size(&self) -> UVec3;

  /// Raw sample at the given position.
  fn get(&self, x: i32, y: i32, z: i32, channel: usize) -> u8;

  /// Fast path: `Some(value)` when the whole channel holds a single value.
  /// A uniform distance channel never crosses the isosurface, so the
  /// polygonizer emits nothing without sweeping.
  fn uniform(&self, channel: usize) -> Option<u8>;

  /// Signed reinterpretation of a sample (see [`sdf::to_signed`]).
  #[inline]
  fn get_signed(&self, p: IVec3, channel: usize) -> i8 {
    sdf::to_signed(self.get(p.x, p.y, p.z, channel))
  }
}

/// Owned, row-major multi-channel sample block.
///
/// This is the minimal in-memory stand-in for an engine-side voxel
/// container, used by tests and benches. Layout is x-minor: index
/// `(z * size.y + y) * size.x + x`.
#[derive(Clone, Debug)]
pub struct VoxelBlock {
  size: UVec3,
  channels: Vec<Vec<u8>>,
}

impl VoxelBlock {
  /// Create a block with every channel zero-filled (raw 0, which the
  /// distance channel reads as fully-open air).
  pub fn new(size: UVec3, channel_count: usize) -> Self {
    let volume = (size.x * size.y * size.z) as usize;
    Self {
      size,
      channels: vec![vec![0; volume]; channel_count],
    }
  }

  #[inline]
  fn index(&self, x: i32, y: i32, z: i32) -> usize {
    debug_assert!(x >= 0 && (x as u32) < self.size.x);
    debug_assert!(y >= 0 && (y as u32) < self.size.y);
    debug_assert!(z >= 0 && (z as u32) < self.size.z);
    ((z as u32 * self.size.y + y as u32) * self.size.x + x as u32) as usize
  }

  pub fn set(&mut self, x: i32, y: i32, z: i32, channel: usize, value: u8) {
    let i = self.index(x, y, z);
    self.channels[channel][i] = value;
  }

  pub fn fill_channel(&mut self, channel: usize, value: u8) {
    self.channels[channel].fill(value);
  }

  /// Fill the distance channel from a signed-sample generator.
  pub fn fill_signed_with(&mut self, channel: usize, mut f: impl FnMut(i32, i32, i32) -> i8) {
    for z in 0..self.size.z as i32 {
      for y in 0..self.size.y as i32 {
        for x in 0..self.size.x as i32 {
          let i = self.index(x, y, z);
          self.channels[channel][i] = sdf::to_raw(f(x, y, z));
        }
      }
    }
  }
}

impl VoxelView for VoxelBlock {
  #[inline]
  fn size(&self) -> UVec3 {
    self.size
  }

  #[inline]
  fn get(&self, x: i32, y: i32, z: i32, channel: usize) -> u8 {
    self.channels[channel][self.index(x, y, z)]
  }

  fn uniform(&self, channel: usize) -> Option<u8> {
    let data = &self.channels[channel];
    let first = *data.first()?;
    data.iter().all(|&v| v == first).then_some(first)
  }
}

#[cfg(test)]
#[path = "voxel_view_test.rs"]
mod voxel_view_test;
