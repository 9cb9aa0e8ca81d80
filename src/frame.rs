//! Frame shape metadata and ingestion helpers.
//!
//! Frames are `ndarray::Array2<u16>` in matrix index order `[row, col]` =
//! `[y, x]`, so the array dimension is `(height, width)`. The element type
//! bounds every sample to the 16-bit domain; data arriving from a wider
//! integer representation must enter through [`frame_from_wider`], which
//! rejects out-of-range samples instead of truncating them.

use crate::error::{ProcessError, ProcessResult};
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Frame dimensions structure
///
/// Represents the width and height of a sensor frame. Uses usize for direct
/// compatibility with ndarray indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameShape {
    /// Frame width in pixels
    pub width: usize,
    /// Frame height in pixels
    pub height: usize,
}

impl FrameShape {
    /// Create a new FrameShape
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Create a FrameShape from an ndarray dimension tuple `(rows, cols)`
    pub fn from_dim(dim: (usize, usize)) -> Self {
        Self {
            width: dim.1,
            height: dim.0,
        }
    }

    /// Get total number of pixels
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Convert to tuple (width, height)
    pub fn to_tuple(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

impl From<(usize, usize)> for FrameShape {
    fn from(dimensions: (usize, usize)) -> Self {
        Self::new(dimensions.0, dimensions.1)
    }
}

impl From<FrameShape> for (usize, usize) {
    fn from(shape: FrameShape) -> Self {
        shape.to_tuple()
    }
}

impl fmt::Display for FrameShape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Convert a frame of wide integer samples into a 16-bit frame.
///
/// Host bindings commonly deliver pixel data as signed platform integers.
/// Every sample is checked against the [0, 65535] domain before any
/// conversion happens; the first offending sample fails the whole call with
/// [`ProcessError::OutOfRangeSample`] carrying its value and position.
///
/// # Arguments
/// * `samples` - 2D array of signed integer samples
///
/// # Returns
/// * `Ok(Array2<u16>)` - The converted frame
/// * `Err(ProcessError::OutOfRangeSample)` - A sample fell outside [0, 65535]
pub fn frame_from_wider(samples: ArrayView2<i64>) -> ProcessResult<Array2<u16>> {
    for ((row, col), &value) in samples.indexed_iter() {
        if !(0..=i64::from(u16::MAX)).contains(&value) {
            return Err(ProcessError::OutOfRangeSample { value, row, col });
        }
    }

    Ok(samples.mapv(|value| value as u16))
}

/// Arithmetic mean of all samples in a frame.
///
/// Used for per-frame intensity bookkeeping while acquiring. A zero-pixel
/// frame yields 0.0 rather than a NaN.
pub fn mean_intensity(frame: ArrayView2<u16>) -> f64 {
    if frame.is_empty() {
        return 0.0;
    }

    let sum: u64 = frame.iter().map(|&sample| u64::from(sample)).sum();
    sum as f64 / frame.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_new() {
        let shape = FrameShape::new(1920, 1080);
        assert_eq!(shape.width, 1920);
        assert_eq!(shape.height, 1080);
    }

    #[test]
    fn test_from_dim_swaps_axes() {
        // ndarray dim is (rows, cols) = (height, width)
        let shape = FrameShape::from_dim((480, 640));
        assert_eq!(shape.width, 640);
        assert_eq!(shape.height, 480);
    }

    #[test]
    fn test_pixel_count() {
        let shape = FrameShape::new(1920, 1080);
        assert_eq!(shape.pixel_count(), 1920 * 1080);
    }

    #[test]
    fn test_pixel_count_zero() {
        let shape = FrameShape::new(0, 100);
        assert_eq!(shape.pixel_count(), 0);
    }

    #[test]
    fn test_tuple_roundtrip() {
        let original = FrameShape::new(512, 384);
        let recovered = FrameShape::from(original.to_tuple());
        assert_eq!(original, recovered);
    }

    #[test]
    fn test_display() {
        let shape = FrameShape::new(2560, 2160);
        assert_eq!(format!("{shape}"), "2560x2160");
    }

    #[test]
    fn test_serde_roundtrip() {
        let original = FrameShape::new(1920, 1080);
        let json = serde_json::to_string(&original).unwrap();
        let recovered: FrameShape = serde_json::from_str(&json).unwrap();
        assert_eq!(original, recovered);
    }

    #[test]
    fn test_frame_from_wider_accepts_full_domain() {
        let samples = array![[0i64, 1], [65534, 65535]];
        let frame = frame_from_wider(samples.view()).unwrap();
        assert_eq!(frame[[0, 0]], 0);
        assert_eq!(frame[[1, 1]], 65535);
    }

    #[test]
    fn test_frame_from_wider_rejects_negative() {
        let samples = array![[0i64, -1], [2, 3]];
        let err = frame_from_wider(samples.view()).unwrap_err();
        assert_eq!(
            err,
            ProcessError::OutOfRangeSample {
                value: -1,
                row: 0,
                col: 1
            }
        );
    }

    #[test]
    fn test_frame_from_wider_rejects_overflow() {
        let samples = array![[0i64, 1], [65536, 3]];
        let err = frame_from_wider(samples.view()).unwrap_err();
        assert_eq!(
            err,
            ProcessError::OutOfRangeSample {
                value: 65536,
                row: 1,
                col: 0
            }
        );
    }

    #[test]
    fn test_mean_intensity() {
        let frame = array![[0u16, 10], [4, 6]];
        assert_relative_eq!(mean_intensity(frame.view()), 5.0);
    }

    #[test]
    fn test_mean_intensity_empty() {
        let frame = Array2::<u16>::zeros((0, 0));
        assert_relative_eq!(mean_intensity(frame.view()), 0.0);
    }
}
