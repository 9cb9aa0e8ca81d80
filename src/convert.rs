//! Display conversions from 16-bit frames to 8-bit quick-look images.
//!
//! High bit-depth sensor frames need scaling down to 8 bits before a UI can
//! show them. Scaling is by the frame's own maximum, preserving relative
//! intensities while using the full display range.
//!
//! Coordinate systems differ between the two representations: ndarray indexes
//! `[row, col]` with `(height, width)` dimensions, the image crate indexes
//! `(x, y)` with `(width, height)`.

use image::{GrayImage, Luma};
use ndarray::{Array2, ArrayView2};

/// Scale a 16-bit frame to 8 bits by its own maximum value.
///
/// Maps [0, frame maximum] onto [0, 255]. An all-zero frame maps to black
/// rather than dividing by zero.
pub fn u16_to_u8_auto_scale(frame: ArrayView2<u16>) -> Array2<u8> {
    let max_value = frame.iter().copied().max().unwrap_or(0);
    if max_value == 0 {
        return Array2::zeros(frame.raw_dim());
    }

    let scale = 255.0 / f32::from(max_value);
    frame.mapv(|sample| (f32::from(sample) * scale) as u8)
}

/// Convert a 16-bit frame to an 8-bit grayscale image with auto-scaling.
///
/// Applies [`u16_to_u8_auto_scale`] and copies the result into a `GrayImage`,
/// mapping array index `[row, col]` to image pixel `(col, row)`.
pub fn u16_to_gray_image(frame: ArrayView2<u16>) -> GrayImage {
    let (height, width) = frame.dim();
    let scaled = u16_to_u8_auto_scale(frame);

    let mut image = GrayImage::new(width as u32, height as u32);
    for ((row, col), &value) in scaled.indexed_iter() {
        image.put_pixel(col as u32, row as u32, Luma([value]));
    }

    image
}
