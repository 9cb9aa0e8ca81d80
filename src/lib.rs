//! Intensity-domain transforms for 16-bit acquisition frames.
//!
//! This crate is the per-pixel processing stage of an image-acquisition
//! pipeline: it takes captured 16-bit frames (or stacks of them) and returns
//! transformed frames of the same shape. Frames are `ndarray::Array2<u16>`
//! in `(height, width)` index order; the caller owns allocation and I/O.
//!
//! # Operators
//!
//! - **equalize**: global histogram equalization (histogram, CDF lookup
//!   table, per-pixel remap)
//! - **stack**: multi-frame integer averaging, one-shot or rolling
//! - **exposure**: linear rescale by a gain derived from an observed maximum
//! - **stretch**: percentile-windowed contrast rescale
//! - **diff**: background subtraction and frame differencing
//! - **processor**: configurable per-frame dispatch over the above
//! - **convert**: 8-bit quick-look conversions for display
//!
//! All operators are pure functions of their inputs, parallel over pixels
//! via rayon, and either return a complete output frame or fail with a typed
//! [`error::ProcessError`] before producing any output.

pub mod convert;
pub mod diff;
pub mod equalize;
pub mod error;
pub mod exposure;
pub mod frame;
pub mod processor;
pub mod stack;
pub mod stretch;
pub mod test_patterns;

// Re-export key functionality for easier access
pub use convert::{u16_to_gray_image, u16_to_u8_auto_scale};
pub use diff::{absolute_difference, subtract_background};
pub use equalize::{apply_lut, build_histogram, derive_lut, equalize_histogram, INTENSITY_LEVELS};
pub use error::{ProcessError, ProcessResult};
pub use exposure::basic_exposure;
pub use frame::{frame_from_wider, mean_intensity, FrameShape};
pub use processor::{FrameProcessor, ProcessingMode, ProcessorSettings};
pub use stack::{integer_mean, RollingStack};
pub use stretch::rescale_percentile;
