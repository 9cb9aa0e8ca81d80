//! Global histogram equalization for 16-bit frames.
//!
//! Equalization runs in three stages: count the pixels at each of the 65536
//! intensity levels, linearize the empirical cumulative distribution into a
//! remapping table, and push every pixel through the table. The stages are
//! exposed individually so the same histogram can also feed percentile
//! statistics, and composed by [`equalize_histogram`] for the common case.
//!
//! The histogram scan partitions the frame into row chunks, each accumulating
//! a private histogram, merged afterwards by element-wise summation. Counting
//! is commutative, so the result is identical to a sequential scan for any
//! partitioning. The table application writes disjoint output pixels and
//! needs no synchronization at all.

use crate::error::{ProcessError, ProcessResult};
use ndarray::{Array2, ArrayView2, Axis, Zip};
use rayon::prelude::*;

/// Number of representable intensity levels in a 16-bit frame.
pub const INTENSITY_LEVELS: usize = u16::MAX as usize + 1;

/// Rows per parallel work unit for the histogram scan.
const ROW_CHUNK: usize = 64;

/// Count the pixels at each intensity level of a frame.
///
/// Returns a histogram of [`INTENSITY_LEVELS`] buckets where bucket `v` holds
/// the number of pixels equal to intensity `v`. The counts sum to exactly
/// `width * height`; no sample is dropped or double-counted.
///
/// Row chunks are scanned in parallel into private histograms which are then
/// merged, avoiding contended shared counters.
pub fn build_histogram(frame: ArrayView2<u16>) -> Vec<u64> {
    frame
        .axis_chunks_iter(Axis(0), ROW_CHUNK)
        .into_par_iter()
        .fold(
            || vec![0u64; INTENSITY_LEVELS],
            |mut local, rows| {
                for &sample in rows.iter() {
                    local[sample as usize] += 1;
                }
                local
            },
        )
        .reduce(
            || vec![0u64; INTENSITY_LEVELS],
            |mut merged, local| {
                for (bucket, count) in merged.iter_mut().zip(local) {
                    *bucket += count;
                }
                merged
            },
        )
}

/// Derive the equalization lookup table from a histogram.
///
/// Maintains a running cumulative sum over intensity levels in increasing
/// order and maps each level to `round(65536 * cumulative / total)`, clamped
/// into [0, 65535]. The cumulative sum is non-decreasing and the mapping is a
/// non-decreasing function of it, so the table is non-decreasing across
/// levels even under rounding.
///
/// # Arguments
/// * `histogram` - Bucket counts from [`build_histogram`]
/// * `total_pixels` - Total pixel count of the source frame
///
/// # Returns
/// * `Ok(Vec<u16>)` - The remapping table, one entry per intensity level
/// * `Err(ProcessError::EmptyFrame)` - `total_pixels` is zero
pub fn derive_lut(histogram: &[u64], total_pixels: u64) -> ProcessResult<Vec<u16>> {
    debug_assert_eq!(histogram.len(), INTENSITY_LEVELS);

    if total_pixels == 0 {
        return Err(ProcessError::EmptyFrame);
    }

    let mut table = Vec::with_capacity(INTENSITY_LEVELS);
    let mut cumulative = 0u64;

    for &count in histogram {
        cumulative += count;
        let level =
            (INTENSITY_LEVELS as f64 * (cumulative as f64 / total_pixels as f64)).round();
        table.push(level.min(f64::from(u16::MAX)) as u16);
    }

    Ok(table)
}

/// Map every pixel of a frame through a lookup table.
///
/// Each output pixel is `table[input pixel]`. Pixels are independent, so the
/// remapping parallelizes freely; the table is only read.
pub fn apply_lut(frame: ArrayView2<u16>, table: &[u16]) -> Array2<u16> {
    debug_assert_eq!(table.len(), INTENSITY_LEVELS);

    let mut remapped = Array2::zeros(frame.raw_dim());
    Zip::from(&mut remapped)
        .and(&frame)
        .par_for_each(|out, &sample| {
            *out = table[sample as usize];
        });
    remapped
}

/// Equalize the histogram of a frame.
///
/// Remaps pixel intensities so the cumulative distribution of the output is
/// as linear as possible, spreading contrast across the full 16-bit range. A
/// frame holding a single intensity collapses to a single output value; that
/// is valid output, not an error.
///
/// # Arguments
/// * `frame` - Input frame
///
/// # Returns
/// * `Ok(Array2<u16>)` - Equalized frame of identical shape
/// * `Err(ProcessError::EmptyFrame)` - The frame holds zero pixels
pub fn equalize_histogram(frame: ArrayView2<u16>) -> ProcessResult<Array2<u16>> {
    let total_pixels = frame.len() as u64;
    let histogram = build_histogram(frame);
    let table = derive_lut(&histogram, total_pixels)?;
    Ok(apply_lut(frame, &table))
}
