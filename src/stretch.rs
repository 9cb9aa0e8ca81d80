//! Percentile-windowed contrast rescaling.
//!
//! Remaps the intensity window between the lower and upper percentile of a
//! frame's own distribution onto the full 16-bit range, saturating pixels
//! outside the window. Reuses the 65536-bin histogram from the equalization
//! stage to locate the window in a single cumulative pass.

use crate::equalize::build_histogram;
use crate::error::{ProcessError, ProcessResult};
use ndarray::{Array2, ArrayView2, Zip};

/// Rescale a frame's contrast between two percentiles of its distribution.
///
/// The intensities at the lower and upper percentile bound a window that is
/// mapped linearly onto [0, 65535]; pixels below the window saturate to 0 and
/// pixels above it to 65535. A frame holding a single intensity maps to
/// mid-range.
///
/// # Arguments
/// * `frame` - Input frame
/// * `lower_percentile` - Lower cutoff, 0.0 to 100.0
/// * `upper_percentile` - Upper cutoff, 0.0 to 100.0, greater than the lower
///
/// # Returns
/// * `Ok(Array2<u16>)` - The rescaled frame
/// * `Err(ProcessError::EmptyFrame)` - The frame holds zero pixels
///
/// # Panics
/// Panics if the percentiles are outside 0..=100 or not strictly ordered.
pub fn rescale_percentile(
    frame: ArrayView2<u16>,
    lower_percentile: f64,
    upper_percentile: f64,
) -> ProcessResult<Array2<u16>> {
    assert!(
        (0.0..=100.0).contains(&lower_percentile),
        "Lower percentile must be between 0 and 100"
    );
    assert!(
        (0.0..=100.0).contains(&upper_percentile),
        "Upper percentile must be between 0 and 100"
    );
    assert!(
        lower_percentile < upper_percentile,
        "Lower percentile must be less than upper percentile"
    );

    let total_pixels = frame.len() as u64;
    if total_pixels == 0 {
        return Err(ProcessError::EmptyFrame);
    }

    let histogram = build_histogram(frame);
    let lower_rank = (lower_percentile / 100.0 * total_pixels as f64).round() as u64;
    let upper_rank = (upper_percentile / 100.0 * total_pixels as f64).round() as u64;

    // Walk the cumulative counts once to find both window bounds
    let mut cumulative = 0u64;
    let mut low_level = 0usize;
    let mut high_level = u16::MAX as usize;
    let mut low_found = false;

    for (level, &count) in histogram.iter().enumerate() {
        cumulative += count;
        if count == 0 {
            continue;
        }

        if !low_found && cumulative >= lower_rank {
            low_level = level;
            low_found = true;
        }

        if cumulative >= upper_rank {
            high_level = level;
            break;
        }
    }

    if high_level <= low_level {
        // Single-intensity window, map to the middle of the output range
        return Ok(Array2::from_elem(frame.raw_dim(), u16::MAX / 2));
    }

    let window = (high_level - low_level) as f64;
    let mut rescaled = Array2::zeros(frame.raw_dim());
    Zip::from(&mut rescaled)
        .and(&frame)
        .par_for_each(|out, &sample| {
            let position = (f64::from(sample) - low_level as f64) / window;
            *out = (position.clamp(0.0, 1.0) * f64::from(u16::MAX)).round() as u16;
        });

    Ok(rescaled)
}
