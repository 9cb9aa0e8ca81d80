//! Linear exposure rescaling.

use crate::error::{ProcessError, ProcessResult};
use ndarray::{Array2, ArrayView2, Zip};

/// Scale a frame by a single gain derived from its observed maximum.
///
/// The gain is `floor(65535 / frame_max)`, computed once per call. Each
/// output pixel is `pixel * gain`, truncated into the 16-bit output without
/// clamping; a gain that pushes a pixel past 65535 wraps modularly, exactly
/// as the store into an unsigned 16-bit element behaves. Callers that cannot
/// tolerate the wrap must pre-validate `frame_max` against the frame's actual
/// maximum.
///
/// # Arguments
/// * `frame` - Input frame
/// * `frame_max` - Observed maximum pixel value, 1..=65535
///
/// # Returns
/// * `Ok(Array2<u16>)` - The rescaled frame
/// * `Err(ProcessError::ZeroDivision)` - `frame_max` is zero
pub fn basic_exposure(frame: ArrayView2<u16>, frame_max: u16) -> ProcessResult<Array2<u16>> {
    if frame_max == 0 {
        return Err(ProcessError::ZeroDivision);
    }

    let gain = u32::from(u16::MAX) / u32::from(frame_max);

    let mut scaled = Array2::zeros(frame.raw_dim());
    Zip::from(&mut scaled)
        .and(&frame)
        .par_for_each(|out, &sample| {
            *out = (u32::from(sample) * gain) as u16;
        });

    Ok(scaled)
}
