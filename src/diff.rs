//! Background subtraction and frame differencing.
//!
//! Both operators are exact in integer arithmetic: subtraction floors at
//! zero instead of wrapping, and the absolute difference is computed without
//! an intermediate signed widening.

use crate::error::{ProcessError, ProcessResult};
use crate::frame::FrameShape;
use ndarray::{Array2, ArrayView2, Zip};

fn check_same_shape(a: ArrayView2<u16>, b: ArrayView2<u16>) -> ProcessResult<()> {
    let expected = FrameShape::from_dim(a.dim());
    let actual = FrameShape::from_dim(b.dim());
    if actual != expected {
        return Err(ProcessError::ShapeMismatch { expected, actual });
    }
    Ok(())
}

/// Subtract a background frame, flooring at zero.
///
/// Each output pixel is `max(frame - background, 0)`. Used to remove a fixed
/// illumination or bias pattern before further processing.
///
/// # Returns
/// * `Ok(Array2<u16>)` - The background-subtracted frame
/// * `Err(ProcessError::ShapeMismatch)` - The shapes differ
pub fn subtract_background(
    frame: ArrayView2<u16>,
    background: ArrayView2<u16>,
) -> ProcessResult<Array2<u16>> {
    check_same_shape(frame, background)?;

    let mut cleaned = Array2::zeros(frame.raw_dim());
    Zip::from(&mut cleaned)
        .and(&frame)
        .and(&background)
        .par_for_each(|out, &sample, &bias| {
            *out = sample.saturating_sub(bias);
        });

    Ok(cleaned)
}

/// Per-pixel absolute difference of two frames.
///
/// # Returns
/// * `Ok(Array2<u16>)` - `|a - b|` per pixel
/// * `Err(ProcessError::ShapeMismatch)` - The shapes differ
pub fn absolute_difference(
    a: ArrayView2<u16>,
    b: ArrayView2<u16>,
) -> ProcessResult<Array2<u16>> {
    check_same_shape(a, b)?;

    let mut difference = Array2::zeros(a.raw_dim());
    Zip::from(&mut difference)
        .and(&a)
        .and(&b)
        .par_for_each(|out, &left, &right| {
            *out = left.abs_diff(right);
        });

    Ok(difference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_subtract_floors_at_zero() {
        let frame = array![[100u16, 10], [65535, 0]];
        let background = array![[30u16, 20], [1, 5]];
        let cleaned = subtract_background(frame.view(), background.view()).unwrap();
        assert_eq!(cleaned, array![[70u16, 0], [65534, 0]]);
    }

    #[test]
    fn test_subtract_shape_mismatch() {
        let frame = Array2::<u16>::zeros((2, 2));
        let background = Array2::<u16>::zeros((3, 2));
        assert!(matches!(
            subtract_background(frame.view(), background.view()),
            Err(ProcessError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_difference_is_symmetric() {
        let a = array![[100u16, 50000], [0, 7]];
        let b = array![[30u16, 60000], [65535, 7]];
        let forward = absolute_difference(a.view(), b.view()).unwrap();
        let backward = absolute_difference(b.view(), a.view()).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward, array![[70u16, 10000], [65535, 0]]);
    }

    #[test]
    fn test_difference_shape_mismatch() {
        let a = Array2::<u16>::zeros((2, 2));
        let b = Array2::<u16>::zeros((2, 4));
        assert!(matches!(
            absolute_difference(a.view(), b.view()),
            Err(ProcessError::ShapeMismatch { .. })
        ));
    }
}
