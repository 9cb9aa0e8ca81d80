//! Test pattern generation for exercising the frame operators.

use ndarray::Array2;
use num_traits::{NumCast, Zero};

/// Generate a frame filled with a single value.
pub fn constant_frame<T: Clone>(width: usize, height: usize, value: T) -> Array2<T> {
    Array2::from_elem((height, width), value)
}

/// Generate a horizontal gradient from `min_value` at the left edge to
/// `max_value` at the right edge.
///
/// A single-column frame holds `min_value` throughout.
pub fn horizontal_gradient<T>(width: usize, height: usize, min_value: T, max_value: T) -> Array2<T>
where
    T: Clone + Zero + NumCast,
{
    let min_f: f64 = num_traits::cast(min_value).unwrap();
    let max_f: f64 = num_traits::cast(max_value).unwrap();

    let mut pattern = Array2::zeros((height, width));
    for ((_, col), value) in pattern.indexed_iter_mut() {
        let t = if width > 1 {
            col as f64 / (width - 1) as f64
        } else {
            0.0
        };
        *value = num_traits::cast(min_f + t * (max_f - min_f)).unwrap();
    }

    pattern
}
