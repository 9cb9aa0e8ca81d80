//! Multi-frame integer averaging.
//!
//! Stacking combines successive exposures of the same scene into one frame by
//! per-pixel averaging, trading temporal resolution for noise. The mean is
//! integer-truncated, matching the acquisition pipeline's fixed-point frames.

use crate::error::{ProcessError, ProcessResult};
use crate::frame::FrameShape;
use ndarray::{Array2, Zip};

/// Per-pixel integer mean of a stack of frames.
///
/// Each output pixel is the floor of the mean of the corresponding pixels
/// across the stack. Accumulation per pixel is done in u64, so the
/// intermediate sum of `N * 65535` cannot overflow for any stack depth.
///
/// The outer pixel loop parallelizes freely; the inner reduction over the
/// stack is sequential per pixel.
///
/// # Arguments
/// * `stack` - Frames to average, all of identical shape
///
/// # Returns
/// * `Ok(Array2<u16>)` - The averaged frame
/// * `Err(ProcessError::EmptyStack)` - The stack holds no frames
/// * `Err(ProcessError::ShapeMismatch)` - Frame shapes differ within the stack
pub fn integer_mean(stack: &[Array2<u16>]) -> ProcessResult<Array2<u16>> {
    let first = stack.first().ok_or(ProcessError::EmptyStack)?;
    let expected = FrameShape::from_dim(first.dim());

    for frame in &stack[1..] {
        let actual = FrameShape::from_dim(frame.dim());
        if actual != expected {
            return Err(ProcessError::ShapeMismatch { expected, actual });
        }
    }

    let count = stack.len() as u64;
    let mut averaged = Array2::zeros(first.raw_dim());
    Zip::indexed(&mut averaged).par_for_each(|(row, col), out| {
        let sum: u64 = stack
            .iter()
            .map(|frame| u64::from(frame[[row, col]]))
            .sum();
        *out = (sum / count) as u16;
    });

    Ok(averaged)
}

/// Bounded buffer of the most recent frames, averaged on demand.
///
/// Holds up to `capacity` frames; once full, each new frame replaces the
/// oldest. This mirrors the acquisition loop's rolling average: the displayed
/// frame is the integer mean of the last N captures.
#[derive(Debug, Clone)]
pub struct RollingStack {
    capacity: usize,
    frames: Vec<Array2<u16>>,
    next_slot: usize,
}

impl RollingStack {
    /// Create an empty rolling stack holding at most `capacity` frames.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity >= 1, "rolling stack capacity must be at least 1");
        Self {
            capacity,
            frames: Vec::with_capacity(capacity),
            next_slot: 0,
        }
    }

    /// Add a frame, replacing the oldest once the stack is full.
    ///
    /// # Returns
    /// * `Ok(())` - The frame was accepted
    /// * `Err(ProcessError::ShapeMismatch)` - The frame's shape differs from
    ///   the frames already held
    pub fn push(&mut self, frame: Array2<u16>) -> ProcessResult<()> {
        if let Some(first) = self.frames.first() {
            let expected = FrameShape::from_dim(first.dim());
            let actual = FrameShape::from_dim(frame.dim());
            if actual != expected {
                return Err(ProcessError::ShapeMismatch { expected, actual });
            }
        }

        if self.frames.len() < self.capacity {
            self.frames.push(frame);
        } else {
            self.frames[self.next_slot] = frame;
        }
        self.next_slot = (self.next_slot + 1) % self.capacity;

        Ok(())
    }

    /// Integer mean of the frames currently held.
    ///
    /// # Returns
    /// * `Ok(Array2<u16>)` - The averaged frame
    /// * `Err(ProcessError::EmptyStack)` - No frames have been pushed yet
    pub fn integer_mean(&self) -> ProcessResult<Array2<u16>> {
        integer_mean(&self.frames)
    }

    /// Number of frames currently held.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the stack holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Maximum number of frames the stack will hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
