//! Error types shared by all frame processing operations.
//!
//! Every operator in this crate either returns a complete output frame or
//! fails with one of these errors before producing any output. Failures are
//! precondition violations detected before or during the first pass over the
//! data; there is no partial-failure mode.

use crate::frame::FrameShape;
use thiserror::Error;

/// Error types for frame processing operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessError {
    /// A sample from a wider integer domain does not fit the 16-bit range
    #[error("sample {value} at ({row}, {col}) is outside the unsigned 16-bit range")]
    OutOfRangeSample { value: i64, row: usize, col: usize },
    /// The frame holds zero pixels
    #[error("frame contains no pixels")]
    EmptyFrame,
    /// The stack holds zero frames
    #[error("stack contains no frames")]
    EmptyStack,
    /// Frames that must share a shape do not
    #[error("frame shape {actual} does not match expected shape {expected}")]
    ShapeMismatch {
        expected: FrameShape,
        actual: FrameShape,
    },
    /// A scaling divisor of zero was supplied
    #[error("frame maximum of zero would divide by zero")]
    ZeroDivision,
}

/// Result type for frame processing operations
pub type ProcessResult<T> = Result<T, ProcessError>;
