//! Mode-dispatching frame processor for the acquisition loop.
//!
//! A [`FrameProcessor`] is configured once and called with every captured
//! frame: it optionally subtracts a stored background, then applies the
//! selected intensity transform. Settings are plain serde structs so the
//! host application can persist and restore them.

use crate::diff::subtract_background;
use crate::equalize::equalize_histogram;
use crate::error::ProcessResult;
use crate::stretch::rescale_percentile;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Intensity transform applied to each processed frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProcessingMode {
    /// Leave intensities untouched
    Passthrough,
    /// Percentile-windowed contrast rescale
    Percentile { lower: f64, upper: f64 },
    /// Global histogram equalization
    Equalize,
}

impl Default for ProcessingMode {
    fn default() -> Self {
        Self::Passthrough
    }
}

/// Persistent processor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessorSettings {
    /// Transform to apply after background handling
    pub mode: ProcessingMode,
    /// Whether to subtract the stored background frame, when one is set
    pub subtract_background: bool,
}

impl Default for ProcessorSettings {
    fn default() -> Self {
        Self {
            mode: ProcessingMode::Passthrough,
            subtract_background: true,
        }
    }
}

/// Per-frame processing front-end.
#[derive(Debug, Clone, Default)]
pub struct FrameProcessor {
    settings: ProcessorSettings,
    background: Option<Array2<u16>>,
}

impl FrameProcessor {
    /// Create a processor with the given settings and no background frame.
    pub fn new(settings: ProcessorSettings) -> Self {
        Self {
            settings,
            background: None,
        }
    }

    /// Current settings.
    pub fn settings(&self) -> ProcessorSettings {
        self.settings
    }

    /// Replace the settings.
    ///
    /// Percentile bounds outside 0..=100 or not strictly ordered are rejected
    /// and the previous settings stay in effect.
    pub fn update_settings(&mut self, settings: ProcessorSettings) {
        if let ProcessingMode::Percentile { lower, upper } = settings.mode {
            let valid = (0.0..=100.0).contains(&lower)
                && (0.0..=100.0).contains(&upper)
                && lower < upper;
            if !valid {
                warn!(lower, upper, "rejecting invalid percentile bounds");
                return;
            }
        }
        self.settings = settings;
    }

    /// Store a background frame for subtraction.
    pub fn set_background(&mut self, background: Array2<u16>) {
        self.background = Some(background);
    }

    /// Drop the stored background frame.
    pub fn clear_background(&mut self) {
        self.background = None;
    }

    /// Process one captured frame.
    ///
    /// Subtracts the stored background first when enabled, then applies the
    /// configured transform. The input is only borrowed; the output is a new
    /// frame of identical shape.
    pub fn process(&self, frame: ArrayView2<u16>) -> ProcessResult<Array2<u16>> {
        let working = match &self.background {
            Some(background) if self.settings.subtract_background => {
                subtract_background(frame, background.view())?
            }
            _ => frame.to_owned(),
        };

        debug!(mode = ?self.settings.mode, "processing frame");
        match self.settings.mode {
            ProcessingMode::Passthrough => Ok(working),
            ProcessingMode::Percentile { lower, upper } => {
                rescale_percentile(working.view(), lower, upper)
            }
            ProcessingMode::Equalize => equalize_histogram(working.view()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessError;
    use crate::test_patterns::horizontal_gradient;
    use ndarray::Array2;

    #[test]
    fn test_passthrough_returns_input() {
        let processor = FrameProcessor::new(ProcessorSettings::default());
        let frame = horizontal_gradient::<u16>(4, 4, 0, 1000);
        let processed = processor.process(frame.view()).unwrap();
        assert_eq!(processed, frame);
    }

    #[test]
    fn test_background_subtraction_applied() {
        let mut processor = FrameProcessor::new(ProcessorSettings::default());
        processor.set_background(Array2::from_elem((2, 2), 30u16));

        let frame = Array2::from_elem((2, 2), 100u16);
        let processed = processor.process(frame.view()).unwrap();
        assert!(processed.iter().all(|&v| v == 70));
    }

    #[test]
    fn test_background_disabled_by_settings() {
        let mut processor = FrameProcessor::new(ProcessorSettings {
            mode: ProcessingMode::Passthrough,
            subtract_background: false,
        });
        processor.set_background(Array2::from_elem((2, 2), 30u16));

        let frame = Array2::from_elem((2, 2), 100u16);
        let processed = processor.process(frame.view()).unwrap();
        assert!(processed.iter().all(|&v| v == 100));
    }

    #[test]
    fn test_clear_background() {
        let mut processor = FrameProcessor::new(ProcessorSettings::default());
        processor.set_background(Array2::from_elem((2, 2), 30u16));
        processor.clear_background();

        let frame = Array2::from_elem((2, 2), 100u16);
        let processed = processor.process(frame.view()).unwrap();
        assert!(processed.iter().all(|&v| v == 100));
    }

    #[test]
    fn test_background_shape_mismatch() {
        let mut processor = FrameProcessor::new(ProcessorSettings::default());
        processor.set_background(Array2::zeros((3, 3)));

        let frame = Array2::<u16>::zeros((2, 2));
        assert!(matches!(
            processor.process(frame.view()),
            Err(ProcessError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_equalize_mode() {
        let mut processor = FrameProcessor::new(ProcessorSettings::default());
        processor.update_settings(ProcessorSettings {
            mode: ProcessingMode::Equalize,
            subtract_background: false,
        });

        let frame = Array2::from_elem((3, 3), 1234u16);
        let processed = processor.process(frame.view()).unwrap();
        assert!(processed.iter().all(|&v| v == 65535));
    }

    #[test]
    fn test_percentile_mode() {
        let mut processor = FrameProcessor::new(ProcessorSettings::default());
        processor.update_settings(ProcessorSettings {
            mode: ProcessingMode::Percentile {
                lower: 0.0,
                upper: 100.0,
            },
            subtract_background: false,
        });

        let frame = horizontal_gradient::<u16>(8, 2, 100, 900);
        let processed = processor.process(frame.view()).unwrap();
        assert_eq!(processed[[0, 0]], 0);
        assert_eq!(processed[[0, 7]], 65535);
    }

    #[test]
    fn test_invalid_percentile_bounds_rejected() {
        let mut processor = FrameProcessor::new(ProcessorSettings::default());
        processor.update_settings(ProcessorSettings {
            mode: ProcessingMode::Percentile {
                lower: 90.0,
                upper: 10.0,
            },
            subtract_background: true,
        });

        assert_eq!(processor.settings(), ProcessorSettings::default());
    }

    #[test]
    fn test_settings_serde_roundtrip() {
        let settings = ProcessorSettings {
            mode: ProcessingMode::Percentile {
                lower: 2.0,
                upper: 98.0,
            },
            subtract_background: false,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let recovered: ProcessorSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, recovered);
    }
}
