//! Seams for the two external services the game consumes: camera frame
//! acquisition and hand-landmark inference.
//!
//! The core loop only depends on these traits, so a real webcam + ML backend
//! and the terminal demo backend are interchangeable.

use std::fmt;

use crate::gesture::HandLandmarks;

/// One raster camera frame, 8-bit grayscale, row-major.
#[derive(Clone, Debug)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl Frame {
    /// A frame of uniform brightness.
    pub fn filled(width: usize, height: usize, luma: u8) -> Frame {
        Frame {
            width,
            height,
            pixels: vec![luma; width * height],
        }
    }

    /// Brightness at (x, y); out-of-bounds reads return black so samplers
    /// never have to bounds-check scaled coordinates.
    pub fn luma_at(&self, x: usize, y: usize) -> u8 {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            0
        }
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

/// Capture failures.  A failed read is the one fatal condition in the whole
/// program: the main loop stops, nothing is retried.
#[derive(Debug)]
pub enum CaptureError {
    /// The device produced no frame.
    ReadFailed,
    /// The device could not be opened at startup.
    DeviceUnavailable {
        /// Human-readable detail from the backend.
        detail: String,
    },
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::ReadFailed => write!(f, "camera frame read failed"),
            CaptureError::DeviceUnavailable { detail } => {
                write!(f, "capture device unavailable: {}", detail)
            }
        }
    }
}

impl std::error::Error for CaptureError {}

// ── Service traits ────────────────────────────────────────────────────────────

/// A continuous stream of raster frames at a fixed requested resolution.
pub trait FrameSource {
    fn read(&mut self) -> Result<Frame, CaptureError>;
}

/// Hand-landmark inference over a single frame.  At most one hand is
/// tracked; `None` means no hand was detected and is a normal, silent state.
pub trait HandTracker {
    fn detect(&mut self, frame: &Frame) -> Option<HandLandmarks>;
}
