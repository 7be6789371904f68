//! Video profile value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::ProfileParseError;

/// Default capture width in pixels
pub const DEFAULT_WIDTH: u32 = 720;

/// Default capture height in pixels
pub const DEFAULT_HEIGHT: u32 = 1080;

/// Default capture density (dpi)
pub const DEFAULT_DENSITY: u32 = 320;

/// Fixed video bitrate (5 Mbps)
pub const VIDEO_BIT_RATE: u32 = 5 * 1024 * 1024;

/// Fixed video frame rate
pub const VIDEO_FRAME_RATE: u32 = 30;

/// Value object describing the capture geometry of a recording session.
/// Immutable and validated on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoProfile {
    width: u32,
    height: u32,
    density: u32,
}

impl VideoProfile {
    /// Create a profile from explicit dimensions.
    /// Returns None for zero-sized dimensions.
    pub const fn new(width: u32, height: u32, density: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            width,
            height,
            density,
        })
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub const fn density(&self) -> u32 {
        self.density
    }

    /// Geometry formatted the way video tooling expects it ("WxH")
    pub fn dimensions(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

impl Default for VideoProfile {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            density: DEFAULT_DENSITY,
        }
    }
}

impl fmt::Display for VideoProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}@{}", self.width, self.height, self.density)
    }
}

impl FromStr for VideoProfile {
    type Err = ProfileParseError;

    /// Parse a profile string such as "720x1080@320" or "1920x1080"
    /// (density defaults when omitted).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let err = || ProfileParseError {
            input: input.to_string(),
        };

        let (dims, density) = match input.split_once('@') {
            Some((dims, density)) => {
                let density: u32 = density.parse().map_err(|_| err())?;
                (dims, density)
            }
            None => (input, DEFAULT_DENSITY),
        };

        let (width, height) = dims.split_once('x').ok_or_else(err)?;
        let width: u32 = width.parse().map_err(|_| err())?;
        let height: u32 = height.parse().map_err(|_| err())?;

        Self::new(width, height, density).ok_or_else(err)
    }
}
