//! Modal states latched by the command builder.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether coordinates are absolute positions or increments (G90/G91).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CoordinateMode {
    /// Not selected yet; motion is illegal in this state
    #[default]
    Undefined,
    /// G90
    #[serde(rename = "AbsoluteMode")]
    Absolute,
    /// G91
    #[serde(rename = "IncrementMode")]
    Incremental,
}

impl CoordinateMode {
    /// Name used in serialized command lists.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Undefined => "Undefined",
            Self::Absolute => "AbsoluteMode",
            Self::Incremental => "IncrementMode",
        }
    }

    /// G-code word selecting this mode, if any.
    pub fn gcode(&self) -> Option<&'static str> {
        match self {
            Self::Undefined => None,
            Self::Absolute => Some("G90"),
            Self::Incremental => Some("G91"),
        }
    }

    /// Returns true once a concrete mode has been selected.
    pub fn is_defined(&self) -> bool {
        !matches!(self, Self::Undefined)
    }
}

impl fmt::Display for CoordinateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of move being emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MotionMode {
    /// No motion directive issued yet
    #[default]
    Undefined,
    /// Rapid positioning
    #[serde(rename = "G00")]
    Rapid,
    /// Linear cut at feed speed
    #[serde(rename = "G01")]
    Linear,
    /// Drill cycle
    #[serde(rename = "DRILL")]
    Drill,
}

impl MotionMode {
    /// Name used in serialized command lists.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Undefined => "Undefined",
            Self::Rapid => "G00",
            Self::Linear => "G01",
            Self::Drill => "DRILL",
        }
    }

    /// Returns true once a concrete mode has been selected.
    pub fn is_defined(&self) -> bool {
        !matches!(self, Self::Undefined)
    }
}

impl fmt::Display for MotionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
