//! Command records emitted by the builder
//!
//! Each record is one machine command plus the caller location that
//! produced it. The variant set is closed and each variant carries only its
//! own fields; the serde attributes pin the wire names the motion
//! controller reads.

use crate::points::Point;
use edmkit_core::{Axes, AxisFlags, CoordinateMode, MotionMode, SourceContext};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine command carried by a [`CommandRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "CommandType")]
pub enum CommandKind {
    /// G90 / G91
    #[serde(rename = "CoordinateModeCommand")]
    CoordinateModeSet {
        #[serde(rename = "CoordinateMode")]
        mode: CoordinateMode,
    },

    /// G53, G54, ... or an arbitrary coordinate system index
    #[serde(rename = "CoordinateIndexCommand")]
    CoordinateSystemSelect {
        #[serde(rename = "CoordinateIndex")]
        index: u64,
    },

    /// G00 rapid positioning
    #[serde(rename = "G00MotionCommand")]
    RapidMove {
        #[serde(rename = "CoordinateMode")]
        coordinate_mode: CoordinateMode,
        #[serde(rename = "MotionMode")]
        motion_mode: MotionMode,
        #[serde(rename = "CoordinateIndex")]
        coordinate_index: u64,
        #[serde(rename = "Coordinates")]
        coordinates: Axes,
        /// M05: ignore touch detection during this move
        #[serde(rename = "M05IgnoreTouchDetect")]
        ignore_touch_detect: bool,
        /// Move until contact, then clear the contact fault and continue
        #[serde(rename = "G00Touch")]
        touch: bool,
        #[serde(rename = "FeedSpeed")]
        feed_speed: u64,
    },

    /// G01 linear cut
    #[serde(rename = "G01MotionCommand")]
    LinearMove {
        #[serde(rename = "CoordinateMode")]
        coordinate_mode: CoordinateMode,
        #[serde(rename = "MotionMode")]
        motion_mode: MotionMode,
        #[serde(rename = "CoordinateIndex")]
        coordinate_index: u64,
        #[serde(rename = "Coordinates")]
        coordinates: Axes,
    },

    /// Consecutive G01 cuts through a point list
    #[serde(rename = "G01GroupMotionCommand")]
    LinearMoveGroup {
        #[serde(rename = "CoordinateIndex")]
        coordinate_index: u64,
        #[serde(rename = "G01GroupPoints")]
        points: Vec<Point>,
    },

    /// G04 dwell
    #[serde(rename = "DelayCommand")]
    Delay {
        #[serde(rename = "DelayTime")]
        delay_time: f64,
    },

    /// Select an entry of the discharge parameter table
    #[serde(rename = "EleparamSetCommand")]
    ElectricalParamSelect {
        #[serde(rename = "EleparamIndex")]
        index: u16,
    },

    /// F word
    #[serde(rename = "FeedSpeedSetCommand")]
    FeedSpeedSet {
        #[serde(rename = "FeedSpeed")]
        feed_speed: u64,
    },

    /// Make the current position the origin of the selected axes
    #[serde(rename = "CoordSetZeroCommand")]
    ZeroAxesAtCurrentPosition {
        #[serde(rename = "SetZeroAxisList")]
        axes: AxisFlags,
    },

    /// Drill cycle
    #[serde(rename = "DrillMotionCommand")]
    Drill {
        #[serde(rename = "MotionMode")]
        motion_mode: MotionMode,
        /// Depth in millimetres
        #[serde(rename = "DrillDepth")]
        depth: f64,
        /// Dwell at the bottom in milliseconds
        #[serde(rename = "DrillHoldTime")]
        hold_time_ms: u32,
        /// Touch off before drilling
        #[serde(rename = "DrillTouch")]
        touch: bool,
        /// Breakout detection while drilling
        #[serde(rename = "DrillBreakout")]
        breakout: bool,
        /// Retract to the start position afterwards
        #[serde(rename = "DrillBack")]
        back: bool,
        #[serde(rename = "DrillSpindleSpeed")]
        spindle_speed: Option<f64>,
    },

    /// M00
    #[serde(rename = "PauseCommand")]
    Pause,

    /// M02
    #[serde(rename = "ProgramEndCommand")]
    ProgramEnd,
}

impl CommandKind {
    /// Wire name of the variant (the `CommandType` value)
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::CoordinateModeSet { .. } => "CoordinateModeCommand",
            Self::CoordinateSystemSelect { .. } => "CoordinateIndexCommand",
            Self::RapidMove { .. } => "G00MotionCommand",
            Self::LinearMove { .. } => "G01MotionCommand",
            Self::LinearMoveGroup { .. } => "G01GroupMotionCommand",
            Self::Delay { .. } => "DelayCommand",
            Self::ElectricalParamSelect { .. } => "EleparamSetCommand",
            Self::FeedSpeedSet { .. } => "FeedSpeedSetCommand",
            Self::ZeroAxesAtCurrentPosition { .. } => "CoordSetZeroCommand",
            Self::Drill { .. } => "DrillMotionCommand",
            Self::Pause => "PauseCommand",
            Self::ProgramEnd => "ProgramEndCommand",
        }
    }

    /// Returns true for commands that move an axis
    pub fn is_motion(&self) -> bool {
        matches!(
            self,
            Self::RapidMove { .. }
                | Self::LinearMove { .. }
                | Self::LinearMoveGroup { .. }
                | Self::Drill { .. }
        )
    }
}

/// One-line G-code style preview, for logs only
impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CoordinateModeSet { mode } => {
                f.write_str(mode.gcode().unwrap_or("; coordinate mode undefined"))
            }
            Self::CoordinateSystemSelect { index } => match index {
                53..=59 => write!(f, "G{}", index),
                _ => write!(f, "; coordinate system {}", index),
            },
            Self::RapidMove {
                coordinates,
                ignore_touch_detect,
                touch,
                ..
            } => {
                write_motion(f, "G00", coordinates)?;
                if *ignore_touch_detect {
                    f.write_str(" M05")?;
                }
                if *touch {
                    f.write_str(" ; touch")?;
                }
                Ok(())
            }
            Self::LinearMove { coordinates, .. } => write_motion(f, "G01", coordinates),
            Self::LinearMoveGroup { points, .. } => {
                write!(f, "G01 ; group of {} points", points.len())
            }
            Self::Delay { delay_time } => write!(f, "G04 P{}", delay_time),
            Self::ElectricalParamSelect { index } => write!(f, "E{:03}", index),
            Self::FeedSpeedSet { feed_speed } => write!(f, "F{}", feed_speed),
            Self::ZeroAxesAtCurrentPosition { axes } => {
                f.write_str("G92")?;
                for axis in axes.selected() {
                    write!(f, " {}0", axis.letter())?;
                }
                Ok(())
            }
            Self::Drill {
                depth,
                hold_time_ms,
                touch,
                breakout,
                back,
                spindle_speed,
                ..
            } => {
                write!(f, "DRILL D{} P{}", depth, hold_time_ms)?;
                if let Some(speed) = spindle_speed {
                    write!(f, " S{}", speed)?;
                }
                if *touch {
                    f.write_str(" TOUCH")?;
                }
                if *breakout {
                    f.write_str(" BREAKOUT")?;
                }
                if *back {
                    f.write_str(" BACK")?;
                }
                Ok(())
            }
            Self::Pause => f.write_str("M00"),
            Self::ProgramEnd => f.write_str("M02"),
        }
    }
}

fn write_motion(f: &mut fmt::Formatter<'_>, word: &str, coordinates: &Axes) -> fmt::Result {
    f.write_str(word)?;
    if !coordinates.is_empty() {
        write!(f, " {}", coordinates.to_gcode_words())?;
    }
    Ok(())
}

/// An emitted command with the caller location that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandRecord {
    #[serde(flatten)]
    kind: CommandKind,
    #[serde(rename = "LineNumber")]
    line_number: u32,
    #[serde(rename = "CommandStr")]
    command_str: String,
}

impl CommandRecord {
    /// Create a record tagged with `source`
    pub fn new(kind: CommandKind, source: SourceContext) -> Self {
        Self {
            kind,
            line_number: source.line,
            command_str: source.text,
        }
    }

    /// The machine command
    pub fn kind(&self) -> &CommandKind {
        &self.kind
    }

    /// Line of the originating call
    pub fn line_number(&self) -> u32 {
        self.line_number
    }

    /// Text of the originating call
    pub fn command_str(&self) -> &str {
        &self.command_str
    }

    /// Wire name of the command type
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }
}

impl fmt::Display for CommandRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{} {}", self.line_number, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(kind: CommandKind) -> CommandRecord {
        CommandRecord::new(kind, SourceContext::new(5, "src"))
    }

    #[test]
    fn test_unit_variant_wire_shape() {
        let value = serde_json::to_value(record(CommandKind::ProgramEnd)).unwrap();
        assert_eq!(
            value,
            json!({"CommandType": "ProgramEndCommand", "LineNumber": 5, "CommandStr": "src"})
        );
    }

    #[test]
    fn test_rapid_move_wire_shape() {
        let value = serde_json::to_value(record(CommandKind::RapidMove {
            coordinate_mode: CoordinateMode::Incremental,
            motion_mode: MotionMode::Rapid,
            coordinate_index: 55,
            coordinates: Axes::new().a(-100.0),
            ignore_touch_detect: false,
            touch: true,
            feed_speed: 100,
        }))
        .unwrap();
        assert_eq!(
            value,
            json!({
                "CommandType": "G00MotionCommand",
                "CoordinateMode": "IncrementMode",
                "MotionMode": "G00",
                "CoordinateIndex": 55,
                "Coordinates": [null, null, null, null, null, -100.0],
                "M05IgnoreTouchDetect": false,
                "G00Touch": true,
                "FeedSpeed": 100,
                "LineNumber": 5,
                "CommandStr": "src"
            })
        );
    }

    #[test]
    fn test_drill_null_spindle_speed() {
        let value = serde_json::to_value(record(CommandKind::Drill {
            motion_mode: MotionMode::Drill,
            depth: 1.0,
            hold_time_ms: 500,
            touch: true,
            breakout: false,
            back: true,
            spindle_speed: None,
        }))
        .unwrap();
        assert_eq!(value["MotionMode"], "DRILL");
        assert!(value["DrillSpindleSpeed"].is_null());
        assert_eq!(value["DrillHoldTime"], 500);
    }

    #[test]
    fn test_preview_lines() {
        let zero = CommandKind::ZeroAxesAtCurrentPosition {
            axes: AxisFlags::only(edmkit_core::Axis::A),
        };
        assert_eq!(zero.to_string(), "G92 A0");
        assert_eq!(CommandKind::ElectricalParamSelect { index: 11 }.to_string(), "E011");
        assert_eq!(CommandKind::Delay { delay_time: 1.5 }.to_string(), "G04 P1.5");
        assert_eq!(CommandKind::CoordinateSystemSelect { index: 54 }.to_string(), "G54");
        let rapid = CommandKind::RapidMove {
            coordinate_mode: CoordinateMode::Absolute,
            motion_mode: MotionMode::Rapid,
            coordinate_index: 54,
            coordinates: Axes::xyz(1.0, 0.0, 0.0),
            ignore_touch_detect: true,
            touch: false,
            feed_speed: 1000,
        };
        assert_eq!(rapid.to_string(), "G00 X1 Y0 Z0 M05");
        assert_eq!(record(CommandKind::Pause).to_string(), "N5 M00");
    }

    #[test]
    fn test_is_motion() {
        assert!(CommandKind::LinearMoveGroup {
            coordinate_index: 0,
            points: Vec::new()
        }
        .is_motion());
        assert!(!CommandKind::FeedSpeedSet { feed_speed: 1 }.is_motion());
    }
}
