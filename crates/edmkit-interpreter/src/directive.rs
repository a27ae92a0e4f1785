//! Directives accepted by the command builder
//!
//! A [`Directive`] is one call into the builder with its arguments. Its
//! `Display` form is the canonical call text recorded as `CommandStr` when
//! the caller does not supply its own.

use crate::points::PointList;
use edmkit_core::{Axes, AxisFlags};
use std::fmt;

/// Flags for a rapid move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RapidMoveOptions {
    /// Ignore touch detection during the move (M05)
    pub ignore_touch_detect: bool,
    /// Touch move; forces touch detection on
    pub touch: bool,
}

impl RapidMoveOptions {
    /// Plain rapid move with touch detection active
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable touch detection for the move
    pub fn ignore_touch_detect(mut self, ignore: bool) -> Self {
        self.ignore_touch_detect = ignore;
        self
    }

    /// Mark the move as a touch move
    pub fn touch(mut self, touch: bool) -> Self {
        self.touch = touch;
        self
    }
}

/// Parameters for the drill cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrillParams {
    /// Drill depth (mm)
    pub depth: f64,
    /// Dwell at the bottom of the hole (ms). `None` uses the configured default.
    pub hold_time_ms: Option<i64>,
    /// Touch off the surface before drilling
    pub touch: bool,
    /// Enable breakout detection
    pub breakout: bool,
    /// Retract to the start position when done
    pub back: bool,
    /// Spindle speed; `None` leaves the controller's setting
    pub spindle_speed: Option<f64>,
}

impl DrillParams {
    /// Drill to `depth` with default hold time and all flags off
    pub fn new(depth: f64) -> Self {
        Self {
            depth,
            hold_time_ms: None,
            touch: false,
            breakout: false,
            back: false,
            spindle_speed: None,
        }
    }

    /// Set the dwell at the bottom of the hole
    pub fn hold_time_ms(mut self, hold_time_ms: i64) -> Self {
        self.hold_time_ms = Some(hold_time_ms);
        self
    }

    /// Touch off before drilling
    pub fn touch(mut self, touch: bool) -> Self {
        self.touch = touch;
        self
    }

    /// Enable breakout detection
    pub fn breakout(mut self, breakout: bool) -> Self {
        self.breakout = breakout;
        self
    }

    /// Retract to the start position when done
    pub fn back(mut self, back: bool) -> Self {
        self.back = back;
        self
    }

    /// Set the spindle speed
    pub fn spindle_speed(mut self, speed: f64) -> Self {
        self.spindle_speed = Some(speed);
        self
    }
}

/// One builder call and its arguments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Directive<'a> {
    AbsoluteMode,
    IncrementalMode,
    Delay(f64),
    SelectEleparam(i64),
    SelectCoordinateSystem(i64),
    ZeroAxes(AxisFlags),
    ProgramEnd,
    Pause,
    FeedSpeed(i64),
    LinearMove(Axes),
    RapidMove(Axes, RapidMoveOptions),
    LinearMoveGroup(&'a PointList),
    Drill(DrillParams),
}

impl Directive<'_> {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::AbsoluteMode => "absolute_mode",
            Self::IncrementalMode => "incremental_mode",
            Self::Delay(_) => "delay",
            Self::SelectEleparam(_) => "select_eleparam",
            Self::SelectCoordinateSystem(_) => "select_coordinate_system",
            Self::ZeroAxes(_) => "zero_axes",
            Self::ProgramEnd => "program_end",
            Self::Pause => "pause",
            Self::FeedSpeed(_) => "feed_speed",
            Self::LinearMove(_) => "linear_move",
            Self::RapidMove(..) => "rapid_move",
            Self::LinearMoveGroup(_) => "linear_move_group",
            Self::Drill(_) => "drill",
        }
    }
}

impl fmt::Display for Directive<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        match self {
            Self::AbsoluteMode | Self::IncrementalMode | Self::ProgramEnd | Self::Pause => {
                write!(f, "{}()", name)
            }
            Self::Delay(t) => write!(f, "{}({})", name, t),
            Self::SelectEleparam(index)
            | Self::SelectCoordinateSystem(index)
            | Self::FeedSpeed(index) => write!(f, "{}({})", name, index),
            Self::ZeroAxes(flags) => write!(f, "{}({})", name, flags),
            Self::LinearMove(axes) => write!(f, "{}({})", name, axes),
            Self::RapidMove(axes, options) => {
                write!(f, "{}({}", name, axes)?;
                let mut sep = if axes.is_empty() { "" } else { ", " };
                if options.ignore_touch_detect {
                    write!(f, "{}ignore_touch_detect=true", sep)?;
                    sep = ", ";
                }
                if options.touch {
                    write!(f, "{}touch=true", sep)?;
                }
                f.write_str(")")
            }
            Self::LinearMoveGroup(points) => write!(f, "{}(<{} points>)", name, points.len()),
            Self::Drill(params) => {
                write!(f, "{}(depth={}", name, params.depth)?;
                if let Some(hold_time_ms) = params.hold_time_ms {
                    write!(f, ", hold_time_ms={}", hold_time_ms)?;
                }
                write!(
                    f,
                    ", touch={}, breakout={}, back={}",
                    params.touch, params.breakout, params.back
                )?;
                match params.spindle_speed {
                    Some(speed) => write!(f, ", spindle_speed={})", speed),
                    None => f.write_str(", spindle_speed=None)"),
                }
            }
        }
    }
}
