//! # EDMKit Core
//!
//! Core types and errors for EDMKit.
//! Provides the axis primitives, modal enums, source-location context,
//! and machine limits shared by the command builder and its consumers.

pub mod error;
pub mod limits;
pub mod source;
pub mod types;

pub use error::{DecodeError, Error, InterpreterError, InterpreterErrorKind, Result};
pub use limits::{InterpreterLimits, DEFAULT_DRILL_HOLD_TIME_MS, MAX_ELEPARAM_COUNT};
pub use source::SourceContext;
pub use types::{Axes, Axis, AxisFlags, CoordinateMode, MotionMode, AXIS_COUNT};
