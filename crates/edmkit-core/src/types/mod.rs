//! Value types shared by the builder, the serializer, and settings.

pub mod axes;
pub mod modes;

pub use axes::{Axes, Axis, AxisFlags, AXIS_COUNT};
pub use modes::{CoordinateMode, MotionMode};
