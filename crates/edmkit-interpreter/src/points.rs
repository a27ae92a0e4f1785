//! Point lists for grouped linear moves
//!
//! A [`PointList`] is assembled on its own, under its own coordinate mode,
//! and only handed to the builder when the grouped move is emitted. Each
//! point keeps the mode that was latched when it was pushed, so a single
//! list can mix absolute and incremental points.

use edmkit_core::{Axes, CoordinateMode, InterpreterError, InterpreterErrorKind, SourceContext};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// One point of a grouped move. Immutable once pushed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(rename = "CoordinateMode")]
    coordinate_mode: CoordinateMode,
    #[serde(rename = "Coordinates")]
    coordinates: Axes,
    #[serde(rename = "LineNumber")]
    line_number: u32,
    #[serde(rename = "CommandStr")]
    command_str: String,
}

impl Point {
    /// Create a point; the caller is responsible for mode and value checks
    pub fn new(coordinate_mode: CoordinateMode, coordinates: Axes, source: SourceContext) -> Self {
        Self {
            coordinate_mode,
            coordinates,
            line_number: source.line,
            command_str: source.text,
        }
    }

    /// Mode latched in the list when this point was pushed
    pub fn coordinate_mode(&self) -> CoordinateMode {
        self.coordinate_mode
    }

    /// Target coordinates
    pub fn coordinates(&self) -> &Axes {
        &self.coordinates
    }

    /// Line of the push call
    pub fn line_number(&self) -> u32 {
        self.line_number
    }

    /// Text of the push call
    pub fn command_str(&self) -> &str {
        &self.command_str
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mode: {}, point: [{}], line: {}",
            self.coordinate_mode, self.coordinates, self.line_number
        )
    }
}

/// Append-only sequence of points with its own coordinate mode latch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointList {
    points: Vec<Point>,
    coordinate_mode: CoordinateMode,
}

impl PointList {
    /// Create an empty list with an undefined coordinate mode
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch absolute mode for subsequent pushes
    pub fn absolute_mode(&mut self) -> &mut Self {
        self.coordinate_mode = CoordinateMode::Absolute;
        self
    }

    /// Latch incremental mode for subsequent pushes
    pub fn incremental_mode(&mut self) -> &mut Self {
        self.coordinate_mode = CoordinateMode::Incremental;
        self
    }

    /// Mode that the next push will record
    pub fn coordinate_mode(&self) -> CoordinateMode {
        self.coordinate_mode
    }

    /// Append a point, recording the caller's line
    #[track_caller]
    pub fn push(&mut self, axes: Axes) -> Result<&mut Self, InterpreterError> {
        let source = SourceContext::caller(format!("push({})", axes));
        self.push_at(axes, source)
    }

    /// Append a point with an explicit source context
    pub fn push_at(
        &mut self,
        axes: Axes,
        source: SourceContext,
    ) -> Result<&mut Self, InterpreterError> {
        if !self.coordinate_mode.is_defined() {
            warn!(line = source.line, "point pushed before coordinate mode selected");
            return Err(InterpreterError::new(
                InterpreterErrorKind::CoordinateModeUndefined,
                &source,
            ));
        }

        if let Some((axis, value)) = axes.first_non_finite() {
            return Err(InterpreterError::new(
                InterpreterErrorKind::not_numeric("Point", format!("{}={}", axis, value)),
                &source,
            ));
        }

        self.points.push(Point::new(self.coordinate_mode, axes, source));
        Ok(self)
    }

    /// All points in push order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Iterate points in push order
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if no point has been pushed
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl<'a> IntoIterator for &'a PointList {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One line per point
impl fmt::Display for PointList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for point in &self.points {
            writeln!(f, "{}", point)?;
        }
        Ok(())
    }
}
