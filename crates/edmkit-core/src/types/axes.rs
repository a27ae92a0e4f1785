//! Six-axis coordinate tuple and per-axis flags.
//!
//! Axis order is fixed as x, y, z, b, c, a everywhere: in memory, in the
//! serialized command list, and in the downstream controller.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of machine axes.
pub const AXIS_COUNT: usize = 6;

/// A single machine axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
    B,
    C,
    A,
}

impl Axis {
    /// All axes in slot order.
    pub const ALL: [Axis; AXIS_COUNT] = [Axis::X, Axis::Y, Axis::Z, Axis::B, Axis::C, Axis::A];

    /// Slot index of this axis.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
            Axis::B => 3,
            Axis::C => 4,
            Axis::A => 5,
        }
    }

    /// Lowercase axis name.
    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
            Axis::B => "b",
            Axis::C => "c",
            Axis::A => "a",
        }
    }

    /// Uppercase G-code letter.
    pub fn letter(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
            Axis::B => 'B',
            Axis::C => 'C',
            Axis::A => 'A',
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Target coordinates for a move
///
/// Each slot is independently optional. `None` means the axis is not
/// commanded and keeps its position; it serializes as `null`, distinct
/// from `0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[Option<f64>; AXIS_COUNT]", into = "[Option<f64>; AXIS_COUNT]")]
pub struct Axes {
    /// X-axis target (if Some, move this axis)
    pub x: Option<f64>,
    /// Y-axis target (if Some, move this axis)
    pub y: Option<f64>,
    /// Z-axis target (if Some, move this axis)
    pub z: Option<f64>,
    /// B-axis target (if Some, move this axis)
    pub b: Option<f64>,
    /// C-axis target (if Some, move this axis)
    pub c: Option<f64>,
    /// A-axis target (if Some, move this axis)
    pub a: Option<f64>,
}

impl Axes {
    /// Create an empty tuple (no axis commanded)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tuple with XYZ set
    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
            ..Default::default()
        }
    }

    /// Set the X target
    pub fn x(mut self, value: f64) -> Self {
        self.x = Some(value);
        self
    }

    /// Set the Y target
    pub fn y(mut self, value: f64) -> Self {
        self.y = Some(value);
        self
    }

    /// Set the Z target
    pub fn z(mut self, value: f64) -> Self {
        self.z = Some(value);
        self
    }

    /// Set the B target
    pub fn b(mut self, value: f64) -> Self {
        self.b = Some(value);
        self
    }

    /// Set the C target
    pub fn c(mut self, value: f64) -> Self {
        self.c = Some(value);
        self
    }

    /// Set the A target
    pub fn a(mut self, value: f64) -> Self {
        self.a = Some(value);
        self
    }

    /// Set the target of an arbitrary axis
    pub fn with(mut self, axis: Axis, value: f64) -> Self {
        *self.slot_mut(axis) = Some(value);
        self
    }

    /// Target of `axis`, if commanded
    pub fn get(&self, axis: Axis) -> Option<f64> {
        self.to_array()[axis.index()]
    }

    fn slot_mut(&mut self, axis: Axis) -> &mut Option<f64> {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
            Axis::B => &mut self.b,
            Axis::C => &mut self.c,
            Axis::A => &mut self.a,
        }
    }

    /// Slots in x, y, z, b, c, a order
    pub fn to_array(&self) -> [Option<f64>; AXIS_COUNT] {
        [self.x, self.y, self.z, self.b, self.c, self.a]
    }

    /// Commanded axes and their targets, in slot order
    pub fn commanded(&self) -> impl Iterator<Item = (Axis, f64)> + '_ {
        Axis::ALL
            .into_iter()
            .filter_map(move |axis| self.get(axis).map(|value| (axis, value)))
    }

    /// Returns true if no axis is commanded
    pub fn is_empty(&self) -> bool {
        self.commanded().next().is_none()
    }

    /// First commanded axis whose value is NaN or infinite
    pub fn first_non_finite(&self) -> Option<(Axis, f64)> {
        self.commanded().find(|(_, value)| !value.is_finite())
    }

    /// G-code style word list, e.g. `X1 Y0.5`
    pub fn to_gcode_words(&self) -> String {
        self.commanded()
            .map(|(axis, value)| format!("{}{}", axis.letter(), value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<[Option<f64>; AXIS_COUNT]> for Axes {
    fn from(slots: [Option<f64>; AXIS_COUNT]) -> Self {
        let [x, y, z, b, c, a] = slots;
        Self { x, y, z, b, c, a }
    }
}

impl From<Axes> for [Option<f64>; AXIS_COUNT] {
    fn from(axes: Axes) -> Self {
        axes.to_array()
    }
}

/// Renders as keyword arguments, e.g. `x=1, z=-0.2`
impl fmt::Display for Axes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (axis, value) in self.commanded() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", axis, value)?;
            first = false;
        }
        Ok(())
    }
}

/// Per-axis selection, used to zero the current position on chosen axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[bool; AXIS_COUNT]", into = "[bool; AXIS_COUNT]")]
pub struct AxisFlags([bool; AXIS_COUNT]);

impl AxisFlags {
    /// No axis selected
    pub fn none() -> Self {
        Self::default()
    }

    /// Every axis selected
    pub fn all() -> Self {
        Self([true; AXIS_COUNT])
    }

    /// Only `axis` selected
    pub fn only(axis: Axis) -> Self {
        Self::none().with(axis)
    }

    /// Add `axis` to the selection
    pub fn with(mut self, axis: Axis) -> Self {
        self.0[axis.index()] = true;
        self
    }

    /// Returns true if `axis` is selected
    pub fn contains(&self, axis: Axis) -> bool {
        self.0[axis.index()]
    }

    /// Selected axes in slot order
    pub fn selected(&self) -> impl Iterator<Item = Axis> + '_ {
        Axis::ALL.into_iter().filter(move |axis| self.contains(*axis))
    }

    /// Flags in x, y, z, b, c, a order
    pub fn to_array(&self) -> [bool; AXIS_COUNT] {
        self.0
    }
}

impl From<[bool; AXIS_COUNT]> for AxisFlags {
    fn from(flags: [bool; AXIS_COUNT]) -> Self {
        Self(flags)
    }
}

impl From<AxisFlags> for [bool; AXIS_COUNT] {
    fn from(flags: AxisFlags) -> Self {
        flags.0
    }
}

/// Renders as keyword arguments, e.g. `x=true, a=true`
impl fmt::Display for AxisFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.selected().map(|axis| format!("{}=true", axis)).collect();
        f.write_str(&names.join(", "))
    }
}
