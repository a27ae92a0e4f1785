//! # EDMKit Interpreter
//!
//! Stateful command builder for EDM machining programs.
//! A program is written as a sequence of builder calls; each call is checked
//! against the latched machine state and emits one command record tagged
//! with the caller's line and text. The finished list is serialized to JSON
//! for the motion controller.

pub mod builder;
pub mod command;
pub mod directive;
pub mod points;
pub mod serializer;
pub mod state;
pub mod summary;

pub use builder::CommandBuilder;
pub use command::{CommandKind, CommandRecord};
pub use directive::{Directive, DrillParams, RapidMoveOptions};
pub use points::{Point, PointList};
pub use serializer::{from_json_str, from_json_value, to_json_string, to_json_value};
pub use state::MachineState;
pub use summary::ProgramSummary;
