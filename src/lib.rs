//! # EDMKit
//!
//! A programmatic command builder for EDM drilling and milling machines.
//! Machining programs are written as chains of builder calls; every call is
//! validated against the latched machine state and produces one command
//! record. The finished list is handed to the motion controller as JSON.
//!
//! ## Architecture
//!
//! EDMKit is organized as a workspace with multiple crates:
//!
//! 1. **edmkit-core** - Axis primitives, modal enums, limits, errors
//! 2. **edmkit-interpreter** - Command builder, point lists, command records, serializer
//! 3. **edmkit-settings** - Configuration files (JSON / TOML)
//! 4. **edmkit** - Facade and demo binary
//!
//! ## Example
//!
//! ```
//! use edmkit::{Axes, CommandBuilder};
//!
//! let mut builder = CommandBuilder::new();
//! builder
//!     .g54()?
//!     .absolute_mode()?
//!     .feed_speed(1000)?
//!     .rapid_move(Axes::xyz(1.0, 0.0, 0.0))?
//!     .program_end()?;
//! let json = builder.serialize()?;
//! assert!(json.contains("G00MotionCommand"));
//! # Ok::<(), edmkit::Error>(())
//! ```

pub mod demo;

pub use edmkit_core::{
    Axes, Axis, AxisFlags, CoordinateMode, DecodeError, Error, InterpreterError,
    InterpreterErrorKind, InterpreterLimits, MotionMode, Result, SourceContext, AXIS_COUNT,
};

pub use edmkit_interpreter::{
    from_json_str, to_json_string, CommandBuilder, CommandKind, CommandRecord, Directive,
    DrillParams, MachineState, Point, PointList, ProgramSummary, RapidMoveOptions,
};

pub use edmkit_settings::{Config, LoggingSettings, OutputSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Console output on stderr, keeping stdout for the command list
/// - RUST_LOG environment variable support, falling back to `level`
pub fn init_logging(level: &str) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
