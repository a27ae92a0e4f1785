//! Stateful command builder
//!
//! [`CommandBuilder`] is the interpreter for a machining program: every
//! directive is checked against the latched [`MachineState`], may update
//! that state, and appends one [`CommandRecord`]. Records are append-only
//! and keep call order.
//!
//! Each directive is processed in the same order:
//! 1. after program end, do nothing and succeed
//! 2. validate the arguments
//! 3. for motion, check coordinate mode, motion mode, coordinate system
//!    and feed speed, in that order
//! 4. update the state
//! 5. append the record
//!
//! A failed directive leaves both the state and the command list untouched.
//!
//! # Example
//!
//! ```
//! use edmkit_core::Axes;
//! use edmkit_interpreter::CommandBuilder;
//!
//! let mut builder = CommandBuilder::new();
//! builder
//!     .g54()?
//!     .absolute_mode()?
//!     .feed_speed(1000)?
//!     .rapid_move(Axes::xyz(1.0, 0.0, 0.0))?
//!     .program_end()?;
//! assert_eq!(builder.command_list().len(), 5);
//! # Ok::<(), edmkit_core::InterpreterError>(())
//! ```

use crate::command::{CommandKind, CommandRecord};
use crate::directive::{Directive, DrillParams, RapidMoveOptions};
use crate::points::PointList;
use crate::serializer;
use crate::state::MachineState;
use crate::summary::ProgramSummary;
use edmkit_core::{
    Axes, Axis, AxisFlags, CoordinateMode, InterpreterError, InterpreterErrorKind,
    InterpreterLimits, MotionMode, SourceContext, MAX_ELEPARAM_COUNT,
};
use tracing::{debug, warn};

type DirectiveResult<'b> = Result<&'b mut CommandBuilder, InterpreterError>;

/// State latched by the preconditions of a motion directive.
struct MotionContext {
    coordinate_mode: CoordinateMode,
    motion_mode: MotionMode,
    coordinate_index: u64,
    feed_speed: u64,
}

/// Builds the command list of one machining program.
#[derive(Debug, Clone, Default)]
pub struct CommandBuilder {
    state: MachineState,
    commands: Vec<CommandRecord>,
    limits: InterpreterLimits,
}

impl CommandBuilder {
    /// Create a builder with the controller's default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder validating against custom limits
    ///
    /// The electrical parameter table can only be narrowed: a count above
    /// [`MAX_ELEPARAM_COUNT`] is clamped to it.
    pub fn with_limits(mut limits: InterpreterLimits) -> Self {
        limits.eleparam_count = limits.eleparam_count.min(MAX_ELEPARAM_COUNT);
        Self {
            limits,
            ..Self::default()
        }
    }

    /// Latched machine state
    pub fn state(&self) -> &MachineState {
        &self.state
    }

    /// Limits in effect
    pub fn limits(&self) -> &InterpreterLimits {
        &self.limits
    }

    /// Commands emitted so far, in call order
    pub fn command_list(&self) -> &[CommandRecord] {
        &self.commands
    }

    /// Consume the builder, returning the emitted commands
    pub fn into_command_list(self) -> Vec<CommandRecord> {
        self.commands
    }

    /// Pretty JSON rendering of the command list
    pub fn serialize(&self) -> edmkit_core::Result<String> {
        serializer::to_json_string(&self.commands, true)
    }

    /// Statistics over the commands emitted so far
    pub fn summary(&self) -> ProgramSummary {
        ProgramSummary::from_records(&self.commands)
    }

    /// Process one directive with an explicit source context
    pub fn execute(&mut self, directive: Directive<'_>, source: SourceContext) -> DirectiveResult<'_> {
        if self.state.is_program_ended() {
            debug!(
                directive = directive.name(),
                line = source.line,
                "program already ended, directive discarded"
            );
            return Ok(self);
        }

        let kind = match self.interpret(directive) {
            Ok(kind) => kind,
            Err(kind) => {
                let err = InterpreterError::new(kind, &source);
                warn!(directive = directive.name(), "{}", err);
                return Err(err);
            }
        };

        debug!(
            command = kind.type_name(),
            line = source.line,
            "{}",
            kind
        );
        self.commands.push(CommandRecord::new(kind, source));
        Ok(self)
    }

    fn interpret(&mut self, directive: Directive<'_>) -> Result<CommandKind, InterpreterErrorKind> {
        match directive {
            Directive::AbsoluteMode => Ok(self.set_coordinate_mode(CoordinateMode::Absolute)),
            Directive::IncrementalMode => Ok(self.set_coordinate_mode(CoordinateMode::Incremental)),
            Directive::Delay(delay_time) => {
                ensure_finite("Delay Time", delay_time)?;
                if delay_time < 0.0 {
                    return Err(InterpreterErrorKind::out_of_range("Delay Time", delay_time));
                }
                Ok(CommandKind::Delay { delay_time })
            }
            Directive::SelectEleparam(index) => {
                let out_of_range = || InterpreterErrorKind::out_of_range("Eleparam Index", index);
                let index = u16::try_from(index).map_err(|_| out_of_range())?;
                if index >= self.limits.eleparam_count {
                    return Err(out_of_range());
                }
                Ok(CommandKind::ElectricalParamSelect { index })
            }
            Directive::SelectCoordinateSystem(index) => {
                let index = u64::try_from(index)
                    .map_err(|_| InterpreterErrorKind::out_of_range("Coordinate Index", index))?;
                self.state.set_coordinate_index(index);
                Ok(CommandKind::CoordinateSystemSelect { index })
            }
            Directive::ZeroAxes(axes) => Ok(CommandKind::ZeroAxesAtCurrentPosition { axes }),
            Directive::ProgramEnd => {
                self.state.set_program_ended();
                Ok(CommandKind::ProgramEnd)
            }
            Directive::Pause => Ok(CommandKind::Pause),
            Directive::FeedSpeed(speed) => {
                let feed_speed = u64::try_from(speed)
                    .ok()
                    .filter(|speed| *speed > 0)
                    .ok_or_else(|| InterpreterErrorKind::out_of_range("Feed Speed Value", speed))?;
                self.state.set_feed_speed(feed_speed);
                Ok(CommandKind::FeedSpeedSet { feed_speed })
            }
            Directive::LinearMove(coordinates) => {
                ensure_coordinates(&coordinates)?;
                let ctx = self.enter_motion(MotionMode::Linear)?;
                Ok(CommandKind::LinearMove {
                    coordinate_mode: ctx.coordinate_mode,
                    motion_mode: ctx.motion_mode,
                    coordinate_index: ctx.coordinate_index,
                    coordinates,
                })
            }
            Directive::RapidMove(coordinates, options) => {
                ensure_coordinates(&coordinates)?;
                let ctx = self.enter_motion(MotionMode::Rapid)?;
                // a touch move needs touch detection, whatever was requested
                let ignore_touch_detect = options.ignore_touch_detect && !options.touch;
                Ok(CommandKind::RapidMove {
                    coordinate_mode: ctx.coordinate_mode,
                    motion_mode: ctx.motion_mode,
                    coordinate_index: ctx.coordinate_index,
                    coordinates,
                    ignore_touch_detect,
                    touch: options.touch,
                    feed_speed: ctx.feed_speed,
                })
            }
            Directive::LinearMoveGroup(points) => {
                let ctx = self.enter_motion(MotionMode::Linear)?;
                Ok(CommandKind::LinearMoveGroup {
                    coordinate_index: ctx.coordinate_index,
                    points: points.points().to_vec(),
                })
            }
            Directive::Drill(params) => self.drill_command(params),
        }
    }

    fn set_coordinate_mode(&mut self, mode: CoordinateMode) -> CommandKind {
        self.state.set_coordinate_mode(mode);
        CommandKind::CoordinateModeSet { mode }
    }

    /// Check motion preconditions and latch `motion_mode` if they hold.
    fn enter_motion(&mut self, motion_mode: MotionMode) -> Result<MotionContext, InterpreterErrorKind> {
        let coordinate_mode = self.state.coordinate_mode();
        if !coordinate_mode.is_defined() {
            return Err(InterpreterErrorKind::CoordinateModeUndefined);
        }
        if !motion_mode.is_defined() {
            return Err(InterpreterErrorKind::MotionModeUndefined);
        }
        let coordinate_index = self
            .state
            .coordinate_index()
            .ok_or(InterpreterErrorKind::CoordinateSystemNotSet)?;
        let feed_speed = self
            .state
            .feed_speed()
            .ok_or(InterpreterErrorKind::FeedSpeedNotSet)?;

        self.state.set_motion_mode(motion_mode);
        Ok(MotionContext {
            coordinate_mode,
            motion_mode,
            coordinate_index,
            feed_speed,
        })
    }

    fn drill_command(&mut self, params: DrillParams) -> Result<CommandKind, InterpreterErrorKind> {
        ensure_finite("Drill Depth", params.depth)?;
        if params.depth <= 0.0 {
            return Err(InterpreterErrorKind::out_of_range("Drill Depth", params.depth));
        }

        let hold_time_ms = match params.hold_time_ms {
            Some(hold) => u32::try_from(hold)
                .map_err(|_| InterpreterErrorKind::out_of_range("Drill Holdtime", hold))?,
            None => self.limits.default_drill_hold_time_ms,
        };

        if let Some(speed) = params.spindle_speed {
            ensure_finite("Drill Spindle Speed", speed)?;
        }

        self.state.set_motion_mode(MotionMode::Drill);
        Ok(CommandKind::Drill {
            motion_mode: MotionMode::Drill,
            depth: params.depth,
            hold_time_ms,
            touch: params.touch,
            breakout: params.breakout,
            back: params.back,
            spindle_speed: params.spindle_speed,
        })
    }

    #[track_caller]
    fn dispatch(&mut self, directive: Directive<'_>) -> DirectiveResult<'_> {
        let source = SourceContext::caller(directive.to_string());
        self.execute(directive, source)
    }

    #[track_caller]
    fn dispatch_as(&mut self, directive: Directive<'_>, text: &str) -> DirectiveResult<'_> {
        let source = SourceContext::caller(text);
        self.execute(directive, source)
    }

    /// G90: absolute coordinates
    #[track_caller]
    pub fn absolute_mode(&mut self) -> DirectiveResult<'_> {
        self.dispatch(Directive::AbsoluteMode)
    }

    /// G91: incremental coordinates
    #[track_caller]
    pub fn incremental_mode(&mut self) -> DirectiveResult<'_> {
        self.dispatch(Directive::IncrementalMode)
    }

    /// G04: dwell for `t` (must be finite and >= 0)
    #[track_caller]
    pub fn delay(&mut self, t: f64) -> DirectiveResult<'_> {
        self.dispatch(Directive::Delay(t))
    }

    /// Select electrical parameter `index` (0 <= index < eleparam_count)
    #[track_caller]
    pub fn select_eleparam(&mut self, index: i64) -> DirectiveResult<'_> {
        self.dispatch(Directive::SelectEleparam(index))
    }

    /// Select coordinate system `index`; any non-negative index is accepted
    #[track_caller]
    pub fn select_coordinate_system(&mut self, index: i64) -> DirectiveResult<'_> {
        self.dispatch(Directive::SelectCoordinateSystem(index))
    }

    /// G53: machine coordinate system
    #[track_caller]
    pub fn g53(&mut self) -> DirectiveResult<'_> {
        self.dispatch_as(Directive::SelectCoordinateSystem(53), "g53()")
    }

    /// G54: first work coordinate system
    #[track_caller]
    pub fn g54(&mut self) -> DirectiveResult<'_> {
        self.dispatch_as(Directive::SelectCoordinateSystem(54), "g54()")
    }

    /// G55
    #[track_caller]
    pub fn g55(&mut self) -> DirectiveResult<'_> {
        self.dispatch_as(Directive::SelectCoordinateSystem(55), "g55()")
    }

    /// G56
    #[track_caller]
    pub fn g56(&mut self) -> DirectiveResult<'_> {
        self.dispatch_as(Directive::SelectCoordinateSystem(56), "g56()")
    }

    /// Zero the current position on the selected axes
    #[track_caller]
    pub fn zero_axes(&mut self, axes: AxisFlags) -> DirectiveResult<'_> {
        self.dispatch(Directive::ZeroAxes(axes))
    }

    /// Zero the current position on a single axis
    #[track_caller]
    pub fn zero_axis(&mut self, axis: Axis) -> DirectiveResult<'_> {
        self.dispatch(Directive::ZeroAxes(AxisFlags::only(axis)))
    }

    /// Zero the current position on every axis
    #[track_caller]
    pub fn zero_all_axes(&mut self) -> DirectiveResult<'_> {
        self.dispatch(Directive::ZeroAxes(AxisFlags::all()))
    }

    /// M02: end the program. Later directives are discarded.
    #[track_caller]
    pub fn program_end(&mut self) -> DirectiveResult<'_> {
        self.dispatch(Directive::ProgramEnd)
    }

    /// M00: pause
    #[track_caller]
    pub fn pause(&mut self) -> DirectiveResult<'_> {
        self.dispatch(Directive::Pause)
    }

    /// F: set the feed speed; any positive value is accepted
    #[track_caller]
    pub fn feed_speed(&mut self, speed: i64) -> DirectiveResult<'_> {
        self.dispatch(Directive::FeedSpeed(speed))
    }

    /// G01 to `axes`
    #[track_caller]
    pub fn linear_move(&mut self, axes: Axes) -> DirectiveResult<'_> {
        self.dispatch(Directive::LinearMove(axes))
    }

    /// G00 to `axes` with touch detection active
    #[track_caller]
    pub fn rapid_move(&mut self, axes: Axes) -> DirectiveResult<'_> {
        self.dispatch(Directive::RapidMove(axes, RapidMoveOptions::default()))
    }

    /// G00 to `axes` with explicit touch options
    #[track_caller]
    pub fn rapid_move_with(&mut self, axes: Axes, options: RapidMoveOptions) -> DirectiveResult<'_> {
        self.dispatch(Directive::RapidMove(axes, options))
    }

    /// Consecutive G01 moves through `points`
    ///
    /// The points are copied; later pushes to `points` do not affect the
    /// emitted command.
    #[track_caller]
    pub fn linear_move_group(&mut self, points: &PointList) -> DirectiveResult<'_> {
        self.dispatch(Directive::LinearMoveGroup(points))
    }

    /// Drill cycle
    #[track_caller]
    pub fn drill(&mut self, params: DrillParams) -> DirectiveResult<'_> {
        self.dispatch(Directive::Drill(params))
    }
}

fn ensure_finite(name: &'static str, value: f64) -> Result<(), InterpreterErrorKind> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InterpreterErrorKind::not_numeric(name, value))
    }
}

fn ensure_coordinates(axes: &Axes) -> Result<(), InterpreterErrorKind> {
    match axes.first_non_finite() {
        Some((axis, value)) => Err(InterpreterErrorKind::not_numeric(
            "Coordinate",
            format!("{}={}", axis, value),
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_builder() -> CommandBuilder {
        let mut builder = CommandBuilder::new();
        builder
            .g54()
            .unwrap()
            .absolute_mode()
            .unwrap()
            .feed_speed(1000)
            .unwrap();
        builder
    }

    #[test]
    fn test_empty_builder() {
        let builder = CommandBuilder::new();
        assert!(builder.command_list().is_empty());
        assert_eq!(*builder.state(), MachineState::new());
    }

    #[test]
    fn test_motion_checks_in_order() {
        let mut builder = CommandBuilder::new();
        let err = builder.linear_move(Axes::new().x(1.0)).unwrap_err();
        assert_eq!(err.kind, InterpreterErrorKind::CoordinateModeUndefined);

        builder.incremental_mode().unwrap();
        let err = builder.linear_move(Axes::new().x(1.0)).unwrap_err();
        assert_eq!(err.kind, InterpreterErrorKind::CoordinateSystemNotSet);

        builder.select_coordinate_system(0).unwrap();
        let err = builder.linear_move(Axes::new().x(1.0)).unwrap_err();
        assert_eq!(err.kind, InterpreterErrorKind::FeedSpeedNotSet);

        builder.feed_speed(10).unwrap();
        builder.linear_move(Axes::new().x(1.0)).unwrap();
        assert_eq!(builder.state().motion_mode(), MotionMode::Linear);
    }

    #[test]
    fn test_failed_directive_changes_nothing() {
        let mut builder = CommandBuilder::new();
        builder.g55().unwrap().incremental_mode().unwrap();
        let before = builder.state().clone();
        assert!(builder.rapid_move(Axes::new().x(1.0)).is_err());
        assert_eq!(*builder.state(), before);
        assert_eq!(builder.command_list().len(), 2);
    }

    #[test]
    fn test_rapid_move_records_feed_speed() {
        let mut builder = ready_builder();
        builder.rapid_move(Axes::new().y(2.0)).unwrap();
        match builder.command_list().last().unwrap().kind() {
            CommandKind::RapidMove {
                feed_speed,
                coordinate_index,
                motion_mode,
                ..
            } => {
                assert_eq!(*feed_speed, 1000);
                assert_eq!(*coordinate_index, 54);
                assert_eq!(*motion_mode, MotionMode::Rapid);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_touch_forces_touch_detection() {
        let mut builder = ready_builder();
        let options = RapidMoveOptions::new().ignore_touch_detect(true).touch(true);
        builder.rapid_move_with(Axes::new().a(-5.0), options).unwrap();
        match builder.command_list().last().unwrap().kind() {
            CommandKind::RapidMove {
                ignore_touch_detect,
                touch,
                ..
            } => {
                assert!(!ignore_touch_detect);
                assert!(touch);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_coordinate_rejected() {
        let mut builder = ready_builder();
        let err = builder.linear_move(Axes::new().z(f64::NAN)).unwrap_err();
        assert_eq!(err.kind, InterpreterErrorKind::not_numeric("Coordinate", "z=NaN"));
        assert_eq!(builder.state().motion_mode(), MotionMode::Undefined);
    }

    #[test]
    fn test_drill_uses_limit_default_hold_time() {
        let limits = InterpreterLimits {
            default_drill_hold_time_ms: 250,
            ..InterpreterLimits::default()
        };
        let mut builder = CommandBuilder::with_limits(limits);
        builder.drill(DrillParams::new(0.5)).unwrap();
        match builder.command_list()[0].kind() {
            CommandKind::Drill { hold_time_ms, .. } => assert_eq!(*hold_time_ms, 250),
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(builder.state().motion_mode(), MotionMode::Drill);
    }

    #[test]
    fn test_drill_validation_order() {
        let mut builder = CommandBuilder::new();
        let err = builder
            .drill(DrillParams::new(0.0).hold_time_ms(-1))
            .unwrap_err();
        assert_eq!(err.kind, InterpreterErrorKind::out_of_range("Drill Depth", 0.0));

        let err = builder
            .drill(DrillParams::new(1.0).hold_time_ms(-1))
            .unwrap_err();
        assert_eq!(err.kind, InterpreterErrorKind::out_of_range("Drill Holdtime", -1));

        let err = builder
            .drill(DrillParams::new(1.0).spindle_speed(f64::INFINITY))
            .unwrap_err();
        assert!(err.to_string().starts_with("Drill Spindle Speed Value Not Valid"));
    }

    #[test]
    fn test_eleparam_respects_custom_limit() {
        let limits = InterpreterLimits {
            eleparam_count: 100,
            ..InterpreterLimits::default()
        };
        let mut builder = CommandBuilder::with_limits(limits);
        builder.select_eleparam(99).unwrap();
        assert!(builder.select_eleparam(100).is_err());
    }

    #[test]
    fn test_eleparam_count_never_widened() {
        let limits = InterpreterLimits {
            eleparam_count: 5000,
            ..InterpreterLimits::default()
        };
        let mut builder = CommandBuilder::with_limits(limits);
        assert_eq!(builder.limits().eleparam_count, MAX_ELEPARAM_COUNT);
        builder.select_eleparam(999).unwrap();
        let err = builder.select_eleparam(1500).unwrap_err();
        assert_eq!(err.kind, InterpreterErrorKind::out_of_range("Eleparam Index", 1500));
        assert!(builder.select_eleparam(1000).is_err());
        assert_eq!(builder.command_list().len(), 1);
    }

    #[test]
    fn test_large_index_and_feed_speed_accepted() {
        let mut builder = CommandBuilder::new();
        let big = i64::from(u32::MAX) + 1;
        builder.select_coordinate_system(big).unwrap();
        builder.feed_speed(i64::MAX).unwrap();
        assert_eq!(builder.state().coordinate_index(), Some(big as u64));
        assert_eq!(builder.state().feed_speed(), Some(i64::MAX as u64));
    }

    #[test]
    fn test_delay_rejects_negative_and_nan() {
        let mut builder = CommandBuilder::new();
        assert_eq!(
            builder.delay(-0.1).unwrap_err().kind,
            InterpreterErrorKind::out_of_range("Delay Time", -0.1)
        );
        assert_eq!(
            builder.delay(f64::NAN).unwrap_err().kind,
            InterpreterErrorKind::not_numeric("Delay Time", f64::NAN)
        );
        builder.delay(0.0).unwrap();
        assert_eq!(builder.command_list().len(), 1);
    }

    #[test]
    fn test_alias_call_text() {
        let mut builder = CommandBuilder::new();
        builder.g56().unwrap().zero_axis(Axis::Z).unwrap();
        assert_eq!(builder.command_list()[0].command_str(), "g56()");
        assert_eq!(builder.command_list()[1].command_str(), "zero_axes(z=true)");
        assert_eq!(builder.state().coordinate_index(), Some(56));
    }

    #[test]
    fn test_execute_with_explicit_source() {
        let mut builder = CommandBuilder::new();
        builder
            .execute(Directive::Pause, SourceContext::new(99, "i.m00()"))
            .unwrap();
        let record = &builder.command_list()[0];
        assert_eq!(record.line_number(), 99);
        assert_eq!(record.command_str(), "i.m00()");
    }
}
