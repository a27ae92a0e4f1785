//! Touch-then-mill demo program
//!
//! Touches off the electrode on the A axis twice, zeroes A at the contact
//! point, then drills in and mills a small pocket through a grouped move.

use edmkit_core::{Axes, Axis, InterpreterError, InterpreterLimits};
use edmkit_interpreter::{CommandBuilder, PointList, RapidMoveOptions};

/// Number of fine steps at the end of the milling path
pub const FINE_STEPS: usize = 1000;

/// Build the demo program under `limits`
pub fn touch_then_mill(limits: InterpreterLimits) -> Result<CommandBuilder, InterpreterError> {
    let touch = RapidMoveOptions::new().touch(true);
    let lift = RapidMoveOptions::new().ignore_touch_detect(true);

    let mut builder = CommandBuilder::with_limits(limits);
    builder.g55()?.feed_speed(1000)?.incremental_mode()?;

    // first touch, coarse
    builder
        .feed_speed(100)?
        .incremental_mode()?
        .rapid_move_with(Axes::new().a(-100.0), touch)?
        .delay(1.0)?
        .feed_speed(500)?
        .incremental_mode()?
        .rapid_move_with(Axes::new().a(1.0), lift)?
        .delay(1.0)?;

    // second touch, slow
    builder
        .feed_speed(50)?
        .incremental_mode()?
        .rapid_move_with(Axes::new().a(-5.0), touch)?
        .delay(1.0)?
        .zero_axis(Axis::A)?
        .delay(1.0)?;

    builder
        .feed_speed(500)?
        .incremental_mode()?
        .rapid_move_with(Axes::new().a(1.0), lift)?
        .delay(1.0)?;

    let mut points = PointList::new();
    points.absolute_mode();
    points.push(Axes::new().a(-0.2))?;

    points.incremental_mode();
    points
        .push(Axes::new().x(2.0))?
        .push(Axes::new().y(2.0))?
        .push(Axes::new().x(2.0).y(2.0))?;
    for _ in 0..FINE_STEPS {
        points.push(Axes::new().x(0.001))?;
    }

    builder.linear_move_group(&points)?.program_end()?;
    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use edmkit_interpreter::{from_json_str, to_json_string, CommandKind};

    #[test]
    fn test_demo_builds() {
        let builder = touch_then_mill(InterpreterLimits::default()).unwrap();
        let summary = builder.summary();
        assert!(summary.ends_with_program_end);
        assert_eq!(summary.group_points, FINE_STEPS + 4);
        assert_eq!(summary.coordinate_systems, vec![55]);
        assert_eq!(summary.count("CoordSetZeroCommand"), 1);
        assert_eq!(summary.total_delay, 6.0);
    }

    #[test]
    fn test_demo_group_starts_absolute() {
        let builder = touch_then_mill(InterpreterLimits::default()).unwrap();
        let group = builder
            .command_list()
            .iter()
            .find_map(|r| match r.kind() {
                CommandKind::LinearMoveGroup { points, .. } => Some(points.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(group[0].coordinate_mode(), edmkit_core::CoordinateMode::Absolute);
        assert_eq!(group[1].coordinate_mode(), edmkit_core::CoordinateMode::Incremental);
    }

    #[test]
    fn test_demo_json_round_trip() {
        let builder = touch_then_mill(InterpreterLimits::default()).unwrap();
        let json = to_json_string(builder.command_list(), false).unwrap();
        let decoded = from_json_str(&json).unwrap();
        assert_eq!(decoded, builder.command_list());
    }
}
