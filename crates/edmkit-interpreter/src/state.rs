//! Modal machine state tracked while a program is built.

use edmkit_core::{CoordinateMode, MotionMode};

/// Latched machine state
///
/// Pure data: every setter accepts any value. Checking that a directive is
/// legal in the current state is the builder's job.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MachineState {
    coordinate_mode: CoordinateMode,
    motion_mode: MotionMode,
    coordinate_index: Option<u64>,
    feed_speed: Option<u64>,
    program_ended: bool,
}

impl MachineState {
    /// Create the power-on state: every mode undefined, nothing selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Active coordinate mode (G90/G91)
    pub fn coordinate_mode(&self) -> CoordinateMode {
        self.coordinate_mode
    }

    /// Set the coordinate mode
    pub fn set_coordinate_mode(&mut self, mode: CoordinateMode) {
        self.coordinate_mode = mode;
    }

    /// Active motion mode
    pub fn motion_mode(&self) -> MotionMode {
        self.motion_mode
    }

    /// Set the motion mode
    pub fn set_motion_mode(&mut self, mode: MotionMode) {
        self.motion_mode = mode;
    }

    /// Selected coordinate system, `None` until one is selected
    pub fn coordinate_index(&self) -> Option<u64> {
        self.coordinate_index
    }

    /// Select a coordinate system
    pub fn set_coordinate_index(&mut self, index: u64) {
        self.coordinate_index = Some(index);
    }

    /// Current feed speed, `None` until one is set
    pub fn feed_speed(&self) -> Option<u64> {
        self.feed_speed
    }

    /// Set the feed speed
    pub fn set_feed_speed(&mut self, speed: u64) {
        self.feed_speed = Some(speed);
    }

    /// Returns true once the program end has been issued
    pub fn is_program_ended(&self) -> bool {
        self.program_ended
    }

    /// Latch the program end. There is no way to clear it.
    pub fn set_program_ended(&mut self) {
        self.program_ended = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = MachineState::new();
        assert_eq!(state.coordinate_mode(), CoordinateMode::Undefined);
        assert_eq!(state.motion_mode(), MotionMode::Undefined);
        assert_eq!(state.coordinate_index(), None);
        assert_eq!(state.feed_speed(), None);
        assert!(!state.is_program_ended());
    }

    #[test]
    fn test_setters_do_not_validate() {
        let mut state = MachineState::new();
        state.set_coordinate_index(0);
        state.set_feed_speed(0);
        state.set_motion_mode(MotionMode::Drill);
        state.set_coordinate_mode(CoordinateMode::Undefined);
        assert_eq!(state.coordinate_index(), Some(0));
        assert_eq!(state.feed_speed(), Some(0));
        assert_eq!(state.motion_mode(), MotionMode::Drill);
    }

    #[test]
    fn test_program_end_latch() {
        let mut state = MachineState::new();
        state.set_program_ended();
        state.set_program_ended();
        assert!(state.is_program_ended());
    }
}
