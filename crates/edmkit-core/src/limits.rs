//! Machine-side limits the command builder validates against.

use serde::{Deserialize, Serialize};

/// Size of the machine's electrical parameter table.
pub const MAX_ELEPARAM_COUNT: u16 = 1000;

/// Default dwell at the bottom of a drill cycle, in milliseconds.
pub const DEFAULT_DRILL_HOLD_TIME_MS: u32 = 1000;

/// Limits applied by the command builder
///
/// The defaults match the controller firmware; a configuration may only
/// narrow them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterLimits {
    /// Number of electrical parameter slots; valid indices are `0..eleparam_count`
    pub eleparam_count: u16,
    /// Hold time used by drill cycles that do not specify one
    pub default_drill_hold_time_ms: u32,
}

impl Default for InterpreterLimits {
    fn default() -> Self {
        Self {
            eleparam_count: MAX_ELEPARAM_COUNT,
            default_drill_hold_time_ms: DEFAULT_DRILL_HOLD_TIME_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let limits = InterpreterLimits::default();
        assert_eq!(limits.eleparam_count, 1000);
        assert_eq!(limits.default_drill_hold_time_ms, 1000);
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let limits: InterpreterLimits = serde_json::from_str(r#"{"eleparam_count": 200}"#).unwrap();
        assert_eq!(limits.eleparam_count, 200);
        assert_eq!(limits.default_drill_hold_time_ms, DEFAULT_DRILL_HOLD_TIME_MS);
    }
}
