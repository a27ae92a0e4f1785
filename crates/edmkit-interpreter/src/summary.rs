//! Program statistics over an emitted command list

use crate::command::{CommandKind, CommandRecord};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Counts and totals for one program.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProgramSummary {
    /// Total number of records
    pub total_commands: usize,
    /// Records per `CommandType` name
    pub commands_by_type: BTreeMap<&'static str, usize>,
    /// Rapid, linear, grouped and drill records
    pub motion_commands: usize,
    /// Points across all grouped moves
    pub group_points: usize,
    /// Sum of all delays
    pub total_delay: f64,
    /// Electrical parameter indices in first-use order
    pub eleparams: Vec<u16>,
    /// Coordinate systems in first-use order
    pub coordinate_systems: Vec<u64>,
    /// The last record is a program end
    pub ends_with_program_end: bool,
}

impl ProgramSummary {
    /// Summarize `records`
    pub fn from_records(records: &[CommandRecord]) -> Self {
        let mut summary = Self {
            total_commands: records.len(),
            ..Self::default()
        };

        for record in records {
            let kind = record.kind();
            *summary.commands_by_type.entry(kind.type_name()).or_insert(0) += 1;
            if kind.is_motion() {
                summary.motion_commands += 1;
            }

            match kind {
                CommandKind::LinearMoveGroup { points, .. } => summary.group_points += points.len(),
                CommandKind::Delay { delay_time } => summary.total_delay += delay_time,
                CommandKind::ElectricalParamSelect { index } => {
                    if !summary.eleparams.contains(index) {
                        summary.eleparams.push(*index);
                    }
                }
                CommandKind::CoordinateSystemSelect { index } => {
                    if !summary.coordinate_systems.contains(index) {
                        summary.coordinate_systems.push(*index);
                    }
                }
                _ => {}
            }
        }

        summary.ends_with_program_end =
            matches!(records.last().map(|r| r.kind()), Some(CommandKind::ProgramEnd));
        summary
    }

    /// Number of records of the given `CommandType`
    pub fn count(&self, type_name: &str) -> usize {
        self.commands_by_type.get(type_name).copied().unwrap_or(0)
    }
}

impl fmt::Display for ProgramSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} commands ({} motion, {} grouped points), delay {}",
            self.total_commands, self.motion_commands, self.group_points, self.total_delay
        )?;
        if !self.ends_with_program_end {
            f.write_str(", no program end")?;
        }
        Ok(())
    }
}
