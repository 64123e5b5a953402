//! Writing simulation results as comma-separated values.

use crate::simulation::{convergence::ErrorSample, State, Timeline, WienTimeline};
use std::io::{self, Write};

#[cfg(feature = "sweep")]
use crate::simulation::sweep::SweepRecord;

pub const TIMELINE_HEADER: &str = "iterations,time,r_y,r_z,v_y,v_z,a_y,a_z";
pub const DID_EXIT_MARKER: &str = "did exit";
pub const ERROR_TABLE_HEADER: &str = "Dt,err_r,err_v";
pub const SWEEP_HEADER: &str = "particle,dr_y,dv_y,outcome,time,v_y,v_z";

fn write_state_row<W: Write>(writer: &mut W, iteration: usize, state: &State) -> io::Result<()> {
    let position = state.position();
    let velocity = state.velocity();
    let acceleration = state.acceleration();
    writeln!(
        writer,
        "{},{},{},{},{},{},{},{}",
        iteration,
        state.time(),
        position.y(),
        position.z(),
        velocity.y(),
        velocity.z(),
        acceleration.y(),
        acceleration.z()
    )
}

/// Writes a header line followed by one line per state.
pub fn write_timeline<W: Write>(writer: &mut W, timeline: &Timeline) -> io::Result<()> {
    writeln!(writer, "{}", TIMELINE_HEADER)?;
    for (iteration, state) in timeline.iter().enumerate() {
        write_state_row(writer, iteration, state)?;
    }
    writer.flush()
}

/// Writes the transit outcome marker followed by the timeline table.
pub fn write_wien_timeline<W: Write>(
    writer: &mut W,
    wien_timeline: &WienTimeline,
) -> io::Result<()> {
    writeln!(
        writer,
        "{},{}",
        DID_EXIT_MARKER,
        wien_timeline.outcome().label()
    )?;
    write_timeline(writer, wien_timeline.timeline())
}

/// Writes the log step lengths and log errors, one sample per line.
pub fn write_error_samples<W: Write>(writer: &mut W, samples: &[ErrorSample]) -> io::Result<()> {
    writeln!(writer, "{}", ERROR_TABLE_HEADER)?;
    for sample in samples {
        writeln!(
            writer,
            "{},{},{}",
            sample.log_step_length, sample.log_position_error, sample.log_velocity_error
        )?;
    }
    writer.flush()
}

/// Writes the entry offsets and outcome of every particle in a sweep.
#[cfg(feature = "sweep")]
pub fn write_sweep_records<W: Write>(writer: &mut W, records: &[SweepRecord]) -> io::Result<()> {
    writeln!(writer, "{}", SWEEP_HEADER)?;
    for record in records {
        writeln!(
            writer,
            "{},{},{},{},{},{},{}",
            record.particle,
            record.position_offset,
            record.velocity_offset,
            record.outcome.label(),
            record.final_time,
            record.final_velocity.y(),
            record.final_velocity.z()
        )?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::{
        geometry::Vec2,
        physics::WienFilterConfig,
        simulation::{build_timeline, build_wien_timeline, SteppingMethod},
    };

    fn written<F>(write: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buffer = Vec::new();
        write(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn timeline_table_has_header_and_one_row_per_state() {
        let config = WienFilterConfig::default();
        let timeline = build_timeline(&config, SteppingMethod::Euler, 4, 2.0).unwrap();
        let text = written(|buffer| write_timeline(buffer, &timeline));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], TIMELINE_HEADER);
        assert_eq!(lines[1], "0,0,0,0,0,6,-0.3,0");
        assert!(lines[5].starts_with("4,2,"));
        assert!(lines[1..]
            .iter()
            .all(|line| line.split(',').count() == 8));
    }

    #[test]
    fn wien_table_starts_with_exit_marker() {
        let config = WienFilterConfig::default();
        let wien_timeline = build_wien_timeline(
            &config,
            SteppingMethod::Analytic,
            10,
            1.0,
            &Vec2::new(0.0, 5.1),
            &Vec2::zero(),
        )
        .unwrap();
        let text = written(|buffer| write_wien_timeline(buffer, &wien_timeline));
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("did exit,yes"));
        assert_eq!(lines.next(), Some(TIMELINE_HEADER));
        assert_eq!(lines.count(), 2);
    }

    #[test]
    fn error_table_has_three_columns() {
        let samples = vec![ErrorSample {
            resolution: 4,
            log_step_length: -1.5,
            log_position_error: -2.0,
            log_velocity_error: -3.25,
        }];
        let text = written(|buffer| write_error_samples(buffer, &samples));
        assert_eq!(text, "Dt,err_r,err_v\n-1.5,-2,-3.25\n");
    }
}
