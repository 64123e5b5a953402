mod common;

use common::{parse_row, read_lines, run};

const TIMELINE_HEADER: &str = "iterations,time,r_y,r_z,v_y,v_z,a_y,a_z";

def_test!(
OUT[output = "runge_kutta.csv"]
fn timeline_has_one_row_per_step {
    run(["timeline", "runge_kutta", output, "--steps=50", "--overwrite"]);
    let lines = read_lines(output);
    assert_eq!(lines.len(), 52);
    assert_eq!(lines[0], TIMELINE_HEADER);
    assert_eq!(parse_row(&lines[1]), vec![0.0, 0.0, 0.0, 0.0, 0.0, 6.0, -0.3, 0.0]);
    assert_eq!(parse_row(&lines[51])[0], 50.0);
});

def_test!(
OUT[output = "euler.csv"]
fn physics_options_override_defaults {
    run([
        "--charge=0",
        "timeline",
        "euler",
        output,
        "--steps=4",
        "--duration=2",
        "--overwrite",
    ]);
    let lines = read_lines(output);
    assert_eq!(lines.len(), 6);
    let last = parse_row(&lines[5]);
    assert_eq!(last[0], 4.0);
    assert_eq!(last[1], 2.0);
    assert_eq!(&last[2..6], &[0.0, 12.0, 0.0, 6.0]);
    assert!(last[6..].iter().all(|&acceleration| acceleration == 0.0));
});

def_test!(
OUT[output = "wien_analytic.csv"]
fn default_wien_transit_exits_after_four_steps {
    run(["wien_timeline", "analytic", output, "--overwrite"]);
    let lines = read_lines(output);
    assert_eq!(lines[0], "did exit,yes");
    assert_eq!(lines[1], TIMELINE_HEADER);
    assert_eq!(lines.len(), 7);
    assert!(parse_row(&lines[5])[3] <= 5.0);
    assert!(parse_row(&lines[6])[3] > 5.0);
});

def_test!(
OUT[output = "wien_midpoint.csv"]
fn transverse_kick_is_absorbed {
    run([
        "wien_timeline",
        "midpoint",
        output,
        "--velocity-offset=1,0",
        "--overwrite",
    ]);
    let lines = read_lines(output);
    assert_eq!(lines[0], "did exit,no");
    assert_eq!(lines.len(), 4);
});

def_test!(
OUT[output = "wien_euler.csv"]
fn balanced_particle_runs_out_of_steps {
    run([
        "wien_timeline",
        "euler",
        output,
        "--velocity-offset=0,0",
        "--position-offset=-0.01,0",
        "--steps=10",
        "--duration=1",
        "--overwrite",
    ]);
    let lines = read_lines(output);
    assert_eq!(lines[0], "did exit,in transit");
    assert_eq!(lines.len(), 13);
});

def_test!(
OUT[output = "midpoint_errors.csv"]
fn error_table_has_one_row_per_sample {
    run([
        "errors",
        "midpoint",
        output,
        "--max-resolution=200",
        "--samples=10",
        "--overwrite",
    ]);
    let lines = read_lines(output);
    assert_eq!(lines.len(), 11);
    assert_eq!(lines[0], "Dt,err_r,err_v");
    let rows: Vec<_> = lines[1..].iter().map(|line| parse_row(line)).collect();
    assert!(rows.windows(2).all(|pair| pair[1][0] < pair[0][0]));
    assert!(rows.windows(2).all(|pair| pair[1][1] < pair[0][1]));
});

#[cfg(feature = "sweep")]
def_test!(
OUT[first = "first.csv", second = "second.csv"]
fn seeded_sweeps_are_identical {
    for output in [first, second] {
        run([
            "wien_filter",
            "runge_kutta",
            output,
            "--particles=20",
            "--seed=12345",
            "--overwrite",
        ]);
    }
    common::assert_files_identical(first, second);
    let lines = read_lines(first);
    assert_eq!(lines.len(), 21);
    assert_eq!(lines[0], "particle,dr_y,dv_y,outcome,time,v_y,v_z");
});

#[cfg(feature = "sweep")]
def_test!(
OUT[output = "reciprocal.csv"]
fn reciprocal_sweep_offsets_divide_the_maximum {
    run([
        "wien_filter",
        "analytic",
        output,
        "--particles=30",
        "--seed=9",
        "--max-velocity-offset=12",
        "--offset-distribution=reciprocal",
        "--overwrite",
    ]);
    let lines = read_lines(output);
    assert_eq!(lines.len(), 31);
    for line in &lines[1..] {
        let velocity_offset: f64 = line.split(',').nth(2).unwrap().parse().unwrap();
        assert!((0.0..=12.0).contains(&velocity_offset));
        if velocity_offset > 0.0 {
            let divisor = 12.0 / velocity_offset;
            assert!((divisor - divisor.round()).abs() < 1e-9);
        }
    }
});

#[cfg(feature = "json")]
def_test!(
OUT[output = "analytic.json"]
fn json_output_is_selected_by_extension {
    run(["timeline", "analytic", output, "--steps=3", "--overwrite"]);
    let text = std::fs::read_to_string(output).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["states"].as_array().unwrap().len(), 4);
});

def_test!(
OUT[output = "nested/dir/euler.csv"]
fn missing_output_directories_are_created {
    run(["timeline", "euler", output, "--steps=2", "--overwrite"]);
    common::assert_file_exists(output);
});

#[test]
fn invalid_methods_are_rejected() {
    assert!(common::arguments_are_rejected(["timeline", "none"]));
    assert!(common::arguments_are_rejected(["timeline", "leapfrog"]));
    assert!(common::arguments_are_rejected(["timeline"]));
}
