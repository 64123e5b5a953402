//! Utilities for creating the command line interface.

use crate::{
    exit_on_error, exit_on_false, exit_on_none, exit_with_error,
    geometry::{Dim2, In2D, Vec2},
    io::{utils::AtomicOutputPath, OutputFormat, OverwriteMode, Verbosity},
    num::BFloat,
    physics::WienFilterConfig,
    simulation::{fsm, select_stepping_method, SteppingMethod},
};
use clap::{Arg, ArgMatches, Command};
use std::{
    fs,
    io::{self, BufWriter, Write},
    path::PathBuf,
    str::FromStr,
};

pub fn parse_value_string<T>(argument_name: &str, value_string: &str) -> T
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    exit_on_error!(
        value_string.parse(),
        "Error: Could not parse value for {0}: {1}",
        argument_name
    )
}

fn verify_finite_float_value<F: BFloat>(argument_name: &str, value: F) {
    exit_on_false!(value.is_finite(), "Error: {} must be finite", argument_name);
}

fn verify_argument_value_count<T>(argument_name: &str, values: &[T], required_count: usize) {
    let count = values.len();
    exit_on_false!(
        count == required_count,
        "Error: {} must have {} values, got {}",
        argument_name,
        required_count,
        count
    );
}

pub fn get_value_from_required_parseable_argument<T>(
    arguments: &ArgMatches,
    argument_name: &str,
) -> T
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    parse_value_string(
        argument_name,
        arguments
            .value_of(argument_name)
            .expect("No value for required argument"),
    )
}

pub fn get_value_from_parseable_argument_with_custom_default<T, D>(
    arguments: &ArgMatches,
    argument_name: &str,
    default_constructor: &D,
) -> T
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
    D: Fn() -> T,
{
    if let Some(value_string) = arguments.value_of(argument_name) {
        parse_value_string(argument_name, value_string)
    } else {
        default_constructor()
    }
}

pub fn get_finite_float_value_from_parseable_argument_with_default<F>(
    arguments: &ArgMatches,
    argument_name: &str,
    default_value: F,
) -> F
where
    F: BFloat + FromStr,
    <F as FromStr>::Err: std::fmt::Display,
{
    let value =
        get_value_from_parseable_argument_with_custom_default(arguments, argument_name, &|| {
            default_value
        });
    verify_finite_float_value(argument_name, value);
    value
}

pub fn get_positive_integer_value_from_required_parseable_argument(
    arguments: &ArgMatches,
    argument_name: &str,
) -> usize {
    let value: usize = get_value_from_required_parseable_argument(arguments, argument_name);
    exit_on_false!(
        value > 0,
        "Error: {} must be larger than zero",
        argument_name
    );
    value
}

pub fn parse_2d_values<T>(
    arguments: &ArgMatches,
    argument_name: &str,
    default_values: Option<In2D<T>>,
) -> In2D<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    let value_strings: Vec<_> = match arguments.values_of(argument_name) {
        Some(value_strings) => value_strings.collect(),
        None => {
            return default_values.unwrap_or_else(|| {
                exit_with_error!("Error: No values for {}", argument_name)
            })
        }
    };

    verify_argument_value_count(argument_name, &value_strings, 2);

    In2D::with_each_component(|dim| parse_value_string(argument_name, value_strings[dim.num()]))
}

pub fn parse_2d_float_vector(
    arguments: &ArgMatches,
    argument_name: &str,
    default_vector: Vec2<fsm>,
) -> Vec2<fsm> {
    let values = parse_2d_values(
        arguments,
        argument_name,
        Some(In2D::new(default_vector.y(), default_vector.z())),
    );
    for dim in Dim2::slice() {
        verify_finite_float_value(argument_name, values[dim]);
    }
    let (y, z) = values.to_tuple();
    Vec2::new(y, z)
}

pub fn overwrite_mode_from_arguments(arguments: &ArgMatches) -> OverwriteMode {
    if arguments.is_present("overwrite") {
        OverwriteMode::Always
    } else if arguments.is_present("no-overwrite") {
        OverwriteMode::Never
    } else {
        OverwriteMode::Ask
    }
}

pub fn parse_verbosity(arguments: &ArgMatches, support_progress: bool) -> Verbosity {
    if support_progress && arguments.is_present("progress") {
        Verbosity::with_progress()
    } else if arguments.is_present("verbose") {
        Verbosity::Messages
    } else {
        Verbosity::Quiet
    }
}

/// Adds the stepping method and output file arguments shared by all simulation subcommands.
pub fn add_simulation_arguments(command: Command<'static>) -> Command<'static> {
    command
        .arg(
            Arg::new("method")
                .value_name("METHOD")
                .help("Stepping method to integrate the equations of motion with")
                .required(true)
                .takes_value(true)
                .possible_values(["analytic", "euler", "midpoint", "runge_kutta"]),
        )
        .arg(
            Arg::new("output-file")
                .value_name("OUTPUT_FILE")
                .help(
                    "Path of the output file to produce (.csv or .json)\n \
                     [default: name derived from the method, in the working directory]",
                )
                .takes_value(true),
        )
        .arg(
            Arg::new("overwrite")
                .long("overwrite")
                .help("Automatically overwrite any existing files"),
        )
        .arg(
            Arg::new("no-overwrite")
                .long("no-overwrite")
                .help("Do not overwrite any existing files")
                .conflicts_with("overwrite"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print status messages related to the simulation"),
        )
}

/// Adds an argument for the duration of the simulation.
pub fn add_duration_argument(command: Command<'static>) -> Command<'static> {
    command.arg(
        Arg::new("duration")
            .long("duration")
            .require_equals(true)
            .value_name("VALUE")
            .help("Total simulated time [default: one cyclotron period]")
            .takes_value(true),
    )
}

/// Determines the stepping method from the `method` argument.
pub fn method_from_arguments(arguments: &ArgMatches) -> SteppingMethod {
    exit_on_error!(
        select_stepping_method(
            arguments
                .value_of("method")
                .expect("No value for required argument")
        ),
        "Error: Invalid stepping method: {}"
    )
}

/// Determines the simulated duration from the `duration` argument, defaulting
/// to one cyclotron period.
pub fn duration_from_arguments(arguments: &ArgMatches, config: &WienFilterConfig) -> fsm {
    let duration: fsm = if arguments.is_present("duration") {
        get_value_from_required_parseable_argument(arguments, "duration")
    } else {
        exit_on_none!(
            config.cyclotron_period(),
            "Error: The particle does not gyrate, so a duration must be specified"
        )
    };
    exit_on_false!(
        duration.is_finite() && duration > 0.0,
        "Error: duration must be finite and larger than zero"
    );
    duration
}

/// Determines the output file path from the `output-file` argument, or uses
/// the given default file name.
pub fn output_file_path_from_arguments(arguments: &ArgMatches, default_file_name: &str) -> PathBuf {
    match arguments.value_of("output-file") {
        Some(output_file_path) => exit_on_error!(
            PathBuf::from_str(output_file_path),
            "Error: Could not interpret path to output file: {}"
        ),
        None => PathBuf::from(default_file_name),
    }
}

/// Writes output to the path given by the `output-file` argument (or the default
/// file name) through a temporary file.
///
/// The given writer is called with the buffered temporary file and the output
/// format determined from the file extension.
pub fn write_output<W>(
    arguments: &ArgMatches,
    default_file_name: &str,
    verbosity: &Verbosity,
    write: W,
) where
    W: FnOnce(&mut BufWriter<&mut fs::File>, OutputFormat) -> io::Result<()>,
{
    let output_file_path = output_file_path_from_arguments(arguments, default_file_name);
    let output_format = OutputFormat::from_path(&output_file_path);
    let overwrite_mode = overwrite_mode_from_arguments(arguments);

    let mut atomic_output_path = exit_on_error!(
        AtomicOutputPath::new(output_file_path),
        "Error: Could not create temporary output file: {}"
    );

    if atomic_output_path.write_should_be_skipped(overwrite_mode) {
        return;
    }

    if verbosity.print_messages() {
        println!("Writing {}", atomic_output_path.target_file_name());
    }

    {
        let mut writer = atomic_output_path.writer();
        exit_on_error!(
            write(&mut writer, output_format).and_then(|_| writer.flush()),
            "Error: Could not write output data: {}"
        );
    }

    exit_on_error!(
        atomic_output_path.perform_replace(),
        "Error: Could not move temporary output file to target path: {}"
    );
}
