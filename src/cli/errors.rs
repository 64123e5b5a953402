//! Command line interface for measuring discretization errors.

use super::utils;
use crate::{
    constants, exit_on_error, exit_on_false,
    io::{csv, OutputFormat},
    physics::WienFilterConfig,
    simulation::convergence::{estimate_convergence_orders, sample_errors},
};
use clap::{Arg, ArgMatches, Command};
use lazy_static::lazy_static;

lazy_static! {
    static ref DEFAULT_MAX_RESOLUTION_STR: String =
        constants::DEFAULT_MAX_ERROR_RESOLUTION.to_string();
    static ref DEFAULT_SAMPLES_STR: String = constants::DEFAULT_ERROR_SAMPLE_COUNT.to_string();
}

/// Creates a subcommand for sampling final-time errors at increasing resolution.
pub fn create_errors_subcommand(_parent_command_name: &'static str) -> Command<'static> {
    let command = Command::new("errors")
        .about("Measure how the final-time error depends on the step length")
        .long_about(
            "Measure how the final-time error depends on the step length.\n\
             Timelines are built at resolutions that are multiples of\n\
             max-resolution/samples, and the natural logarithms of the step length and\n\
             of the position and velocity errors relative to the analytic solution are\n\
             written as table rows.",
        )
        .arg(
            Arg::new("max-resolution")
                .long("max-resolution")
                .require_equals(true)
                .value_name("NUMBER")
                .help("Largest number of steps to divide the duration into")
                .takes_value(true)
                .default_value(DEFAULT_MAX_RESOLUTION_STR.as_str()),
        )
        .arg(
            Arg::new("samples")
                .long("samples")
                .require_equals(true)
                .value_name("NUMBER")
                .help("Number of resolutions to sample")
                .takes_value(true)
                .default_value(DEFAULT_SAMPLES_STR.as_str()),
        )
        .arg(
            Arg::new("progress")
                .short('p')
                .long("progress")
                .help("Show progress bar (also implies `verbose`)"),
        );
    utils::add_duration_argument(utils::add_simulation_arguments(command))
}

/// Runs the actions for the `errors` subcommand using the given arguments.
pub fn run_errors_subcommand(arguments: &ArgMatches, config: &WienFilterConfig) {
    let verbosity = utils::parse_verbosity(arguments, true);
    let method = utils::method_from_arguments(arguments);
    let max_resolution = utils::get_positive_integer_value_from_required_parseable_argument(
        arguments,
        "max-resolution",
    );
    let n_samples =
        utils::get_positive_integer_value_from_required_parseable_argument(arguments, "samples");
    exit_on_false!(
        n_samples <= max_resolution,
        "Error: samples can not exceed max-resolution"
    );
    let duration = utils::duration_from_arguments(arguments, config);

    if verbosity.print_messages() {
        println!(
            "Sampling errors of the {} method at {} resolutions up to {}",
            method, n_samples, max_resolution
        );
    }

    let samples = exit_on_error!(
        sample_errors(
            config,
            method,
            duration,
            max_resolution,
            n_samples,
            &verbosity
        ),
        "Error: Could not sample errors: {}"
    );

    if verbosity.print_messages() {
        match estimate_convergence_orders(&samples) {
            Some(orders) => println!(
                "Estimated order of convergence: {:.2} for position, {:.2} for velocity",
                orders.position, orders.velocity
            ),
            None => println!("Too few non-zero errors to estimate the order of convergence"),
        }
    }

    utils::write_output(
        arguments,
        &format!("{}_errors.csv", method.identifier()),
        &verbosity,
        |writer, output_format| match output_format {
            OutputFormat::Csv => csv::write_error_samples(writer, &samples),
            #[cfg(feature = "json")]
            OutputFormat::Json => crate::io::utils::write_data_as_json(writer, &samples),
        },
    );
}
