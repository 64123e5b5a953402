//! Command line interface for integrating a trajectory over a fixed duration.

use super::utils;
use crate::{
    constants, exit_on_error,
    io::{csv, OutputFormat},
    physics::WienFilterConfig,
    simulation::build_timeline,
};
use clap::{Arg, ArgMatches, Command};
use lazy_static::lazy_static;

lazy_static! {
    static ref DEFAULT_STEPS_STR: String = constants::DEFAULT_RESOLUTION.to_string();
}

/// Creates a subcommand for producing a fixed-duration timeline.
pub fn create_timeline_subcommand(_parent_command_name: &'static str) -> Command<'static> {
    let command = Command::new("timeline")
        .about("Integrate the trajectory of a particle over a fixed duration")
        .long_about(
            "Integrate the trajectory of a particle over a fixed duration.\n\
             The particle starts at the origin with velocity (0, 3E/B), and the state\n\
             after each of the equal time steps is written as a table row.",
        )
        .arg(
            Arg::new("steps")
                .long("steps")
                .require_equals(true)
                .value_name("NUMBER")
                .help("Number of time steps to divide the duration into")
                .takes_value(true)
                .default_value(DEFAULT_STEPS_STR.as_str()),
        );
    utils::add_duration_argument(utils::add_simulation_arguments(command))
}

/// Runs the actions for the `timeline` subcommand using the given arguments.
pub fn run_timeline_subcommand(arguments: &ArgMatches, config: &WienFilterConfig) {
    let verbosity = utils::parse_verbosity(arguments, false);
    let method = utils::method_from_arguments(arguments);
    let n_steps =
        utils::get_positive_integer_value_from_required_parseable_argument(arguments, "steps");
    let duration = utils::duration_from_arguments(arguments, config);

    if verbosity.print_messages() {
        println!(
            "Integrating {} steps over duration {} with the {} method",
            n_steps, duration, method
        );
    }

    let timeline = exit_on_error!(
        build_timeline(config, method, n_steps, duration),
        "Error: Could not build timeline: {}"
    );

    utils::write_output(
        arguments,
        &format!("{}.csv", method.identifier()),
        &verbosity,
        |writer, output_format| match output_format {
            OutputFormat::Csv => csv::write_timeline(writer, &timeline),
            #[cfg(feature = "json")]
            OutputFormat::Json => crate::io::utils::write_data_as_json(writer, &timeline),
        },
    );
}
