//! Command line interface for simulating a single transit through the filter.

use super::utils;
use crate::{
    constants, exit_on_error,
    geometry::Vec2,
    io::{csv, OutputFormat},
    physics::WienFilterConfig,
    simulation::{build_wien_timeline, wien::default_velocity_offset},
};
use clap::{Arg, ArgMatches, Command};
use lazy_static::lazy_static;

lazy_static! {
    static ref DEFAULT_STEPS_STR: String = constants::DEFAULT_RESOLUTION.to_string();
}

/// Creates a subcommand for simulating the transit of one particle.
pub fn create_wien_timeline_subcommand(_parent_command_name: &'static str) -> Command<'static> {
    let command = Command::new("wien_timeline")
        .about("Simulate the transit of a particle through the filter")
        .long_about(
            "Simulate the transit of a particle through the filter.\n\
             The particle enters at the origin with the balanced velocity (0, E/B), both\n\
             perturbed by the given offsets. The simulation stops as soon as the particle\n\
             passes the end of the filter or leaves the aperture.",
        )
        .arg(
            Arg::new("steps")
                .long("steps")
                .require_equals(true)
                .value_name("NUMBER")
                .help("Maximum number of time steps, also dividing the duration into the step length")
                .takes_value(true)
                .default_value(DEFAULT_STEPS_STR.as_str()),
        )
        .arg(
            Arg::new("position-offset")
                .long("position-offset")
                .require_equals(true)
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .allow_hyphen_values(true)
                .value_names(&["Y", "Z"])
                .help("Offset of the entry position from the origin [default: 0,0]")
                .takes_value(true)
                .number_of_values(2),
        )
        .arg(
            Arg::new("velocity-offset")
                .long("velocity-offset")
                .require_equals(true)
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .allow_hyphen_values(true)
                .value_names(&["Y", "Z"])
                .help("Offset of the entry velocity from (0, E/B) [default: 0,3E/B]")
                .takes_value(true)
                .number_of_values(2),
        );
    utils::add_duration_argument(utils::add_simulation_arguments(command))
}

/// Runs the actions for the `wien_timeline` subcommand using the given arguments.
pub fn run_wien_timeline_subcommand(arguments: &ArgMatches, config: &WienFilterConfig) {
    let verbosity = utils::parse_verbosity(arguments, false);
    let method = utils::method_from_arguments(arguments);
    let max_steps =
        utils::get_positive_integer_value_from_required_parseable_argument(arguments, "steps");
    let duration = utils::duration_from_arguments(arguments, config);
    let position_offset = utils::parse_2d_float_vector(arguments, "position-offset", Vec2::zero());
    let velocity_offset = utils::parse_2d_float_vector(
        arguments,
        "velocity-offset",
        default_velocity_offset(config),
    );

    if verbosity.print_messages() {
        println!(
            "Simulating transit with position offset {} and velocity offset {} using the {} method",
            position_offset, velocity_offset, method
        );
    }

    let wien_timeline = exit_on_error!(
        build_wien_timeline(
            config,
            method,
            max_steps,
            duration,
            &position_offset,
            &velocity_offset
        ),
        "Error: Could not build timeline: {}"
    );

    if verbosity.print_messages() {
        println!(
            "Particle {} after {} steps",
            wien_timeline.outcome(),
            wien_timeline.timeline().len() - 1
        );
    }

    utils::write_output(
        arguments,
        &format!("wien_{}.csv", method.identifier()),
        &verbosity,
        |writer, output_format| match output_format {
            OutputFormat::Csv => csv::write_wien_timeline(writer, &wien_timeline),
            #[cfg(feature = "json")]
            OutputFormat::Json => crate::io::utils::write_data_as_json(writer, &wien_timeline),
        },
    );
}
