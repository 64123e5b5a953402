//! Command line interface for sweeping randomly perturbed particles through the filter.

use super::utils;
use crate::{
    constants, exit_on_error, exit_on_false,
    io::{csv, OutputFormat},
    physics::WienFilterConfig,
    simulation::{
        fsm,
        sweep::{sweep_wien_filter, OffsetDistribution, WienFilterSweepConfig},
        TransitOutcome,
    },
};
use clap::{Arg, ArgMatches, Command};
use lazy_static::lazy_static;
use rand::{rngs::StdRng, SeedableRng};

lazy_static! {
    static ref DEFAULT_STEPS_STR: String = constants::DEFAULT_RESOLUTION.to_string();
    static ref DEFAULT_PARTICLES_STR: String =
        WienFilterSweepConfig::DEFAULT_PARTICLES.to_string();
    static ref DEFAULT_MAX_VELOCITY_OFFSET_STR: String =
        WienFilterSweepConfig::DEFAULT_MAX_VELOCITY_OFFSET.to_string();
}

/// Creates a subcommand for sweeping particles through the filter.
pub fn create_wien_filter_subcommand(_parent_command_name: &'static str) -> Command<'static> {
    let command = Command::new("wien_filter")
        .about("Send particles with random transverse offsets through the filter")
        .long_about(
            "Send particles with random transverse offsets through the filter.\n\
             Each particle enters with a transverse position offset and a transverse\n\
             velocity offset drawn from zero up to the given maxima, and is simulated\n\
             independently. Offsets are uniform by default, or max/k for a random\n\
             integer k with the reciprocal distribution. One table row is written\n\
             per particle.",
        )
        .arg(
            Arg::new("steps")
                .long("steps")
                .require_equals(true)
                .value_name("NUMBER")
                .help("Maximum number of time steps for each particle")
                .takes_value(true)
                .default_value(DEFAULT_STEPS_STR.as_str()),
        )
        .arg(
            Arg::new("particles")
                .long("particles")
                .require_equals(true)
                .value_name("NUMBER")
                .help("Number of particles to send through the filter")
                .takes_value(true)
                .default_value(DEFAULT_PARTICLES_STR.as_str()),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .require_equals(true)
                .value_name("NUMBER")
                .help("Seed for the random number generator [default: random]")
                .takes_value(true),
        )
        .arg(
            Arg::new("max-position-offset")
                .long("max-position-offset")
                .require_equals(true)
                .value_name("VALUE")
                .help("Upper bound of the transverse position offsets [default: aperture radius]")
                .takes_value(true),
        )
        .arg(
            Arg::new("max-velocity-offset")
                .long("max-velocity-offset")
                .require_equals(true)
                .value_name("VALUE")
                .help("Upper bound of the transverse velocity offsets")
                .takes_value(true)
                .default_value(DEFAULT_MAX_VELOCITY_OFFSET_STR.as_str()),
        )
        .arg(
            Arg::new("offset-distribution")
                .long("offset-distribution")
                .require_equals(true)
                .value_name("NAME")
                .help("How offsets are drawn between zero and their maxima")
                .takes_value(true)
                .possible_values(["uniform", "reciprocal"])
                .default_value("uniform"),
        )
        .arg(
            Arg::new("progress")
                .short('p')
                .long("progress")
                .help("Show progress bar (also implies `verbose`)"),
        );
    utils::add_duration_argument(utils::add_simulation_arguments(command))
}

fn get_non_negative_value(arguments: &ArgMatches, argument_name: &str, default_value: fsm) -> fsm {
    let value = utils::get_finite_float_value_from_parseable_argument_with_default(
        arguments,
        argument_name,
        default_value,
    );
    exit_on_false!(
        value >= 0.0,
        "Error: {} can not be negative",
        argument_name
    );
    value
}

/// Determines sweep parameters based on provided options.
pub fn construct_wien_filter_sweep_config_from_options(
    arguments: &ArgMatches,
    config: &WienFilterConfig,
) -> WienFilterSweepConfig {
    let defaults = WienFilterSweepConfig::for_filter(config);
    let particles: usize =
        utils::get_value_from_required_parseable_argument(arguments, "particles");
    let max_position_offset = get_non_negative_value(
        arguments,
        "max-position-offset",
        defaults.max_position_offset,
    );
    let max_velocity_offset = get_non_negative_value(
        arguments,
        "max-velocity-offset",
        defaults.max_velocity_offset,
    );
    let offset_distribution = match arguments
        .value_of("offset-distribution")
        .expect("No value for argument with default")
    {
        "reciprocal" => OffsetDistribution::Reciprocal,
        _ => OffsetDistribution::Uniform,
    };
    WienFilterSweepConfig {
        particles,
        max_position_offset,
        max_velocity_offset,
        offset_distribution,
    }
}

/// Runs the actions for the `wien_filter` subcommand using the given arguments.
pub fn run_wien_filter_subcommand(arguments: &ArgMatches, config: &WienFilterConfig) {
    let verbosity = utils::parse_verbosity(arguments, true);
    let method = utils::method_from_arguments(arguments);
    let max_steps =
        utils::get_positive_integer_value_from_required_parseable_argument(arguments, "steps");
    let duration = utils::duration_from_arguments(arguments, config);
    let sweep_config = construct_wien_filter_sweep_config_from_options(arguments, config);

    let mut rng = if arguments.is_present("seed") {
        StdRng::seed_from_u64(utils::get_value_from_required_parseable_argument(
            arguments, "seed",
        ))
    } else {
        StdRng::from_entropy()
    };

    if verbosity.print_messages() {
        println!(
            "Sending {} particles through the filter using the {} method",
            sweep_config.particles, method
        );
    }

    let records = exit_on_error!(
        sweep_wien_filter(
            config,
            method,
            max_steps,
            duration,
            &sweep_config,
            &mut rng,
            &verbosity
        ),
        "Error: Could not perform sweep: {}"
    );

    if verbosity.print_messages() {
        let n_exited = records
            .iter()
            .filter(|record| record.outcome == TransitOutcome::Exited)
            .count();
        println!("{} of {} particles exited the filter", n_exited, records.len());
    }

    utils::write_output(
        arguments,
        &format!("wien_filter_{}.csv", method.identifier()),
        &verbosity,
        |writer, output_format| match output_format {
            OutputFormat::Csv => csv::write_sweep_records(writer, &records),
            #[cfg(feature = "json")]
            OutputFormat::Json => crate::io::utils::write_data_as_json(writer, &records),
        },
    );
}
