//! Command line options for the physical configuration of the filter.

use super::utils;
use crate::{exit_on_false, physics::WienFilterConfig, simulation::fsm};
use clap::{Arg, ArgMatches, Command};

/// Adds arguments for overriding the fields, particle properties and filter geometry.
pub fn add_physics_arguments(command: Command<'static>) -> Command<'static> {
    command
        .arg(
            Arg::new("electric-field")
                .long("electric-field")
                .require_equals(true)
                .allow_hyphen_values(true)
                .value_name("VALUE")
                .help("Strength of the electric field along y")
                .next_line_help(true)
                .takes_value(true),
        )
        .arg(
            Arg::new("magnetic-field")
                .long("magnetic-field")
                .require_equals(true)
                .allow_hyphen_values(true)
                .value_name("VALUE")
                .help("Strength of the magnetic field perpendicular to the y-z plane")
                .next_line_help(true)
                .takes_value(true),
        )
        .arg(
            Arg::new("charge")
                .long("charge")
                .require_equals(true)
                .allow_hyphen_values(true)
                .value_name("VALUE")
                .help("Charge of the particle")
                .next_line_help(true)
                .takes_value(true),
        )
        .arg(
            Arg::new("mass")
                .long("mass")
                .require_equals(true)
                .value_name("VALUE")
                .help("Mass of the particle")
                .next_line_help(true)
                .takes_value(true),
        )
        .arg(
            Arg::new("filter-length")
                .long("filter-length")
                .require_equals(true)
                .value_name("VALUE")
                .help("Length of the filter along z")
                .next_line_help(true)
                .takes_value(true),
        )
        .arg(
            Arg::new("aperture-radius")
                .long("aperture-radius")
                .require_equals(true)
                .value_name("VALUE")
                .help("Transverse position beyond which the particle is absorbed")
                .next_line_help(true)
                .takes_value(true),
        )
}

fn get_positive_value(arguments: &ArgMatches, argument_name: &str, default_value: fsm) -> fsm {
    let value = utils::get_finite_float_value_from_parseable_argument_with_default(
        arguments,
        argument_name,
        default_value,
    );
    exit_on_false!(
        value > 0.0,
        "Error: {} must be larger than zero",
        argument_name
    );
    value
}

/// Determines the filter configuration based on provided options.
pub fn construct_wien_filter_config_from_options(arguments: &ArgMatches) -> WienFilterConfig {
    let electric_field = utils::get_finite_float_value_from_parseable_argument_with_default(
        arguments,
        "electric-field",
        WienFilterConfig::DEFAULT_ELECTRIC_FIELD,
    );
    let magnetic_field = utils::get_finite_float_value_from_parseable_argument_with_default(
        arguments,
        "magnetic-field",
        WienFilterConfig::DEFAULT_MAGNETIC_FIELD,
    );
    exit_on_false!(
        magnetic_field != 0.0,
        "Error: magnetic-field must be non-zero"
    );
    let charge = utils::get_finite_float_value_from_parseable_argument_with_default(
        arguments,
        "charge",
        WienFilterConfig::DEFAULT_CHARGE,
    );
    let mass = get_positive_value(arguments, "mass", WienFilterConfig::DEFAULT_MASS);
    let filter_length = get_positive_value(
        arguments,
        "filter-length",
        WienFilterConfig::DEFAULT_FILTER_LENGTH,
    );
    let aperture_radius = get_positive_value(
        arguments,
        "aperture-radius",
        WienFilterConfig::DEFAULT_APERTURE_RADIUS,
    );

    let config = WienFilterConfig {
        electric_field,
        magnetic_field,
        charge,
        mass,
        filter_length,
        aperture_radius,
    };
    config.validate();
    config
}
