//! Function for running the command line program.

use super::{
    build, completions::run_completions_subcommand, errors::run_errors_subcommand,
    physics::construct_wien_filter_config_from_options, timeline::run_timeline_subcommand,
    wien_timeline::run_wien_timeline_subcommand,
};
use clap::ArgMatches;
use std::time::Instant;

/// Runs the `wien-filter` command line program.
pub fn run() {
    run_with_args(build::build().get_matches())
}

/// Runs the `wien-filter` command line program with the given parsed arguments.
pub fn run_with_args(arguments: ArgMatches) {
    let start_instant = Instant::now();

    if let Some(completions_arguments) = arguments.subcommand_matches("completions") {
        run_completions_subcommand(completions_arguments);
        return;
    }

    let config = construct_wien_filter_config_from_options(&arguments);

    if let Some(timeline_arguments) = arguments.subcommand_matches("timeline") {
        run_timeline_subcommand(timeline_arguments, &config);
    }
    if let Some(errors_arguments) = arguments.subcommand_matches("errors") {
        run_errors_subcommand(errors_arguments, &config);
    }
    if let Some(wien_timeline_arguments) = arguments.subcommand_matches("wien_timeline") {
        run_wien_timeline_subcommand(wien_timeline_arguments, &config);
    }

    #[cfg(feature = "sweep")]
    if let Some(wien_filter_arguments) = arguments.subcommand_matches("wien_filter") {
        super::wien_filter::run_wien_filter_subcommand(wien_filter_arguments, &config);
    }

    if arguments.is_present("timing") {
        println!("Elapsed time: {} s", start_instant.elapsed().as_secs_f64());
    }
}
