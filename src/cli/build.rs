//! Function for building the command line hierarchy.

use super::{
    completions::create_completions_subcommand, errors::create_errors_subcommand,
    physics::add_physics_arguments, timeline::create_timeline_subcommand,
    wien_timeline::create_wien_timeline_subcommand,
};
use clap::{self, Arg, Command};

/// Build the `wien-filter` command line hierarchy.
pub fn build() -> Command<'static> {
    let command_name = "wien-filter";

    let command = Command::new(command_name)
        .version(clap::crate_version!())
        .author(clap::crate_authors!())
        .about(clap::crate_description!())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .disable_help_subcommand(true)
        .arg(
            Arg::new("timing")
                .short('t')
                .long("timing")
                .help("Display elapsed time when done"),
        );

    let command = add_physics_arguments(command)
        .subcommand(create_timeline_subcommand(command_name))
        .subcommand(create_errors_subcommand(command_name))
        .subcommand(create_wien_timeline_subcommand(command_name));

    #[cfg(feature = "sweep")]
    let command = command.subcommand(super::wien_filter::create_wien_filter_subcommand(
        command_name,
    ));

    command.subcommand(create_completions_subcommand(command_name))
}
