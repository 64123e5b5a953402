//! Command line interface for generating a command line completion script.

use super::build;
use clap::{Arg, ArgMatches, Command};
use clap_complete::{generate, Shell};
use std::io;

/// Creates a subcommand for printing a completion script.
pub fn create_completions_subcommand(_parent_command_name: &'static str) -> Command<'static> {
    Command::new("completions")
        .about("Generate tab-completion script for your shell")
        .hide(true)
        .arg(
            Arg::new("shell")
                .value_name("SHELL")
                .required(true)
                .possible_values(["bash", "zsh", "fish"])
                .help("The shell to generate the script for"),
        )
        .after_help(
            r#"DISCUSSION
    Enable tab completion for Bash, Zsh or Fish.
    The script is output on `stdout`, allowing one to re-direct the
    output to the file of their choosing. Where you place the file
    will depend on which shell, and which operating system you are
    using.

    BASH:

        $ mkdir -p ~/.local/share/bash-completion/completions
        $ wien-filter completions bash >> ~/.local/share/bash-completion/completions/wien-filter

    ZSH:

    Add a directory listed in your `$fpath`, e.g. `fpath+=~/.zfunc` in
    your `.zshrc` before `compinit`, and run

        $ wien-filter completions zsh > ~/.zfunc/_wien-filter

    FISH:

        $ mkdir -p ~/.config/fish/completions
        $ wien-filter completions fish > ~/.config/fish/completions/wien-filter.fish

    You may have to log out and log back in to your shell session for
    the changes to take effect."#,
        )
}

/// Runs the actions for the `completions` subcommand using the given arguments.
pub fn run_completions_subcommand(arguments: &ArgMatches) {
    let shell: Shell = super::utils::get_value_from_required_parseable_argument(arguments, "shell");
    generate(
        shell,
        &mut build::build(),
        clap::crate_name!(),
        &mut io::stdout(),
    );
}
