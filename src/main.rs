//! Casalogy Studio - command-line tool for color variants and description previews

use std::process::ExitCode;

use casalogy::cli;

fn main() -> ExitCode {
    cli::run()
}
