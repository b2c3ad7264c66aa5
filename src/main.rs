use clap::Parser;
use stockguess::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
