use clap::Parser;
use miette::Result;

use helpsrc::cli::{Cli, Commands};
use helpsrc::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Check(args) => helpsrc::cli::check::run(args, &printer)?,
        Commands::Report(args) => helpsrc::cli::report::run(args, &printer)?,
        Commands::Completions(args) => helpsrc::cli::completions::run(args)?,
    }

    Ok(())
}
