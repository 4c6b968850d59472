use clap::Parser;
use iconsmith::cli::{Cli, Commands};
use iconsmith::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new()
        .with_quiet(cli.quiet)
        .with_verbose(cli.verbose);

    match cli.command {
        Commands::Generate(args) => iconsmith::cli::generate::run(args, &printer)?,
        Commands::Targets(args) => iconsmith::cli::targets::run(args)?,
        Commands::Completions(args) => iconsmith::cli::completions::run(args)?,
    }

    Ok(())
}
