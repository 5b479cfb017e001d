use clap::Parser;
use colored::Colorize;

fn main() {
    let cli = gitswap::cli::Cli::parse();

    if let Err(err) = gitswap::logs::init_logger(cli.verbose) {
        eprintln!("{}", err.to_string().yellow());
    }

    if let Err(err) = gitswap::run(cli) {
        eprintln!("{} {}", "error:".red(), err);
        std::process::exit(1);
    }
}
