use clap::Parser;
use colored::Colorize;
use vulntally_core::cli::{self, Cli};
use vulntally_core::exit::TallyExit;

fn main() -> TallyExit {
    let cli = Cli::parse();

    let result = if let Some(cmd) = cli.command {
        cli::dispatch::execute(cmd)
    } else {
        use clap::CommandFactory;
        let _ = Cli::command().print_help();
        Ok(TallyExit::Success)
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            TallyExit::Error
        }
    }
}
