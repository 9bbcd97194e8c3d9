mod colors;
mod convert;
mod list;
mod render;
mod run;
mod util;

use clap::{Parser, Subcommand};
use convert::{run_convert, ConvertArgs};
use list::run_list;
use run::{run_run, RunArgs};

#[derive(Parser, Debug)]
#[command(version, about)]
struct CLIParser {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Animate a pattern in the terminal
    Run(RunArgs),
    /// Advance a pattern headlessly and save it, possibly in another format
    Convert(ConvertArgs),
    /// List the built-in patterns
    List,
}

fn main() -> anyhow::Result<()> {
    let args = CLIParser::parse();

    match args.action {
        Action::Run(args) => run_run(args),
        Action::Convert(args) => run_convert(args),
        Action::List => run_list(),
    }
}
