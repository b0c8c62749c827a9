mod commands;

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use crate::commands::base_commands::{CliArgs, Commands};
use crate::commands::forecast_cmd::forecast_command;
use crate::commands::plot_cmd::plot_command;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    intake_forecasts::logging::init();

    match args.command {
        cmd @ Commands::Forecast { .. } => forecast_command(cmd),
        cmd @ Commands::Plot { .. } => plot_command(cmd),
        Commands::Completions { shell } => {
            let mut command = CliArgs::command();
            let name = command.get_name().to_string();
            generate(shell, &mut command, name, &mut std::io::stdout());
            ExitCode::SUCCESS
        }
    }
}
