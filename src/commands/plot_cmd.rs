use std::process::ExitCode;

use intake_forecasts::services::backlog_plot::plot_backlog_from_yaml_file;
use tracing::error;

use crate::commands::base_commands::Commands;

pub fn plot_command(cmd: Commands) -> ExitCode {
    if let Commands::Plot { input, output } = cmd {
        match plot_backlog_from_yaml_file(&input, &output) {
            Ok(()) => {
                println!("Backlog chart written to {output}");
                return ExitCode::SUCCESS;
            }
            Err(e) => error!("Failed to plot backlog: {e}"),
        }
    }
    ExitCode::FAILURE
}
