use std::process::ExitCode;

use intake_forecasts::services::backlog_plot::write_backlog_chart_png;
use intake_forecasts::services::forecast::forecast_from_yaml_file;
use intake_forecasts::services::forecast_types::{ForecastReport, serialize_report};
use tracing::error;

use crate::commands::base_commands::{Commands, default_chart_path};
use crate::commands::report_format::format_forecast_report;

pub fn forecast_command(cmd: Commands) -> ExitCode {
    let Commands::Forecast {
        input,
        output,
        chart,
        no_chart,
    } = cmd
    else {
        return ExitCode::FAILURE;
    };

    let forecast = match forecast_from_yaml_file(&input) {
        Ok(forecast) => forecast,
        Err(e) => {
            error!("Failed to run forecast: {e}");
            return ExitCode::FAILURE;
        }
    };

    let report = ForecastReport::from_forecast(&forecast, &data_source_name(&input));
    let contents = match serialize_report(&report, &output) {
        Ok(contents) => contents,
        Err(e) => {
            error!("Failed to serialize forecast report: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = std::fs::write(&output, contents) {
        error!("Failed to write forecast report: {e}");
        return ExitCode::FAILURE;
    }

    println!("{}", format_forecast_report(&report));
    println!("Forecast report written to {output}");

    if !no_chart {
        let chart_path = chart.unwrap_or_else(|| default_chart_path(&output));
        match write_backlog_chart_png(&chart_path, &forecast) {
            Ok(()) => println!("Backlog chart written to {chart_path}"),
            Err(e) => {
                error!("Failed to write backlog chart: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

fn data_source_name(path: &str) -> String {
    std::path::Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string()
}
