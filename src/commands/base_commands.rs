use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Forecast intake and backlog for a scenario and check the RG deadline
    Forecast {
        /// Scenario YAML file
        #[arg(short, long)]
        input: String,
        /// Output report file (YAML, or JSON with a .json extension)
        #[arg(short, long)]
        output: String,
        /// Output PNG chart, defaults to <output>.png
        #[arg(short, long)]
        chart: Option<String>,
        /// Skip rendering the chart
        #[arg(long, default_value_t = false)]
        no_chart: bool,
    },
    /// Render the backlog chart of a scenario into a PNG file
    Plot {
        /// Scenario YAML file
        #[arg(short, long)]
        input: String,
        /// Output PNG file
        #[arg(short, long)]
        output: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn default_chart_path(output: &str) -> String {
    format!("{output}.png")
}
