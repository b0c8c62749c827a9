pub mod backlog_plot;
pub mod backlog_simulation;
pub mod deadline_evaluation;
pub mod demand_allocation;
pub mod forecast;
pub mod forecast_types;
pub mod scenario_yaml;
pub mod timeline_window;
