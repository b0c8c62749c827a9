use serde::Serialize;
use thiserror::Error;

use crate::domain::year_week::YearWeek;
use crate::services::deadline_evaluation::{ForecastSummary, ResolvedMilestone, Verdict};
use crate::services::forecast::Forecast;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to serialize report as yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to serialize report as json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize, Debug, Clone)]
pub struct TimelineBounds {
    pub first_week: YearWeek,
    pub last_week: YearWeek,
    pub weeks: usize,
    pub start_index: usize,
    pub deadline_index: usize,
}

#[derive(Serialize, Debug, Clone)]
pub struct TruckReport {
    pub id: String,
    pub arrival_index: usize,
    pub departure_index: usize,
    pub center: f64,
    pub spread: f64,
    pub volume: f64,
}

#[derive(Serialize, Debug, Clone)]
pub struct WeekRow {
    pub index: usize,
    pub week: YearWeek,
    pub week_start: Option<String>,
    pub generated: f64,
    pub sent: f64,
    pub backlog: f64,
}

#[derive(Serialize, Debug, Clone)]
pub struct ForecastReport {
    pub data_source: String,
    pub capacity_per_week: f64,
    pub rework_rate: f64,
    pub timeline: TimelineBounds,
    pub verdict: Verdict,
    pub summary: ForecastSummary,
    pub trucks: Vec<TruckReport>,
    pub milestones: Vec<ResolvedMilestone>,
    pub weeks: Vec<WeekRow>,
}

impl ForecastReport {
    pub fn from_forecast(forecast: &Forecast, data_source: &str) -> Self {
        Self {
            data_source: data_source.to_string(),
            capacity_per_week: forecast.run.capacity(),
            rework_rate: forecast.run.rework_rate(),
            timeline: TimelineBounds {
                first_week: forecast.timeline.first(),
                last_week: forecast.timeline.last(),
                weeks: forecast.timeline.len(),
                start_index: forecast.start_index,
                deadline_index: forecast.deadline_index,
            },
            verdict: forecast.verdict,
            summary: forecast.summary.clone(),
            trucks: forecast
                .profile
                .trucks
                .iter()
                .map(|truck| TruckReport {
                    id: truck.id.clone(),
                    arrival_index: truck.arrival_index,
                    departure_index: truck.departure_index,
                    center: truck.center,
                    spread: truck.spread,
                    volume: truck.volume,
                })
                .collect(),
            milestones: forecast.milestones.clone(),
            weeks: forecast
                .rows()
                .map(|(index, week, step)| WeekRow {
                    index,
                    week,
                    week_start: week.monday().map(|date| date.format("%Y-%m-%d").to_string()),
                    generated: step.generated,
                    sent: step.sent,
                    backlog: step.backlog,
                })
                .collect(),
        }
    }
}

/// Serializes the report as JSON when `output_path` ends in `.json`, YAML
/// otherwise.
pub fn serialize_report(report: &ForecastReport, output_path: &str) -> Result<String, ReportError> {
    if output_path.ends_with(".json") {
        Ok(serde_json::to_string_pretty(report)?)
    } else {
        Ok(serde_yaml::to_string(report)?)
    }
}
