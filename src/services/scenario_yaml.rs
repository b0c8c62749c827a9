use std::io;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::milestone::{Milestone, MilestoneKind};
use crate::domain::scenario::{
    DEFAULT_BUFFER_WEEKS, DEFAULT_MIN_WEEKS, DEFAULT_REFERENCE_WEEK, Scenario, WindowConfig,
};
use crate::domain::truck::Truck;
use crate::domain::year_week::YearWeek;

const DEFAULT_PRE_WORK_PCT: f64 = 0.10;
const DEFAULT_POST_WORK_PCT: f64 = 0.10;
const DEFAULT_SE_COUNT: u32 = 3;
const DEFAULT_IH_PER_SE: f64 = 5.0;
const DEFAULT_TRUCK_WEIGHT: f64 = 100.0;

#[derive(Error, Debug)]
pub enum ScenarioYamlError {
    #[error("failed to read scenario yaml: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse scenario yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("week {0} is not a YYWW value")]
    InvalidWeek(u32),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioRecord {
    total_scope: f64,
    work_start: u32,
    deadline: u32,
    pre_work_pct: Option<f64>,
    post_work_pct: Option<f64>,
    se_count: Option<u32>,
    ih_per_se: Option<f64>,
    rework_rate: Option<f64>,
    trucks: Vec<TruckRecord>,
    milestones: Option<MilestonesRecord>,
    window: Option<WindowRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TruckRecord {
    id: Option<String>,
    arrival: u32,
    departure: u32,
    weight: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MilestonesRecord {
    fdg: Option<u32>,
    c_build: Option<u32>,
    fig: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WindowRecord {
    buffer_weeks: Option<u32>,
    min_weeks: Option<u32>,
    reference_week: Option<u32>,
    truck_date_fallback: Option<bool>,
}

pub fn load_scenario_from_yaml_file(path: &str) -> Result<Scenario, ScenarioYamlError> {
    let contents = std::fs::read_to_string(path)?;
    deserialize_scenario_from_yaml_str(&contents)
}

/// Parses a scenario. Only the YAML shape and the `YYWW` form of the weeks
/// are checked here; the numbers are checked by [`Scenario::validate`].
pub fn deserialize_scenario_from_yaml_str(input: &str) -> Result<Scenario, ScenarioYamlError> {
    let record: ScenarioRecord = serde_yaml::from_str(input)?;

    let trucks = record
        .trucks
        .into_iter()
        .enumerate()
        .map(|(position, truck)| truck_from_record(position, truck))
        .collect::<Result<Vec<_>, _>>()?;

    let mut milestones = Vec::new();
    if let Some(gates) = record.milestones {
        for (kind, raw) in [
            (MilestoneKind::Fdg, gates.fdg),
            (MilestoneKind::CBuild, gates.c_build),
            (MilestoneKind::Fig, gates.fig),
        ] {
            if let Some(raw) = raw {
                milestones.push(Milestone::new(kind, parse_week(raw)?));
            }
        }
    }

    Ok(Scenario {
        total_scope: record.total_scope,
        pre_work_pct: record.pre_work_pct.unwrap_or(DEFAULT_PRE_WORK_PCT),
        post_work_pct: record.post_work_pct.unwrap_or(DEFAULT_POST_WORK_PCT),
        se_count: record.se_count.unwrap_or(DEFAULT_SE_COUNT),
        ih_per_se: record.ih_per_se.unwrap_or(DEFAULT_IH_PER_SE),
        rework_rate: record.rework_rate.unwrap_or(0.0),
        work_start: parse_week(record.work_start)?,
        deadline: parse_week(record.deadline)?,
        trucks,
        milestones,
        window: window_from_record(record.window)?,
    })
}

fn truck_from_record(position: usize, record: TruckRecord) -> Result<Truck, ScenarioYamlError> {
    let id = record
        .id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| format!("Truck {}", position + 1));
    Ok(Truck {
        id,
        arrival: parse_week(record.arrival)?,
        departure: parse_week(record.departure)?,
        weight: record.weight.unwrap_or(DEFAULT_TRUCK_WEIGHT),
    })
}

fn window_from_record(record: Option<WindowRecord>) -> Result<WindowConfig, ScenarioYamlError> {
    let Some(record) = record else {
        return Ok(WindowConfig::default());
    };
    Ok(WindowConfig {
        buffer_weeks: record.buffer_weeks.unwrap_or(DEFAULT_BUFFER_WEEKS),
        min_weeks: record.min_weeks.unwrap_or(DEFAULT_MIN_WEEKS),
        reference_week: Some(parse_week(
            record.reference_week.unwrap_or(DEFAULT_REFERENCE_WEEK),
        )?),
        truck_date_fallback: record.truck_date_fallback.unwrap_or(true),
    })
}

// Off-grid weeks such as 2553 are accepted here and resolved against the
// timeline later; only values that cannot be YYWW at all are refused.
fn parse_week(raw: u32) -> Result<YearWeek, ScenarioYamlError> {
    if raw > 9999 {
        return Err(ScenarioYamlError::InvalidWeek(raw));
    }
    Ok(YearWeek::from_raw(raw))
}
