use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::domain::scenario::{Scenario, ScenarioError};
use crate::domain::timeline::{Timeline, TimelineError};
use crate::domain::truck::ResolvedTruck;
use crate::domain::year_week::YearWeek;
use crate::services::backlog_simulation::{SimulationRun, SimulationStep, simulate_backlog};
use crate::services::deadline_evaluation::{
    ForecastSummary, ResolvedMilestone, Verdict, evaluate_deadline, resolve_milestones, summarize,
};
use crate::services::demand_allocation::{DemandSplit, IntakeProfile, allocate_demand};
use crate::services::scenario_yaml::{ScenarioYamlError, load_scenario_from_yaml_file};
use crate::services::timeline_window::{build_timeline, resolve_truck};

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("failed to load scenario: {0}")]
    LoadScenario(#[from] ScenarioYamlError),
    #[error("invalid scenario: {0}")]
    InvalidScenario(#[from] ScenarioError),
    #[error(transparent)]
    Timeline(#[from] TimelineError),
}

/// Result of one forecast run. The simulation run owns the per-index steps;
/// everything else refers to them by index.
#[derive(Debug, Clone)]
pub struct Forecast {
    pub scenario: Scenario,
    pub timeline: Timeline,
    pub start_index: usize,
    pub deadline_index: usize,
    pub trucks: Vec<ResolvedTruck>,
    pub milestones: Vec<ResolvedMilestone>,
    pub profile: IntakeProfile,
    pub run: SimulationRun,
    pub verdict: Verdict,
    pub summary: ForecastSummary,
}

impl Forecast {
    /// Timeline weeks joined with their simulation step.
    pub fn rows(&self) -> impl Iterator<Item = (usize, YearWeek, &SimulationStep)> + '_ {
        self.timeline
            .weeks()
            .iter()
            .zip(self.run.steps())
            .enumerate()
            .map(|(index, (week, step))| (index, *week, step))
    }
}

pub fn forecast_from_yaml_file(path: &str) -> Result<Forecast, ForecastError> {
    let scenario = load_scenario_from_yaml_file(path)?;
    run_forecast(&scenario)
}

#[instrument(skip_all, fields(total_scope = scenario.total_scope, deadline = %scenario.deadline))]
pub fn run_forecast(scenario: &Scenario) -> Result<Forecast, ForecastError> {
    scenario.validate()?;

    let timeline = build_timeline(scenario)?;
    let start_index = timeline.resolve("work start", scenario.work_start)?;
    let deadline_index = timeline.resolve("RG deadline", scenario.deadline)?;
    let trucks = scenario
        .trucks
        .iter()
        .map(|truck| resolve_truck(&timeline, truck, scenario.window.truck_date_fallback))
        .collect::<Result<Vec<_>, _>>()?;
    for (truck, resolved) in scenario.trucks.iter().zip(&trucks) {
        if resolved.departure_index < resolved.arrival_index {
            return Err(ScenarioError::TruckDepartsBeforeArrival {
                id: truck.id.clone(),
                arrival: truck.arrival,
                departure: truck.departure,
            }
            .into());
        }
    }

    let split = DemandSplit::new(
        scenario.total_scope,
        scenario.pre_work_pct,
        scenario.post_work_pct,
    );
    let profile = allocate_demand(timeline.len(), start_index, deadline_index, &trucks, split);
    if profile.unplaced > 0.0 {
        warn!(unplaced = profile.unplaced, "part of the scope has no week to land in");
    }

    let run = simulate_backlog(
        &profile.generated,
        scenario.max_capacity(),
        scenario.rework_rate,
    );
    let milestones = resolve_milestones(&timeline, &scenario.all_milestones());
    let verdict = evaluate_deadline(&run, deadline_index);
    let summary = summarize(&profile, &run, &verdict);

    match verdict {
        Verdict::OnTarget => info!(
            first = %timeline.first(),
            last = %timeline.last(),
            "deadline on target"
        ),
        Verdict::Missed { amount } => info!(amount, "deadline missed"),
    }

    Ok(Forecast {
        scenario: scenario.clone(),
        timeline,
        start_index,
        deadline_index,
        trucks,
        milestones,
        profile,
        run,
        verdict,
        summary,
    })
}
