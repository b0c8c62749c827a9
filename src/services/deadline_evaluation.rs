use serde::Serialize;
use tracing::debug;

use crate::domain::milestone::{Milestone, MilestoneKind};
use crate::domain::timeline::Timeline;
use crate::domain::year_week::YearWeek;
use crate::services::backlog_simulation::SimulationRun;
use crate::services::demand_allocation::IntakeProfile;

/// Backlog at RG above this amount counts as a miss.
pub const MISS_THRESHOLD: f64 = 1.0;

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    OnTarget,
    Missed { amount: f64 },
}

impl Verdict {
    pub fn missed_amount(&self) -> f64 {
        match self {
            Verdict::OnTarget => 0.0,
            Verdict::Missed { amount } => *amount,
        }
    }

    pub fn is_on_target(&self) -> bool {
        matches!(self, Verdict::OnTarget)
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct ResolvedMilestone {
    pub name: MilestoneKind,
    pub week: YearWeek,
    pub index: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ForecastSummary {
    pub pre_work_volume: f64,
    pub pre_work_overrun: f64,
    pub truck_phase_volume: f64,
    pub post_work_volume: f64,
    pub unplaced_volume: f64,
    pub total_generated: f64,
    pub total_sent: f64,
    pub total_rework: f64,
    pub peak_backlog: f64,
    pub peak_backlog_index: Option<usize>,
    pub missed_amount: f64,
}

/// Looks up each milestone on the timeline. Milestones whose week is not on
/// the timeline are left out.
pub fn resolve_milestones(timeline: &Timeline, milestones: &[Milestone]) -> Vec<ResolvedMilestone> {
    milestones
        .iter()
        .filter_map(|milestone| match timeline.index_of(milestone.week) {
            Some(index) => Some(ResolvedMilestone {
                name: milestone.kind,
                week: milestone.week,
                index,
            }),
            None => {
                debug!(
                    milestone = %milestone.kind,
                    week = %milestone.week,
                    "milestone not on timeline"
                );
                None
            }
        })
        .collect()
}

pub fn evaluate_deadline(run: &SimulationRun, deadline_index: usize) -> Verdict {
    let backlog = run.backlog_at(deadline_index).unwrap_or(0.0);
    if backlog > MISS_THRESHOLD {
        Verdict::Missed { amount: backlog }
    } else {
        Verdict::OnTarget
    }
}

pub fn summarize(
    profile: &IntakeProfile,
    run: &SimulationRun,
    verdict: &Verdict,
) -> ForecastSummary {
    let peak = run.peak_backlog();
    ForecastSummary {
        pre_work_volume: profile.split.pre_work,
        pre_work_overrun: profile.pre_work_overrun,
        truck_phase_volume: profile.split.trucks,
        post_work_volume: profile.split.post_work,
        unplaced_volume: profile.unplaced,
        total_generated: run.total_generated(),
        total_sent: run.total_sent(),
        total_rework: run.total_rework(),
        peak_backlog: peak.map(|(_, value)| value).unwrap_or(0.0),
        peak_backlog_index: peak.map(|(index, _)| index),
        missed_amount: verdict.missed_amount(),
    }
}
