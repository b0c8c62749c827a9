use thiserror::Error;

use crate::domain::milestone::{Milestone, MilestoneKind};
use crate::domain::truck::Truck;
use crate::domain::year_week::YearWeek;

pub const MAX_TRUCKS: usize = 3;
pub const DEFAULT_BUFFER_WEEKS: u32 = 12;
pub const DEFAULT_MIN_WEEKS: u32 = 60;
pub const DEFAULT_REFERENCE_WEEK: u32 = 2530;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioError {
    #[error("total scope must be a non-negative number, got {0}")]
    InvalidScope(f64),
    #[error("{name} must be between 0 and 1, got {value}")]
    InvalidPercentage { name: &'static str, value: f64 },
    #[error("pre-work and post-work shares add up to {0}, which exceeds the total scope")]
    SplitExceedsScope(f64),
    #[error("IH per SE must be a non-negative number, got {0}")]
    InvalidThroughput(f64),
    #[error("rework rate must be in [0, 1), got {0}")]
    InvalidReworkRate(f64),
    #[error("a scenario needs between 1 and {max} trucks, got {0}", max = MAX_TRUCKS)]
    InvalidTruckCount(usize),
    #[error("truck {0} has an invalid weight {1}")]
    InvalidTruckWeight(String, f64),
    #[error("truck {id} departs at {departure} before it arrives at {arrival}")]
    TruckDepartsBeforeArrival {
        id: String,
        arrival: YearWeek,
        departure: YearWeek,
    },
}

/// Controls how wide the generated timeline is.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    /// Weeks appended after the latest input date.
    pub buffer_weeks: u32,
    /// Lower bound on the number of weeks shown.
    pub min_weeks: u32,
    /// Extra date folded into the window computation, if any.
    pub reference_week: Option<YearWeek>,
    /// Retry off-grid truck dates with their normalized week.
    pub truck_date_fallback: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            buffer_weeks: DEFAULT_BUFFER_WEEKS,
            min_weeks: DEFAULT_MIN_WEEKS,
            reference_week: Some(YearWeek::from_raw(DEFAULT_REFERENCE_WEEK)),
            truck_date_fallback: true,
        }
    }
}

/// Full parameter set of one forecast run.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub total_scope: f64,
    pub pre_work_pct: f64,
    pub post_work_pct: f64,
    pub se_count: u32,
    pub ih_per_se: f64,
    pub rework_rate: f64,
    pub work_start: YearWeek,
    pub deadline: YearWeek,
    pub trucks: Vec<Truck>,
    /// Decorative gates. The RG deadline is carried by `deadline`.
    pub milestones: Vec<Milestone>,
    pub window: WindowConfig,
}

impl Scenario {
    pub fn max_capacity(&self) -> f64 {
        self.se_count as f64 * self.ih_per_se
    }

    /// Every named gate including RG, in display order.
    pub fn all_milestones(&self) -> Vec<Milestone> {
        let mut milestones: Vec<Milestone> = self
            .milestones
            .iter()
            .filter(|milestone| !milestone.kind.is_deadline())
            .copied()
            .collect();
        milestones.push(Milestone::new(MilestoneKind::Rg, self.deadline));
        milestones
    }

    /// Dates that the timeline window has to cover.
    pub fn input_dates(&self) -> Vec<YearWeek> {
        let mut dates = vec![self.work_start, self.deadline];
        for truck in &self.trucks {
            dates.push(truck.arrival);
            dates.push(truck.departure);
        }
        dates.extend(self.milestones.iter().map(|milestone| milestone.week));
        dates
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        if !self.total_scope.is_finite() || self.total_scope < 0.0 {
            return Err(ScenarioError::InvalidScope(self.total_scope));
        }
        check_percentage("pre-work share", self.pre_work_pct)?;
        check_percentage("post-work share", self.post_work_pct)?;
        let split = self.pre_work_pct + self.post_work_pct;
        if split > 1.0 {
            return Err(ScenarioError::SplitExceedsScope(split));
        }
        if !self.ih_per_se.is_finite() || self.ih_per_se < 0.0 {
            return Err(ScenarioError::InvalidThroughput(self.ih_per_se));
        }
        if !(0.0..1.0).contains(&self.rework_rate) {
            return Err(ScenarioError::InvalidReworkRate(self.rework_rate));
        }
        if self.trucks.is_empty() || self.trucks.len() > MAX_TRUCKS {
            return Err(ScenarioError::InvalidTruckCount(self.trucks.len()));
        }
        for truck in &self.trucks {
            if !truck.weight.is_finite() || truck.weight < 0.0 {
                return Err(ScenarioError::InvalidTruckWeight(
                    truck.id.clone(),
                    truck.weight,
                ));
            }
        }
        Ok(())
    }
}

fn check_percentage(name: &'static str, value: f64) -> Result<(), ScenarioError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ScenarioError::InvalidPercentage { name, value })
    }
}
