use crate::domain::milestone::{Milestone, MilestoneKind};
use crate::domain::scenario::{Scenario, WindowConfig};
use crate::domain::truck::Truck;
use crate::domain::year_week::YearWeek;

pub fn week(raw: u32) -> YearWeek {
    YearWeek::from_raw(raw)
}

// One truck from 2545 to 2552, 1000 IH, 15 IH/week, deadline 8 weeks after departure.
pub fn single_truck_scenario() -> Scenario {
    Scenario {
        total_scope: 1000.0,
        pre_work_pct: 0.0,
        post_work_pct: 0.0,
        se_count: 3,
        ih_per_se: 5.0,
        rework_rate: 0.0,
        work_start: week(2540),
        deadline: week(2608),
        trucks: vec![Truck::new("T1", week(2545), week(2552), 1.0)],
        milestones: vec![
            Milestone::new(MilestoneKind::Fdg, week(2535)),
            Milestone::new(MilestoneKind::CBuild, week(2548)),
        ],
        window: WindowConfig::default(),
    }
}

// Two trucks separated by the idle week 2613.
pub fn two_truck_scenario() -> Scenario {
    Scenario {
        total_scope: 600.0,
        pre_work_pct: 0.1,
        post_work_pct: 0.2,
        se_count: 4,
        ih_per_se: 10.0,
        rework_rate: 0.0,
        work_start: week(2605),
        deadline: week(2620),
        trucks: vec![
            Truck::new("T1", week(2610), week(2612), 3.0),
            Truck::new("T2", week(2614), week(2616), 1.0),
        ],
        milestones: vec![Milestone::new(MilestoneKind::Fig, week(2618))],
        window: WindowConfig::default(),
    }
}
