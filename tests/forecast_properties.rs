use intake_forecasts::domain::milestone::{Milestone, MilestoneKind};
use intake_forecasts::domain::scenario::{Scenario, WindowConfig};
use intake_forecasts::domain::truck::Truck;
use intake_forecasts::domain::year_week::YearWeek;
use intake_forecasts::services::forecast::run_forecast;
use proptest::prelude::*;

fn week_of_2026(week: u32) -> YearWeek {
    YearWeek::new(26, week.min(52))
}

prop_compose! {
    fn truck_strategy()(arrival in 5u32..40, stay in 0u32..8, weight in 0.0f64..100.0) -> (u32, u32, f64) {
        (arrival, arrival + stay, weight)
    }
}

prop_compose! {
    fn milestone_strategy()(
        fdg in prop::option::of(1u32..=52),
        c_build in prop::option::of(1u32..=52),
        fig in prop::option::of(1u32..=52),
    ) -> Vec<Milestone> {
        [
            (MilestoneKind::Fdg, fdg),
            (MilestoneKind::CBuild, c_build),
            (MilestoneKind::Fig, fig),
        ]
        .into_iter()
        .filter_map(|(kind, week)| week.map(|week| Milestone::new(kind, week_of_2026(week))))
        .collect()
    }
}

prop_compose! {
    fn scenario_strategy()(
        total_scope in 0.0f64..5000.0,
        pre_work_pct in 0.0f64..0.5,
        post_work_pct in 0.0f64..0.5,
        se_count in 0u32..6,
        ih_per_se in 0.0f64..20.0,
        rework_rate in 0.0f64..0.5,
        start in 1u32..30,
        slack in 0u32..12,
        trucks in prop::collection::vec(truck_strategy(), 1..=3),
        milestones in milestone_strategy(),
    ) -> Scenario {
        let last_departure = trucks.iter().map(|(_, departure, _)| *departure).max().unwrap_or(1);
        Scenario {
            total_scope,
            pre_work_pct,
            post_work_pct,
            se_count,
            ih_per_se,
            rework_rate,
            work_start: week_of_2026(start),
            deadline: week_of_2026(last_departure + slack),
            trucks: trucks
                .iter()
                .enumerate()
                .map(|(position, (arrival, departure, weight))| {
                    Truck::new(
                        &format!("T{}", position + 1),
                        week_of_2026(*arrival),
                        week_of_2026(*departure),
                        *weight,
                    )
                })
                .collect(),
            milestones,
            window: WindowConfig::default(),
        }
    }
}

proptest! {
    #[test]
    fn generated_and_backlog_are_never_negative(scenario in scenario_strategy()) {
        let forecast = run_forecast(&scenario).unwrap();
        for step in forecast.run.steps() {
            prop_assert!(step.generated >= 0.0);
            prop_assert!(step.sent >= 0.0);
            prop_assert!(step.backlog >= 0.0);
        }
    }

    #[test]
    fn truck_curves_add_up_to_truck_volume(scenario in scenario_strategy()) {
        let forecast = run_forecast(&scenario).unwrap();
        for truck in &forecast.profile.trucks {
            let placed: f64 = truck.intake.iter().sum();
            prop_assert!(
                (placed - truck.volume).abs() <= 1e-9 * truck.volume.max(1.0),
                "truck {} placed {} of {}", truck.id, placed, truck.volume
            );
        }
    }

    #[test]
    fn identical_inputs_give_identical_series(scenario in scenario_strategy()) {
        let first = run_forecast(&scenario).unwrap();
        let second = run_forecast(&scenario).unwrap();
        prop_assert_eq!(first.run, second.run);
        prop_assert_eq!(first.verdict, second.verdict);
    }

    #[test]
    fn more_capacity_never_increases_backlog(scenario in scenario_strategy(), extra in 0.0f64..20.0) {
        let mut stronger = scenario.clone();
        stronger.se_count += 1;
        stronger.ih_per_se += extra;

        let base = run_forecast(&scenario).unwrap();
        let boosted = run_forecast(&stronger).unwrap();
        for (before, after) in base.run.steps().iter().zip(boosted.run.steps()) {
            prop_assert!(after.backlog <= before.backlog + 1e-7);
        }
        prop_assert!(boosted.verdict.missed_amount() <= base.verdict.missed_amount() + 1e-7);
    }

    #[test]
    fn every_input_date_is_on_the_timeline(scenario in scenario_strategy()) {
        let forecast = run_forecast(&scenario).unwrap();
        for date in scenario.input_dates() {
            prop_assert!(forecast.timeline.index_of(date).is_some(), "{} missing", date);
        }
    }

    #[test]
    fn every_milestone_resolves_to_its_week(scenario in scenario_strategy()) {
        let forecast = run_forecast(&scenario).unwrap();
        prop_assert_eq!(forecast.milestones.len(), scenario.all_milestones().len());
        for milestone in &forecast.milestones {
            prop_assert_eq!(forecast.timeline.week_at(milestone.index), Some(milestone.week));
        }
    }
}
