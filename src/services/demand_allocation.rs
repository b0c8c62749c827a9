use std::f64::consts::PI;

use tracing::debug;

use crate::domain::truck::ResolvedTruck;

/// Spread used for a truck that arrives and departs in the same week.
pub const MIN_TRUCK_SPREAD: f64 = 0.25;

/// Total scope split into its three phases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandSplit {
    pub pre_work: f64,
    pub post_work: f64,
    pub trucks: f64,
}

impl DemandSplit {
    pub fn new(total_scope: f64, pre_work_pct: f64, post_work_pct: f64) -> Self {
        let pre_work = total_scope * pre_work_pct;
        let post_work = total_scope * post_work_pct;
        Self {
            pre_work,
            post_work,
            trucks: (total_scope - pre_work - post_work).max(0.0),
        }
    }

    pub fn total(&self) -> f64 {
        self.pre_work + self.post_work + self.trucks
    }
}

/// Gaussian burst of one truck sampled over the whole timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TruckIntake {
    pub id: String,
    pub arrival_index: usize,
    pub departure_index: usize,
    pub center: f64,
    pub spread: f64,
    pub curve_sum: f64,
    pub volume: f64,
    pub intake: Vec<f64>,
}

/// Per-index intake, broken down by phase.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeProfile {
    pub split: DemandSplit,
    pub pre_work_rate: f64,
    pub post_work_rate: f64,
    pub pre_work: Vec<f64>,
    pub post_work: Vec<f64>,
    pub trucks: Vec<TruckIntake>,
    pub generated: Vec<f64>,
    pub unplaced: f64,
    /// Pre-work placed beyond the requested share. The ramp rate divides by
    /// the weeks before the first arrival but also runs in the arrival week.
    pub pre_work_overrun: f64,
}

impl IntakeProfile {
    pub fn total_generated(&self) -> f64 {
        self.generated.iter().sum()
    }
}

pub fn gaussian_pdf(x: f64, mean: f64, spread: f64) -> f64 {
    let z = (x - mean) / spread;
    (-0.5 * z * z).exp() / (spread * (2.0 * PI).sqrt())
}

/// Spreads the split demand over `timeline_len` indices.
///
/// * pre-work runs at a flat rate from `start_index` up to and including
///   the first truck arrival;
/// * post-work fills every index after the first arrival, up to and
///   including `deadline_index`, that no truck covers;
/// * each truck contributes its volume as a Gaussian curve normalized by
///   its own sampled sum, so the curve adds up to the volume exactly.
pub fn allocate_demand(
    timeline_len: usize,
    start_index: usize,
    deadline_index: usize,
    trucks: &[ResolvedTruck],
    split: DemandSplit,
) -> IntakeProfile {
    let mut unplaced = 0.0;
    let first_arrival = trucks.iter().map(|truck| truck.arrival_index).min();

    let mut pre_work = vec![0.0; timeline_len];
    let pre_work_rate = match first_arrival {
        Some(arrival) if arrival > start_index => {
            let rate = split.pre_work / (arrival - start_index) as f64;
            let last = arrival.min(timeline_len.saturating_sub(1));
            for value in &mut pre_work[start_index..=last] {
                *value = rate;
            }
            rate
        }
        _ => 0.0,
    };
    if pre_work_rate == 0.0 {
        unplaced += split.pre_work;
    }
    let pre_work_overrun = if pre_work_rate > 0.0 {
        (pre_work.iter().sum::<f64>() - split.pre_work).max(0.0)
    } else {
        0.0
    };

    let gap_indices: Vec<usize> = match first_arrival {
        Some(arrival) => (arrival + 1..=deadline_index.min(timeline_len.saturating_sub(1)))
            .filter(|index| !trucks.iter().any(|truck| truck.covers(*index)))
            .collect(),
        None => Vec::new(),
    };
    let mut post_work = vec![0.0; timeline_len];
    let post_work_rate = if gap_indices.is_empty() {
        unplaced += split.post_work;
        0.0
    } else {
        split.post_work / gap_indices.len() as f64
    };
    for index in &gap_indices {
        post_work[*index] = post_work_rate;
    }

    let weight_sum: f64 = trucks.iter().map(|truck| truck.weight).sum();
    if weight_sum <= 0.0 {
        unplaced += split.trucks;
    }
    let truck_intakes: Vec<TruckIntake> = trucks
        .iter()
        .map(|truck| {
            let volume = if weight_sum > 0.0 {
                split.trucks * (truck.weight / weight_sum)
            } else {
                0.0
            };
            truck_intake(truck, volume, timeline_len)
        })
        .collect();
    unplaced += truck_intakes
        .iter()
        .filter(|intake| intake.curve_sum <= 0.0)
        .map(|intake| intake.volume)
        .sum::<f64>();

    let generated: Vec<f64> = (0..timeline_len)
        .map(|index| {
            pre_work[index]
                + post_work[index]
                + truck_intakes
                    .iter()
                    .map(|intake| intake.intake[index])
                    .sum::<f64>()
        })
        .collect();

    debug!(
        pre_work_rate,
        post_work_rate,
        pre_work_overrun,
        gap_weeks = gap_indices.len(),
        unplaced,
        "allocated demand"
    );

    IntakeProfile {
        split,
        pre_work_rate,
        post_work_rate,
        pre_work,
        post_work,
        trucks: truck_intakes,
        generated,
        unplaced,
        pre_work_overrun,
    }
}

fn truck_intake(truck: &ResolvedTruck, volume: f64, timeline_len: usize) -> TruckIntake {
    let arrival = truck.arrival_index as f64;
    let departure = truck.departure_index as f64;
    let center = (arrival + departure) / 2.0;
    let spread = (departure - arrival) / 5.0;
    let spread = if spread > 0.0 { spread } else { MIN_TRUCK_SPREAD };

    let curve: Vec<f64> = (0..timeline_len)
        .map(|index| gaussian_pdf(index as f64, center, spread))
        .collect();
    let curve_sum: f64 = curve.iter().sum();
    let intake = if curve_sum > 0.0 {
        curve.iter().map(|value| value / curve_sum * volume).collect()
    } else {
        vec![0.0; timeline_len]
    };

    TruckIntake {
        id: truck.id.clone(),
        arrival_index: truck.arrival_index,
        departure_index: truck.departure_index,
        center,
        spread,
        curve_sum,
        volume,
        intake,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn truck(id: &str, arrival_index: usize, departure_index: usize, weight: f64) -> ResolvedTruck {
        ResolvedTruck {
            id: id.to_string(),
            arrival_index,
            departure_index,
            weight,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn split_divides_scope_into_phases() {
        let split = DemandSplit::new(1500.0, 0.1, 0.2);
        assert_close(split.pre_work, 150.0);
        assert_close(split.post_work, 300.0);
        assert_close(split.trucks, 1050.0);
        assert_close(split.total(), 1500.0);
    }

    #[test]
    fn gaussian_pdf_peaks_at_mean() {
        assert_close(gaussian_pdf(0.0, 0.0, 1.0), 1.0 / (2.0 * PI).sqrt());
        assert!(gaussian_pdf(1.0, 0.0, 1.0) < gaussian_pdf(0.0, 0.0, 1.0));
        assert_close(gaussian_pdf(-1.0, 0.0, 1.0), gaussian_pdf(1.0, 0.0, 1.0));
    }

    #[test]
    fn truck_curve_sums_to_its_volume_even_when_truncated() {
        // Truck at the very start of the timeline loses its left tail.
        let profile = allocate_demand(
            30,
            0,
            29,
            &[truck("T1", 0, 10, 1.0)],
            DemandSplit::new(500.0, 0.0, 0.0),
        );
        let intake = &profile.trucks[0];
        assert_close(intake.intake.iter().sum(), 500.0);
        assert_close(intake.center, 5.0);
        assert_close(intake.spread, 2.0);
    }

    #[test]
    fn volumes_follow_truck_weights() {
        let trucks = [truck("T1", 5, 7, 3.0), truck("T2", 10, 12, 1.0)];
        let profile = allocate_demand(30, 0, 20, &trucks, DemandSplit::new(400.0, 0.0, 0.0));
        assert_close(profile.trucks[0].volume, 300.0);
        assert_close(profile.trucks[1].volume, 100.0);
    }

    #[test]
    fn zero_weights_give_zero_volume() {
        let trucks = [truck("T1", 5, 7, 0.0), truck("T2", 10, 12, 0.0)];
        let profile = allocate_demand(30, 0, 20, &trucks, DemandSplit::new(1000.0, 0.1, 0.2));
        assert!(profile.trucks.iter().all(|intake| intake.volume == 0.0));
        // 100 of pre-work over five weeks, also paid in the arrival week.
        assert_close(profile.pre_work_overrun, 20.0);
        assert_close(profile.total_generated(), 300.0 + profile.pre_work_overrun);
        assert_close(profile.unplaced, 700.0);
    }

    #[test]
    fn collapsed_truck_window_uses_minimum_spread() {
        let profile = allocate_demand(
            20,
            0,
            19,
            &[truck("T1", 8, 8, 1.0)],
            DemandSplit::new(100.0, 0.0, 0.0),
        );
        let intake = &profile.trucks[0];
        assert_eq!(intake.spread, MIN_TRUCK_SPREAD);
        assert!(intake.intake[8] > 99.0);
        assert_close(intake.intake.iter().sum(), 100.0);
    }

    #[test]
    fn pre_work_runs_flat_through_first_arrival() {
        let trucks = [truck("T1", 12, 14, 1.0), truck("T2", 8, 9, 1.0)];
        let profile = allocate_demand(30, 4, 20, &trucks, DemandSplit::new(1000.0, 0.2, 0.0));
        assert_close(profile.pre_work_rate, 50.0);
        assert_eq!(profile.pre_work[3], 0.0);
        assert_close(profile.pre_work[4], 50.0);
        assert_close(profile.pre_work[7], 50.0);
        assert_close(profile.pre_work[8], profile.pre_work_rate);
        assert_eq!(profile.pre_work[9], 0.0);
        assert_close(profile.pre_work.iter().sum(), 250.0);
        assert_close(profile.pre_work_overrun, 50.0);
    }

    #[test]
    fn pre_work_reaches_arrival_in_the_last_week() {
        let profile = allocate_demand(
            10,
            6,
            9,
            &[truck("T1", 9, 9, 1.0)],
            DemandSplit::new(300.0, 0.1, 0.0),
        );
        assert_close(profile.pre_work_rate, 10.0);
        assert_close(profile.pre_work[9], 10.0);
        assert_close(profile.pre_work_overrun, 10.0);
    }

    #[test]
    fn pre_work_is_zero_when_start_is_not_before_arrival() {
        let profile = allocate_demand(
            30,
            10,
            20,
            &[truck("T1", 10, 12, 1.0)],
            DemandSplit::new(1000.0, 0.2, 0.0),
        );
        assert_eq!(profile.pre_work_rate, 0.0);
        assert!(profile.pre_work.iter().all(|value| *value == 0.0));
        assert_eq!(profile.pre_work_overrun, 0.0);
        assert_close(profile.unplaced, 200.0);
    }

    #[test]
    fn post_work_fills_gaps_between_and_after_trucks() {
        let trucks = [truck("T1", 5, 7, 1.0), truck("T2", 9, 11, 1.0)];
        let profile = allocate_demand(30, 0, 14, &trucks, DemandSplit::new(1000.0, 0.0, 0.1));

        // Gap indices: 8, 12, 13, 14.
        assert_close(profile.post_work_rate, 25.0);
        assert_close(profile.post_work[8], 25.0);
        for index in [5, 6, 7, 9, 10, 11, 15, 4] {
            assert_eq!(profile.post_work[index], 0.0, "index {index}");
        }
        assert_close(profile.post_work[14], 25.0);
        assert_close(profile.post_work.iter().sum(), 100.0);
    }

    #[test]
    fn post_work_is_zero_without_gap_indices() {
        let profile = allocate_demand(
            30,
            0,
            10,
            &[truck("T1", 5, 12, 1.0)],
            DemandSplit::new(1000.0, 0.0, 0.1),
        );
        assert_eq!(profile.post_work_rate, 0.0);
        assert_close(profile.unplaced, 100.0);
    }

    #[test]
    fn generated_is_sum_of_components() {
        let trucks = [truck("T1", 5, 7, 1.0), truck("T2", 9, 11, 2.0)];
        let profile = allocate_demand(30, 1, 20, &trucks, DemandSplit::new(900.0, 0.1, 0.1));
        for index in 0..30 {
            let expected = profile.pre_work[index]
                + profile.post_work[index]
                + profile.trucks.iter().map(|t| t.intake[index]).sum::<f64>();
            assert_close(profile.generated[index], expected);
        }
        assert_close(profile.pre_work_overrun, 22.5);
        assert_close(profile.total_generated(), 900.0 + profile.pre_work_overrun);
        assert_eq!(profile.unplaced, 0.0);
    }
}
