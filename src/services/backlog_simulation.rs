use serde::Serialize;

/// State of the queue after processing one week.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct SimulationStep {
    pub generated: f64,
    pub sent: f64,
    pub backlog: f64,
    pub rework: f64,
}

/// Output of one backlog run. Position in `steps` is the timeline index.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRun {
    capacity: f64,
    rework_rate: f64,
    steps: Vec<SimulationStep>,
}

impl SimulationRun {
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn rework_rate(&self) -> f64 {
        self.rework_rate
    }

    pub fn steps(&self) -> &[SimulationStep] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&SimulationStep> {
        self.steps.get(index)
    }

    pub fn backlog_at(&self, index: usize) -> Option<f64> {
        self.step(index).map(|step| step.backlog)
    }

    pub fn total_generated(&self) -> f64 {
        self.steps.iter().map(|step| step.generated).sum()
    }

    pub fn total_sent(&self) -> f64 {
        self.steps.iter().map(|step| step.sent).sum()
    }

    pub fn total_rework(&self) -> f64 {
        self.steps.iter().map(|step| step.rework).sum()
    }

    /// Index and value of the largest backlog; the first one wins on ties.
    pub fn peak_backlog(&self) -> Option<(usize, f64)> {
        self.steps
            .iter()
            .enumerate()
            .fold(None, |peak, (index, step)| match peak {
                Some((_, value)) if value >= step.backlog => peak,
                _ => Some((index, step.backlog)),
            })
    }
}

/// Runs the single-queue backlog over `generated` with a fixed weekly
/// `capacity`.
///
/// Each week the pool is the new intake plus last week's backlog. At most
/// `capacity` is sent, and `rework_rate` of what was sent comes straight
/// back into the backlog of the same week.
pub fn simulate_backlog(generated: &[f64], capacity: f64, rework_rate: f64) -> SimulationRun {
    let mut steps = Vec::with_capacity(generated.len());
    let mut backlog = 0.0_f64;

    for &intake in generated {
        let pool = intake + backlog;
        let sent = pool.min(capacity);
        let rework = sent * rework_rate;
        backlog = pool - sent + rework;
        steps.push(SimulationStep {
            generated: intake,
            sent,
            backlog,
            rework,
        });
    }

    SimulationRun {
        capacity,
        rework_rate,
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backlog_builds_up_and_drains_at_capacity() {
        let run = simulate_backlog(&[30.0, 30.0, 0.0, 0.0, 0.0], 15.0, 0.0);
        let backlog: Vec<f64> = run.steps().iter().map(|step| step.backlog).collect();
        let sent: Vec<f64> = run.steps().iter().map(|step| step.sent).collect();

        assert_eq!(backlog, vec![15.0, 30.0, 15.0, 0.0, 0.0]);
        assert_eq!(sent, vec![15.0, 15.0, 15.0, 15.0, 0.0]);
        assert_eq!(run.total_sent(), 60.0);
        assert_eq!(run.total_generated(), 60.0);
    }

    #[test]
    fn light_intake_is_sent_in_the_same_week() {
        let run = simulate_backlog(&[5.0, 10.0], 15.0, 0.0);
        assert!(run.steps().iter().all(|step| step.backlog == 0.0));
        assert_eq!(run.step(1).unwrap().sent, 10.0);
    }

    #[test]
    fn zero_capacity_keeps_everything_in_backlog() {
        let run = simulate_backlog(&[1.0, 2.0, 3.0], 0.0, 0.0);
        assert_eq!(run.backlog_at(2), Some(6.0));
        assert_eq!(run.total_sent(), 0.0);
    }

    #[test]
    fn rework_returns_to_backlog_in_the_same_week() {
        let run = simulate_backlog(&[10.0, 0.0], 20.0, 0.5);

        let first = run.step(0).unwrap();
        assert_eq!(first.sent, 10.0);
        assert_eq!(first.rework, 5.0);
        assert_eq!(first.backlog, 5.0);

        let second = run.step(1).unwrap();
        assert_eq!(second.sent, 5.0);
        assert_eq!(second.rework, 2.5);
        assert_eq!(second.backlog, 2.5);

        assert_eq!(run.total_rework(), 7.5);
        assert_eq!(run.rework_rate(), 0.5);
    }

    #[test]
    fn peak_backlog_reports_first_maximum() {
        let run = simulate_backlog(&[20.0, 0.0, 20.0, 0.0], 10.0, 0.0);
        assert_eq!(run.peak_backlog(), Some((0, 10.0)));
        assert_eq!(simulate_backlog(&[], 10.0, 0.0).peak_backlog(), None);
    }

    #[test]
    fn backlog_at_out_of_range_is_none() {
        let run = simulate_backlog(&[1.0], 1.0, 0.0);
        assert_eq!(run.backlog_at(5), None);
        assert_eq!(run.capacity(), 1.0);
    }
}
