use tracing::{debug, warn};

use crate::domain::scenario::{Scenario, WindowConfig};
use crate::domain::timeline::{Timeline, TimelineError};
use crate::domain::truck::{ResolvedTruck, Truck};
use crate::domain::year_week::YearWeek;

/// Start and length of the timeline derived from the scenario dates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineWindow {
    pub earliest: YearWeek,
    pub latest: YearWeek,
    pub start: YearWeek,
    pub weeks_to_show: usize,
}

/// Computes a window that contains every date in `dates` with margin.
///
/// Off-grid dates are normalized first so that the window also covers the
/// week a truck date may fall back to.
pub fn compute_window(
    dates: &[YearWeek],
    config: &WindowConfig,
) -> Result<TimelineWindow, TimelineError> {
    let normalized: Vec<YearWeek> = dates
        .iter()
        .chain(config.reference_week.iter())
        .map(|date| date.normalized())
        .collect();
    let earliest = normalized.iter().min().copied().ok_or(TimelineError::Empty)?;
    let latest = normalized.iter().max().copied().ok_or(TimelineError::Empty)?;

    let start = start_week_for(earliest);
    let duration = start.weeks_until(latest) + config.buffer_weeks as i64;
    let weeks_to_show = duration.max(config.min_weeks as i64).max(1) as usize;

    debug!(%earliest, %latest, %start, weeks_to_show, "computed timeline window");
    Ok(TimelineWindow {
        earliest,
        latest,
        start,
        weeks_to_show,
    })
}

/// Backs up two weeks from `earliest`, or to week 50 of the previous year
/// when that would cross the year boundary.
pub fn start_week_for(earliest: YearWeek) -> YearWeek {
    if earliest.week() <= 2 {
        match earliest.year().checked_sub(1) {
            Some(year) => YearWeek::new(year, 50),
            None => YearWeek::new(0, 1),
        }
    } else {
        YearWeek::from_raw(earliest.raw() - 2)
    }
}

pub fn build_timeline(scenario: &Scenario) -> Result<Timeline, TimelineError> {
    let window = compute_window(&scenario.input_dates(), &scenario.window)?;
    Timeline::generate(window.start, window.weeks_to_show)
}

/// Locates a truck's arrival and departure on the timeline.
///
/// With `fallback` enabled an off-grid date is retried with its normalized
/// week before giving up.
pub fn resolve_truck(
    timeline: &Timeline,
    truck: &Truck,
    fallback: bool,
) -> Result<ResolvedTruck, TimelineError> {
    let arrival_label = format!("arrival of truck {}", truck.id);
    let departure_label = format!("departure of truck {}", truck.id);
    Ok(ResolvedTruck {
        id: truck.id.clone(),
        arrival_index: resolve_with_fallback(timeline, &arrival_label, truck.arrival, fallback)?,
        departure_index: resolve_with_fallback(
            timeline,
            &departure_label,
            truck.departure,
            fallback,
        )?,
        weight: truck.weight,
    })
}

fn resolve_with_fallback(
    timeline: &Timeline,
    label: &str,
    week: YearWeek,
    fallback: bool,
) -> Result<usize, TimelineError> {
    match timeline.resolve(label, week) {
        Ok(index) => Ok(index),
        Err(error) if fallback && !week.is_valid() => {
            let normalized = week.normalized();
            match timeline.index_of(normalized) {
                Some(index) => {
                    warn!(%week, %normalized, "{label} is off-grid, using the following week");
                    Ok(index)
                }
                None => Err(error),
            }
        }
        Err(error) => Err(error),
    }
}
