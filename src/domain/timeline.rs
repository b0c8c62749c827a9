use thiserror::Error;

use crate::domain::year_week::YearWeek;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimelineError {
    #[error(
        "date mismatch: {label} {date} is not on the generated timeline, which runs from {first} to {last}"
    )]
    DateResolution {
        label: String,
        date: YearWeek,
        first: YearWeek,
        last: YearWeek,
    },
    #[error("timeline is empty")]
    Empty,
}

/// Dense run of consecutive weeks. Position in `weeks` is the index used
/// by every other stage of the forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    weeks: Vec<YearWeek>,
}

impl Timeline {
    pub fn generate(start: YearWeek, length: usize) -> Result<Self, TimelineError> {
        if length == 0 {
            return Err(TimelineError::Empty);
        }
        let mut weeks = Vec::with_capacity(length);
        let mut current = start;
        for _ in 0..length {
            weeks.push(current);
            current = current.succ();
        }
        Ok(Self { weeks })
    }

    pub fn weeks(&self) -> &[YearWeek] {
        &self.weeks
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    pub fn first(&self) -> YearWeek {
        self.weeks[0]
    }

    pub fn last(&self) -> YearWeek {
        self.weeks[self.weeks.len() - 1]
    }

    pub fn week_at(&self, index: usize) -> Option<YearWeek> {
        self.weeks.get(index).copied()
    }

    /// Weeks increase strictly along the timeline, so a binary search is
    /// enough to find the index.
    pub fn index_of(&self, week: YearWeek) -> Option<usize> {
        self.weeks.binary_search(&week).ok()
    }

    pub fn resolve(&self, label: &str, week: YearWeek) -> Result<usize, TimelineError> {
        self.index_of(week)
            .ok_or_else(|| TimelineError::DateResolution {
                label: label.to_string(),
                date: week,
                first: self.first(),
                last: self.last(),
            })
    }
}
