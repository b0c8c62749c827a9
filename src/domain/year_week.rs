use std::fmt;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Weeks per encoded year. Week 53 is never emitted on a timeline.
pub const WEEKS_PER_YEAR: u32 = 52;

/// A week in the `YYWW` encoding (`year * 100 + week`).
///
/// The raw value is kept as given, so a `YearWeek` may hold an off-grid
/// value such as week 0 or week 60. Use [`YearWeek::is_valid`] and
/// [`YearWeek::normalized`] before doing arithmetic with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YearWeek(u32);

impl YearWeek {
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn new(year: u32, week: u32) -> Self {
        Self(year * 100 + week)
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    pub fn year(self) -> u32 {
        self.0 / 100
    }

    pub fn week(self) -> u32 {
        self.0 % 100
    }

    pub fn is_valid(self) -> bool {
        (1..=WEEKS_PER_YEAR).contains(&self.week())
    }

    /// Maps an off-grid value onto the first valid week that follows it.
    ///
    /// Week 0 becomes week 1 of the same year, weeks past 52 roll into the
    /// following years (`2560` becomes `2608`).
    pub fn normalized(self) -> Self {
        let week = self.week();
        if week == 0 {
            return Self::new(self.year(), 1);
        }
        let extra_years = (week - 1) / WEEKS_PER_YEAR;
        let week = (week - 1) % WEEKS_PER_YEAR + 1;
        Self::new(self.year() + extra_years, week)
    }

    /// The next week on the 52-week calendar.
    pub fn succ(self) -> Self {
        if self.week() >= WEEKS_PER_YEAR {
            Self::new(self.year() + 1, 1)
        } else {
            Self(self.0 + 1)
        }
    }

    /// Advances by `weeks` using the 52-week calendar.
    pub fn add_weeks(self, weeks: u32) -> Self {
        let start = self.normalized();
        let zero_based = start.week() - 1 + weeks;
        Self::new(
            start.year() + zero_based / WEEKS_PER_YEAR,
            zero_based % WEEKS_PER_YEAR + 1,
        )
    }

    /// Signed week distance `other - self` on the 52-week calendar.
    pub fn weeks_until(self, other: YearWeek) -> i64 {
        let years = other.year() as i64 - self.year() as i64;
        let weeks = other.week() as i64 - self.week() as i64;
        years * WEEKS_PER_YEAR as i64 + weeks
    }

    /// Monday of the ISO week with the same year and week number, assuming
    /// the two-digit year is in the 2000s.
    pub fn monday(self) -> Option<NaiveDate> {
        NaiveDate::from_isoywd_opt(2000 + self.year() as i32, self.week(), Weekday::Mon)
    }
}

impl fmt::Display for YearWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

impl From<u32> for YearWeek {
    fn from(raw: u32) -> Self {
        Self::from_raw(raw)
    }
}
