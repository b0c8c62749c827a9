use crate::domain::year_week::YearWeek;

/// One bounded intake burst. `weight` is the truck's relative share of
/// the truck-phase demand.
#[derive(Debug, Clone, PartialEq)]
pub struct Truck {
    pub id: String,
    pub arrival: YearWeek,
    pub departure: YearWeek,
    pub weight: f64,
}

impl Truck {
    pub fn new(id: &str, arrival: YearWeek, departure: YearWeek, weight: f64) -> Self {
        Self {
            id: id.to_string(),
            arrival,
            departure,
            weight,
        }
    }
}

/// A truck whose dates have been located on the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTruck {
    pub id: String,
    pub arrival_index: usize,
    pub departure_index: usize,
    pub weight: f64,
}

impl ResolvedTruck {
    /// True while the truck is on site, both ends included.
    pub fn covers(&self, index: usize) -> bool {
        index >= self.arrival_index && index <= self.departure_index
    }
}
