use std::fmt;

use serde::Serialize;

use crate::domain::year_week::YearWeek;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MilestoneKind {
    #[serde(rename = "FDG")]
    Fdg,
    #[serde(rename = "C-Build")]
    CBuild,
    #[serde(rename = "FIG")]
    Fig,
    /// Release gate, the hard deadline of the project.
    #[serde(rename = "RG")]
    Rg,
}

impl MilestoneKind {
    pub fn name(self) -> &'static str {
        match self {
            MilestoneKind::Fdg => "FDG",
            MilestoneKind::CBuild => "C-Build",
            MilestoneKind::Fig => "FIG",
            MilestoneKind::Rg => "RG",
        }
    }

    pub fn is_deadline(self) -> bool {
        self == MilestoneKind::Rg
    }
}

impl fmt::Display for MilestoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Milestone {
    pub kind: MilestoneKind,
    pub week: YearWeek,
}

impl Milestone {
    pub fn new(kind: MilestoneKind, week: YearWeek) -> Self {
        Self { kind, week }
    }
}
