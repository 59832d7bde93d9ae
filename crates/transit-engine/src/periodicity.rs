//! Recurrence classes for transport links.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// How often a transport link departs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Periodicity {
    /// Every day at the anchor clock time.
    Daily,
    /// Once a week, on `day_of_week`.
    Weekly,
    /// Once a month, on `day_of_month`.
    Monthly,
}

impl Periodicity {
    pub const ALL: [Periodicity; 3] = [Periodicity::Daily, Periodicity::Weekly, Periodicity::Monthly];

    /// Upper-case name used in transport records.
    pub fn as_str(self) -> &'static str {
        match self {
            Periodicity::Daily => "DAILY",
            Periodicity::Weekly => "WEEKLY",
            Periodicity::Monthly => "MONTHLY",
        }
    }

    /// The transport field this periodicity cannot resolve without.
    pub fn companion_field(self) -> Option<&'static str> {
        match self {
            Periodicity::Daily => None,
            Periodicity::Weekly => Some("day_of_week"),
            Periodicity::Monthly => Some("day_of_month"),
        }
    }
}

impl fmt::Display for Periodicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Periodicity {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Periodicity::ALL
            .into_iter()
            .find(|p| p.as_str() == trimmed)
            .ok_or_else(|| ScheduleError::UnknownPeriodicity(trimmed.to_string()))
    }
}
