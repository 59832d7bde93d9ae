//! Transport links between warehouses.
//!
//! A [`Transport`] is an immutable description of a recurring link: where it goes,
//! the clock time it leaves at, how much preparation it needs and how often it
//! runs. It is built once (from a record line, a config file or a test fixture)
//! and then only read.
//!
//! ## Record format
//!
//! ```text
//! origin,destination,YYYY-MM-DD HH:MM,preparation,PERIODICITY                 # duration = 60
//! origin,destination,YYYY-MM-DD HH:MM,preparation,duration,PERIODICITY
//! origin,destination,YYYY-MM-DD HH:MM,preparation,duration,PERIODICITY,day
//! origin,destination,YYYY-MM-DD HH:MM,preparation,duration,PERIODICITY,dow,dom
//! ```
//!
//! With seven fields the trailing `day` is the day of week for `WEEKLY` and the
//! day of month for `MONTHLY`. With eight fields only the column matching the
//! periodicity is read.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::periodicity::Periodicity;
use crate::resolver::{self, TransportSlot};

/// Anchor layout used by transport records.
pub const ANCHOR_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Transit time assumed by five-field records.
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

/// Highest accepted `day_of_week` (0 = Monday .. 6 = Sunday).
pub const MAX_DAY_OF_WEEK: u32 = 6;

/// Highest accepted `day_of_month`. Days 29-31 are not supported.
pub const MAX_DAY_OF_MONTH: u32 = 28;

const BYDAY_CODES: [&str; 7] = ["MO", "TU", "WE", "TH", "FR", "SA", "SU"];

/// A recurring transport link between two warehouses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transport {
    /// Warehouse the transport leaves from.
    pub origin: u32,
    /// Warehouse the transport arrives at.
    pub destination: u32,
    /// Its time of day is the departure clock time. Its date only seeds daily links.
    pub anchor: NaiveDateTime,
    /// Minutes that must pass after a request before the transport may leave.
    pub preparation_minutes: u32,
    /// Minutes between departure and arrival.
    pub duration_minutes: u32,
    pub periodicity: Periodicity,
    /// 0 = Monday .. 6 = Sunday. Set only for weekly links.
    pub day_of_week: Option<u32>,
    /// 1..=28. Set only for monthly links.
    pub day_of_month: Option<u32>,
}

impl Transport {
    /// Build a transport, rejecting any periodicity / companion-field mismatch.
    ///
    /// # Errors
    /// Returns `ScheduleError::MissingCompanion` when a weekly link has no
    /// `day_of_week` or a monthly link has no `day_of_month`,
    /// `ScheduleError::UnexpectedCompanion` when a companion is set for a
    /// periodicity that does not use it, and `ScheduleError::CompanionOutOfRange`
    /// for days outside 0..=6 / 1..=28.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        origin: u32,
        destination: u32,
        anchor: NaiveDateTime,
        preparation_minutes: u32,
        duration_minutes: u32,
        periodicity: Periodicity,
        day_of_week: Option<u32>,
        day_of_month: Option<u32>,
    ) -> Result<Self> {
        let transport = Self {
            origin,
            destination,
            anchor,
            preparation_minutes,
            duration_minutes,
            periodicity,
            day_of_week,
            day_of_month,
        };
        transport.validate()?;
        Ok(transport)
    }

    /// Check that exactly the companion field required by the periodicity is set
    /// and that it is in range.
    pub fn validate(&self) -> Result<()> {
        let (week, month) = match self.periodicity {
            Periodicity::Daily => (false, false),
            Periodicity::Weekly => (true, false),
            Periodicity::Monthly => (false, true),
        };
        check_companion(self.periodicity, "day_of_week", self.day_of_week, week, 0, MAX_DAY_OF_WEEK)?;
        check_companion(self.periodicity, "day_of_month", self.day_of_month, month, 1, MAX_DAY_OF_MONTH)?;
        Ok(())
    }

    /// Parse a comma-separated transport record (see the module docs).
    ///
    /// # Errors
    /// Returns `ScheduleError::InvalidRecord` for a wrong field count, a
    /// non-numeric field or an unparseable anchor,
    /// `ScheduleError::UnknownPeriodicity` for an unrecognized periodicity name,
    /// and any error [`Transport::new`] raises for the resulting values.
    pub fn parse(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();

        let (duration_minutes, periodicity_idx) = match fields.len() {
            5 => (DEFAULT_DURATION_MINUTES, 4),
            6..=8 => (parse_number(fields[4], "duration")?, 5),
            n => {
                return Err(ScheduleError::InvalidRecord(format!(
                    "expected 5 to 8 fields, found {}",
                    n
                )))
            }
        };

        let origin = parse_number(fields[0], "origin")?;
        let destination = parse_number(fields[1], "destination")?;
        let anchor = NaiveDateTime::parse_from_str(fields[2], ANCHOR_FORMAT).map_err(|e| {
            ScheduleError::InvalidRecord(format!("anchor '{}': {}", fields[2], e))
        })?;
        let preparation_minutes = parse_number(fields[3], "preparation")?;
        let periodicity: Periodicity = fields[periodicity_idx].parse()?;

        // Columns for the other periodicity are ignored.
        let (dow_col, dom_col) = match fields.len() {
            7 => (Some(6), Some(6)),
            8 => (Some(6), Some(7)),
            _ => (None, None),
        };
        let day_of_week = match (periodicity, dow_col) {
            (Periodicity::Weekly, Some(i)) => Some(parse_number(fields[i], "day_of_week")?),
            _ => None,
        };
        let day_of_month = match (periodicity, dom_col) {
            (Periodicity::Monthly, Some(i)) => Some(parse_number(fields[i], "day_of_month")?),
            _ => None,
        };

        Self::new(
            origin,
            destination,
            anchor,
            preparation_minutes,
            duration_minutes,
            periodicity,
            day_of_week,
            day_of_month,
        )
    }

    /// The RFC 5545 RRULE body describing the same departures, e.g.
    /// `FREQ=WEEKLY;BYDAY=WE`.
    pub fn recurrence_rule(&self) -> Result<String> {
        self.validate()?;
        let rule = match (self.periodicity, self.day_of_week, self.day_of_month) {
            (Periodicity::Weekly, Some(dow), _) => {
                format!("FREQ=WEEKLY;BYDAY={}", BYDAY_CODES[dow as usize])
            }
            (Periodicity::Monthly, _, Some(dom)) => format!("FREQ=MONTHLY;BYMONTHDAY={}", dom),
            _ => "FREQ=DAILY".to_string(),
        };
        Ok(rule)
    }

    /// Next departure/arrival pair for a request made at `reference`.
    ///
    /// See [`resolver::next_available`].
    pub fn next_available(&self, reference: NaiveDateTime) -> Result<TransportSlot> {
        resolver::next_available(self, reference)
    }
}

fn check_companion(
    periodicity: Periodicity,
    field: &'static str,
    value: Option<u32>,
    required: bool,
    min: u32,
    max: u32,
) -> Result<()> {
    match (value, required) {
        (None, true) => Err(ScheduleError::MissingCompanion { periodicity, field }),
        (Some(_), false) => Err(ScheduleError::UnexpectedCompanion { periodicity, field }),
        (Some(v), true) if !(min..=max).contains(&v) => Err(ScheduleError::CompanionOutOfRange {
            field,
            value: v,
            min,
            max,
        }),
        _ => Ok(()),
    }
}

fn parse_number(field: &str, name: &str) -> Result<u32> {
    field.parse().map_err(|_| {
        ScheduleError::InvalidRecord(format!(
            "{} must be a non-negative integer, found '{}'",
            name, field
        ))
    })
}

impl FromStr for Transport {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        Transport::parse(s)
    }
}

/// Renders the canonical record: six fields for daily links, seven otherwise.
impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{}",
            self.origin,
            self.destination,
            self.anchor.format(ANCHOR_FORMAT),
            self.preparation_minutes,
            self.duration_minutes,
            self.periodicity
        )?;
        match self.periodicity {
            Periodicity::Daily => Ok(()),
            Periodicity::Weekly => match self.day_of_week {
                Some(dow) => write!(f, ",{}", dow),
                None => Ok(()),
            },
            Periodicity::Monthly => match self.day_of_month {
                Some(dom) => write!(f, ",{}", dom),
                None => Ok(()),
            },
        }
    }
}
