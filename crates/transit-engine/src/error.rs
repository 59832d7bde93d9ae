//! Error types for transit-engine operations.

use thiserror::Error;

use crate::periodicity::Periodicity;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Unknown periodicity: {0}")]
    UnknownPeriodicity(String),

    #[error("{periodicity} periodicity requires companion field {field}")]
    MissingCompanion {
        periodicity: Periodicity,
        field: &'static str,
    },

    #[error("{field} is not meaningful for {periodicity} periodicity")]
    UnexpectedCompanion {
        periodicity: Periodicity,
        field: &'static str,
    },

    #[error("{field} out of range: {value} (expected {min}..={max})")]
    CompanionOutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("Invalid transport record: {0}")]
    InvalidRecord(String),

    #[error("Transport {transport_origin}->{transport_destination} does not serve shipment route {origin}->{destination}")]
    RouteMismatch {
        origin: u32,
        destination: u32,
        transport_origin: u32,
        transport_destination: u32,
    },

    #[error("Shipment id source exhausted")]
    IdsExhausted,

    #[error("Date arithmetic overflow: {0}")]
    DateOverflow(String),
}

impl ScheduleError {
    /// True for errors caused by a transport that breaks the periodicity /
    /// companion-field invariant. These are input defects, never worth retrying.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ScheduleError::UnknownPeriodicity(_)
                | ScheduleError::MissingCompanion { .. }
                | ScheduleError::UnexpectedCompanion { .. }
                | ScheduleError::CompanionOutOfRange { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
