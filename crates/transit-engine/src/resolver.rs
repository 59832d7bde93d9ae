//! Next-departure resolution for recurring transports.
//!
//! Given a [`Transport`] and the instant a shipment is requested, find the first
//! departure that leaves strictly after the preparation lead time has elapsed,
//! together with its arrival. Resolution is pure calendar arithmetic over
//! `NaiveDateTime`: no clock reads, no timezones, no state.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Result, ScheduleError};
use crate::periodicity::Periodicity;
use crate::transport::Transport;

/// Upper bound on the slots reserved up front by [`upcoming`].
const MAX_RESERVED_SLOTS: usize = 1024;

/// A resolved departure and the matching arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportSlot {
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
}

impl TransportSlot {
    /// Minutes spent in transit.
    pub fn transit_minutes(&self) -> i64 {
        (self.arrival - self.departure).num_minutes()
    }
}

/// Compute the next departure/arrival pair for a request made at `reference`.
///
/// The earliest legal departure is `reference + preparation_minutes`. A candidate
/// departure is built at the anchor clock time on the matching calendar day and
/// is rejected when it is at or before that instant, in which case it rolls
/// forward one period (a day, a week or a month).
///
/// # Errors
/// Returns a configuration error (see [`ScheduleError::is_configuration`]) when
/// the transport breaks the periodicity / companion-field invariant, and
/// `ScheduleError::DateOverflow` if the arithmetic leaves chrono's range.
pub fn next_available(transport: &Transport, reference: NaiveDateTime) -> Result<TransportSlot> {
    transport.validate()?;

    let earliest = add_minutes(reference, transport.preparation_minutes)?;
    let clock = transport.anchor.time();

    let departure = match transport.periodicity {
        Periodicity::Daily => {
            let candidate = earliest.date().and_time(clock);
            if candidate <= earliest {
                add_days(candidate, 1)?
            } else {
                candidate
            }
        }
        Periodicity::Weekly => {
            let dow = companion(transport, transport.day_of_week)?;
            let today = earliest.weekday().num_days_from_monday();
            let offset = (dow + 7 - today) % 7;
            let candidate = add_days(earliest.date().and_time(clock), offset)?;
            if candidate <= earliest {
                add_days(candidate, 7)?
            } else {
                candidate
            }
        }
        Periodicity::Monthly => {
            let dom = companion(transport, transport.day_of_month)?;
            let (year, month) = (earliest.year(), earliest.month());
            let candidate = month_day(year, month, dom)?.and_time(clock);
            if candidate <= earliest {
                let (year, month) = if month == 12 {
                    (year + 1, 1)
                } else {
                    (year, month + 1)
                };
                month_day(year, month, dom)?.and_time(clock)
            } else {
                candidate
            }
        }
    };

    let arrival = add_minutes(departure, transport.duration_minutes)?;
    debug!(
        origin = transport.origin,
        destination = transport.destination,
        periodicity = %transport.periodicity,
        %reference,
        %earliest,
        %departure,
        "resolved next departure"
    );

    Ok(TransportSlot { departure, arrival })
}

/// The first `count` consecutive departures at or after the one
/// [`next_available`] returns for `reference`.
///
/// Each following slot is the first departure strictly after the previous one,
/// so departures are strictly increasing. `count == 0` yields an empty list.
///
/// # Errors
/// Fails like [`next_available`]. A `count` running past the end of chrono's
/// calendar stops with `ScheduleError::DateOverflow`.
pub fn upcoming(transport: &Transport, reference: NaiveDateTime, count: usize) -> Result<Vec<TransportSlot>> {
    let mut slots = Vec::with_capacity(count.min(MAX_RESERVED_SLOTS));
    if count == 0 {
        return Ok(slots);
    }

    let preparation = Duration::minutes(i64::from(transport.preparation_minutes));
    let mut slot = next_available(transport, reference)?;
    slots.push(slot);

    while slots.len() < count {
        // Pull the reference back by the lead time so the earliest legal
        // departure lands exactly on the previous one, which `<=` then rejects.
        let rewound = slot
            .departure
            .checked_sub_signed(preparation)
            .ok_or_else(|| overflow(slot.departure, "rewind preparation"))?;
        slot = next_available(transport, rewound)?;
        trace!(departure = %slot.departure, index = slots.len(), "upcoming departure");
        slots.push(slot);
    }

    Ok(slots)
}

fn companion(transport: &Transport, value: Option<u32>) -> Result<u32> {
    value.ok_or(ScheduleError::MissingCompanion {
        periodicity: transport.periodicity,
        field: transport.periodicity.companion_field().unwrap_or("companion"),
    })
}

fn month_day(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        ScheduleError::DateOverflow(format!("{:04}-{:02}-{:02} is not a valid date", year, month, day))
    })
}

fn add_minutes(at: NaiveDateTime, minutes: u32) -> Result<NaiveDateTime> {
    at.checked_add_signed(Duration::minutes(i64::from(minutes)))
        .ok_or_else(|| overflow(at, "add minutes"))
}

fn add_days(at: NaiveDateTime, days: u32) -> Result<NaiveDateTime> {
    at.checked_add_signed(Duration::days(i64::from(days)))
        .ok_or_else(|| overflow(at, "add days"))
}

fn overflow(at: NaiveDateTime, op: &str) -> ScheduleError {
    ScheduleError::DateOverflow(format!("{} from {}", op, at))
}
