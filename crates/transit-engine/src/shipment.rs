//! Shipments between warehouses and their identifiers.
//!
//! Shipment ids are handed out by a [`ShipmentIds`] source the caller owns and
//! passes in, so two independent batches never share a counter.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ScheduleError};
use crate::transport::Transport;

/// Monotonic source of shipment ids.
///
/// Once `u64::MAX` has been handed out the source is exhausted and refuses
/// further ids instead of wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentIds {
    next: Option<u64>,
}

impl ShipmentIds {
    /// A source whose first id is 1.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// A source whose first id is `first`.
    pub fn starting_at(first: u64) -> Self {
        Self { next: Some(first) }
    }

    /// Hand out the next id.
    ///
    /// # Errors
    /// Returns `ScheduleError::IdsExhausted` after `u64::MAX` has been used.
    pub fn next_id(&mut self) -> Result<u64> {
        let id = self.next.ok_or(ScheduleError::IdsExhausted)?;
        self.next = id.checked_add(1);
        Ok(id)
    }

    /// The id the next call to [`ShipmentIds::next_id`] will return, if any.
    pub fn peek(&self) -> Option<u64> {
        self.next
    }
}

impl Default for ShipmentIds {
    fn default() -> Self {
        Self::new()
    }
}

/// A request to move goods from one warehouse to another.
///
/// A shipment starts unscheduled. [`Shipment::schedule`] binds it to a
/// transport serving the same route and records the resolved departure and
/// arrival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: u64,
    pub requested_at: NaiveDateTime,
    pub origin: u32,
    pub destination: u32,
    pub transport: Option<Transport>,
    pub departure: Option<NaiveDateTime>,
    pub arrival: Option<NaiveDateTime>,
}

impl Shipment {
    /// Create an unscheduled shipment, taking its id from `ids`.
    ///
    /// # Errors
    /// Returns `ScheduleError::IdsExhausted` when `ids` has no id left.
    pub fn new(
        ids: &mut ShipmentIds,
        requested_at: NaiveDateTime,
        origin: u32,
        destination: u32,
    ) -> Result<Self> {
        Ok(Self {
            id: ids.next_id()?,
            requested_at,
            origin,
            destination,
            transport: None,
            departure: None,
            arrival: None,
        })
    }

    /// Bind the shipment to `transport` and fill in the next departure and
    /// arrival after `requested_at`.
    ///
    /// # Errors
    /// Returns `ScheduleError::RouteMismatch` when the transport does not run
    /// between the shipment's warehouses, and any error the resolver raises.
    pub fn schedule(self, transport: Transport) -> Result<Self> {
        if transport.origin != self.origin || transport.destination != self.destination {
            return Err(ScheduleError::RouteMismatch {
                origin: self.origin,
                destination: self.destination,
                transport_origin: transport.origin,
                transport_destination: transport.destination,
            });
        }

        let slot = transport.next_available(self.requested_at)?;
        debug!(id = self.id, departure = %slot.departure, "shipment scheduled");

        Ok(Self {
            transport: Some(transport),
            departure: Some(slot.departure),
            arrival: Some(slot.arrival),
            ..self
        })
    }

    pub fn is_scheduled(&self) -> bool {
        self.departure.is_some()
    }
}

impl fmt::Display for Shipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Shipment #{} {}->{} requested {}",
            self.id, self.origin, self.destination, self.requested_at
        )?;
        match (self.departure, self.arrival) {
            (Some(departure), Some(arrival)) => {
                write!(f, ", departs {}, arrives {}", departure, arrival)?;
            }
            _ => f.write_str(", unscheduled")?,
        }
        if let Some(transport) = &self.transport {
            write!(f, " via {}", transport.periodicity)?;
        }
        Ok(())
    }
}
