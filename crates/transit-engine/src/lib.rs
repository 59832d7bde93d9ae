//! # transit-engine
//!
//! Deterministic next-departure resolution for recurring transport links
//! between warehouses.
//!
//! A transport runs daily, weekly (on a given weekday) or monthly (on a given
//! day of the month) at a fixed clock time. Given the instant a shipment is
//! requested, the engine finds the first departure that leaves strictly after
//! the transport's preparation lead time, and the arrival that follows it.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use transit_engine::{Periodicity, Transport};
//!
//! let anchor = NaiveDate::from_ymd_opt(2025, 11, 2).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let weekly = Transport::new(1, 2, anchor, 120, 180, Periodicity::Weekly, Some(2), None).unwrap();
//!
//! // Saturday 10:00 -> Wednesday 09:00, arriving at 12:00.
//! let requested = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
//! let slot = weekly.next_available(requested).unwrap();
//! assert_eq!(slot.departure.to_string(), "2025-11-05 09:00:00");
//! assert_eq!(slot.arrival.to_string(), "2025-11-05 12:00:00");
//! ```
//!
//! ## Modules
//!
//! - [`periodicity`]: Daily / weekly / monthly recurrence classes
//! - [`transport`]: Transport records: validation, parsing, RRULE form
//! - [`resolver`]: Next departure and upcoming departures
//! - [`shipment`]: Shipments and their explicit id source
//! - [`error`]: Error types

pub mod error;
pub mod periodicity;
pub mod resolver;
pub mod shipment;
pub mod transport;

pub use error::ScheduleError;
pub use periodicity::Periodicity;
pub use resolver::{next_available, upcoming, TransportSlot};
pub use shipment::{Shipment, ShipmentIds};
pub use transport::Transport;
