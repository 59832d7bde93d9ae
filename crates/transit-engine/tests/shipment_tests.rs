//! Tests for shipments and their id source.

use chrono::{NaiveDate, NaiveDateTime};
use transit_engine::{Periodicity, ScheduleError, Shipment, ShipmentIds, Transport};

fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, min, 0)
        .unwrap()
}

fn weekly_1_to_2() -> Transport {
    Transport::new(1, 2, at(2025, 11, 2, 9, 0), 120, 180, Periodicity::Weekly, Some(2), None).unwrap()
}

#[test]
fn ids_are_sequential_from_one() {
    let mut ids = ShipmentIds::new();
    let requested = at(2025, 9, 29, 10, 0);

    let a = Shipment::new(&mut ids, requested, 1, 2).unwrap();
    let b = Shipment::new(&mut ids, requested, 2, 3).unwrap();
    let c = Shipment::new(&mut ids, requested, 3, 4).unwrap();

    assert_eq!((a.id, b.id, c.id), (1, 2, 3));
    assert_eq!(ids.peek(), Some(4));
}

#[test]
fn independent_sources_do_not_share_state() {
    let mut first = ShipmentIds::default();
    let mut second = ShipmentIds::starting_at(100);
    let requested = at(2025, 9, 29, 10, 0);

    assert_eq!(Shipment::new(&mut first, requested, 1, 2).unwrap().id, 1);
    assert_eq!(Shipment::new(&mut second, requested, 1, 2).unwrap().id, 100);
    assert_eq!(Shipment::new(&mut first, requested, 1, 2).unwrap().id, 2);
}

#[test]
fn exhausted_source_refuses_instead_of_wrapping() {
    let mut ids = ShipmentIds::starting_at(u64::MAX);
    let requested = at(2025, 9, 29, 10, 0);

    assert_eq!(Shipment::new(&mut ids, requested, 1, 2).unwrap().id, u64::MAX);
    assert_eq!(ids.peek(), None);

    let err = Shipment::new(&mut ids, requested, 1, 2).unwrap_err();
    assert_eq!(err, ScheduleError::IdsExhausted);
    assert!(!err.is_configuration());
    assert_eq!(ids.next_id(), Err(ScheduleError::IdsExhausted));
}

#[test]
fn new_shipment_is_unscheduled() {
    let mut ids = ShipmentIds::new();
    let s = Shipment::new(&mut ids, at(2025, 9, 29, 10, 0), 1, 2).unwrap();

    assert!(!s.is_scheduled());
    assert_eq!(s.transport, None);
    assert_eq!(s.departure, None);
    assert_eq!(s.arrival, None);
    assert_eq!(s.to_string(), "Shipment #1 1->2 requested 2025-09-29 10:00:00, unscheduled");
}

#[test]
fn scheduling_fills_departure_and_arrival() {
    let mut ids = ShipmentIds::new();
    let s = Shipment::new(&mut ids, at(2025, 11, 1, 10, 0), 1, 2)
        .unwrap()
        .schedule(weekly_1_to_2())
        .expect("route matches");

    assert!(s.is_scheduled());
    assert_eq!(s.id, 1);
    assert_eq!(s.departure, Some(at(2025, 11, 5, 9, 0)));
    assert_eq!(s.arrival, Some(at(2025, 11, 5, 12, 0)));
    assert_eq!(s.transport, Some(weekly_1_to_2()));
    assert_eq!(
        s.to_string(),
        "Shipment #1 1->2 requested 2025-11-01 10:00:00, departs 2025-11-05 09:00:00, arrives 2025-11-05 12:00:00 via WEEKLY"
    );
}

#[test]
fn scheduling_on_another_route_is_rejected() {
    let mut ids = ShipmentIds::new();
    let err = Shipment::new(&mut ids, at(2025, 11, 1, 10, 0), 2, 1)
        .unwrap()
        .schedule(weekly_1_to_2())
        .unwrap_err();

    assert_eq!(
        err,
        ScheduleError::RouteMismatch {
            origin: 2,
            destination: 1,
            transport_origin: 1,
            transport_destination: 2,
        }
    );
    assert!(!err.is_configuration());
}

#[test]
fn scheduling_propagates_configuration_errors() {
    let mut broken = weekly_1_to_2();
    broken.day_of_week = None;

    let mut ids = ShipmentIds::new();
    let err = Shipment::new(&mut ids, at(2025, 11, 1, 10, 0), 1, 2)
        .unwrap()
        .schedule(broken)
        .unwrap_err();
    assert!(err.is_configuration());
}
