// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the reservation lifecycle and its history trail.

use super::{seed_movie_event, test_client, test_count};
use crate::PersistenceError;

#[test]
fn test_create_reservation_starts_pending() {
    let (mut persistence, event_id) = seed_movie_event(10);

    let reservation = persistence
        .create_reservation(event_id, &test_client("client-a"), test_count(2))
        .unwrap();

    assert_eq!(reservation.event_id, event_id);
    assert_eq!(reservation.client_id, "client-a");
    assert_eq!(reservation.num_tickets, 2);
    assert_eq!(reservation.state, "PENDING_CONFIRM");
}

#[test]
fn test_create_reservation_for_missing_event_not_found() {
    let (mut persistence, _event_id) = seed_movie_event(10);

    let err = persistence
        .create_reservation(9999, &test_client("client-a"), test_count(1))
        .unwrap_err();
    assert!(matches!(err, PersistenceError::NotFound(_)));
}

#[test]
fn test_repeat_client_reuses_registration() {
    let (mut persistence, event_id) = seed_movie_event(10);

    // Same identifier across two reservations must not collide
    persistence
        .create_reservation(event_id, &test_client("client-a"), test_count(1))
        .unwrap();
    persistence
        .create_reservation(event_id, &test_client("client-a"), test_count(1))
        .unwrap();

    let availability = persistence.event_availability(event_id).unwrap();
    assert_eq!(availability.reserved, 2);
}

#[test]
fn test_ensure_client_is_idempotent() {
    let (mut persistence, event_id) = seed_movie_event(10);

    persistence.ensure_client(&test_client("walk-up")).unwrap();
    persistence.ensure_client(&test_client("walk-up")).unwrap();

    // A pre-registered client reserves like any other
    let reservation = persistence
        .create_reservation(event_id, &test_client("walk-up"), test_count(1))
        .unwrap();
    assert_eq!(reservation.client_id, "walk-up");
}

#[test]
fn test_confirm_issues_one_ticket_per_seat() {
    let (mut persistence, event_id) = seed_movie_event(10);

    let reservation = persistence
        .create_reservation(event_id, &test_client("client-a"), test_count(3))
        .unwrap();
    let confirmation = persistence
        .confirm_reservation(reservation.reservation_id)
        .unwrap();

    assert_eq!(confirmation.reservation.state, "CONFIRMED");
    assert_eq!(confirmation.ticket_ids.len(), 3);

    let tickets = persistence
        .list_tickets_for_reservation(reservation.reservation_id)
        .unwrap();
    let nums: Vec<i32> = tickets.iter().map(|(_, num, _)| *num).collect();
    assert_eq!(nums, vec![1, 2, 3]);
    assert!(tickets.iter().all(|(_, _, state)| state == "VALID"));
}

#[test]
fn test_ticket_numbers_unique_across_reservations() {
    let (mut persistence, event_id) = seed_movie_event(10);

    let first = persistence
        .create_reservation(event_id, &test_client("client-a"), test_count(2))
        .unwrap();
    persistence
        .confirm_reservation(first.reservation_id)
        .unwrap();

    let second = persistence
        .create_reservation(event_id, &test_client("client-b"), test_count(2))
        .unwrap();
    persistence
        .confirm_reservation(second.reservation_id)
        .unwrap();

    let tickets = persistence
        .list_tickets_for_reservation(second.reservation_id)
        .unwrap();
    let nums: Vec<i32> = tickets.iter().map(|(_, num, _)| *num).collect();
    assert_eq!(nums, vec![3, 4]);
}

#[test]
fn test_confirm_twice_rejected() {
    let (mut persistence, event_id) = seed_movie_event(10);

    let reservation = persistence
        .create_reservation(event_id, &test_client("client-a"), test_count(1))
        .unwrap();
    persistence
        .confirm_reservation(reservation.reservation_id)
        .unwrap();

    let err = persistence
        .confirm_reservation(reservation.reservation_id)
        .unwrap_err();
    assert!(matches!(err, PersistenceError::StateConflict(_)));

    // No extra tickets from the rejected attempt
    let tickets = persistence
        .list_tickets_for_reservation(reservation.reservation_id)
        .unwrap();
    assert_eq!(tickets.len(), 1);
}

#[test]
fn test_confirm_after_abandon_rejected() {
    let (mut persistence, event_id) = seed_movie_event(10);

    let reservation = persistence
        .create_reservation(event_id, &test_client("client-a"), test_count(1))
        .unwrap();
    persistence
        .abandon_reservation(reservation.reservation_id)
        .unwrap();

    let err = persistence
        .confirm_reservation(reservation.reservation_id)
        .unwrap_err();
    assert!(matches!(err, PersistenceError::StateConflict(_)));
}

#[test]
fn test_confirm_missing_reservation_not_found() {
    let (mut persistence, _event_id) = seed_movie_event(10);

    let err = persistence.confirm_reservation(9999).unwrap_err();
    assert!(matches!(err, PersistenceError::NotFound(_)));
}

#[test]
fn test_abandon_frees_capacity_for_waiting_client() {
    let (mut persistence, event_id) = seed_movie_event(5);

    let holder = persistence
        .create_reservation(event_id, &test_client("client-a"), test_count(5))
        .unwrap();

    let err = persistence
        .create_reservation(event_id, &test_client("client-b"), test_count(1))
        .unwrap_err();
    assert!(matches!(err, PersistenceError::CapacityExceeded { .. }));

    persistence
        .abandon_reservation(holder.reservation_id)
        .unwrap();

    persistence
        .create_reservation(event_id, &test_client("client-b"), test_count(1))
        .unwrap();
}

#[test]
fn test_cancel_pending_reservation() {
    let (mut persistence, event_id) = seed_movie_event(10);

    let reservation = persistence
        .create_reservation(event_id, &test_client("client-a"), test_count(2))
        .unwrap();
    let canceled = persistence
        .cancel_reservation(reservation.reservation_id)
        .unwrap();

    assert_eq!(canceled.state, "CANCELED");
}

#[test]
fn test_cancel_confirmed_voids_unused_tickets() {
    let (mut persistence, event_id) = seed_movie_event(10);

    let reservation = persistence
        .create_reservation(event_id, &test_client("client-a"), test_count(2))
        .unwrap();
    persistence
        .confirm_reservation(reservation.reservation_id)
        .unwrap();
    persistence
        .cancel_reservation(reservation.reservation_id)
        .unwrap();

    let tickets = persistence
        .list_tickets_for_reservation(reservation.reservation_id)
        .unwrap();
    assert!(tickets.iter().all(|(_, _, state)| state == "INVALID"));
}

#[test]
fn test_cancel_twice_rejected() {
    let (mut persistence, event_id) = seed_movie_event(10);

    let reservation = persistence
        .create_reservation(event_id, &test_client("client-a"), test_count(1))
        .unwrap();
    persistence
        .cancel_reservation(reservation.reservation_id)
        .unwrap();

    let err = persistence
        .cancel_reservation(reservation.reservation_id)
        .unwrap_err();
    assert!(matches!(err, PersistenceError::StateConflict(_)));
}

#[test]
fn test_cancel_terminal_names_illegal_transition() {
    let (mut persistence, event_id) = seed_movie_event(10);

    let reservation = persistence
        .create_reservation(event_id, &test_client("client-a"), test_count(1))
        .unwrap();
    persistence
        .abandon_reservation(reservation.reservation_id)
        .unwrap();

    // The conflict message carries the rejected transition itself
    let err = persistence
        .cancel_reservation(reservation.reservation_id)
        .unwrap_err();
    match err {
        PersistenceError::StateConflict(msg) => {
            assert!(msg.contains("NEVER_CONFIRMED -> CANCELED"), "{msg}");
        }
        other => panic!("expected StateConflict, got {other:?}"),
    }
}

#[test]
fn test_cancel_missing_reservation_not_found() {
    let (mut persistence, _event_id) = seed_movie_event(10);

    let err = persistence.cancel_reservation(9999).unwrap_err();
    assert!(matches!(err, PersistenceError::NotFound(_)));
}

#[test]
fn test_history_trail_records_every_transition() {
    let (mut persistence, event_id) = seed_movie_event(10);

    let reservation = persistence
        .create_reservation(event_id, &test_client("client-a"), test_count(1))
        .unwrap();
    persistence
        .confirm_reservation(reservation.reservation_id)
        .unwrap();
    persistence
        .cancel_reservation(reservation.reservation_id)
        .unwrap();

    let history = persistence
        .reservation_history(reservation.reservation_id)
        .unwrap();
    assert_eq!(history.len(), 3);

    assert_eq!(history[0].previous_state, None);
    assert_eq!(history[0].new_state, "PENDING_CONFIRM");

    assert_eq!(
        history[1].previous_state.as_deref(),
        Some("PENDING_CONFIRM")
    );
    assert_eq!(history[1].new_state, "CONFIRMED");

    assert_eq!(history[2].previous_state.as_deref(), Some("CONFIRMED"));
    assert_eq!(history[2].new_state, "CANCELED");
}

#[test]
fn test_box_office_walkthrough() {
    // Capacity 5. Three clients compete for seats; the ledger must
    // account for every hold and release along the way.
    let (mut persistence, event_id) = seed_movie_event(5);

    let first = persistence
        .create_reservation(event_id, &test_client("client-a"), test_count(3))
        .unwrap();
    assert_eq!(
        persistence.event_availability(event_id).unwrap().available,
        2
    );

    let second = persistence
        .create_reservation(event_id, &test_client("client-b"), test_count(2))
        .unwrap();
    assert_eq!(
        persistence.event_availability(event_id).unwrap().available,
        0
    );

    let err = persistence
        .create_reservation(event_id, &test_client("client-c"), test_count(1))
        .unwrap_err();
    assert!(matches!(err, PersistenceError::CapacityExceeded { .. }));

    let confirmation = persistence.confirm_reservation(first.reservation_id).unwrap();
    assert_eq!(confirmation.ticket_ids.len(), 3);

    persistence
        .abandon_reservation(second.reservation_id)
        .unwrap();
    assert_eq!(
        persistence.event_availability(event_id).unwrap().available,
        2
    );

    persistence
        .create_reservation(event_id, &test_client("client-c"), test_count(1))
        .unwrap();
    assert_eq!(
        persistence.event_availability(event_id).unwrap().available,
        1
    );
}
