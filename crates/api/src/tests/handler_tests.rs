// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Handler-level tests: argument validation, company scoping, and
//! error translation.

use super::seed_movie_fixture;
use crate::error::ApiError;
use crate::handlers::{
    abandon_reservation, admit_ticket, cancel_reservation, confirm_reservation,
    create_reservation, get_event_availability, get_reservation_history, get_ticket,
    list_event_offerings,
};
use crate::request_response::CreateReservationRequest;

fn reservation_request(event_id: i64, client_id: &str, num_tickets: i32) -> CreateReservationRequest {
    CreateReservationRequest {
        event_id,
        client_id: String::from(client_id),
        num_tickets,
    }
}

#[test]
fn test_availability_for_owned_event() {
    let mut fixture = seed_movie_fixture(10);
    let seller = fixture.seller();

    let availability =
        get_event_availability(&mut fixture.persistence, &seller, fixture.event_id).unwrap();
    assert_eq!(availability.capacity, 10);
    assert_eq!(availability.reserved, 0);
    assert_eq!(availability.available, 10);
}

#[test]
fn test_availability_scoped_to_company() {
    let mut fixture = seed_movie_fixture(10);
    let rival = fixture.rival_seller();

    let err =
        get_event_availability(&mut fixture.persistence, &rival, fixture.event_id).unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));
}

#[test]
fn test_availability_for_missing_event_not_found() {
    let mut fixture = seed_movie_fixture(10);
    let seller = fixture.seller();

    let err = get_event_availability(&mut fixture.persistence, &seller, 9999).unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_offerings_listed_with_details() {
    let mut fixture = seed_movie_fixture(10);
    let seller = fixture.seller();

    let response =
        list_event_offerings(&mut fixture.persistence, &seller, fixture.venue_id, "movie")
            .unwrap();
    assert_eq!(response.venue_id, fixture.venue_id);
    assert_eq!(response.offerings.len(), 1);
    assert_eq!(response.offerings[0].name, "Evening Show");
    assert!(
        response.offerings[0]
            .details
            .contains(&(String::from("film_title"), String::from("The Long Reel")))
    );
}

#[test]
fn test_offerings_reject_unknown_kind() {
    let mut fixture = seed_movie_fixture(10);
    let seller = fixture.seller();

    let err = list_event_offerings(&mut fixture.persistence, &seller, fixture.venue_id, "opera")
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidArgument { ref field, .. } if field == "kind"));
}

#[test]
fn test_offerings_scoped_to_company() {
    let mut fixture = seed_movie_fixture(10);
    let rival = fixture.rival_seller();

    let err = list_event_offerings(&mut fixture.persistence, &rival, fixture.venue_id, "movie")
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));
}

#[test]
fn test_create_reservation_rejects_zero_count_before_ledger() {
    let mut fixture = seed_movie_fixture(10);
    let seller = fixture.seller();

    let err = create_reservation(
        &mut fixture.persistence,
        &seller,
        &reservation_request(fixture.event_id, "client-a", 0),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::InvalidArgument { ref field, .. } if field == "num_tickets"));

    // The ledger was never touched
    let availability =
        get_event_availability(&mut fixture.persistence, &seller, fixture.event_id).unwrap();
    assert_eq!(availability.reserved, 0);
}

#[test]
fn test_create_reservation_rejects_empty_client() {
    let mut fixture = seed_movie_fixture(10);
    let seller = fixture.seller();

    let err = create_reservation(
        &mut fixture.persistence,
        &seller,
        &reservation_request(fixture.event_id, "   ", 1),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::InvalidArgument { ref field, .. } if field == "client_id"));
}

#[test]
fn test_create_reservation_scoped_to_company() {
    let mut fixture = seed_movie_fixture(10);
    let rival = fixture.rival_seller();

    let err = create_reservation(
        &mut fixture.persistence,
        &rival,
        &reservation_request(fixture.event_id, "client-a", 1),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));
}

#[test]
fn test_create_reservation_translates_capacity_exceeded() {
    let mut fixture = seed_movie_fixture(3);
    let seller = fixture.seller();

    create_reservation(
        &mut fixture.persistence,
        &seller,
        &reservation_request(fixture.event_id, "client-a", 2),
    )
    .unwrap();

    let err = create_reservation(
        &mut fixture.persistence,
        &seller,
        &reservation_request(fixture.event_id, "client-b", 2),
    )
    .unwrap_err();
    assert_eq!(
        err,
        ApiError::CapacityExceeded {
            requested: 2,
            available: 1,
        }
    );
}

#[test]
fn test_confirm_returns_issued_tickets() {
    let mut fixture = seed_movie_fixture(10);
    let seller = fixture.seller();

    let reservation = create_reservation(
        &mut fixture.persistence,
        &seller,
        &reservation_request(fixture.event_id, "client-a", 3),
    )
    .unwrap();
    assert_eq!(reservation.state, "PENDING_CONFIRM");

    let confirmation =
        confirm_reservation(&mut fixture.persistence, &seller, reservation.reservation_id)
            .unwrap();
    assert_eq!(confirmation.reservation.state, "CONFIRMED");
    assert_eq!(confirmation.ticket_ids.len(), 3);
}

#[test]
fn test_confirm_twice_is_state_conflict() {
    let mut fixture = seed_movie_fixture(10);
    let seller = fixture.seller();

    let reservation = create_reservation(
        &mut fixture.persistence,
        &seller,
        &reservation_request(fixture.event_id, "client-a", 1),
    )
    .unwrap();
    confirm_reservation(&mut fixture.persistence, &seller, reservation.reservation_id).unwrap();

    let err =
        confirm_reservation(&mut fixture.persistence, &seller, reservation.reservation_id)
            .unwrap_err();
    assert!(matches!(err, ApiError::StateConflict { .. }));
}

#[test]
fn test_reservation_operations_scoped_to_company() {
    let mut fixture = seed_movie_fixture(10);
    let seller = fixture.seller();
    let rival = fixture.rival_seller();

    let reservation = create_reservation(
        &mut fixture.persistence,
        &seller,
        &reservation_request(fixture.event_id, "client-a", 1),
    )
    .unwrap();

    let err =
        confirm_reservation(&mut fixture.persistence, &rival, reservation.reservation_id)
            .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));

    let err = cancel_reservation(&mut fixture.persistence, &rival, reservation.reservation_id)
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));
}

#[test]
fn test_abandon_releases_hold() {
    let mut fixture = seed_movie_fixture(5);
    let seller = fixture.seller();

    let reservation = create_reservation(
        &mut fixture.persistence,
        &seller,
        &reservation_request(fixture.event_id, "client-a", 5),
    )
    .unwrap();
    let abandoned =
        abandon_reservation(&mut fixture.persistence, &seller, reservation.reservation_id)
            .unwrap();
    assert_eq!(abandoned.state, "NEVER_CONFIRMED");

    let availability =
        get_event_availability(&mut fixture.persistence, &seller, fixture.event_id).unwrap();
    assert_eq!(availability.available, 5);
}

#[test]
fn test_history_trail_exposed() {
    let mut fixture = seed_movie_fixture(10);
    let seller = fixture.seller();

    let reservation = create_reservation(
        &mut fixture.persistence,
        &seller,
        &reservation_request(fixture.event_id, "client-a", 1),
    )
    .unwrap();
    confirm_reservation(&mut fixture.persistence, &seller, reservation.reservation_id).unwrap();

    let history =
        get_reservation_history(&mut fixture.persistence, &seller, reservation.reservation_id)
            .unwrap();
    assert_eq!(history.transitions.len(), 2);
    assert_eq!(history.transitions[0].previous_state, None);
    assert_eq!(history.transitions[0].new_state, "PENDING_CONFIRM");
    assert_eq!(history.transitions[1].new_state, "CONFIRMED");
}

#[test]
fn test_ticket_rendered_in_venue_local_time() {
    let mut fixture = seed_movie_fixture(10);
    let seller = fixture.seller();

    let reservation = create_reservation(
        &mut fixture.persistence,
        &seller,
        &reservation_request(fixture.event_id, "client-a", 1),
    )
    .unwrap();
    let confirmation =
        confirm_reservation(&mut fixture.persistence, &seller, reservation.reservation_id)
            .unwrap();

    let ticket = get_ticket(&mut fixture.persistence, confirmation.ticket_ids[0]).unwrap();
    assert_eq!(ticket.ticket_label, "#1");
    assert_eq!(ticket.event_name, "Evening Show");
    assert_eq!(ticket.venue_name, "Grand Hall");
    // 2030-06-01 20:00 UTC shifted by -300 minutes
    assert_eq!(ticket.event_date, "01/06/2030");
    assert_eq!(ticket.event_time, "15:00");
    assert_eq!(ticket.admission_state, "VALID");
}

#[test]
fn test_get_missing_ticket_not_found() {
    let mut fixture = seed_movie_fixture(10);

    let err = get_ticket(&mut fixture.persistence, 9999).unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_admit_then_readmit_is_conflict() {
    let mut fixture = seed_movie_fixture(10);
    let seller = fixture.seller();

    let reservation = create_reservation(
        &mut fixture.persistence,
        &seller,
        &reservation_request(fixture.event_id, "client-a", 1),
    )
    .unwrap();
    let confirmation =
        confirm_reservation(&mut fixture.persistence, &seller, reservation.reservation_id)
            .unwrap();
    let ticket_id = confirmation.ticket_ids[0];

    let admitted = admit_ticket(&mut fixture.persistence, ticket_id).unwrap();
    assert_eq!(admitted.admission_state, "ADMITTED");
    assert!(admitted.admitted_at.is_some());

    let err = admit_ticket(&mut fixture.persistence, ticket_id).unwrap_err();
    assert_eq!(err, ApiError::AlreadyAdmitted { ticket_id });
}

#[test]
fn test_admit_voided_ticket_is_conflict() {
    let mut fixture = seed_movie_fixture(10);
    let seller = fixture.seller();

    let reservation = create_reservation(
        &mut fixture.persistence,
        &seller,
        &reservation_request(fixture.event_id, "client-a", 1),
    )
    .unwrap();
    let confirmation =
        confirm_reservation(&mut fixture.persistence, &seller, reservation.reservation_id)
            .unwrap();
    cancel_reservation(&mut fixture.persistence, &seller, reservation.reservation_id).unwrap();

    let err = admit_ticket(&mut fixture.persistence, confirmation.ticket_ids[0]).unwrap_err();
    assert!(matches!(err, ApiError::StateConflict { .. }));
}
