// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for ticketing operations.
//!
//! Each handler validates its arguments against the domain types
//! before touching the ledger, enforces company scoping for
//! session-authenticated operations, and translates lower-layer
//! errors into the API contract.

use std::str::FromStr;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, PrimitiveDateTime};
use tiketto_domain::{ClientRef, EventKind, TicketCount, validate_ticket_count};
use tiketto_persistence::{Persistence, ReservationData, TicketData};
use tracing::{debug, info};

use crate::auth::{
    AuthenticatedUser, AuthenticationService, AuthorizationService, TIMESTAMP_FORMAT,
};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    AdmitTicketResponse, AvailabilityResponse, ConfirmReservationResponse,
    CreateReservationRequest, HistoryEntryInfo, ListOfferingsResponse, LoginRequest, LoginResponse,
    OfferingInfo, ReservationHistoryResponse, ReservationResponse, TicketResponse,
};

/// Display date format for ticket rendering, venue-local.
const TICKET_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day]/[month]/[year]");

/// Display time format for ticket rendering, venue-local.
const TICKET_TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

/// Authenticates a business user and opens a session.
///
/// # Errors
///
/// Returns an error if the credentials are not valid.
pub fn login(
    persistence: &mut Persistence,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (session_token, user, user_data) =
        AuthenticationService::login(persistence, &request.login_name, &request.password)?;

    info!(user_id = user.user_id, "Business user logged in");

    Ok(LoginResponse {
        session_token,
        display_name: user_data.display_name,
        role: user.role.as_str().to_string(),
    })
}

/// Closes a session.
///
/// # Errors
///
/// Returns an error if the session cannot be deleted.
pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

/// Returns the availability accounting for an event.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the event does not exist and
/// `Unauthorized` if it belongs to another company.
pub fn get_event_availability(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    event_id: i64,
) -> Result<AvailabilityResponse, ApiError> {
    ensure_event_access(persistence, user, event_id, "get_event_availability")?;

    let availability = persistence
        .event_availability(event_id)
        .map_err(translate_persistence_error)?;

    Ok(AvailabilityResponse {
        event_id: availability.event_id,
        capacity: availability.capacity,
        reserved: availability.reserved,
        available: availability.available,
    })
}

/// Lists the open offerings of a kind at a venue.
///
/// # Errors
///
/// Returns `InvalidArgument` for an unknown kind, `ResourceNotFound`
/// for an unknown venue, and `Unauthorized` if the venue belongs to
/// another company.
pub fn list_event_offerings(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    venue_id: i64,
    kind: &str,
) -> Result<ListOfferingsResponse, ApiError> {
    let kind: EventKind = EventKind::from_str(kind).map_err(translate_domain_error)?;

    let venue = persistence
        .get_venue(venue_id)
        .map_err(translate_persistence_error)?;
    AuthorizationService::authorize_company_access(
        user,
        venue.company_id,
        "list_event_offerings",
    )?;

    let offerings = persistence
        .list_event_offerings(venue_id, kind)
        .map_err(translate_persistence_error)?;

    debug!(
        venue_id,
        count = offerings.len(),
        "Listed open offerings"
    );

    Ok(ListOfferingsResponse {
        venue_id,
        offerings: offerings
            .into_iter()
            .map(|o| OfferingInfo {
                event_id: o.event_id,
                event_kind: o.event_kind,
                name: o.name,
                starts_at: o.starts_at,
                capacity: o.capacity,
                available: o.available,
                details: o.details,
            })
            .collect(),
    })
}

/// Creates a reservation in `PENDING_CONFIRM`.
///
/// Argument validation happens before the ledger is touched: an
/// invalid ticket count or client identifier never reaches the
/// database.
///
/// # Errors
///
/// Returns `InvalidArgument` for a non-positive count or malformed
/// client identifier, `ResourceNotFound` for an unknown event,
/// `Unauthorized` for an event of another company, and
/// `CapacityExceeded` if the event cannot accommodate the count.
pub fn create_reservation(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    request: &CreateReservationRequest,
) -> Result<ReservationResponse, ApiError> {
    let count: TicketCount =
        validate_ticket_count(request.num_tickets).map_err(translate_domain_error)?;
    let client: ClientRef = ClientRef::new(&request.client_id).map_err(translate_domain_error)?;

    ensure_event_access(persistence, user, request.event_id, "create_reservation")?;

    let reservation = persistence
        .create_reservation(request.event_id, &client, count)
        .map_err(translate_persistence_error)?;

    info!(
        reservation_id = reservation.reservation_id,
        event_id = reservation.event_id,
        num_tickets = reservation.num_tickets,
        "Created reservation"
    );

    Ok(to_reservation_response(reservation))
}

/// Confirms a pending reservation, issuing its tickets.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the reservation does not exist,
/// `Unauthorized` if it belongs to another company, and
/// `StateConflict` if it is not pending.
pub fn confirm_reservation(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    reservation_id: i64,
) -> Result<ConfirmReservationResponse, ApiError> {
    ensure_reservation_access(persistence, user, reservation_id, "confirm_reservation")?;

    let confirmation = persistence
        .confirm_reservation(reservation_id)
        .map_err(translate_persistence_error)?;

    info!(
        reservation_id,
        tickets = confirmation.ticket_ids.len(),
        "Confirmed reservation"
    );

    Ok(ConfirmReservationResponse {
        reservation: to_reservation_response(confirmation.reservation),
        ticket_ids: confirmation.ticket_ids,
    })
}

/// Abandons a pending reservation, releasing its capacity hold.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the reservation does not exist,
/// `Unauthorized` if it belongs to another company, and
/// `StateConflict` if it is not pending.
pub fn abandon_reservation(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    reservation_id: i64,
) -> Result<ReservationResponse, ApiError> {
    ensure_reservation_access(persistence, user, reservation_id, "abandon_reservation")?;

    let reservation = persistence
        .abandon_reservation(reservation_id)
        .map_err(translate_persistence_error)?;

    info!(reservation_id, "Abandoned reservation");

    Ok(to_reservation_response(reservation))
}

/// Cancels a reservation from any active state.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the reservation does not exist,
/// `Unauthorized` if it belongs to another company, and
/// `StateConflict` if it is already terminal.
pub fn cancel_reservation(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    reservation_id: i64,
) -> Result<ReservationResponse, ApiError> {
    ensure_reservation_access(persistence, user, reservation_id, "cancel_reservation")?;

    let reservation = persistence
        .cancel_reservation(reservation_id)
        .map_err(translate_persistence_error)?;

    info!(reservation_id, "Canceled reservation");

    Ok(to_reservation_response(reservation))
}

/// Returns a reservation's ordered transition history.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the reservation does not exist and
/// `Unauthorized` if it belongs to another company.
pub fn get_reservation_history(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    reservation_id: i64,
) -> Result<ReservationHistoryResponse, ApiError> {
    ensure_reservation_access(persistence, user, reservation_id, "get_reservation_history")?;

    let transitions = persistence
        .reservation_history(reservation_id)
        .map_err(translate_persistence_error)?;

    Ok(ReservationHistoryResponse {
        reservation_id,
        transitions: transitions
            .into_iter()
            .map(|t| HistoryEntryInfo {
                previous_state: t.previous_state,
                new_state: t.new_state,
                transitioned_at: t.transitioned_at,
            })
            .collect(),
    })
}

/// Renders a ticket for display.
///
/// The event timestamp is shifted into the venue's local time before
/// the date and time are split for display. Gate devices are trusted
/// hardware, so no session is required.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the ticket does not exist.
pub fn get_ticket(
    persistence: &mut Persistence,
    ticket_id: i64,
) -> Result<TicketResponse, ApiError> {
    let ticket = persistence
        .get_ticket(ticket_id)
        .map_err(translate_persistence_error)?;

    to_ticket_response(ticket)
}

/// Consumes a ticket at the admission gate.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the ticket does not exist,
/// `AlreadyAdmitted` if it was consumed earlier, and `StateConflict`
/// if it was voided by cancellation.
pub fn admit_ticket(
    persistence: &mut Persistence,
    ticket_id: i64,
) -> Result<AdmitTicketResponse, ApiError> {
    let ticket = persistence
        .admit_ticket(ticket_id)
        .map_err(translate_persistence_error)?;

    info!(ticket_id, "Admitted ticket");

    Ok(AdmitTicketResponse {
        ticket_id: ticket.ticket_id,
        admission_state: ticket.admission_state,
        admitted_at: ticket.admitted_at,
    })
}

/// Verifies that an event belongs to the user's company.
fn ensure_event_access(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    event_id: i64,
    action: &str,
) -> Result<(), ApiError> {
    let owner_company_id: i64 = persistence
        .event_owner_company(event_id)
        .map_err(translate_persistence_error)?;
    AuthorizationService::authorize_company_access(user, owner_company_id, action)?;
    Ok(())
}

/// Loads a reservation and verifies its event belongs to the user's company.
fn ensure_reservation_access(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    reservation_id: i64,
    action: &str,
) -> Result<ReservationData, ApiError> {
    let reservation = persistence
        .get_reservation(reservation_id)
        .map_err(translate_persistence_error)?;
    ensure_event_access(persistence, user, reservation.event_id, action)?;
    Ok(reservation)
}

fn to_reservation_response(reservation: ReservationData) -> ReservationResponse {
    ReservationResponse {
        reservation_id: reservation.reservation_id,
        event_id: reservation.event_id,
        client_id: reservation.client_id,
        num_tickets: reservation.num_tickets,
        state: reservation.state,
    }
}

/// Renders the stored UTC event timestamp in the venue's local time.
fn to_ticket_response(ticket: TicketData) -> Result<TicketResponse, ApiError> {
    let starts_at: PrimitiveDateTime =
        PrimitiveDateTime::parse(&ticket.event_starts_at, &TIMESTAMP_FORMAT).map_err(|e| {
            ApiError::Internal {
                message: format!("Failed to parse event start time: {e}"),
            }
        })?;
    let local: PrimitiveDateTime =
        starts_at + Duration::minutes(i64::from(ticket.venue_utc_offset_minutes));

    let event_date: String =
        local
            .format(&TICKET_DATE_FORMAT)
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to format event date: {e}"),
            })?;
    let event_time: String =
        local
            .format(&TICKET_TIME_FORMAT)
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to format event time: {e}"),
            })?;

    Ok(TicketResponse {
        ticket_id: ticket.ticket_id,
        reservation_id: ticket.reservation_id,
        ticket_label: format!("#{}", ticket.ticket_num),
        event_name: ticket.event_name,
        venue_name: ticket.venue_name,
        event_date,
        event_time,
        admission_state: ticket.admission_state,
    })
}
