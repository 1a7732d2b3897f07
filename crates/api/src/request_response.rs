// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! These DTOs are distinct from domain and persistence types and
//! represent the API contract.

use serde::{Deserialize, Serialize};

/// API request to authenticate a business user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// The login name (case-insensitive).
    pub login_name: String,
    /// The password.
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The session token to present as `Authorization: Bearer <token>`.
    pub session_token: String,
    /// The user's display name.
    pub display_name: String,
    /// The user's role.
    pub role: String,
}

/// Availability accounting for a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    /// The event.
    pub event_id: i64,
    /// The fixed capacity of the event.
    pub capacity: i32,
    /// Tickets held by reservations in active states.
    pub reserved: i64,
    /// `capacity - reserved`.
    pub available: i64,
}

/// One open offering at a venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferingInfo {
    /// The event.
    pub event_id: i64,
    /// The event kind (`movie` or `concert`).
    pub event_kind: String,
    /// The event's display name.
    pub name: String,
    /// UTC start timestamp.
    pub starts_at: String,
    /// The fixed capacity.
    pub capacity: i32,
    /// Seats still available.
    pub available: i64,
    /// Kind-specific attributes as key/value pairs.
    pub details: Vec<(String, String)>,
}

/// API response for listing offerings at a venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOfferingsResponse {
    /// The venue.
    pub venue_id: i64,
    /// The open offerings, soonest first.
    pub offerings: Vec<OfferingInfo>,
}

/// API request to create a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    /// The event to reserve against.
    pub event_id: i64,
    /// Externally-supplied client identifier.
    pub client_id: String,
    /// Number of tickets requested.
    pub num_tickets: i32,
}

/// A reservation as presented to API consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationResponse {
    /// The reservation.
    pub reservation_id: i64,
    /// The event reserved against.
    pub event_id: i64,
    /// The client holding the reservation.
    pub client_id: String,
    /// Number of tickets held.
    pub num_tickets: i32,
    /// Current lifecycle state.
    pub state: String,
}

/// API response for a successful confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmReservationResponse {
    /// The confirmed reservation.
    pub reservation: ReservationResponse,
    /// IDs of the tickets issued by this confirmation.
    pub ticket_ids: Vec<i64>,
}

/// One entry in a reservation's transition history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntryInfo {
    /// The state before the transition. `None` for the creation entry.
    pub previous_state: Option<String>,
    /// The state after the transition.
    pub new_state: String,
    /// When the transition happened (UTC).
    pub transitioned_at: String,
}

/// API response for a reservation's transition history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationHistoryResponse {
    /// The reservation.
    pub reservation_id: i64,
    /// The ordered transition trail, oldest first.
    pub transitions: Vec<HistoryEntryInfo>,
}

/// A ticket rendered for display at the gate or on a stub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketResponse {
    /// The ticket.
    pub ticket_id: i64,
    /// The reservation this ticket belongs to.
    pub reservation_id: i64,
    /// Display label, e.g. `#3`.
    pub ticket_label: String,
    /// The event's display name.
    pub event_name: String,
    /// The venue's display name.
    pub venue_name: String,
    /// Event date in the venue's local time, `dd/mm/YYYY`.
    pub event_date: String,
    /// Event time in the venue's local time, `HH:MM`.
    pub event_time: String,
    /// Current admission state.
    pub admission_state: String,
}

/// API response for a successful admission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmitTicketResponse {
    /// The admitted ticket.
    pub ticket_id: i64,
    /// The new admission state (`ADMITTED`).
    pub admission_state: String,
    /// When the ticket was consumed (UTC).
    pub admitted_at: Option<String>,
}
