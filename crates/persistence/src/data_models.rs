// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Serializable representation of a venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueData {
    pub venue_id: i64,
    pub company_id: i64,
    pub name: String,
    pub city: String,
    pub utc_offset_minutes: i32,
}

/// Serializable representation of an event offering entry.
///
/// An offering is an event whose reservation window is still open,
/// joined with the kind-specific characteristics for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferingData {
    pub event_id: i64,
    pub event_kind: String,
    pub name: String,
    pub starts_at: String,
    pub capacity: i32,
    pub available: i64,
    /// Kind-specific attributes (film title and rating, or artist and genre).
    pub details: Vec<(String, String)>,
}

/// Availability accounting for a single event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AvailabilityData {
    pub event_id: i64,
    pub capacity: i32,
    /// Sum of ticket counts over reservations in active states.
    pub reserved: i64,
    /// `capacity - reserved`. Negative only if the oversell invariant
    /// has been violated; reported as-is, never clamped.
    pub available: i64,
}

/// Serializable representation of a reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationData {
    pub reservation_id: i64,
    pub event_id: i64,
    pub client_id: String,
    pub num_tickets: i32,
    pub state: String,
    pub created_at: String,
    pub updated_at: String,
}

/// One entry in a reservation's transition history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationHistoryData {
    pub history_id: i64,
    pub reservation_id: i64,
    pub previous_state: Option<String>,
    pub new_state: String,
    pub transitioned_at: String,
}

/// Serializable representation of an issued ticket, joined with the
/// event and venue rows needed to render it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketData {
    pub ticket_id: i64,
    pub reservation_id: i64,
    pub event_id: i64,
    pub ticket_num: i32,
    pub admission_state: String,
    pub issued_at: String,
    pub admitted_at: Option<String>,
    pub event_name: String,
    pub event_starts_at: String,
    pub venue_name: String,
    pub venue_utc_offset_minutes: i32,
}

/// Serializable representation of a business user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessUserData {
    pub user_id: i64,
    pub company_id: i64,
    pub login_name: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: String,
    pub is_disabled: bool,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

/// Serializable representation of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub user_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

/// Result of confirming a reservation: the updated reservation plus the
/// tickets issued inside the same transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationData {
    pub reservation: ReservationData,
    pub ticket_ids: Vec<i64>,
}
