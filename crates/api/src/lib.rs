// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the ticketing backend.
//!
//! This crate sits between the HTTP server and the persistence layer.
//! It owns authentication (credentials and sessions), company-scoped
//! authorization, argument validation against the domain types, and
//! the translation of domain and persistence errors into the API
//! error contract.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedUser, AuthenticationService, AuthorizationService, Role};
pub use error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    abandon_reservation, admit_ticket, cancel_reservation, confirm_reservation,
    create_reservation, get_event_availability, get_reservation_history, get_ticket,
    list_event_offerings, login, logout,
};
pub use request_response::{
    AdmitTicketResponse, AvailabilityResponse, ConfirmReservationResponse,
    CreateReservationRequest, HistoryEntryInfo, ListOfferingsResponse, LoginRequest, LoginResponse,
    OfferingInfo, ReservationHistoryResponse, ReservationResponse, TicketResponse,
};
