// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and rule validation for the Tiketto ticketing backend.
//!
//! This crate defines the vocabulary of the reservation subsystem: the
//! reservation state machine, ticket admission states, the closed set of
//! event kinds, and validated value types for externally supplied input.
//! It has no knowledge of persistence or transport; every rule expressed
//! here is pure and deterministic.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use types::{AdmissionState, ClientRef, EventKind, ReservationState, TicketCount};
pub use validation::{validate_capacity, validate_ticket_count};
