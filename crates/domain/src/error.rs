// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::ReservationState;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Requested ticket count is zero or negative.
    InvalidTicketCount {
        /// The invalid count value.
        count: i32,
    },
    /// Event capacity is negative.
    InvalidCapacity {
        /// The invalid capacity value.
        capacity: i32,
    },
    /// Client identifier is empty or malformed.
    InvalidClientRef(String),
    /// Reservation state string does not name a known state.
    InvalidReservationState(String),
    /// Admission state string does not name a known state.
    InvalidAdmissionState(String),
    /// Event kind string does not name a known kind.
    InvalidEventKind(String),
    /// The requested state transition is not legal.
    IllegalTransition {
        /// The state the reservation is currently in.
        from: ReservationState,
        /// The state the transition targeted.
        to: ReservationState,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTicketCount { count } => {
                write!(f, "Invalid ticket count: {count}. Must be greater than 0")
            }
            Self::InvalidCapacity { capacity } => {
                write!(f, "Invalid capacity: {capacity}. Must be 0 or greater")
            }
            Self::InvalidClientRef(msg) => write!(f, "Invalid client identifier: {msg}"),
            Self::InvalidReservationState(value) => {
                write!(f, "Unknown reservation state: '{value}'")
            }
            Self::InvalidAdmissionState(value) => {
                write!(f, "Unknown admission state: '{value}'")
            }
            Self::InvalidEventKind(value) => write!(f, "Unknown event kind: '{value}'"),
            Self::IllegalTransition { from, to } => {
                write!(f, "Illegal reservation transition: {from} -> {to}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
