// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Represents the lifecycle state of a reservation.
///
/// A reservation starts in `PendingConfirm` and moves through exactly one
/// transition into a terminal state. `PendingConfirm` and `Confirmed` are
/// the *active* states: they hold capacity against the event. `Canceled`
/// and `NeverConfirmed` release their hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ReservationState {
    /// Initial state after creation. Holds capacity, awaiting confirmation.
    #[default]
    PendingConfirm,
    /// Terminal success state. Tickets have been issued. Still holds capacity.
    Confirmed,
    /// Terminal abandoned state. The confirmation window lapsed.
    NeverConfirmed,
    /// Terminal withdrawn state. Capacity released; issued tickets voided.
    Canceled,
}

impl FromStr for ReservationState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING_CONFIRM" => Ok(Self::PendingConfirm),
            "CONFIRMED" => Ok(Self::Confirmed),
            "NEVER_CONFIRMED" => Ok(Self::NeverConfirmed),
            "CANCELED" => Ok(Self::Canceled),
            _ => Err(DomainError::InvalidReservationState(s.to_string())),
        }
    }
}

impl std::fmt::Display for ReservationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ReservationState {
    /// Converts this state to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PendingConfirm => "PENDING_CONFIRM",
            Self::Confirmed => "CONFIRMED",
            Self::NeverConfirmed => "NEVER_CONFIRMED",
            Self::Canceled => "CANCELED",
        }
    }

    /// Returns whether this state still holds capacity against the event.
    ///
    /// The availability ledger sums ticket counts over reservations in
    /// active states only.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::PendingConfirm | Self::Confirmed)
    }

    /// Returns whether this state is terminal.
    ///
    /// No transition out of a terminal state is legal.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::NeverConfirmed | Self::Canceled)
    }

    /// Checks if a transition from this state to another is valid.
    ///
    /// Valid transitions are:
    /// - `PendingConfirm` → `Confirmed`
    /// - `PendingConfirm` → `NeverConfirmed`
    /// - `PendingConfirm` → `Canceled`
    /// - `Confirmed` → `Canceled`
    ///
    /// Cancellation is legal from any active state; confirmation and
    /// abandonment only from `PendingConfirm`.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::PendingConfirm, Self::Confirmed)
                | (Self::PendingConfirm, Self::NeverConfirmed)
                | (Self::PendingConfirm | Self::Confirmed, Self::Canceled)
        )
    }

    /// The set of active states, in stored string form.
    ///
    /// Used by the persistence layer to build the availability sum filter.
    #[must_use]
    pub const fn active_states() -> [&'static str; 2] {
        ["PENDING_CONFIRM", "CONFIRMED"]
    }
}

/// Represents the admission state of an issued ticket.
///
/// Tickets are issued `Valid`, consumed exactly once at the gate
/// (`Admitted`), or voided when their reservation is canceled (`Invalid`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AdmissionState {
    /// The ticket grants admission.
    #[default]
    Valid,
    /// The ticket has been consumed at the gate. Irreversible.
    Admitted,
    /// The ticket was voided before use (reservation canceled).
    Invalid,
}

impl FromStr for AdmissionState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VALID" => Ok(Self::Valid),
            "ADMITTED" => Ok(Self::Admitted),
            "INVALID" => Ok(Self::Invalid),
            _ => Err(DomainError::InvalidAdmissionState(s.to_string())),
        }
    }
}

impl std::fmt::Display for AdmissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AdmissionState {
    /// Converts this state to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "VALID",
            Self::Admitted => "ADMITTED",
            Self::Invalid => "INVALID",
        }
    }
}

/// The closed set of event kinds the system offers.
///
/// Each kind carries its own characteristics table in the persistence
/// layer. Dispatch over kinds is always through this enum; the kind string
/// supplied by a caller is parsed once at the boundary and never
/// interpolated into a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A scheduled movie showing.
    MovieShow,
    /// A live concert.
    Concert,
}

impl FromStr for EventKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(Self::MovieShow),
            "concert" => Ok(Self::Concert),
            _ => Err(DomainError::InvalidEventKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl EventKind {
    /// Converts this kind to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MovieShow => "movie",
            Self::Concert => "concert",
        }
    }
}

/// A validated ticket count for a reservation request.
///
/// Guaranteed to be strictly positive. Construction is the only place the
/// positivity rule lives; everything downstream may rely on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketCount(i32);

impl TicketCount {
    /// Creates a validated ticket count.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTicketCount` if `count` is zero or
    /// negative.
    pub const fn new(count: i32) -> Result<Self, DomainError> {
        if count < 1 {
            return Err(DomainError::InvalidTicketCount { count });
        }
        Ok(Self(count))
    }

    /// Returns the underlying count.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for TicketCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated externally supplied client identifier.
///
/// Clients are keyed by an identifier minted outside this system (a device
/// or loyalty id). The value is opaque but must be non-empty, bounded, and
/// free of control characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientRef(String);

impl ClientRef {
    /// Maximum accepted identifier length.
    const MAX_LEN: usize = 128;

    /// Creates a validated client reference.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidClientRef` if the identifier is empty,
    /// longer than 128 characters, or contains control characters.
    pub fn new(id: &str) -> Result<Self, DomainError> {
        let trimmed: &str = id.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidClientRef(String::from(
                "identifier is empty",
            )));
        }
        if trimmed.len() > Self::MAX_LEN {
            return Err(DomainError::InvalidClientRef(format!(
                "identifier exceeds {} characters",
                Self::MAX_LEN
            )));
        }
        if trimmed.chars().any(char::is_control) {
            return Err(DomainError::InvalidClientRef(String::from(
                "identifier contains control characters",
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the underlying identifier.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClientRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
