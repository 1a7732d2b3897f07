// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use tiketto_domain::DomainError;
use tiketto_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The reason the action was refused.
        reason: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized { action, reason } => {
                write!(f, "Unauthorized: '{action}' refused: {reason}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent
/// the API contract. The server layer maps each variant to an HTTP
/// status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the user does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The reason the action was refused.
        reason: String,
    },
    /// Invalid input was provided.
    InvalidArgument {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The event cannot accommodate the requested ticket count.
    CapacityExceeded {
        /// The number of tickets requested.
        requested: i32,
        /// The number of seats still available.
        available: i64,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The ticket was already consumed at the gate.
    AlreadyAdmitted {
        /// The ticket that was presented twice.
        ticket_id: i64,
    },
    /// The resource exists but is not in a state that permits the
    /// requested operation.
    StateConflict {
        /// The type of resource in conflict.
        resource_type: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized { action, reason } => {
                write!(f, "Unauthorized: '{action}' refused: {reason}")
            }
            Self::InvalidArgument { field, message } => {
                write!(f, "Invalid argument for field '{field}': {message}")
            }
            Self::CapacityExceeded {
                requested,
                available,
            } => {
                write!(
                    f,
                    "Capacity exceeded: requested {requested} tickets, {available} available"
                )
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::AlreadyAdmitted { ticket_id } => {
                write!(f, "Ticket {ticket_id} was already admitted")
            }
            Self::StateConflict {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} state conflict: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized { action, reason } => Self::Unauthorized { action, reason },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidTicketCount { count } => ApiError::InvalidArgument {
            field: String::from("num_tickets"),
            message: format!("Invalid ticket count: {count}. Must be greater than 0"),
        },
        DomainError::InvalidCapacity { capacity } => ApiError::InvalidArgument {
            field: String::from("capacity"),
            message: format!("Invalid capacity: {capacity}. Must be 0 or greater"),
        },
        DomainError::InvalidClientRef(msg) => ApiError::InvalidArgument {
            field: String::from("client_id"),
            message: msg,
        },
        DomainError::InvalidEventKind(value) => ApiError::InvalidArgument {
            field: String::from("kind"),
            message: format!("Unknown event kind: '{value}'"),
        },
        // State strings only ever come from the database; an unknown
        // value at this point is stored-data corruption.
        DomainError::InvalidReservationState(value) => ApiError::Internal {
            message: format!("Stored reservation state is unknown: '{value}'"),
        },
        DomainError::InvalidAdmissionState(value) => ApiError::Internal {
            message: format!("Stored admission state is unknown: '{value}'"),
        },
        DomainError::IllegalTransition { from, to } => ApiError::StateConflict {
            resource_type: String::from("Reservation"),
            message: format!("Transition {from} -> {to} is not legal"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// This translation is explicit and ensures persistence errors are not leaked directly.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Resource"),
            message,
        },
        PersistenceError::StateConflict(message) => ApiError::StateConflict {
            resource_type: String::from("Resource"),
            message,
        },
        PersistenceError::CapacityExceeded {
            requested,
            available,
        } => ApiError::CapacityExceeded {
            requested,
            available,
        },
        PersistenceError::AlreadyAdmitted { ticket_id } => ApiError::AlreadyAdmitted { ticket_id },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
