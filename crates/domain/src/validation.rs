// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::TicketCount;

/// Validates a raw ticket count from a caller.
///
/// This is the boundary check for reservation requests: a non-positive
/// count is a caller error and must be rejected before the availability
/// ledger is consulted.
///
/// # Arguments
///
/// * `count` - The raw requested ticket count
///
/// # Errors
///
/// Returns `DomainError::InvalidTicketCount` if `count` is zero or
/// negative.
pub const fn validate_ticket_count(count: i32) -> Result<TicketCount, DomainError> {
    TicketCount::new(count)
}

/// Validates an event capacity value.
///
/// Capacity is fixed at event creation and immutable thereafter; zero is
/// legal (an event that sells nothing), negative is not.
///
/// # Arguments
///
/// * `capacity` - The total seat capacity
///
/// # Errors
///
/// Returns `DomainError::InvalidCapacity` if `capacity` is negative.
pub const fn validate_capacity(capacity: i32) -> Result<(), DomainError> {
    if capacity < 0 {
        return Err(DomainError::InvalidCapacity { capacity });
    }
    Ok(())
}
