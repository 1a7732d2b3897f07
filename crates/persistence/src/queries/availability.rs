// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Availability ledger queries.
//!
//! Availability is never stored: it is derived on every read as
//! `capacity - sum(num_tickets)` over reservations in active states.
//! There is no counter to drift out of sync with the reservations
//! table.

use diesel::dsl::sum;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tiketto_domain::ReservationState;
use tracing::{debug, error};

use crate::data_models::AvailabilityData;
use crate::diesel_schema::{events, reservations};
use crate::error::PersistenceError;

backend_fn! {
/// Computes the availability accounting for an event.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event to account for
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the event does not exist.
pub fn event_availability(
    conn: &mut _,
    event_id: i64,
) -> Result<AvailabilityData, PersistenceError> {
    debug!("Computing availability for event ID: {}", event_id);

    let capacity: i32 = match events::table
        .filter(events::event_id.eq(event_id))
        .select(events::capacity)
        .first(conn)
    {
        Ok(capacity) => capacity,
        Err(diesel::result::Error::NotFound) => {
            return Err(PersistenceError::NotFound(format!(
                "Event {event_id} not found"
            )));
        }
        Err(e) => return Err(PersistenceError::from(e)),
    };

    let reserved: i64 = reservations::table
        .filter(reservations::event_id.eq(event_id))
        .filter(reservations::state.eq_any(ReservationState::active_states()))
        .select(sum(reservations::num_tickets))
        .first::<Option<i64>>(conn)?
        .unwrap_or(0);

    let available: i64 = i64::from(capacity) - reserved;
    if available < 0 {
        // Active holds must never exceed capacity; a negative value
        // here means the ledger invariant has been violated.
        error!(event_id, capacity, reserved, "Availability is negative");
    }

    Ok(AvailabilityData {
        event_id,
        capacity,
        reserved,
        available,
    })
}
}
