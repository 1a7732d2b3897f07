// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reservation and history queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::data_models::{ReservationData, ReservationHistoryData};
use crate::diesel_schema::{reservation_history, reservations};
use crate::error::PersistenceError;

backend_fn! {
/// Loads a reservation row into its serializable representation.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `reservation_id` - The reservation to load
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the reservation does not exist.
pub fn load_reservation(
    conn: &mut _,
    reservation_id: i64,
) -> Result<ReservationData, PersistenceError> {
    let result: Result<(i64, i64, String, i32, String, String, String), diesel::result::Error> =
        reservations::table
            .filter(reservations::reservation_id.eq(reservation_id))
            .select((
                reservations::reservation_id,
                reservations::event_id,
                reservations::client_id,
                reservations::num_tickets,
                reservations::state,
                reservations::created_at,
                reservations::updated_at,
            ))
            .first(conn);

    match result {
        Ok(row) => Ok(ReservationData {
            reservation_id: row.0,
            event_id: row.1,
            client_id: row.2,
            num_tickets: row.3,
            state: row.4,
            created_at: row.5,
            updated_at: row.6,
        }),
        Err(diesel::result::Error::NotFound) => Err(PersistenceError::NotFound(format!(
            "Reservation {reservation_id} not found"
        ))),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Retrieves the ordered transition history for a reservation.
///
/// The trail starts with the creation entry (no previous state) and
/// records one entry per transition in the order they happened.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `reservation_id` - The reservation whose history to retrieve
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn reservation_history(
    conn: &mut _,
    reservation_id: i64,
) -> Result<Vec<ReservationHistoryData>, PersistenceError> {
    debug!("Loading history for reservation ID: {}", reservation_id);

    let rows: Vec<(i64, i64, Option<String>, String, String)> = reservation_history::table
        .filter(reservation_history::reservation_id.eq(reservation_id))
        .order(reservation_history::history_id.asc())
        .select((
            reservation_history::history_id,
            reservation_history::reservation_id,
            reservation_history::previous_state,
            reservation_history::new_state,
            reservation_history::transitioned_at,
        ))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| ReservationHistoryData {
            history_id: row.0,
            reservation_id: row.1,
            previous_state: row.2,
            new_state: row.3,
            transitioned_at: row.4,
        })
        .collect())
}
}
