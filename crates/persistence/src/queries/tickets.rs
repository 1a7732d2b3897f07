// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket projection queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::data_models::TicketData;
use crate::diesel_schema::{events, tickets, venues};
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves a ticket joined with the event and venue rows needed to
/// render it.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `ticket_id` - The ticket to retrieve
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the ticket does not exist.
pub fn get_ticket(conn: &mut _, ticket_id: i64) -> Result<TicketData, PersistenceError> {
    debug!("Looking up ticket by ID: {}", ticket_id);

    let result: Result<
        (
            i64,
            i64,
            i64,
            i32,
            String,
            String,
            Option<String>,
            String,
            String,
            String,
            i32,
        ),
        diesel::result::Error,
    > = tickets::table
        .inner_join(events::table.inner_join(venues::table))
        .filter(tickets::ticket_id.eq(ticket_id))
        .select((
            tickets::ticket_id,
            tickets::reservation_id,
            tickets::event_id,
            tickets::ticket_num,
            tickets::admission_state,
            tickets::issued_at,
            tickets::admitted_at,
            events::name,
            events::starts_at,
            venues::name,
            venues::utc_offset_minutes,
        ))
        .first(conn);

    match result {
        Ok(row) => Ok(TicketData {
            ticket_id: row.0,
            reservation_id: row.1,
            event_id: row.2,
            ticket_num: row.3,
            admission_state: row.4,
            issued_at: row.5,
            admitted_at: row.6,
            event_name: row.7,
            event_starts_at: row.8,
            venue_name: row.9,
            venue_utc_offset_minutes: row.10,
        }),
        Err(diesel::result::Error::NotFound) => Err(PersistenceError::NotFound(format!(
            "Ticket {ticket_id} not found"
        ))),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Lists the tickets issued for a reservation, in issue order.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `reservation_id` - The reservation whose tickets to list
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_tickets_for_reservation(
    conn: &mut _,
    reservation_id: i64,
) -> Result<Vec<(i64, i32, String)>, PersistenceError> {
    let rows: Vec<(i64, i32, String)> = tickets::table
        .filter(tickets::reservation_id.eq(reservation_id))
        .order(tickets::ticket_num.asc())
        .select((
            tickets::ticket_id,
            tickets::ticket_num,
            tickets::admission_state,
        ))
        .load(conn)?;

    Ok(rows)
}
}
