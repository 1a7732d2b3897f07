// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reservation lifecycle mutations.
//!
//! Every mutation in this module runs inside a single database
//! transaction. The availability check and the reservation insert are
//! never separated, and a state transition is never separated from its
//! history entry or its ticket effects. State transitions are written
//! as compare-and-set updates with the expected state in the WHERE
//! clause; zero affected rows means the reservation was missing or not
//! in the expected state.

use diesel::dsl::{max, sum};
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use std::str::FromStr;
use tiketto_domain::{AdmissionState, ClientRef, DomainError, ReservationState, TicketCount};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::{ConfirmationData, ReservationData};
use crate::diesel_schema::{clients, events, reservation_history, reservations, tickets};
use crate::error::PersistenceError;
use crate::queries::{load_reservation_mysql, load_reservation_sqlite};

backend_fn! {
/// Applies a compare-and-set transition out of `PENDING_CONFIRM` and
/// records it in the history trail.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the reservation does not
/// exist and `PersistenceError::StateConflict` if it is not pending.
fn transition_pending(
    conn: &mut _,
    reservation_id: i64,
    target: ReservationState,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(reservations::table)
        .filter(reservations::reservation_id.eq(reservation_id))
        .filter(reservations::state.eq(ReservationState::PendingConfirm.as_str()))
        .set((
            reservations::state.eq(target.as_str()),
            reservations::updated_at.eq(diesel::dsl::sql::<diesel::sql_types::Text>(
                "CURRENT_TIMESTAMP",
            )),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        let current: Option<String> = reservations::table
            .filter(reservations::reservation_id.eq(reservation_id))
            .select(reservations::state)
            .first(conn)
            .optional()?;

        return Err(match current {
            None => PersistenceError::NotFound(format!(
                "Reservation {reservation_id} not found"
            )),
            Some(state) => PersistenceError::StateConflict(format!(
                "Reservation {reservation_id} is {state}, expected PENDING_CONFIRM"
            )),
        });
    }

    diesel::insert_into(reservation_history::table)
        .values((
            reservation_history::reservation_id.eq(reservation_id),
            reservation_history::previous_state
                .eq(Some(ReservationState::PendingConfirm.as_str().to_string())),
            reservation_history::new_state.eq(target.as_str()),
        ))
        .execute(conn)?;

    Ok(())
}
}

backend_fn! {
/// Creates a reservation against an event, atomically with the
/// availability check.
///
/// The client is registered first if this is the first time the
/// identifier has been seen. The reservation starts in
/// `PENDING_CONFIRM` and holds capacity immediately.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event to reserve against
/// * `client` - The validated client identifier
/// * `count` - The validated ticket count
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the event does not exist and
/// `PersistenceError::CapacityExceeded` if the event cannot accommodate
/// the requested count.
pub fn create_reservation(
    conn: &mut _,
    event_id: i64,
    client: &ClientRef,
    count: TicketCount,
) -> Result<i64, PersistenceError> {
    info!(
        event_id,
        "Creating reservation for {} tickets (client {})", count, client
    );

    conn.transaction(|conn| {
        diesel::insert_or_ignore_into(clients::table)
            .values(clients::client_id.eq(client.value()))
            .execute(conn)?;

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
        if i64::from(count.value()) > available {
            return Err(PersistenceError::CapacityExceeded {
                requested: count.value(),
                available,
            });
        }

        diesel::insert_into(reservations::table)
            .values((
                reservations::event_id.eq(event_id),
                reservations::client_id.eq(client.value()),
                reservations::num_tickets.eq(count.value()),
                reservations::state.eq(ReservationState::PendingConfirm.as_str()),
            ))
            .execute(conn)?;

        let reservation_id: i64 = conn.get_last_insert_rowid()?;

        diesel::insert_into(reservation_history::table)
            .values((
                reservation_history::reservation_id.eq(reservation_id),
                reservation_history::previous_state.eq(None::<String>),
                reservation_history::new_state
                    .eq(ReservationState::PendingConfirm.as_str()),
            ))
            .execute(conn)?;

        info!(reservation_id, "Reservation created");
        Ok(reservation_id)
    })
}
}

/// Confirms a pending reservation and issues its tickets (`SQLite` version).
///
/// The transition is a compare-and-set from `PENDING_CONFIRM` to
/// `CONFIRMED`. One ticket row per reserved seat is inserted in the
/// same transaction, numbered consecutively after the highest ticket
/// number already issued for the event.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `reservation_id` - The reservation to confirm
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the reservation does not
/// exist and `PersistenceError::StateConflict` if it is not in
/// `PENDING_CONFIRM`.
pub fn confirm_reservation_sqlite(
    conn: &mut SqliteConnection,
    reservation_id: i64,
) -> Result<ConfirmationData, PersistenceError> {
    info!(reservation_id, "Confirming reservation");

    conn.transaction(|conn| {
        transition_pending_sqlite(conn, reservation_id, ReservationState::Confirmed)?;
        let ticket_ids: Vec<i64> = issue_tickets_sqlite(conn, reservation_id)?;
        let reservation: ReservationData = load_reservation_sqlite(conn, reservation_id)?;
        Ok(ConfirmationData {
            reservation,
            ticket_ids,
        })
    })
}

/// Confirms a pending reservation and issues its tickets (`MySQL` version).
///
/// See [`confirm_reservation_sqlite`] for semantics.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the reservation does not
/// exist and `PersistenceError::StateConflict` if it is not in
/// `PENDING_CONFIRM`.
pub fn confirm_reservation_mysql(
    conn: &mut MysqlConnection,
    reservation_id: i64,
) -> Result<ConfirmationData, PersistenceError> {
    info!(reservation_id, "Confirming reservation");

    conn.transaction(|conn| {
        transition_pending_mysql(conn, reservation_id, ReservationState::Confirmed)?;
        let ticket_ids: Vec<i64> = issue_tickets_mysql(conn, reservation_id)?;
        let reservation: ReservationData = load_reservation_mysql(conn, reservation_id)?;
        Ok(ConfirmationData {
            reservation,
            ticket_ids,
        })
    })
}

backend_fn! {
/// Issues one ticket per reserved seat for a just-confirmed reservation.
///
/// Ticket numbers are consecutive after the highest number already
/// issued for the event, so they are unique per event across all
/// reservations.
///
/// # Errors
///
/// Returns an error if the reservation does not exist or an insert fails.
fn issue_tickets(conn: &mut _, reservation_id: i64) -> Result<Vec<i64>, PersistenceError> {
    let (event_id, num_tickets): (i64, i32) = reservations::table
        .filter(reservations::reservation_id.eq(reservation_id))
        .select((reservations::event_id, reservations::num_tickets))
        .first(conn)?;

    let base: i32 = tickets::table
        .filter(tickets::event_id.eq(event_id))
        .select(max(tickets::ticket_num))
        .first::<Option<i32>>(conn)?
        .unwrap_or(0);

    let mut ticket_ids: Vec<i64> = Vec::with_capacity(usize::try_from(num_tickets).unwrap_or(0));
    for offset in 1..=num_tickets {
        diesel::insert_into(tickets::table)
            .values((
                tickets::reservation_id.eq(reservation_id),
                tickets::event_id.eq(event_id),
                tickets::ticket_num.eq(base + offset),
                tickets::admission_state.eq(AdmissionState::Valid.as_str()),
            ))
            .execute(conn)?;
        ticket_ids.push(conn.get_last_insert_rowid()?);
    }

    info!(reservation_id, "Issued {} tickets", num_tickets);
    Ok(ticket_ids)
}
}

/// Abandons a pending reservation (`SQLite` version), releasing its
/// capacity hold.
///
/// The transition is a compare-and-set from `PENDING_CONFIRM` to
/// `NEVER_CONFIRMED`. No tickets exist yet, so none are touched.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the reservation does not
/// exist and `PersistenceError::StateConflict` if it is not in
/// `PENDING_CONFIRM`.
pub fn abandon_reservation_sqlite(
    conn: &mut SqliteConnection,
    reservation_id: i64,
) -> Result<ReservationData, PersistenceError> {
    info!(reservation_id, "Abandoning reservation");

    conn.transaction(|conn| {
        transition_pending_sqlite(conn, reservation_id, ReservationState::NeverConfirmed)?;
        load_reservation_sqlite(conn, reservation_id)
    })
}

/// Abandons a pending reservation (`MySQL` version).
///
/// See [`abandon_reservation_sqlite`] for semantics.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the reservation does not
/// exist and `PersistenceError::StateConflict` if it is not in
/// `PENDING_CONFIRM`.
pub fn abandon_reservation_mysql(
    conn: &mut MysqlConnection,
    reservation_id: i64,
) -> Result<ReservationData, PersistenceError> {
    info!(reservation_id, "Abandoning reservation");

    conn.transaction(|conn| {
        transition_pending_mysql(conn, reservation_id, ReservationState::NeverConfirmed)?;
        load_reservation_mysql(conn, reservation_id)
    })
}

backend_fn! {
/// Cancels a reservation from any active state, releasing its capacity
/// hold and voiding any tickets that have not been used.
///
/// Cancellation after confirmation sets every still-`VALID` ticket for
/// the reservation to `INVALID` in the same transaction. Tickets that
/// were already admitted keep their `ADMITTED` record.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `reservation_id` - The reservation to cancel
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the reservation does not
/// exist and `PersistenceError::StateConflict` if it is already in a
/// terminal non-cancelable state.
pub fn cancel_reservation(
    conn: &mut _,
    reservation_id: i64,
) -> Result<i64, PersistenceError> {
    info!(reservation_id, "Canceling reservation");

    conn.transaction(|conn| {
        let current: String = match reservations::table
            .filter(reservations::reservation_id.eq(reservation_id))
            .select(reservations::state)
            .first(conn)
        {
            Ok(state) => state,
            Err(diesel::result::Error::NotFound) => {
                return Err(PersistenceError::NotFound(format!(
                    "Reservation {reservation_id} not found"
                )));
            }
            Err(e) => return Err(PersistenceError::from(e)),
        };

        let state: ReservationState = ReservationState::from_str(&current)?;
        if !state.can_transition_to(ReservationState::Canceled) {
            let illegal = DomainError::IllegalTransition {
                from: state,
                to: ReservationState::Canceled,
            };
            return Err(PersistenceError::StateConflict(illegal.to_string()));
        }

        let rows_affected: usize = diesel::update(reservations::table)
            .filter(reservations::reservation_id.eq(reservation_id))
            .filter(reservations::state.eq(&current))
            .set((
                reservations::state.eq(ReservationState::Canceled.as_str()),
                reservations::updated_at.eq(diesel::dsl::sql::<diesel::sql_types::Text>(
                    "CURRENT_TIMESTAMP",
                )),
            ))
            .execute(conn)?;

        if rows_affected == 0 {
            return Err(PersistenceError::StateConflict(format!(
                "Reservation {reservation_id} changed state concurrently"
            )));
        }

        let voided: usize = diesel::update(tickets::table)
            .filter(tickets::reservation_id.eq(reservation_id))
            .filter(tickets::admission_state.eq(AdmissionState::Valid.as_str()))
            .set(tickets::admission_state.eq(AdmissionState::Invalid.as_str()))
            .execute(conn)?;

        diesel::insert_into(reservation_history::table)
            .values((
                reservation_history::reservation_id.eq(reservation_id),
                reservation_history::previous_state.eq(Some(current)),
                reservation_history::new_state.eq(ReservationState::Canceled.as_str()),
            ))
            .execute(conn)?;

        info!(
            reservation_id,
            "Reservation canceled, {} tickets voided", voided
        );

        Ok(reservation_id)
    })
}
}
