// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admission gate mutations.
//!
//! A ticket is consumed exactly once. Admission is a compare-and-set
//! from `VALID` to `ADMITTED`; a second attempt on the same ticket is
//! rejected no matter how quickly it follows the first.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tiketto_domain::AdmissionState;
use tracing::info;

use crate::diesel_schema::tickets;
use crate::error::PersistenceError;

backend_fn! {
/// Admits a ticket at the gate.
///
/// The update carries `admission_state = 'VALID'` in its WHERE clause.
/// Zero affected rows means the ticket was missing, already admitted,
/// or voided; the follow-up read distinguishes the three.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `ticket_id` - The ticket to admit
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the ticket does not exist,
/// `PersistenceError::AlreadyAdmitted` if it was consumed earlier, and
/// `PersistenceError::StateConflict` if it was voided.
pub fn admit_ticket(conn: &mut _, ticket_id: i64) -> Result<(), PersistenceError> {
    info!(ticket_id, "Admitting ticket");

    conn.transaction(|conn| {
        let rows_affected: usize = diesel::update(tickets::table)
            .filter(tickets::ticket_id.eq(ticket_id))
            .filter(tickets::admission_state.eq(AdmissionState::Valid.as_str()))
            .set((
                tickets::admission_state.eq(AdmissionState::Admitted.as_str()),
                tickets::admitted_at.eq(diesel::dsl::sql::<
                    diesel::sql_types::Nullable<diesel::sql_types::Text>,
                >("CURRENT_TIMESTAMP")),
            ))
            .execute(conn)?;

        if rows_affected == 0 {
            let current: Option<String> = tickets::table
                .filter(tickets::ticket_id.eq(ticket_id))
                .select(tickets::admission_state)
                .first(conn)
                .optional()?;

            return Err(match current.as_deref() {
                None => {
                    PersistenceError::NotFound(format!("Ticket {ticket_id} not found"))
                }
                Some("ADMITTED") => PersistenceError::AlreadyAdmitted { ticket_id },
                Some(state) => PersistenceError::StateConflict(format!(
                    "Ticket {ticket_id} is {state} and cannot be admitted"
                )),
            });
        }

        info!(ticket_id, "Ticket admitted");
        Ok(())
    })
}
}
