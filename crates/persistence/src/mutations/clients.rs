// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Client registry mutations.
//!
//! Clients are keyed by an identifier minted outside this system. The
//! registry is append-only: a client row is created the first time an
//! identifier is seen and never modified afterwards.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tiketto_domain::ClientRef;
use tracing::debug;

use crate::diesel_schema::clients;
use crate::error::PersistenceError;

backend_fn! {
/// Ensures a client row exists for the given identifier.
///
/// Idempotent: inserting an identifier that is already registered is
/// a no-op, not an error.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `client` - The validated client identifier
///
/// # Errors
///
/// Returns an error if the insert fails for a reason other than the
/// row already existing.
pub fn ensure_client(conn: &mut _, client: &ClientRef) -> Result<(), PersistenceError> {
    debug!("Ensuring client is registered: {}", client);

    diesel::insert_or_ignore_into(clients::table)
        .values(clients::client_id.eq(client.value()))
        .execute(conn)?;

    Ok(())
}
}
