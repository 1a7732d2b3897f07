// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Business user and session queries.
//!
//! This module contains backend-agnostic queries for retrieving
//! business users and sessions. All queries use Diesel DSL and work
//! across all supported database backends.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::data_models::{BusinessUserData, SessionData};
use crate::diesel_schema::{business_users, sessions};
use crate::error::PersistenceError;

/// Diesel Queryable struct for business user rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = business_users)]
struct BusinessUserRow {
    user_id: i64,
    company_id: i64,
    login_name: String,
    display_name: String,
    password_hash: String,
    role: String,
    is_disabled: i32,
    created_at: String,
    last_login_at: Option<String>,
}

/// Diesel Queryable struct for session rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = sessions)]
struct SessionRow {
    session_id: i64,
    session_token: String,
    user_id: i64,
    created_at: String,
    last_activity_at: String,
    expires_at: String,
}

impl From<BusinessUserRow> for BusinessUserData {
    fn from(row: BusinessUserRow) -> Self {
        Self {
            user_id: row.user_id,
            company_id: row.company_id,
            login_name: row.login_name,
            display_name: row.display_name,
            password_hash: row.password_hash,
            role: row.role,
            is_disabled: row.is_disabled != 0,
            created_at: row.created_at,
            last_login_at: row.last_login_at,
        }
    }
}

backend_fn! {
/// Retrieves a business user by login name.
///
/// The `login_name` is normalized to uppercase for case-insensitive lookup.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `login_name` - The login name to search for
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_business_user_by_login(
    conn: &mut _,
    login_name: &str,
) -> Result<Option<BusinessUserData>, PersistenceError> {
    let normalized_login: String = login_name.to_uppercase();

    debug!("Looking up business user by login_name: {}", normalized_login);

    let result: Result<BusinessUserRow, diesel::result::Error> = business_users::table
        .filter(business_users::login_name.eq(&normalized_login))
        .select(BusinessUserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(BusinessUserData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Retrieves a business user by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The user ID
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_business_user_by_id(
    conn: &mut _,
    user_id: i64,
) -> Result<Option<BusinessUserData>, PersistenceError> {
    debug!("Looking up business user by ID: {}", user_id);

    let result: Result<BusinessUserRow, diesel::result::Error> = business_users::table
        .filter(business_users::user_id.eq(user_id))
        .select(BusinessUserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(BusinessUserData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Retrieves a session by token.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The session token
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the session is not found.
pub fn get_session_by_token(
    conn: &mut _,
    session_token: &str,
) -> Result<Option<SessionData>, PersistenceError> {
    debug!("Looking up session by token");

    let result: Result<SessionRow, diesel::result::Error> = sessions::table
        .filter(sessions::session_token.eq(session_token))
        .select(SessionRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(SessionData {
            session_id: row.session_id,
            session_token: row.session_token,
            user_id: row.user_id,
            created_at: row.created_at,
            last_activity_at: row.last_activity_at,
            expires_at: row.expires_at,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

/// Verifies a password against a stored bcrypt hash.
///
/// # Arguments
///
/// * `password` - The plain text password to verify
/// * `password_hash` - The stored bcrypt hash
///
/// # Errors
///
/// Returns an error if password verification fails.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
    bcrypt::verify(password, password_hash)
        .map_err(|e| PersistenceError::Other(format!("Failed to verify password: {e}")))
}
