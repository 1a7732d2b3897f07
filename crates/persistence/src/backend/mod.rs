// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-database glue that the ticketing store needs but Diesel's
//! portable DSL cannot express.
//!
//! The box office runs on `SQLite` by default (`sqlite` submodule);
//! MySQL/MariaDB support (`mysql` submodule) exists so the same
//! reservation and ticket tables can be validated against a second
//! engine through the opt-in test suite.
//!
//! Everything that touches reservations, tickets, or availability is
//! written once in `queries/` and `mutations/` against plain Diesel DSL.
//! What lands here instead is the small residue per engine: opening a
//! connection, applying migrations, engine settings such as PRAGMAs,
//! and fetching the id of a freshly inserted row where `RETURNING` is
//! unavailable.

pub mod mysql;
pub mod sqlite;

use diesel::{Connection, MysqlConnection, SqliteConnection};

use crate::error::PersistenceError;

/// The handful of operations the ticketing store needs that have no
/// portable Diesel spelling.
///
/// Implemented for both `SqliteConnection` and `MysqlConnection` so
/// that reservation and ticket mutations can resolve the id of a row
/// they just inserted without caring which engine they run on.
pub trait PersistenceBackend: Connection {
    /// Returns the id of the most recently inserted row on this
    /// connection. Used after inserting reservations, tickets, and
    /// history rows, since `RETURNING` is not available on every
    /// supported engine.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError>;

    /// Confirms the engine is enforcing foreign keys.
    ///
    /// Reservations reference events, tickets reference reservations,
    /// and events reference venues; the server refuses to start if the
    /// engine would accept dangling rows.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError>;
}

impl PersistenceBackend for SqliteConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        sqlite::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(self)
    }
}

impl PersistenceBackend for MysqlConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        mysql::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        mysql::verify_foreign_key_enforcement(self)
    }
}
