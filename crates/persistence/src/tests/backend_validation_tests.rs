// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend validation tests for multi-database support.
//!
//! These tests validate that the persistence layer works correctly
//! across different database backends (`SQLite`, MariaDB/MySQL).
//!
//! ## Purpose
//!
//! The purpose of these tests is to ensure:
//! 1. Migrations apply cleanly on all supported backends
//! 2. Foreign key constraints are enforced correctly
//! 3. Unique constraints work as expected
//! 4. Transactions and rollback behavior is consistent
//!
//! ## Test Execution
//!
//! - `SQLite` tests run normally via `cargo test`
//! - MariaDB/MySQL tests are marked `#[ignore]` and run only via `cargo xtask test-mariadb`
//!
//! ## Infrastructure Requirements
//!
//! `MariaDB` tests require:
//! - `DATABASE_URL` environment variable (set by xtask)
//! - `TIKETTO_TEST_BACKEND=mariadb` environment variable
//! - Running `MariaDB` instance (provisioned by xtask)
//!
//! Tests fail fast if required infrastructure is missing.
//!
//! ## What These Tests Validate
//!
//! These tests focus on **infrastructure and schema compatibility**, not
//! ticketing logic: schema creation, constraint enforcement, and
//! backend-specific SQL compatibility. Ticketing rules are validated by
//! the standard test suite running against `SQLite`.

use diesel::MysqlConnection;
use diesel::prelude::*;
use std::env;

use crate::backend::mysql;

/// Helper to get the `MariaDB` connection URL from environment.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set, indicating missing infrastructure.
fn get_mariadb_url() -> String {
    env::var("DATABASE_URL")
        .expect("DATABASE_URL not set - MariaDB tests must be run via `cargo xtask test-mariadb`")
}

/// Helper to verify we're running in the `MariaDB` test environment.
///
/// # Panics
///
/// Panics if `TIKETTO_TEST_BACKEND` is not set to `mariadb`.
fn verify_mariadb_test_environment() {
    let backend = env::var("TIKETTO_TEST_BACKEND").expect(
        "TIKETTO_TEST_BACKEND not set - MariaDB tests must be run via `cargo xtask test-mariadb`",
    );
    assert_eq!(backend, "mariadb", "TIKETTO_TEST_BACKEND must be 'mariadb'");
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_connection() {
    verify_mariadb_test_environment();
    let url = get_mariadb_url();

    let result = MysqlConnection::establish(&url);
    assert!(
        result.is_ok(),
        "Failed to connect to MariaDB: {:?}",
        result.err()
    );
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_migrations_apply_cleanly() {
    verify_mariadb_test_environment();
    let url = get_mariadb_url();

    let result = mysql::initialize_database(&url);
    assert!(
        result.is_ok(),
        "Failed to initialize MariaDB and run migrations: {:?}",
        result.err()
    );
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_foreign_key_enforcement() {
    verify_mariadb_test_environment();
    let url = get_mariadb_url();

    let mut conn = mysql::initialize_database(&url).expect("Failed to initialize MariaDB");
    mysql::verify_foreign_key_enforcement(&mut conn)
        .expect("Foreign key enforcement must be enabled on MariaDB");
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_reservation_roundtrip() {
    use crate::Persistence;
    use tiketto_domain::{ClientRef, EventKind, TicketCount};

    verify_mariadb_test_environment();
    let url = get_mariadb_url();

    let mut persistence = Persistence::new_with_mysql(&url).expect("Failed to open MariaDB");

    let company_id = persistence.create_company("MariaDB Validation Co").unwrap();
    let venue_id = persistence
        .create_venue(company_id, "Validation Hall", "Testville", 0)
        .unwrap();
    let event_id = persistence
        .create_event(
            venue_id,
            EventKind::Concert,
            "Validation Night",
            "2030-06-01 20:00:00",
            10,
            "2030-06-01 19:00:00",
        )
        .unwrap();
    persistence
        .attach_concert_details(event_id, "Validation Band", "rock", None)
        .unwrap();

    let reservation = persistence
        .create_reservation(
            event_id,
            &ClientRef::new("mariadb-client").unwrap(),
            TicketCount::new(2).unwrap(),
        )
        .unwrap();
    let confirmation = persistence
        .confirm_reservation(reservation.reservation_id)
        .unwrap();
    assert_eq!(confirmation.ticket_ids.len(), 2);

    let availability = persistence.event_availability(event_id).unwrap();
    assert_eq!(availability.reserved, 2);
}
