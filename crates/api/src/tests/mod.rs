// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test suite for the API boundary layer.

mod handler_tests;

use tiketto_domain::EventKind;
use tiketto_persistence::Persistence;

use crate::auth::{AuthenticatedUser, Role};

/// A seeded test environment: one company with a venue and an open
/// movie event, plus a rival company for scoping tests.
pub struct Fixture {
    pub persistence: Persistence,
    pub company_id: i64,
    pub venue_id: i64,
    pub event_id: i64,
    pub rival_company_id: i64,
}

impl Fixture {
    /// A seller belonging to the event's company.
    pub fn seller(&self) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: 1,
            company_id: self.company_id,
            login_name: String::from("FRONTDESK"),
            role: Role::Seller,
        }
    }

    /// A seller belonging to the rival company.
    pub fn rival_seller(&self) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: 2,
            company_id: self.rival_company_id,
            login_name: String::from("RIVAL"),
            role: Role::Seller,
        }
    }
}

/// Seeds an in-memory database with a movie event of the given capacity.
///
/// The event starts 2030-06-01 20:00:00 UTC at a venue 300 minutes
/// behind UTC, so venue-local display time is 15:00.
pub fn seed_movie_fixture(capacity: i32) -> Fixture {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let company_id = persistence.create_company("Fred Theatres").unwrap();
    let venue_id = persistence
        .create_venue(company_id, "Grand Hall", "Springfield", -300)
        .unwrap();
    let event_id = persistence
        .create_event(
            venue_id,
            EventKind::MovieShow,
            "Evening Show",
            "2030-06-01 20:00:00",
            capacity,
            "2030-06-01 19:00:00",
        )
        .unwrap();
    persistence
        .attach_movie_details(event_id, "The Long Reel", "PG-13", 142)
        .unwrap();

    let rival_company_id = persistence.create_company("Rival Entertainment").unwrap();

    Fixture {
        persistence,
        company_id,
        venue_id,
        event_id,
        rival_company_id,
    }
}
