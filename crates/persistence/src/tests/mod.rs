// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod backend_validation_tests;
mod offering_tests;
mod reservation_tests;

use crate::Persistence;
use tiketto_domain::{ClientRef, EventKind, TicketCount};

/// Creates an in-memory database seeded with one company, one venue,
/// and one movie event of the given capacity.
///
/// Returns the persistence adapter and the event ID. The offering
/// window is far in the future so the event counts as open.
pub fn seed_movie_event(capacity: i32) -> (Persistence, i64) {
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

    (persistence, event_id)
}

/// Creates a validated test client reference.
pub fn test_client(id: &str) -> ClientRef {
    ClientRef::new(id).unwrap()
}

/// Creates a validated test ticket count.
pub fn test_count(count: i32) -> TicketCount {
    TicketCount::new(count).unwrap()
}
