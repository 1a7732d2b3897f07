// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for event offering listings.

use super::{test_client, test_count};
use crate::Persistence;
use tiketto_domain::EventKind;

/// Seeds a venue with one open movie, one closed movie, and one open
/// concert. Returns the adapter, venue ID, and open movie event ID.
fn seed_venue_with_mixed_events() -> (Persistence, i64, i64) {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let company_id = persistence.create_company("Fred Theatres").unwrap();
    let venue_id = persistence
        .create_venue(company_id, "Grand Hall", "Springfield", -300)
        .unwrap();

    let open_movie = persistence
        .create_event(
            venue_id,
            EventKind::MovieShow,
            "Evening Show",
            "2030-06-01 20:00:00",
            40,
            "2030-06-01 19:00:00",
        )
        .unwrap();
    persistence
        .attach_movie_details(open_movie, "The Long Reel", "PG-13", 142)
        .unwrap();

    let closed_movie = persistence
        .create_event(
            venue_id,
            EventKind::MovieShow,
            "Matinee",
            "2020-01-01 14:00:00",
            40,
            "2020-01-01 13:00:00",
        )
        .unwrap();
    persistence
        .attach_movie_details(closed_movie, "Yesterday's News", "G", 95)
        .unwrap();

    let concert = persistence
        .create_event(
            venue_id,
            EventKind::Concert,
            "Summer Night",
            "2030-07-01 21:00:00",
            200,
            "2030-07-01 20:00:00",
        )
        .unwrap();
    persistence
        .attach_concert_details(concert, "The Examples", "indie", Some("Warmup Act"))
        .unwrap();

    (persistence, venue_id, open_movie)
}

#[test]
fn test_offerings_list_open_events_with_details() {
    let (mut persistence, venue_id, open_movie) = seed_venue_with_mixed_events();

    let offerings = persistence
        .list_event_offerings(venue_id, EventKind::MovieShow)
        .unwrap();

    assert_eq!(offerings.len(), 1);
    assert_eq!(offerings[0].event_id, open_movie);
    assert_eq!(offerings[0].name, "Evening Show");
    assert_eq!(offerings[0].event_kind, "movie");
    assert!(
        offerings[0]
            .details
            .contains(&(String::from("film_title"), String::from("The Long Reel")))
    );
}

#[test]
fn test_offerings_filtered_by_kind() {
    let (mut persistence, venue_id, _open_movie) = seed_venue_with_mixed_events();

    let concerts = persistence
        .list_event_offerings(venue_id, EventKind::Concert)
        .unwrap();

    assert_eq!(concerts.len(), 1);
    assert_eq!(concerts[0].name, "Summer Night");
    assert!(
        concerts[0]
            .details
            .contains(&(String::from("opening_act"), String::from("Warmup Act")))
    );
}

#[test]
fn test_offering_availability_reflects_reservations() {
    let (mut persistence, venue_id, open_movie) = seed_venue_with_mixed_events();

    persistence
        .create_reservation(open_movie, &test_client("client-a"), test_count(15))
        .unwrap();

    let offerings = persistence
        .list_event_offerings(venue_id, EventKind::MovieShow)
        .unwrap();
    assert_eq!(offerings[0].capacity, 40);
    assert_eq!(offerings[0].available, 25);
}

#[test]
fn test_offerings_empty_for_unknown_venue() {
    let (mut persistence, _venue_id, _open_movie) = seed_venue_with_mixed_events();

    let offerings = persistence
        .list_event_offerings(9999, EventKind::MovieShow)
        .unwrap();
    assert!(offerings.is_empty());
}
