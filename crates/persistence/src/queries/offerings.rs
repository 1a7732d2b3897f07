// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event offering queries.
//!
//! An offering is an event of a given kind at a venue whose reservation
//! window is still open. Kind dispatch goes through the `EventKind`
//! enum; the kind string a caller supplies is parsed at the API
//! boundary and never reaches a query as free text.

use diesel::dsl::sum;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tiketto_domain::{EventKind, ReservationState};
use tracing::debug;

use crate::data_models::{OfferingData, VenueData};
use crate::diesel_schema::{concert_events, events, movie_events, reservations, venues};
use crate::error::PersistenceError;

backend_fn! {
/// Loads a venue by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `venue_id` - The venue to load
///
/// # Errors
///
/// Returns `NotFound` if the venue does not exist.
pub fn get_venue(conn: &mut _, venue_id: i64) -> Result<VenueData, PersistenceError> {
    let (venue_id, company_id, name, city, utc_offset_minutes): (i64, i64, String, String, i32) =
        venues::table
            .filter(venues::venue_id.eq(venue_id))
            .select((
                venues::venue_id,
                venues::company_id,
                venues::name,
                venues::city,
                venues::utc_offset_minutes,
            ))
            .first(conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    PersistenceError::NotFound(format!("Venue {venue_id} not found"))
                }
                other => PersistenceError::from(other),
            })?;

    Ok(VenueData {
        venue_id,
        company_id,
        name,
        city,
        utc_offset_minutes,
    })
}
}

backend_fn! {
/// Resolves the company that owns an event, through its venue.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event whose owner is resolved
///
/// # Errors
///
/// Returns `NotFound` if the event does not exist.
pub fn event_owner_company(conn: &mut _, event_id: i64) -> Result<i64, PersistenceError> {
    events::table
        .inner_join(venues::table)
        .filter(events::event_id.eq(event_id))
        .select(venues::company_id)
        .first(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => {
                PersistenceError::NotFound(format!("Event {event_id} not found"))
            }
            other => PersistenceError::from(other),
        })
}
}

backend_fn! {
/// Lists open offerings of a kind at a venue.
///
/// Events whose `offering_ends_at` has passed are excluded. Each entry
/// carries the derived availability and the kind-specific display
/// attributes.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `venue_id` - The venue to list offerings for
/// * `kind` - The event kind
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_event_offerings(
    conn: &mut _,
    venue_id: i64,
    kind: EventKind,
) -> Result<Vec<OfferingData>, PersistenceError> {
    debug!("Listing {} offerings for venue ID: {}", kind, venue_id);

    let rows: Vec<(i64, String, String, i32)> = events::table
        .filter(events::venue_id.eq(venue_id))
        .filter(events::event_kind.eq(kind.as_str()))
        .filter(events::offering_ends_at.gt(diesel::dsl::sql::<diesel::sql_types::Text>(
            "CURRENT_TIMESTAMP",
        )))
        .order(events::starts_at.asc())
        .select((
            events::event_id,
            events::name,
            events::starts_at,
            events::capacity,
        ))
        .load(conn)?;

    let mut offerings: Vec<OfferingData> = Vec::with_capacity(rows.len());
    for (event_id, name, starts_at, capacity) in rows {
        let reserved: i64 = reservations::table
            .filter(reservations::event_id.eq(event_id))
            .filter(reservations::state.eq_any(ReservationState::active_states()))
            .select(sum(reservations::num_tickets))
            .first::<Option<i64>>(conn)?
            .unwrap_or(0);

        let details: Vec<(String, String)> = match kind {
            EventKind::MovieShow => {
                let (film_title, rating, runtime_minutes): (String, String, i32) =
                    movie_events::table
                        .filter(movie_events::event_id.eq(event_id))
                        .select((
                            movie_events::film_title,
                            movie_events::rating,
                            movie_events::runtime_minutes,
                        ))
                        .first(conn)?;
                vec![
                    (String::from("film_title"), film_title),
                    (String::from("rating"), rating),
                    (String::from("runtime_minutes"), runtime_minutes.to_string()),
                ]
            }
            EventKind::Concert => {
                let (artist, genre, opening_act): (String, String, Option<String>) =
                    concert_events::table
                        .filter(concert_events::event_id.eq(event_id))
                        .select((
                            concert_events::artist,
                            concert_events::genre,
                            concert_events::opening_act,
                        ))
                        .first(conn)?;
                let mut details: Vec<(String, String)> = vec![
                    (String::from("artist"), artist),
                    (String::from("genre"), genre),
                ];
                if let Some(opening_act) = opening_act {
                    details.push((String::from("opening_act"), opening_act));
                }
                details
            }
        };

        offerings.push(OfferingData {
            event_id,
            event_kind: kind.as_str().to_string(),
            name,
            starts_at,
            capacity,
            available: i64::from(capacity) - reserved,
            details,
        });
    }

    Ok(offerings)
}
}
