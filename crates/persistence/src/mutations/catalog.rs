// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Catalog mutations: companies, venues, events, and kind-specific
//! event characteristics.
//!
//! Catalog rows are written once at setup time and are immutable
//! afterwards. In particular, an event's capacity is fixed at creation.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tiketto_domain::{EventKind, validate_capacity};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{companies, concert_events, events, movie_events, venues};
use crate::error::PersistenceError;

backend_fn! {
/// Creates a new company.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `name` - The company name (unique)
///
/// # Errors
///
/// Returns an error if the company cannot be created.
pub fn create_company(conn: &mut _, name: &str) -> Result<i64, PersistenceError> {
    info!("Creating company: {}", name);

    diesel::insert_into(companies::table)
        .values(companies::name.eq(name))
        .execute(conn)?;

    let company_id: i64 = conn.get_last_insert_rowid()?;

    info!(company_id, "Company created");
    Ok(company_id)
}
}

backend_fn! {
/// Creates a new venue for a company.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `company_id` - The owning company
/// * `name` - The venue name
/// * `city` - The venue city
/// * `utc_offset_minutes` - The venue's UTC offset, used to render local times
///
/// # Errors
///
/// Returns an error if the venue cannot be created or the company
/// does not exist.
pub fn create_venue(
    conn: &mut _,
    company_id: i64,
    name: &str,
    city: &str,
    utc_offset_minutes: i32,
) -> Result<i64, PersistenceError> {
    info!("Creating venue: {} ({})", name, city);

    diesel::insert_into(venues::table)
        .values((
            venues::company_id.eq(company_id),
            venues::name.eq(name),
            venues::city.eq(city),
            venues::utc_offset_minutes.eq(utc_offset_minutes),
        ))
        .execute(conn)?;

    let venue_id: i64 = conn.get_last_insert_rowid()?;

    info!(venue_id, "Venue created");
    Ok(venue_id)
}
}

backend_fn! {
/// Creates a new event at a venue.
///
/// Capacity is validated here as well as by a schema CHECK constraint,
/// and is immutable once the row exists.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `venue_id` - The hosting venue
/// * `kind` - The event kind
/// * `name` - The event name
/// * `starts_at` - The event start time (ISO 8601, UTC)
/// * `capacity` - The total seat capacity (non-negative)
/// * `offering_ends_at` - The end of the reservation window (ISO 8601, UTC)
///
/// # Errors
///
/// Returns an error if the capacity is negative, the venue does not
/// exist, or the insert fails.
pub fn create_event(
    conn: &mut _,
    venue_id: i64,
    kind: EventKind,
    name: &str,
    starts_at: &str,
    capacity: i32,
    offering_ends_at: &str,
) -> Result<i64, PersistenceError> {
    validate_capacity(capacity)?;

    info!(
        "Creating {} event: {} (capacity {})",
        kind, name, capacity
    );

    diesel::insert_into(events::table)
        .values((
            events::venue_id.eq(venue_id),
            events::event_kind.eq(kind.as_str()),
            events::name.eq(name),
            events::starts_at.eq(starts_at),
            events::capacity.eq(capacity),
            events::offering_ends_at.eq(offering_ends_at),
        ))
        .execute(conn)?;

    let event_id: i64 = conn.get_last_insert_rowid()?;

    info!(event_id, "Event created");
    Ok(event_id)
}
}

backend_fn! {
/// Attaches movie-specific characteristics to an event.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event to attach details to
/// * `film_title` - The film title
/// * `rating` - The content rating
/// * `runtime_minutes` - The film runtime in minutes
///
/// # Errors
///
/// Returns an error if the event does not exist or details are
/// already attached.
pub fn attach_movie_details(
    conn: &mut _,
    event_id: i64,
    film_title: &str,
    rating: &str,
    runtime_minutes: i32,
) -> Result<(), PersistenceError> {
    diesel::insert_into(movie_events::table)
        .values((
            movie_events::event_id.eq(event_id),
            movie_events::film_title.eq(film_title),
            movie_events::rating.eq(rating),
            movie_events::runtime_minutes.eq(runtime_minutes),
        ))
        .execute(conn)?;

    Ok(())
}
}

backend_fn! {
/// Attaches concert-specific characteristics to an event.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event to attach details to
/// * `artist` - The performing artist
/// * `genre` - The music genre
/// * `opening_act` - The opening act, if any
///
/// # Errors
///
/// Returns an error if the event does not exist or details are
/// already attached.
pub fn attach_concert_details(
    conn: &mut _,
    event_id: i64,
    artist: &str,
    genre: &str,
    opening_act: Option<&str>,
) -> Result<(), PersistenceError> {
    diesel::insert_into(concert_events::table)
        .values((
            concert_events::event_id.eq(event_id),
            concert_events::artist.eq(artist),
            concert_events::genre.eq(genre),
            concert_events::opening_act.eq(opening_act),
        ))
        .execute(conn)?;

    Ok(())
}
}
