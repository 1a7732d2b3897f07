// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tiketto_api::{
    AdmitTicketResponse, ApiError, AvailabilityResponse, ConfirmReservationResponse,
    CreateReservationRequest, ListOfferingsResponse, LoginRequest, LoginResponse,
    ReservationHistoryResponse, ReservationResponse, TicketResponse,
};
use tiketto_persistence::Persistence;
use tokio::sync::Mutex;
use tracing::info;

mod session;

use session::SessionUser;

/// Tiketto Server - HTTP server for the Tiketto ticketing backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The persistence adapter is wrapped in a Mutex so concurrent
/// requests are serialized through a single writer. Together with
/// the per-operation transactions in the persistence layer this
/// closes the check-then-insert race on the availability ledger.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for the ticketing ledger.
    persistence: Arc<Mutex<Persistence>>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            // State conflicts are indistinguishable from absence on the
            // wire; gate devices and box-office clients only need "no".
            ApiError::ResourceNotFound { .. } | ApiError::StateConflict { .. } => {
                StatusCode::NOT_FOUND
            }
            ApiError::CapacityExceeded { .. } | ApiError::AlreadyAdmitted { .. } => {
                StatusCode::CONFLICT
            }
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for POST `/business/authenticate`.
async fn handle_authenticate(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!("Handling authenticate request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse = tiketto_api::login(&mut persistence, &request)?;

    Ok(Json(response))
}

/// Handler for POST `/business/logout`.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, HttpError> {
    let token: &str = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(HttpError {
            status: StatusCode::UNAUTHORIZED,
            message: String::from("Missing or malformed Authorization header"),
        })?;

    let mut persistence = app_state.persistence.lock().await;
    tiketto_api::logout(&mut persistence, token)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET `/business/venues/{venue_id}/events/{kind}/offering`.
async fn handle_list_offerings(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path((venue_id, kind)): Path<(i64, String)>,
) -> Result<Json<ListOfferingsResponse>, HttpError> {
    info!(venue_id, kind = %kind, "Handling list_offerings request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListOfferingsResponse =
        tiketto_api::list_event_offerings(&mut persistence, &user, venue_id, &kind)?;

    Ok(Json(response))
}

/// Handler for GET `/business/events/{event_id}/availability`.
async fn handle_get_availability(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(event_id): Path<i64>,
) -> Result<Json<AvailabilityResponse>, HttpError> {
    info!(event_id, "Handling get_availability request");

    let mut persistence = app_state.persistence.lock().await;
    let response: AvailabilityResponse =
        tiketto_api::get_event_availability(&mut persistence, &user, event_id)?;

    Ok(Json(response))
}

/// Handler for POST `/business/reservations`.
async fn handle_create_reservation(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Json(request): Json<CreateReservationRequest>,
) -> Result<Json<ReservationResponse>, HttpError> {
    info!(
        event_id = request.event_id,
        num_tickets = request.num_tickets,
        "Handling create_reservation request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ReservationResponse =
        tiketto_api::create_reservation(&mut persistence, &user, &request)?;

    Ok(Json(response))
}

/// Handler for POST `/business/reservations/{id}/confirm`.
async fn handle_confirm_reservation(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(reservation_id): Path<i64>,
) -> Result<Json<ConfirmReservationResponse>, HttpError> {
    info!(reservation_id, "Handling confirm_reservation request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ConfirmReservationResponse =
        tiketto_api::confirm_reservation(&mut persistence, &user, reservation_id)?;

    Ok(Json(response))
}

/// Handler for POST `/business/reservations/{id}/no_confirm`.
async fn handle_abandon_reservation(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(reservation_id): Path<i64>,
) -> Result<Json<ReservationResponse>, HttpError> {
    info!(reservation_id, "Handling abandon_reservation request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ReservationResponse =
        tiketto_api::abandon_reservation(&mut persistence, &user, reservation_id)?;

    Ok(Json(response))
}

/// Handler for POST `/business/reservations/{id}/cancel`.
async fn handle_cancel_reservation(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(reservation_id): Path<i64>,
) -> Result<Json<ReservationResponse>, HttpError> {
    info!(reservation_id, "Handling cancel_reservation request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ReservationResponse =
        tiketto_api::cancel_reservation(&mut persistence, &user, reservation_id)?;

    Ok(Json(response))
}

/// Handler for GET `/business/reservations/{id}/history`.
async fn handle_reservation_history(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(reservation_id): Path<i64>,
) -> Result<Json<ReservationHistoryResponse>, HttpError> {
    info!(reservation_id, "Handling reservation_history request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ReservationHistoryResponse =
        tiketto_api::get_reservation_history(&mut persistence, &user, reservation_id)?;

    Ok(Json(response))
}

/// Handler for GET `/tickets/{ticket_id}`.
///
/// Gate devices are trusted hardware on a closed network; no session
/// is required on the ticket surface.
async fn handle_get_ticket(
    AxumState(app_state): AxumState<AppState>,
    Path(ticket_id): Path<i64>,
) -> Result<Json<TicketResponse>, HttpError> {
    info!(ticket_id, "Handling get_ticket request");

    let mut persistence = app_state.persistence.lock().await;
    let response: TicketResponse = tiketto_api::get_ticket(&mut persistence, ticket_id)?;

    Ok(Json(response))
}

/// Handler for POST `/tickets/admit/{ticket_id}`.
async fn handle_admit_ticket(
    AxumState(app_state): AxumState<AppState>,
    Path(ticket_id): Path<i64>,
) -> Result<Json<AdmitTicketResponse>, HttpError> {
    info!(ticket_id, "Handling admit_ticket request");

    let mut persistence = app_state.persistence.lock().await;
    let response: AdmitTicketResponse = tiketto_api::admit_ticket(&mut persistence, ticket_id)?;

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/business/authenticate", post(handle_authenticate))
        .route("/business/logout", post(handle_logout))
        .route(
            "/business/venues/{venue_id}/events/{kind}/offering",
            get(handle_list_offerings),
        )
        .route(
            "/business/events/{event_id}/availability",
            get(handle_get_availability),
        )
        .route("/business/reservations", post(handle_create_reservation))
        .route(
            "/business/reservations/{id}/confirm",
            post(handle_confirm_reservation),
        )
        .route(
            "/business/reservations/{id}/no_confirm",
            post(handle_abandon_reservation),
        )
        .route(
            "/business/reservations/{id}/cancel",
            post(handle_cancel_reservation),
        )
        .route(
            "/business/reservations/{id}/history",
            get(handle_reservation_history),
        )
        .route("/tickets/{ticket_id}", get(handle_get_ticket))
        .route("/tickets/admit/{ticket_id}", post(handle_admit_ticket))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Tiketto Server");

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    // The availability ledger depends on referential integrity
    persistence.verify_foreign_key_enforcement()?;

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
