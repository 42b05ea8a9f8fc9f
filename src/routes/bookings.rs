use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dto::bookings::{BookingResponse, CreateBookingRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Booking,
    services::booking_service,
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct BuyerQuery {
    pub email: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/booking", post(create_booking).get(bookings_for_buyer))
        .route("/booking/{id}", get(get_booking))
}

#[utoipa::path(
    post,
    path = "/booking",
    request_body = CreateBookingRequest,
    responses(
        (status = 200, description = "Created booking, or an unacknowledged duplicate result", body = BookingResponse)
    ),
    tag = "Bookings"
)]
pub async fn create_booking(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookingRequest>,
) -> AppResult<Json<BookingResponse>> {
    let resp = booking_service::create_booking(&state.pool, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/booking",
    params(("email" = String, Query, description = "Buyer email; must match the token claim")),
    responses(
        (status = 200, description = "Bookings for the buyer", body = [Booking]),
        (status = 401, description = "No credential"),
        (status = 403, description = "Claim does not match the query email"),
    ),
    security(("bearer_auth" = [])),
    tag = "Bookings"
)]
pub async fn bookings_for_buyer(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<BuyerQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    user.ensure_self(&query.email)?;
    let bookings = booking_service::bookings_for_buyer(&state.pool, &query.email).await?;
    Ok(Json(bookings))
}

#[utoipa::path(
    get,
    path = "/booking/{id}",
    params(("id" = Uuid, Path, description = "Booking id")),
    responses(
        (status = 200, description = "One booking", body = Booking),
        (status = 404, description = "No such booking"),
    ),
    tag = "Bookings"
)]
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Booking>> {
    let booking = booking_service::booking_by_id(&state.pool, id).await?;
    Ok(Json(booking))
}
