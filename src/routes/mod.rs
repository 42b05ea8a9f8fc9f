use axum::Router;

use crate::state::AppState;

pub mod advertised;
pub mod auth;
pub mod bikes;
pub mod bookings;
pub mod categories;
pub mod doc;
pub mod health;
pub mod payments;
pub mod users;

// Build the API router without binding state; it is provided at the top level.
// Paths are mounted at the root to preserve the public contract.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(users::router())
        .merge(categories::router())
        .merge(bikes::router())
        .merge(advertised::router())
        .merge(bookings::router())
        .merge(payments::router())
}
