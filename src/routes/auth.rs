use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{dto::auth::TokenResponse, error::AppResult, state::AppState};

#[derive(Debug, Deserialize, ToSchema)]
pub struct JwtQuery {
    pub email: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/jwt", get(issue_token))
}

#[utoipa::path(
    get,
    path = "/jwt",
    params(
        ("email" = String, Query, description = "Email of a registered user")
    ),
    responses(
        (status = 200, description = "Access token for the user", body = TokenResponse),
        (status = 403, description = "No such user; empty token", body = TokenResponse),
    ),
    tag = "Auth"
)]
pub async fn issue_token(
    State(state): State<AppState>,
    Query(query): Query<JwtQuery>,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    let user: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(query.email.as_str())
        .fetch_optional(&state.pool)
        .await?;

    // An unknown email gets an empty token with 403 rather than an error
    // body; clients key off accessToken being falsy.
    if user.is_none() {
        return Ok((
            StatusCode::FORBIDDEN,
            Json(TokenResponse {
                access_token: String::new(),
            }),
        ));
    }

    let token = state.tokens.issue(&query.email)?;
    Ok((
        StatusCode::OK,
        Json(TokenResponse {
            access_token: token,
        }),
    ))
}
