use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::User,
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertUserRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: String,
    pub name: Option<String>,
    pub role: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpsertUserResponse {
    pub result: User,
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleFlag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_seller: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_user: Option<bool>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user/{email}", put(upsert_user))
        .route("/users", post(create_user).get(list_users))
        .route("/users/allseller", get(list_sellers))
        .route("/users/admin/{email}", get(is_admin))
        .route("/users/seller/{email}", get(is_seller))
        .route("/users/{email}", get(is_user).delete(delete_user))
}

#[utoipa::path(
    put,
    path = "/user/{email}",
    params(("email" = String, Path, description = "User email")),
    request_body = UpsertUserRequest,
    responses(
        (status = 200, description = "Upserted user and a fresh token", body = UpsertUserResponse)
    ),
    tag = "Users"
)]
pub async fn upsert_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(payload): Json<UpsertUserRequest>,
) -> AppResult<Json<UpsertUserResponse>> {
    let id = Uuid::new_v4();
    let user: User = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, name, role, address, phone)
        VALUES ($1, $2, $3, COALESCE($4, 'User'), $5, $6)
        ON CONFLICT (email) DO UPDATE SET
            name = COALESCE(EXCLUDED.name, users.name),
            role = COALESCE($4, users.role),
            address = COALESCE(EXCLUDED.address, users.address),
            phone = COALESCE(EXCLUDED.phone, users.phone)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(email.as_str())
    .bind(payload.name)
    .bind(payload.role)
    .bind(payload.address)
    .bind(payload.phone)
    .fetch_one(&state.pool)
    .await?;

    // Profile save doubles as login: the client gets a fresh 24h token.
    let token = state.tokens.issue(&email)?;

    Ok(Json(UpsertUserResponse {
        result: user,
        token,
    }))
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Created user", body = User)
    ),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    let id = Uuid::new_v4();
    let user: User = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, name, role, address, phone)
        VALUES ($1, $2, $3, COALESCE($4, 'User'), $5, $6)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(payload.email.as_str())
    .bind(payload.name)
    .bind(payload.role)
    .bind(payload.address)
    .bind(payload.phone)
    .fetch_one(&state.pool)
    .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users", body = [User])
    ),
    tag = "Users"
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(users))
}

#[utoipa::path(
    get,
    path = "/users/allseller",
    responses(
        (status = 200, description = "Users with the Seller role", body = [User])
    ),
    tag = "Users"
)]
pub async fn list_sellers(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let sellers =
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE role = 'Seller' ORDER BY created_at")
            .fetch_all(&state.pool)
            .await?;
    Ok(Json(sellers))
}

#[utoipa::path(
    get,
    path = "/users/admin/{email}",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "Whether the user is an admin", body = RoleFlag)
    ),
    tag = "Users"
)]
pub async fn is_admin(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<RoleFlag>> {
    let admin = role_matches(&state, &email, "Admin").await?;
    Ok(Json(RoleFlag {
        is_admin: Some(admin),
        is_seller: None,
        is_user: None,
    }))
}

#[utoipa::path(
    get,
    path = "/users/seller/{email}",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "Whether the user is a seller", body = RoleFlag)
    ),
    tag = "Users"
)]
pub async fn is_seller(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<RoleFlag>> {
    let seller = role_matches(&state, &email, "Seller").await?;
    Ok(Json(RoleFlag {
        is_admin: None,
        is_seller: Some(seller),
        is_user: None,
    }))
}

// A missing user and a mismatched role both come out false; callers only
// ever branch on the flag.
async fn role_matches(state: &AppState, email: &str, role: &str) -> AppResult<bool> {
    let row: Option<(String,)> = sqlx::query_as("SELECT role FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(&state.pool)
        .await?;
    Ok(row.map(|(r,)| r == role).unwrap_or(false))
}

#[utoipa::path(
    get,
    path = "/users/{email}",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "Whether the caller is this user", body = RoleFlag),
        (status = 401, description = "No credential"),
        (status = 403, description = "Claim does not match the path email"),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn is_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(email): Path<String>,
) -> AppResult<Json<RoleFlag>> {
    user.ensure_self(&email)?;

    let row: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(email.as_str())
        .fetch_optional(&state.pool)
        .await?;

    Ok(Json(RoleFlag {
        is_admin: None,
        is_seller: None,
        is_user: Some(row.is_some()),
    }))
}

#[utoipa::path(
    delete,
    path = "/users/{email}",
    params(("email" = Uuid, Path, description = "User id; shares the path segment with the lookup route")),
    responses(
        (status = 200, description = "Deleted user"),
        (status = 404, description = "No such user"),
    ),
    tag = "Users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(Json(serde_json::json!({ "deletedCount": result.rows_affected() })))
}
