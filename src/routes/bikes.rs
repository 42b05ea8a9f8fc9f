use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::Bike,
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBikeRequest {
    pub category_name: String,
    pub seller_email: String,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBikeRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub available: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SellerQuery {
    pub email: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bikes", post(create_bike).get(bikes_by_seller))
        .route(
            "/bikes/{id}",
            get(get_bike).put(update_bike).delete(delete_bike),
        )
}

#[utoipa::path(
    post,
    path = "/bikes",
    request_body = CreateBikeRequest,
    responses(
        (status = 200, description = "Inserted listing with resolved category", body = Bike),
        (status = 400, description = "Unknown category name"),
    ),
    tag = "Bikes"
)]
pub async fn create_bike(
    State(state): State<AppState>,
    Json(payload): Json<CreateBikeRequest>,
) -> AppResult<Json<Bike>> {
    // Sellers post with a category name; resolve it to the seeded id.
    let category: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM categories WHERE name = $1")
        .bind(payload.category_name.as_str())
        .fetch_optional(&state.pool)
        .await?;
    let (category_id,) = category.ok_or_else(|| {
        AppError::BadRequest(format!("unknown category: {}", payload.category_name))
    })?;

    let id = Uuid::new_v4();
    let bike: Bike = sqlx::query_as(
        r#"
        INSERT INTO bikes (id, category_id, seller_email, name, description, price, available)
        VALUES ($1, $2, $3, $4, $5, $6, TRUE)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(category_id)
    .bind(payload.seller_email)
    .bind(payload.name)
    .bind(payload.description)
    .bind(payload.price)
    .fetch_one(&state.pool)
    .await?;

    Ok(Json(bike))
}

#[utoipa::path(
    get,
    path = "/bikes",
    params(("email" = String, Query, description = "Seller email")),
    responses(
        (status = 200, description = "Listings posted by the seller", body = [Bike])
    ),
    tag = "Bikes"
)]
pub async fn bikes_by_seller(
    State(state): State<AppState>,
    Query(query): Query<SellerQuery>,
) -> AppResult<Json<Vec<Bike>>> {
    let bikes = sqlx::query_as::<_, Bike>(
        "SELECT * FROM bikes WHERE seller_email = $1 ORDER BY created_at DESC",
    )
    .bind(query.email.as_str())
    .fetch_all(&state.pool)
    .await?;
    Ok(Json(bikes))
}

#[utoipa::path(
    get,
    path = "/bikes/{id}",
    params(("id" = Uuid, Path, description = "Listing id")),
    responses(
        (status = 200, description = "One listing", body = Bike),
        (status = 404, description = "No such listing"),
    ),
    tag = "Bikes"
)]
pub async fn get_bike(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Bike>> {
    let bike = sqlx::query_as::<_, Bike>("SELECT * FROM bikes WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;
    let bike = match bike {
        Some(b) => b,
        None => return Err(AppError::NotFound),
    };
    Ok(Json(bike))
}

#[utoipa::path(
    put,
    path = "/bikes/{id}",
    params(("id" = Uuid, Path, description = "Listing id")),
    request_body = UpdateBikeRequest,
    responses(
        (status = 200, description = "Updated listing", body = Bike),
        (status = 404, description = "No such listing"),
    ),
    tag = "Bikes"
)]
pub async fn update_bike(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBikeRequest>,
) -> AppResult<Json<Bike>> {
    let existing = sqlx::query_as::<_, Bike>("SELECT * FROM bikes WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;
    let existing = match existing {
        Some(b) => b,
        None => return Err(AppError::NotFound),
    };

    let name = payload.name.unwrap_or(existing.name);
    let description = payload.description.or(existing.description);
    let price = payload.price.unwrap_or(existing.price);
    let available = payload.available.unwrap_or(existing.available);

    let bike = sqlx::query_as::<_, Bike>(
        r#"
        UPDATE bikes
        SET name = $2, description = $3, price = $4, available = $5
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(price)
    .bind(available)
    .fetch_one(&state.pool)
    .await?;

    Ok(Json(bike))
}

#[utoipa::path(
    delete,
    path = "/bikes/{id}",
    params(("id" = Uuid, Path, description = "Listing id")),
    responses(
        (status = 200, description = "Deleted listing"),
        (status = 404, description = "No such listing"),
    ),
    tag = "Bikes"
)]
pub async fn delete_bike(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM bikes WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(Json(serde_json::json!({ "deletedCount": result.rows_affected() })))
}
