use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{error::AppResult, models::AdvertisedItem, state::AppState};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdvertiseRequest {
    pub bike_id: Uuid,
    pub name: String,
    pub price: i64,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/advertisedItem", post(advertise).get(list_advertised))
}

#[utoipa::path(
    post,
    path = "/advertisedItem",
    request_body = AdvertiseRequest,
    responses(
        (status = 200, description = "Advertised listing", body = AdvertisedItem)
    ),
    tag = "Bikes"
)]
pub async fn advertise(
    State(state): State<AppState>,
    Json(payload): Json<AdvertiseRequest>,
) -> AppResult<Json<AdvertisedItem>> {
    let id = Uuid::new_v4();
    let item: AdvertisedItem = sqlx::query_as(
        r#"
        INSERT INTO advertised_items (id, bike_id, name, price)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(payload.bike_id)
    .bind(payload.name)
    .bind(payload.price)
    .fetch_one(&state.pool)
    .await?;

    Ok(Json(item))
}

#[utoipa::path(
    get,
    path = "/advertisedItem",
    responses(
        (status = 200, description = "All advertised listings", body = [AdvertisedItem])
    ),
    tag = "Bikes"
)]
pub async fn list_advertised(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<AdvertisedItem>>> {
    let items = sqlx::query_as::<_, AdvertisedItem>(
        "SELECT * FROM advertised_items ORDER BY created_at DESC",
    )
    .fetch_all(&state.pool)
    .await?;
    Ok(Json(items))
}
