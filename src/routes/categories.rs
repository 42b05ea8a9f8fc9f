use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Bike, Category},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/category/{id}", get(bikes_in_category))
}

#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "The three seeded categories", body = [Category])
    ),
    tag = "Catalog"
)]
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories =
        sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name LIMIT 3")
            .fetch_all(&state.pool)
            .await?;
    Ok(Json(categories))
}

#[utoipa::path(
    get,
    path = "/category/{id}",
    params(("id" = Uuid, Path, description = "Category id")),
    responses(
        (status = 200, description = "Listings in the category", body = [Bike])
    ),
    tag = "Catalog"
)]
pub async fn bikes_in_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<Bike>>> {
    let bikes = sqlx::query_as::<_, Bike>(
        "SELECT * FROM bikes WHERE category_id = $1 ORDER BY created_at DESC",
    )
    .bind(id)
    .fetch_all(&state.pool)
    .await?;
    Ok(Json(bikes))
}
