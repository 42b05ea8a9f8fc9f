use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::payments::{ConfirmPaymentRequest, CreateIntentRequest, CreateIntentResponse},
    error::AppResult,
    models::PaymentRecord,
    services::payment_service::{self, to_minor_units},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-payment-intent", post(create_payment_intent))
        .route("/payments", post(confirm_payment))
}

#[utoipa::path(
    post,
    path = "/create-payment-intent",
    request_body = CreateIntentRequest,
    responses(
        (status = 200, description = "Client secret for completing payment", body = CreateIntentResponse),
        (status = 502, description = "Payment processor failure"),
    ),
    tag = "Payments"
)]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    Json(payload): Json<CreateIntentRequest>,
) -> AppResult<Json<CreateIntentResponse>> {
    let client_secret = state
        .payments
        .create_intent(to_minor_units(payload.price))
        .await?;
    Ok(Json(CreateIntentResponse { client_secret }))
}

#[utoipa::path(
    post,
    path = "/payments",
    request_body = ConfirmPaymentRequest,
    responses(
        (status = 200, description = "Recorded payment; booking and listing updated", body = PaymentRecord)
    ),
    tag = "Payments"
)]
pub async fn confirm_payment(
    State(state): State<AppState>,
    Json(payload): Json<ConfirmPaymentRequest>,
) -> AppResult<Json<PaymentRecord>> {
    let record = payment_service::confirm_payment(&state.pool, payload).await?;
    Ok(Json(record))
}
