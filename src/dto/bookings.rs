use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub email: String,
    pub product_name: String,
    pub price: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum BookingResponse {
    #[serde(rename_all = "camelCase")]
    Created { acknowledge: bool, inserted_id: Uuid },
    #[serde(rename_all = "camelCase")]
    Duplicate { acknowledge: bool, message: String },
}
