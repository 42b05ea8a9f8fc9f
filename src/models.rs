use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

/// A seller-posted bicycle for sale. `available` flips false exactly once,
/// on successful payment confirmation.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bike {
    pub id: Uuid,
    pub category_id: Uuid,
    pub seller_email: String,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

/// A buyer's reservation of a listing pending payment. Never deleted;
/// `paid` and `transaction_id` are set only by payment confirmation.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub buyer_email: String,
    pub product_name: String,
    pub price: i64,
    pub paid: bool,
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub product_id: Uuid,
    pub transaction_id: String,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdvertisedItem {
    pub id: Uuid,
    pub bike_id: Uuid,
    pub name: String,
    pub price: i64,
    pub created_at: DateTime<Utc>,
}
