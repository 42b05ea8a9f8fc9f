use uuid::Uuid;

use crate::{
    audit,
    db::DbPool,
    dto::bookings::{BookingResponse, CreateBookingRequest},
    error::{AppError, AppResult},
    models::Booking,
};

pub const ALREADY_BOOKED_MESSAGE: &str = "you have already booked this item before";

/// Reserve a listing for a buyer. The duplicate check rides on the unique
/// index over (buyer_email, product_name): the insert and the check are one
/// atomic statement, so two identical concurrent requests cannot both land.
/// A duplicate is a business signal, not a failure, and comes back as an
/// unacknowledged result.
pub async fn create_booking(
    pool: &DbPool,
    payload: CreateBookingRequest,
) -> AppResult<BookingResponse> {
    let id = Uuid::new_v4();
    let booking: Option<Booking> = sqlx::query_as(
        r#"
        INSERT INTO bookings (id, buyer_email, product_name, price)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (buyer_email, product_name) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(payload.email.as_str())
    .bind(payload.product_name.as_str())
    .bind(payload.price)
    .fetch_optional(pool)
    .await?;

    let booking = match booking {
        Some(b) => b,
        None => {
            return Ok(BookingResponse::Duplicate {
                acknowledge: false,
                message: ALREADY_BOOKED_MESSAGE.to_string(),
            });
        }
    };

    audit::record(
        pool,
        Some(&booking.buyer_email),
        "booking_created",
        Some("bookings"),
        Some(serde_json::json!({ "booking_id": booking.id })),
    )
    .await;

    Ok(BookingResponse::Created {
        acknowledge: true,
        inserted_id: booking.id,
    })
}

pub async fn bookings_for_buyer(pool: &DbPool, email: &str) -> AppResult<Vec<Booking>> {
    let bookings = sqlx::query_as::<_, Booking>(
        "SELECT * FROM bookings WHERE buyer_email = $1 ORDER BY created_at DESC",
    )
    .bind(email)
    .fetch_all(pool)
    .await?;
    Ok(bookings)
}

pub async fn booking_by_id(pool: &DbPool, id: Uuid) -> AppResult<Booking> {
    let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    booking.ok_or(AppError::NotFound)
}
