use serde::Deserialize;
use uuid::Uuid;

use crate::{
    audit,
    db::DbPool,
    dto::payments::ConfirmPaymentRequest,
    error::{AppError, AppResult},
    models::PaymentRecord,
};

const STRIPE_API_BASE: &str = "https://api.stripe.com";

/// Convert a price in the major currency unit to the processor's minor unit.
/// Plain integer multiplication, matching the quoted listing prices.
pub fn to_minor_units(price: i64) -> i64 {
    price * 100
}

fn intent_params(amount_minor: i64) -> Vec<(&'static str, String)> {
    vec![
        ("amount", amount_minor.to_string()),
        ("currency", "usd".to_string()),
        ("payment_method_types[]", "card".to_string()),
    ]
}

#[derive(Debug, Deserialize)]
struct IntentResponse {
    client_secret: String,
}

/// Thin client for the external payment processor. The API base is
/// overridable so tests can point it at a local stub.
#[derive(Clone)]
pub struct PaymentClient {
    http: reqwest::Client,
    secret_key: String,
    api_base: String,
}

impl PaymentClient {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self::with_base(secret_key, STRIPE_API_BASE)
    }

    pub fn with_base(secret_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret_key: secret_key.into(),
            api_base: api_base.into(),
        }
    }

    /// Request a single-use payment authorization for `amount_minor`, scoped
    /// to card payment methods. Returns the client-facing secret the caller
    /// uses to complete payment out-of-band.
    pub async fn create_intent(&self, amount_minor: i64) -> AppResult<String> {
        let response = self
            .http
            .post(format!("{}/v1/payment_intents", self.api_base))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&intent_params(amount_minor))
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "payment processor returned {status}: {body}"
            )));
        }

        let intent: IntentResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        Ok(intent.client_secret)
    }
}

/// Record a confirmed payment and flip the booking and listing together.
/// The payment row, the booking's paid flag, and the listing's availability
/// move in one transaction; partial application cannot occur.
pub async fn confirm_payment(
    pool: &DbPool,
    payload: ConfirmPaymentRequest,
) -> AppResult<PaymentRecord> {
    let mut txn = pool.begin().await?;

    let id = Uuid::new_v4();
    let record: PaymentRecord = sqlx::query_as(
        r#"
        INSERT INTO payments (id, booking_id, product_id, transaction_id, amount)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(payload.booking_id)
    .bind(payload.product_id)
    .bind(payload.transaction_id.as_str())
    .bind(payload.amount)
    .fetch_one(&mut *txn)
    .await?;

    sqlx::query("UPDATE bookings SET paid = TRUE, transaction_id = $2 WHERE id = $1")
        .bind(payload.booking_id)
        .bind(payload.transaction_id.as_str())
        .execute(&mut *txn)
        .await?;

    sqlx::query("UPDATE bikes SET available = FALSE WHERE id = $1")
        .bind(payload.product_id)
        .execute(&mut *txn)
        .await?;

    txn.commit().await?;

    audit::record(
        pool,
        None,
        "payment_confirmed",
        Some("payments"),
        Some(serde_json::json!({
            "booking_id": payload.booking_id,
            "transaction_id": payload.transaction_id,
        })),
    )
    .await;

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_dollars_is_two_thousand_cents() {
        assert_eq!(to_minor_units(20), 2000);
    }

    #[test]
    fn zero_price_stays_zero() {
        assert_eq!(to_minor_units(0), 0);
    }

    #[test]
    fn intent_params_carry_minor_amount_and_card_scope() {
        let params = intent_params(to_minor_units(20));
        assert!(params.contains(&("amount", "2000".to_string())));
        assert!(params.contains(&("currency", "usd".to_string())));
        assert!(params.contains(&("payment_method_types[]", "card".to_string())));
    }
}
