use serde_json::Value;
use uuid::Uuid;

use crate::db::DbPool;

/// Append an audit row for a marketplace event. Best-effort: a failed insert
/// is logged and swallowed so it never disturbs the request that caused it.
pub async fn record(
    pool: &DbPool,
    actor_email: Option<&str>,
    action: &str,
    resource: Option<&str>,
    metadata: Option<Value>,
) {
    let result = sqlx::query(
        r#"
        INSERT INTO audit_logs (id, user_email, action, resource, metadata)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(actor_email)
    .bind(action)
    .bind(resource)
    .bind(metadata)
    .execute(pool)
    .await;

    if let Err(err) = result {
        tracing::warn!(error = %err, action, "audit log failed");
    }
}
