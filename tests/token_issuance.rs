use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use bike_valley_api::{
    db::create_pool,
    routes::auth::{JwtQuery, issue_token},
    services::{payment_service::PaymentClient, token_service::TokenService},
    state::AppState,
};
use uuid::Uuid;

// The /jwt route hands out a verifiable token for a registered email and an
// empty one with 403 for anyone else.
#[tokio::test]
async fn jwt_route_issues_verifiable_token_for_known_user() -> anyhow::Result<()> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let pool = create_pool(&database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    sqlx::query(
        "TRUNCATE TABLE payments, bookings, advertised_items, bikes, audit_logs, users RESTART IDENTITY CASCADE",
    )
    .execute(&pool)
    .await?;

    sqlx::query("INSERT INTO users (id, email, role) VALUES ($1, $2, 'User')")
        .bind(Uuid::new_v4())
        .bind("rider@example.com")
        .execute(&pool)
        .await?;

    let state = AppState {
        pool,
        tokens: TokenService::new("test-secret"),
        // Never called here; pointed nowhere on purpose.
        payments: PaymentClient::with_base("sk_test_unused", "http://127.0.0.1:9"),
    };

    let (status, body) = issue_token(
        State(state.clone()),
        Query(JwtQuery {
            email: "rider@example.com".into(),
        }),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let claims = state.tokens.verify(&body.0.access_token)?;
    assert_eq!(claims.email, "rider@example.com");

    let (status, body) = issue_token(
        State(state),
        Query(JwtQuery {
            email: "stranger@example.com".into(),
        }),
    )
    .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.0.access_token.is_empty());

    Ok(())
}
