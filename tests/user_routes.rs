use axum::{Json, extract::State, http::StatusCode};
use bike_valley_api::{
    db::create_pool,
    routes::users::{CreateUserRequest, create_user},
    services::{payment_service::PaymentClient, token_service::TokenService},
    state::AppState,
};

#[tokio::test]
async fn create_user_responds_created() -> anyhow::Result<()> {
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

    let state = AppState {
        pool,
        tokens: TokenService::new("test-secret"),
        payments: PaymentClient::with_base("sk_test_unused", "http://127.0.0.1:9"),
    };

    let (status, Json(user)) = create_user(
        State(state),
        Json(CreateUserRequest {
            email: "new@x.com".into(),
            name: Some("New Rider".into()),
            role: None,
            address: None,
            phone: None,
        }),
    )
    .await?;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user.email, "new@x.com");
    assert_eq!(user.role, "User");

    Ok(())
}
