use crate::{db::DbPool, services::payment_service::PaymentClient, services::token_service::TokenService};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub tokens: TokenService,
    pub payments: PaymentClient,
}
