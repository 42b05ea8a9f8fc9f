use axum::{extract::FromRequestParts, http::header};

use crate::{error::AppError, state::AppState};

/// The verified identity behind a bearer credential. Extracting this on a
/// route is what makes the route protected: no header is Unauthorized, a
/// header that does not verify is Forbidden, both before business logic.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
}

impl AuthUser {
    /// Protected per-user routes require the token's email claim to match
    /// the email named in the path or query.
    pub fn ensure_self(&self, email: &str) -> Result<(), AppError> {
        if self.email != email {
            return Err(AppError::Forbidden);
        }
        Ok(())
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AppError::Unauthorized)?;

        let auth_str = auth_header.to_str().map_err(|_| AppError::Unauthorized)?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)?
            .trim();

        let claims = state.tokens.verify(token)?;

        Ok(AuthUser {
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    use crate::services::{payment_service::PaymentClient, token_service::TokenService};

    fn test_state() -> AppState {
        AppState {
            // Lazy pool: never connected, the guard does no database work.
            pool: sqlx::PgPool::connect_lazy("postgres://localhost/unused").unwrap(),
            tokens: TokenService::new("test-secret"),
            payments: PaymentClient::with_base("sk_test_unused", "http://127.0.0.1:9"),
        }
    }

    fn request_parts(auth_header: Option<&str>) -> axum::http::request::Parts {
        let mut builder = Request::builder().uri("/booking?email=a@x.com");
        if let Some(value) = auth_header {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let state = test_state();
        let mut parts = request_parts(None);
        let result = AuthUser::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_unauthorized() {
        let state = test_state();
        let mut parts = request_parts(Some("Basic dXNlcjpwdw=="));
        let result = AuthUser::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn garbage_bearer_token_is_forbidden() {
        let state = test_state();
        let mut parts = request_parts(Some("Bearer not-a-jwt"));
        let result = AuthUser::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn valid_token_for_other_email_is_forbidden_on_claim_check() {
        let state = test_state();
        let token = state.tokens.issue("b@x.com").unwrap();
        let mut parts = request_parts(Some(&format!("Bearer {token}")));

        // The credential itself verifies fine...
        let user = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(user.email, "b@x.com");

        // ...but the claim does not match the email the route names.
        assert!(matches!(
            user.ensure_self("a@x.com"),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn ensure_self_accepts_matching_email() {
        let user = AuthUser {
            email: "a@x.com".into(),
        };
        assert!(user.ensure_self("a@x.com").is_ok());
    }

    #[test]
    fn ensure_self_rejects_other_email() {
        let user = AuthUser {
            email: "a@x.com".into(),
        };
        assert!(matches!(
            user.ensure_self("b@x.com"),
            Err(AppError::Forbidden)
        ));
    }
}
