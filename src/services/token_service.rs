use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::{
    dto::auth::Claims,
    error::{AppError, AppResult},
};

const TOKEN_TTL_HOURS: i64 = 24;

/// Issues and verifies the signed bearer credential binding an email claim.
/// Built once from `ACCESS_TOKEN_SECRET` at startup and cloned into state.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Sign a credential for `email`, valid for 24 hours. No refresh.
    pub fn issue(&self, email: &str) -> AppResult<String> {
        let expiration = Utc::now()
            .checked_add_signed(Duration::hours(TOKEN_TTL_HOURS))
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

        let claims = Claims {
            email: email.to_string(),
            exp: expiration.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
    }

    /// A malformed, tampered, or expired token is Forbidden: the caller
    /// presented a credential, it just does not hold up.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AppError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    #[test]
    fn issue_then_verify_round_trips_email() {
        let svc = TokenService::new("test-secret");
        let token = svc.issue("rider@example.com").unwrap();
        let claims = svc.verify(&token).unwrap();
        assert_eq!(claims.email, "rider@example.com");
    }

    #[test]
    fn verify_rejects_token_signed_with_other_secret() {
        let svc = TokenService::new("test-secret");
        let other = TokenService::new("another-secret");
        let token = other.issue("rider@example.com").unwrap();
        assert!(matches!(svc.verify(&token), Err(AppError::Forbidden)));
    }

    #[test]
    fn verify_rejects_expired_token() {
        let svc = TokenService::new("test-secret");
        // One hour past expiry, well beyond the default leeway.
        let claims = Claims {
            email: "rider@example.com".to_string(),
            exp: (Utc::now() - Duration::hours(1)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert!(matches!(svc.verify(&token), Err(AppError::Forbidden)));
    }

    #[test]
    fn verify_rejects_garbage() {
        let svc = TokenService::new("test-secret");
        assert!(matches!(
            svc.verify("not-a-jwt"),
            Err(AppError::Forbidden)
        ));
    }
}
