use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub access_token_secret: String,
    pub stripe_secret_key: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let access_token_secret = env::var("ACCESS_TOKEN_SECRET")?;
        let stripe_secret_key = env::var("STRIPE_SECRET_KEY")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8000);
        Ok(Self {
            database_url,
            access_token_secret,
            stripe_secret_key,
            host,
            port,
        })
    }
}
