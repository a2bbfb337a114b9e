use std::env;
use std::path::PathBuf;

use chrono::Duration;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::set_security_headers;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_TOKEN_TTL_DAYS: i64 = 7;

pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

impl Config {
    /// Reads configuration from the environment. `JWT_SECRET` is the only
    /// required variable; everything else has a development default.
    pub fn from_env() -> Result<Self, String> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| format!("PORT must be a number, got '{raw}'"))?,
            Err(_) => DEFAULT_PORT,
        };

        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| "JWT_SECRET must be set".to_string())?;

        let token_ttl_days = match env::var("TOKEN_TTL_DAYS") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| format!("TOKEN_TTL_DAYS must be a number, got '{raw}'"))?,
            Err(_) => DEFAULT_TOKEN_TTL_DAYS,
        };

        Ok(Self {
            port,
            data_dir,
            jwt_secret,
            token_ttl: Duration::days(token_ttl_days),
        })
    }
}
