use crate::types::{PasswordHash, Username};
use serde::Deserialize;
use time::Duration;
use tokenauth::{KeyMaterial, KeyMaterialError, RoleId};

//--------------------------------------------------------------------------------------------------
// Config to be read from file
//--------------------------------------------------------------------------------------------------

const DEFAULT_ACCESS_TOKEN_LIFETIME_MS: i64 = 900_000;
const DEFAULT_REFRESH_TOKEN_LIFETIME_MS: i64 = 604_800_000;

#[derive(Deserialize)]
pub struct Config {
    #[serde(default)]
    pub debug: bool,
    pub http_port: Option<u16>,
    /// Standard base64, at least 32 bytes once decoded
    pub signing_secret: String,
    #[serde(default = "default_access_token_lifetime_ms")]
    pub access_token_lifetime_ms: i64,
    #[serde(default = "default_refresh_token_lifetime_ms")]
    pub refresh_token_lifetime_ms: i64,
    #[serde(default)]
    pub users: Vec<SeedUser>,
}

#[derive(Deserialize)]
pub struct SeedUser {
    pub username: Username,
    pub password_hash: PasswordHash,
    #[serde(default)]
    pub roles: Vec<RoleId>,
}

fn default_access_token_lifetime_ms() -> i64 {
    DEFAULT_ACCESS_TOKEN_LIFETIME_MS
}

fn default_refresh_token_lifetime_ms() -> i64 {
    DEFAULT_REFRESH_TOKEN_LIFETIME_MS
}

impl Config {
    pub fn key_material(&self) -> Result<KeyMaterial, KeyMaterialError> {
        KeyMaterial::from_base64_secret(
            &self.signing_secret,
            Duration::milliseconds(self.access_token_lifetime_ms),
            Duration::milliseconds(self.refresh_token_lifetime_ms),
        )
    }
}

//--------------------------------------------------------------------------------------------------


//--------------------------------------------------------------------------------------------------
