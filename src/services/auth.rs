use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Audience the auth backend stamps on tokens of signed-in users
pub const AUTHENTICATED_AUDIENCE: &str = "authenticated";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing access token")]
    MissingToken,

    #[error("Invalid access token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Token verification is not configured")]
    NotConfigured,
}

/// Claims carried by backend-issued access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub exp: usize,
}

/// Verifies HS256 access tokens issued by the auth backend
pub struct TokenVerifier {
    key: Option<DecodingKey>,
    validation: Validation,
}

impl TokenVerifier {
    /// An empty secret yields a verifier that rejects every token
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[AUTHENTICATED_AUDIENCE]);

        let key = if secret.is_empty() {
            None
        } else {
            Some(DecodingKey::from_secret(secret.as_bytes()))
        };

        Self { key, validation }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let key = self.key.as_ref().ok_or(AuthError::NotConfigured)?;
        let data = decode::<Claims>(token, key, &self.validation)?;
        Ok(data.claims)
    }
}
