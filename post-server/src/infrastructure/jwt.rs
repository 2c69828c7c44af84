use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub(crate) enum JwtError {
    #[cfg(test)]
    #[error("token encode failed")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("token decode/validation failed")]
    Decode(#[source] jsonwebtoken::errors::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct Claims {
    pub(crate) sub: Uuid,
    pub(crate) exp: i64,
}

/// Verifies access tokens minted by the auth service sharing `JWT_SECRET`.
pub(crate) struct JwtService {
    decoding_key: DecodingKey,
    #[cfg(test)]
    secret: String,
}

impl JwtService {
    const LEEWAY_SECONDS: u64 = 10;

    pub(crate) fn new(secret: &str) -> Self {
        JwtService {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            #[cfg(test)]
            secret: secret.into(),
        }
    }

    pub(crate) fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = Self::LEEWAY_SECONDS;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(JwtError::Decode)?;

        Ok(token_data.claims)
    }

    #[cfg(test)]
    pub(crate) fn generate_token(&self, user_id: Uuid, ttl_seconds: i64) -> Result<String, JwtError> {
        use jsonwebtoken::{EncodingKey, Header, encode};

        let exp = (chrono::Utc::now() + chrono::Duration::seconds(ttl_seconds)).timestamp();
        let claims = Claims { sub: user_id, exp };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(JwtError::Encode)
    }
}
