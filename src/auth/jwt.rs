use chrono::Duration;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::claims::Claims,
    errors::{AppError, AppResult},
};

/// Issues and checks the HS256 bearer tokens that identify the caller.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

impl JwtService {
    pub fn new(secret: &SecretString, expiration_hours: i64) -> Self {
        let secret = secret.expose_secret().as_bytes();

        let mut validation = Validation::default();
        validation.leeway = 30;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            token_ttl: Duration::hours(expiration_hours),
        }
    }

    pub fn create_token(&self, user_id: &str) -> AppResult<String> {
        let claims = Claims::new(user_id, self.token_ttl);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("Failed to sign token: {}", e)))
    }

    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            let reason = match e.kind() {
                ErrorKind::ExpiredSignature => "token has expired".to_string(),
                ErrorKind::InvalidSignature => "token signature is invalid".to_string(),
                ErrorKind::InvalidToken => "token is malformed".to_string(),
                _ => e.to_string(),
            };
            AppError::Unauthorized(reason)
        })?;

        if data.claims.sub.trim().is_empty() {
            return Err(AppError::Unauthorized("token has no subject".to_string()));
        }

        Ok(data.claims)
    }
}
