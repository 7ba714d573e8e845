use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ErrorMessage;

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

pub fn create_token(
    user_id: &str,
    secret: &[u8],
    expires_in_seconds: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    if user_id.is_empty() {
        return Err(jsonwebtoken::errors::ErrorKind::InvalidSubject.into());
    }

    let now = Utc::now();
    let claims = TokenClaims {
        sub: user_id.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::seconds(expires_in_seconds)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
}

pub fn decode_token(token: impl Into<String>, secret: &[u8]) -> Result<String, ErrorMessage> {
    // No clock leeway: an expired token is rejected immediately.
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let decoded = decode::<TokenClaims>(
        &token.into(),
        &DecodingKey::from_secret(secret),
        &validation,
    );

    match decoded {
        Ok(token) => Ok(token.claims.sub),
        Err(_) => Err(ErrorMessage::InvalidToken),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_decode_token() {
        let user_id = uuid::Uuid::new_v4().to_string();
        let secret = b"test-secret";

        let token = create_token(&user_id, secret, 60).unwrap();
        let decoded = decode_token(token, secret).unwrap();

        assert_eq!(decoded, user_id);
    }

    #[test]
    fn test_decode_with_wrong_secret_fails() {
        let token = create_token("some-user", b"secret-a", 60).unwrap();
        assert_eq!(decode_token(token, b"secret-b").unwrap_err(), ErrorMessage::InvalidToken);
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = create_token("some-user", b"secret", -10).unwrap();
        assert_eq!(decode_token(token, b"secret").unwrap_err(), ErrorMessage::InvalidToken);
    }
}
