use anyhow::{anyhow, Result};
/// JWT token generation and validation using HS256.
/// Access tokens carry the caller's username as the subject.
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token type: always "access"
    pub token_type: String,
}

// Thread-safe mutable storage for JWT keys loaded from configuration
lazy_static! {
    static ref JWT_KEYS: RwLock<Option<(EncodingKey, DecodingKey)>> = RwLock::new(None);
}

/// Initialize JWT keys from the shared secret.
/// Must be called during application startup before any JWT operations
pub fn initialize_keys(secret: &str) -> Result<()> {
    if secret.is_empty() {
        return Err(anyhow!("JWT secret must not be empty"));
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());

    let mut keys = JWT_KEYS
        .write()
        .map_err(|e| anyhow!("Failed to acquire write lock on JWT keys: {}", e))?;
    *keys = Some((encoding_key, decoding_key));

    Ok(())
}

fn get_encoding_key() -> Result<EncodingKey> {
    let keys = JWT_KEYS
        .read()
        .map_err(|e| anyhow!("Failed to acquire read lock on JWT keys: {}", e))?;

    keys.as_ref()
        .map(|(enc, _)| enc.clone())
        .ok_or_else(|| anyhow!("JWT keys not initialized. Call initialize_keys() during startup"))
}

fn get_decoding_key() -> Result<DecodingKey> {
    let keys = JWT_KEYS
        .read()
        .map_err(|e| anyhow!("Failed to acquire read lock on JWT keys: {}", e))?;

    keys.as_ref()
        .map(|(_, dec)| dec.clone())
        .ok_or_else(|| anyhow!("JWT keys not initialized. Call initialize_keys() during startup"))
}

/// Generate a new access token for the given username
pub fn generate_access_token(username: &str, ttl_seconds: i64) -> Result<String> {
    let now = Utc::now();
    let expiry = now + Duration::seconds(ttl_seconds);

    let claims = Claims {
        sub: username.to_string(),
        iat: now.timestamp(),
        exp: expiry.timestamp(),
        token_type: "access".to_string(),
    };

    let encoding_key = get_encoding_key()?;
    encode(
        &Header::new(jsonwebtoken::Algorithm::HS256),
        &claims,
        &encoding_key,
    )
    .map_err(|e| anyhow!("Failed to generate access token: {}", e))
}

/// Validate and decode a token
pub fn validate_token(token: &str) -> Result<TokenData<Claims>> {
    let decoding_key = get_decoding_key()?;
    decode::<Claims>(
        token,
        &decoding_key,
        &Validation::new(jsonwebtoken::Algorithm::HS256),
    )
    .map_err(|e| anyhow!("Token validation failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        initialize_keys("test-secret-for-unit-tests").expect("Failed to initialize keys");
    }

    #[test]
    fn test_generate_access_token() {
        init();
        let token = generate_access_token("testuser", 3600);
        assert!(token.is_ok());

        let token_str = token.unwrap();
        assert!(!token_str.is_empty());
        // JWT tokens have 3 parts separated by dots
        assert_eq!(token_str.matches('.').count(), 2);
    }

    #[test]
    fn test_validate_valid_token() {
        init();
        let token = generate_access_token("testuser", 3600).expect("Failed to generate token");

        let validation = validate_token(&token);
        assert!(validation.is_ok());

        let claims = validation.unwrap().claims;
        assert_eq!(claims.sub, "testuser");
        assert_eq!(claims.token_type, "access");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_validate_invalid_token() {
        init();
        let result = validate_token("not.a.valid.token");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_expired_token() {
        init();
        let token = generate_access_token("testuser", -60).expect("Failed to generate token");

        let result = validate_token(&token);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(initialize_keys("").is_err());
    }
}
