use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::types::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Profile id of the acting user
    pub sub: Uuid,
    pub tenant_id: Option<Uuid>,
    pub email: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(
        profile_id: Uuid,
        tenant_id: Option<Uuid>,
        email: String,
        role: Role,
        expiry_hours: u64,
    ) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: profile_id,
            tenant_id,
            email,
            role,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    InvalidToken(String),
    InvalidSecret,
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::InvalidToken(msg) => write!(f, "Invalid JWT token: {}", msg),
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
        }
    }
}

impl std::error::Error for JwtError {}

pub fn generate_jwt(claims: &Claims, security: &SecurityConfig) -> Result<String, JwtError> {
    if security.jwt_secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(security.jwt_secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

pub fn validate_jwt(token: &str, security: &SecurityConfig) -> Result<Claims, JwtError> {
    if security.jwt_secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(security.jwt_secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_security() -> SecurityConfig {
        SecurityConfig {
            jwt_secret: "test-secret".to_string(),
            jwt_expiry_hours: 1,
        }
    }

    #[test]
    fn test_issue_and_validate_round_trip() {
        let security = test_security();
        let profile_id = Uuid::new_v4();
        let tenant_id = Uuid::new_v4();
        let claims = Claims::new(
            profile_id,
            Some(tenant_id),
            "coach@example.com".to_string(),
            Role::Admin,
            security.jwt_expiry_hours,
        );

        let token = generate_jwt(&claims, &security).unwrap();
        let decoded = validate_jwt(&token, &security).unwrap();

        assert_eq!(decoded.sub, profile_id);
        assert_eq!(decoded.tenant_id, Some(tenant_id));
        assert_eq!(decoded.role, Role::Admin);
        assert_eq!(decoded.email, "coach@example.com");
    }

    #[test]
    fn test_empty_secret_rejected() {
        let security = SecurityConfig {
            jwt_secret: String::new(),
            jwt_expiry_hours: 1,
        };
        let claims = Claims::new(Uuid::new_v4(), None, "x@y.z".into(), Role::Member, 1);
        assert!(matches!(
            generate_jwt(&claims, &security),
            Err(JwtError::InvalidSecret)
        ));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let security = test_security();
        let claims = Claims::new(Uuid::new_v4(), None, "x@y.z".into(), Role::Member, 1);
        let token = generate_jwt(&claims, &security).unwrap();

        let other = SecurityConfig {
            jwt_secret: "other-secret".to_string(),
            jwt_expiry_hours: 1,
        };
        assert!(validate_jwt(&token, &other).is_err());
    }
}
