use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::JwtConfig;

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Failed to encode JWT token: {0}")]
    EncodingFailed(String),
    #[error("Failed to decode JWT token: {0}")]
    DecodingFailed(String),
    #[error("Token has expired")]
    TokenExpired,
    #[error("Invalid token format")]
    InvalidToken,
    #[error("Missing JWT secret")]
    MissingSecret,
    #[error("Invalid token type: expected {expected}, got {actual}")]
    InvalidTokenType { expected: String, actual: String },
}

/// Payload carried by every signed token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Admin account id (hex ObjectId)
    pub sub: String,
    pub email: String,
    /// Account role ("admin" for every back-office account)
    pub role: String,
    pub iat: i64,
    pub exp: i64,
    /// "access" or "refresh"
    pub token_type: String,
    /// Unique token id
    pub jti: String,
}

/// What a successful login hands back to the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    pub token_type: String,
}

#[derive(Debug, Clone)]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

pub trait JwtTokenUtils {
    fn generate_access_token(&self, user_id: &str, email: &str, role: &str) -> Result<String, JwtError>;
    fn generate_refresh_token(&self, user_id: &str, email: &str, role: &str) -> Result<String, JwtError>;
    fn generate_token_pair(&self, user_id: &str, email: &str, role: &str) -> Result<TokenPair, JwtError>;
    fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError>;
    fn validate_refresh_token(&self, token: &str) -> Result<Claims, JwtError>;
    fn extract_token_from_header(&self, auth_header: &str) -> Result<String, JwtError>;
    fn get_user_id_from_token(&self, token: &str) -> Result<String, JwtError>;
    fn check_role_permission(&self, user_role: &str, required_role: &str) -> bool;
}

/// HS256 signer and verifier over the configured secret.
#[derive(Debug, Clone)]
pub struct JwtTokenUtilsImpl {
    pub jwt_config: JwtConfig,
}

impl JwtTokenUtilsImpl {
    pub fn new(jwt_config: JwtConfig) -> Self {
        JwtTokenUtilsImpl { jwt_config }
    }

    pub fn from_env() -> Result<Self, JwtError> {
        let jwt_config = JwtConfig::from_env().map_err(|_| JwtError::MissingSecret)?;
        jwt_config.validate().map_err(|_| JwtError::MissingSecret)?;
        Ok(JwtTokenUtilsImpl::new(jwt_config))
    }

    /// Same as `from_env` but reads the TEST_ prefixed variables.
    pub fn from_test_env() -> Result<Self, JwtError> {
        let jwt_config = JwtConfig::from_test_env().map_err(|_| JwtError::MissingSecret)?;
        jwt_config.validate().map_err(|_| JwtError::MissingSecret)?;
        Ok(JwtTokenUtilsImpl::new(jwt_config))
    }

    fn mint(
        &self,
        user_id: &str,
        email: &str,
        role: &str,
        token_type: TokenType,
        lifetime_minutes: i64,
    ) -> Result<String, JwtError> {
        debug!(user_id = %user_id, token_type = token_type.as_str(), "Minting token");

        let issued_at = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::minutes(lifetime_minutes)).timestamp(),
            token_type: token_type.as_str().to_string(),
            jti: Uuid::new_v4().to_string(),
        };

        let key = EncodingKey::from_secret(self.jwt_config.jwt_secret.as_bytes());
        encode(&Header::new(Algorithm::HS256), &claims, &key).map_err(|err| {
            error!("Failed to encode JWT token: {}", err);
            JwtError::EncodingFailed(err.to_string())
        })
    }

    /// Decodes and checks a token. When `expected_token_type` is given, an
    /// access token does not pass as a refresh token or the other way round.
    pub fn validate_token(
        &self,
        token: &str,
        expected_token_type: Option<TokenType>,
    ) -> Result<Claims, JwtError> {
        let key = DecodingKey::from_secret(self.jwt_config.jwt_secret.as_bytes());
        let token_data = decode::<Claims>(token, &key, &Validation::new(Algorithm::HS256))
            .map_err(|err| {
                error!("Failed to decode JWT token: {}", err);
                JwtError::DecodingFailed(err.to_string())
            })?;
        let claims = token_data.claims;

        // The decoder applies leeway to exp; the exact cutoff is enforced here.
        if claims.exp < Utc::now().timestamp() {
            warn!(user_id = %claims.sub, "Token has expired");
            return Err(JwtError::TokenExpired);
        }

        if let Some(expected) = expected_token_type {
            if claims.token_type != expected.as_str() {
                error!(
                    "Invalid token type: expected {}, got {}",
                    expected.as_str(),
                    claims.token_type
                );
                return Err(JwtError::InvalidTokenType {
                    expected: expected.as_str().to_string(),
                    actual: claims.token_type.clone(),
                });
            }
        }

        debug!(user_id = %claims.sub, "Token validated");
        Ok(claims)
    }
}

impl JwtTokenUtils for JwtTokenUtilsImpl {
    fn generate_access_token(&self, user_id: &str, email: &str, role: &str) -> Result<String, JwtError> {
        self.mint(
            user_id,
            email,
            role,
            TokenType::Access,
            self.jwt_config.access_token_expiration,
        )
    }

    fn generate_refresh_token(&self, user_id: &str, email: &str, role: &str) -> Result<String, JwtError> {
        self.mint(
            user_id,
            email,
            role,
            TokenType::Refresh,
            self.jwt_config.refresh_token_expiration,
        )
    }

    fn generate_token_pair(&self, user_id: &str, email: &str, role: &str) -> Result<TokenPair, JwtError> {
        let access_token = self.generate_access_token(user_id, email, role)?;
        let refresh_token = self.generate_refresh_token(user_id, email, role)?;
        info!(user_id = %user_id, "Generated token pair");
        Ok(TokenPair {
            access_token,
            refresh_token,
            // minutes to seconds
            expires_in: self.jwt_config.access_token_expiration * 60,
            token_type: "Bearer".to_string(),
        })
    }

    fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_token(token, Some(TokenType::Access))
    }

    fn validate_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_token(token, Some(TokenType::Refresh))
    }

    fn extract_token_from_header(&self, auth_header: &str) -> Result<String, JwtError> {
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(JwtError::InvalidToken)?
            .trim();
        if token.is_empty() {
            error!("Empty token in authorization header");
            return Err(JwtError::InvalidToken);
        }
        Ok(token.to_string())
    }

    fn get_user_id_from_token(&self, token: &str) -> Result<String, JwtError> {
        Ok(self.validate_token(token, None)?.sub)
    }

    fn check_role_permission(&self, user_role: &str, required_role: &str) -> bool {
        match (user_role, required_role) {
            // Admin is the only role the back office issues
            ("admin", _) => true,
            _ => false,
        }
    }
}
