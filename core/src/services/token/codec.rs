//! Access token signing and verification

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};

use super::config::TokenCodecConfig;

/// Signs and verifies JWT access tokens
pub struct TokenCodec {
    config: TokenCodecConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Creates a new codec from configuration
    pub fn new(config: TokenCodecConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Access token lifetime in seconds
    pub fn access_ttl_seconds(&self) -> i64 {
        self.config.access_token_ttl_seconds
    }

    /// Issues an access token for `username`
    ///
    /// # Arguments
    ///
    /// * `username` - Token subject
    /// * `roles` - Role names embedded as advisory claims
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The signed token
    /// * `Err(DomainError)` - Encoding failed
    pub fn issue(&self, username: &str, roles: &[String]) -> Result<String, DomainError> {
        let claims = Claims::new_access_token(
            username,
            roles.to_vec(),
            self.config.access_token_ttl_seconds,
            self.config.issuer.clone(),
            self.config.audience.clone(),
        );
        self.encode_claims(&claims)
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode_claims(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies an access token and returns the claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(TokenError)` - Token is malformed, badly signed, not yet valid or expired
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| DomainError::Token(map_jwt_error(e.kind())))?;

        let claims = token_data.claims;

        // jsonwebtoken still accepts exp == now
        if claims.exp <= Utc::now().timestamp() {
            return Err(DomainError::Token(TokenError::TokenExpired));
        }
        if claims.sub.is_empty() {
            return Err(DomainError::Token(TokenError::InvalidClaims));
        }

        Ok(claims)
    }
}

fn map_jwt_error(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::ExpiredSignature => TokenError::TokenExpired,
        ErrorKind::ImmatureSignature => TokenError::TokenNotYetValid,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::InvalidIssuer
        | ErrorKind::InvalidAudience
        | ErrorKind::InvalidSubject
        | ErrorKind::MissingRequiredClaim(_) => TokenError::InvalidClaims,
        _ => TokenError::InvalidTokenFormat,
    }
}
