//! Unit tests for the token codec

use chrono::Utc;

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};
use crate::services::token::{TokenCodec, TokenCodecConfig};

fn codec() -> TokenCodec {
    TokenCodec::new(TokenCodecConfig {
        jwt_secret: "test-secret".to_string(),
        access_token_ttl_seconds: 900,
        issuer: "auth-service".to_string(),
        audience: "auth-service-api".to_string(),
    })
}

fn assert_token_error(result: Result<Claims, DomainError>, expected: TokenError) {
    match result {
        Err(DomainError::Token(err)) => assert_eq!(err, expected),
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}

#[test]
fn test_issue_then_verify_returns_subject() {
    let codec = codec();
    let token = codec.issue("alice", &["admin".to_string()]).unwrap();

    let claims = codec.verify(&token).unwrap();
    assert_eq!(claims.sub, "alice");
    assert_eq!(claims.roles, vec!["admin".to_string()]);
    assert_eq!(claims.exp - claims.iat, 900);
}

#[test]
fn test_tokens_for_same_user_differ() {
    let codec = codec();
    let a = codec.issue("alice", &[]).unwrap();
    let b = codec.issue("alice", &[]).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_expired_token_rejected() {
    let codec = codec();
    let mut claims = Claims::new_access_token("alice", vec![], 900, "auth-service", "auth-service-api");
    claims.iat -= 1000;
    claims.nbf -= 1000;
    claims.exp = Utc::now().timestamp() - 1;

    let token = codec.encode_claims(&claims).unwrap();
    assert_token_error(codec.verify(&token), TokenError::TokenExpired);
}

#[test]
fn test_token_expiring_now_rejected() {
    let codec = codec();
    let mut claims = Claims::new_access_token("alice", vec![], 900, "auth-service", "auth-service-api");
    claims.exp = Utc::now().timestamp();

    let token = codec.encode_claims(&claims).unwrap();
    assert_token_error(codec.verify(&token), TokenError::TokenExpired);
}

#[test]
fn test_not_yet_valid_token_rejected() {
    let codec = codec();
    let mut claims = Claims::new_access_token("alice", vec![], 900, "auth-service", "auth-service-api");
    claims.nbf = Utc::now().timestamp() + 600;

    let token = codec.encode_claims(&claims).unwrap();
    assert_token_error(codec.verify(&token), TokenError::TokenNotYetValid);
}

#[test]
fn test_wrong_secret_rejected() {
    let token = codec().issue("alice", &[]).unwrap();

    let other = TokenCodec::new(TokenCodecConfig {
        jwt_secret: "another-secret".to_string(),
        issuer: "auth-service".to_string(),
        audience: "auth-service-api".to_string(),
        ..TokenCodecConfig::default()
    });

    assert_token_error(other.verify(&token), TokenError::InvalidSignature);
}

#[test]
fn test_tampered_token_rejected() {
    let codec = codec();
    let token = codec.issue("alice", &[]).unwrap();

    let mut parts: Vec<&str> = token.split('.').collect();
    let forged_payload = codec.issue("mallory", &[]).unwrap();
    let forged_parts: Vec<&str> = forged_payload.split('.').collect();
    parts[1] = forged_parts[1];
    let tampered = parts.join(".");

    assert_token_error(codec.verify(&tampered), TokenError::InvalidSignature);
}

#[test]
fn test_malformed_token_rejected() {
    let codec = codec();
    assert_token_error(codec.verify("not-a-jwt"), TokenError::InvalidTokenFormat);
    assert_token_error(codec.verify(""), TokenError::InvalidTokenFormat);
}

#[test]
fn test_wrong_audience_rejected() {
    let codec = codec();
    let claims = Claims::new_access_token("alice", vec![], 900, "auth-service", "someone-else");
    let token = codec.encode_claims(&claims).unwrap();

    assert_token_error(codec.verify(&token), TokenError::InvalidClaims);
}

#[test]
fn test_default_config_matches_jwt_defaults() {
    let config = TokenCodecConfig::default();
    assert_eq!(config.access_token_ttl_seconds, 900);
    assert_eq!(codec().access_ttl_seconds(), 900);
}
