//! Integration tests for JWT authentication middleware

use std::collections::BTreeSet;
use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App, HttpResponse};
use async_trait::async_trait;
use uuid::Uuid;

use auth_api::middleware::auth::{AuthenticatedPrincipal, JwtAuth};
use auth_core::domain::entities::principal::Principal;
use auth_core::errors::{AuthError, DomainError, DomainResult};
use auth_core::services::gate::Authenticator;

/// Accepts exactly one token; "store-down" simulates a failing store
struct StubAuthenticator;

#[async_trait]
impl Authenticator for StubAuthenticator {
    async fn authenticate(&self, access_token: &str) -> DomainResult<Principal> {
        match access_token {
            "good-token" => Ok(Principal {
                user_id: Uuid::nil(),
                username: "alice".to_string(),
                authorities: BTreeSet::from(["ADMIN".to_string()]),
            }),
            "store-down" => Err(DomainError::Store {
                message: "connection refused".to_string(),
            }),
            _ => Err(DomainError::Auth(AuthError::Unauthenticated)),
        }
    }
}

fn authenticator() -> web::Data<dyn Authenticator> {
    let stub: Arc<dyn Authenticator> = Arc::new(StubAuthenticator);
    web::Data::from(stub)
}

async fn protected_handler(principal: AuthenticatedPrincipal) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "username": principal.username,
        "admin": principal.has_authority("ADMIN"),
    }))
}

#[actix_web::test]
async fn test_middleware_requires_auth_header() {
    let app = test::init_service(
        App::new()
            .app_data(authenticator())
            .wrap(JwtAuth::new())
            .route("/protected", web::get().to(protected_handler)),
    )
    .await;

    let req = test::TestRequest::get().uri("/protected").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHORIZED");
    assert_eq!(body["message"], "Unauthorized");
}

#[actix_web::test]
async fn test_middleware_rejects_invalid_token() {
    let app = test::init_service(
        App::new()
            .app_data(authenticator())
            .wrap(JwtAuth::new())
            .route("/protected", web::get().to(protected_handler)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", "Bearer invalid-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_middleware_injects_principal() {
    let app = test::init_service(
        App::new()
            .app_data(authenticator())
            .wrap(JwtAuth::new())
            .route("/protected", web::get().to(protected_handler)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", "Bearer good-token"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["username"], "alice");
    assert_eq!(body["admin"], true);
}

#[actix_web::test]
async fn test_store_failure_is_not_reported_as_unauthorized() {
    let app = test::init_service(
        App::new()
            .app_data(authenticator())
            .wrap(JwtAuth::new())
            .route("/protected", web::get().to(protected_handler)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", "Bearer store-down"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn test_missing_authenticator_is_internal_error() {
    let app = test::init_service(
        App::new()
            .wrap(JwtAuth::new())
            .route("/protected", web::get().to(protected_handler)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", "Bearer good-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn test_principal_extractor_without_middleware() {
    let app = test::init_service(
        App::new().route("/protected", web::get().to(protected_handler)),
    )
    .await;

    let req = test::TestRequest::get().uri("/protected").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
