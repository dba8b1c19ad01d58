//! JWT authentication middleware for protecting API endpoints.
//!
//! The middleware extracts the bearer token from the Authorization header,
//! resolves it through the `Authenticator` registered as app data, and
//! stores the resulting principal in the request extensions. Handlers take
//! the principal as an explicit `AuthenticatedPrincipal` argument.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::{header::AUTHORIZATION, StatusCode},
    web, Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use auth_core::domain::entities::principal::Principal;
use auth_core::services::gate::Authenticator;
use auth_shared::error_codes;

use crate::dto::{ErrorResponse, ErrorResponseExt};
use crate::handlers::error::{handle_domain_error, unauthorized_response, UNAUTHORIZED_MESSAGE};

/// Principal resolved for the current request
#[derive(Debug, Clone)]
pub struct AuthenticatedPrincipal(pub Principal);

impl std::ops::Deref for AuthenticatedPrincipal {
    type Target = Principal;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// JWT authentication middleware factory
#[derive(Debug, Clone, Default)]
pub struct JwtAuth;

impl JwtAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            // Rejections are responses, never service errors
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => return Ok(reject(req, unauthorized_response())),
            };

            let authenticator = match req.app_data::<web::Data<dyn Authenticator>>() {
                Some(authenticator) => authenticator.clone(),
                None => {
                    tracing::error!("No authenticator registered for protected route");
                    let response = ErrorResponse::new(
                        error_codes::INTERNAL_ERROR,
                        "An internal error occurred",
                    )
                    .to_response(StatusCode::INTERNAL_SERVER_ERROR);
                    return Ok(reject(req, response));
                }
            };

            let principal = match authenticator.authenticate(&token).await {
                Ok(principal) => principal,
                Err(e) if e.is_unauthenticated() => {
                    return Ok(reject(req, unauthorized_response()))
                }
                Err(e) => return Ok(reject(req, handle_domain_error(e))),
            };

            tracing::debug!(username = %principal.username, "Request authenticated");
            req.extensions_mut().insert(AuthenticatedPrincipal(principal));

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn reject<B>(req: ServiceRequest, response: HttpResponse) -> ServiceResponse<EitherBody<B>> {
    req.into_response(response).map_into_right_body()
}

fn unauthorized() -> Error {
    InternalError::from_response(UNAUTHORIZED_MESSAGE, unauthorized_response()).into()
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|s| s.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthenticatedPrincipal {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthenticatedPrincipal>()
            .cloned()
            .ok_or_else(unauthorized);

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        use actix_web::test;

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req_no_bearer = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_empty = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_empty), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }
}
