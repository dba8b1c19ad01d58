use actix_web::HttpResponse;

/// Handler for GET /health
///
/// Liveness only; no dependency is checked. Always answers `true`.
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(true)
}
