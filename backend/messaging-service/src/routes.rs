//! Route configuration
//!
//! Centralized route setup extracted from main.rs. Everything under
//! /api/messages requires a valid Bearer token.

use actix_web::{web, HttpResponse};

use crate::handlers;
use crate::middleware::JwtAuthMiddleware;

/// Configure all routes for the application
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Static/public endpoints
        .route("/api/v1/openapi.json", web::get().to(openapi_handler))
        .route("/api/v1/health", web::get().to(handlers::health::health_check))
        // Authenticated messaging API
        .service(
            web::scope("/api/messages")
                .wrap(JwtAuthMiddleware)
                .route(
                    "/conversations",
                    web::get().to(handlers::conversations::list_conversations),
                )
                .route(
                    "/conversations",
                    web::post().to(handlers::conversations::get_or_create_conversation),
                )
                .route(
                    "/conversations/{id}",
                    web::get().to(handlers::conversations::get_conversation),
                )
                .route(
                    "/conversations/{id}/messages",
                    web::get().to(handlers::messages::list_messages),
                )
                .route(
                    "/conversations/{id}/messages",
                    web::post().to(handlers::messages::send_message),
                ),
        );
}

/// OpenAPI JSON endpoint
async fn openapi_handler() -> HttpResponse {
    use utoipa::OpenApi;
    HttpResponse::Ok().json(crate::openapi::ApiDoc::openapi())
}
