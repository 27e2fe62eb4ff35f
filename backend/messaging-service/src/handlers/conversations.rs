//! REST handlers for conversation listing, lookup and get-or-create.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::error::AppError;
use crate::middleware::CallerIdentity;
use crate::services::ConversationService;

#[derive(Debug, Deserialize)]
pub struct CreateConversationQuery {
    pub listing_id: i64,
}

/// GET /api/messages/conversations
/// All conversations the caller participates in, most recent activity first.
pub async fn list_conversations(
    caller: CallerIdentity,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let service = ConversationService::new(pool.get_ref().clone());
    let conversations = service.list_conversations(&caller.0).await?;
    Ok(HttpResponse::Ok().json(conversations))
}

/// POST /api/messages/conversations?listing_id={id}
/// Get or create the caller's conversation for a listing. Idempotent: repeat
/// calls for the same (caller, listing) return the existing conversation.
pub async fn get_or_create_conversation(
    caller: CallerIdentity,
    pool: web::Data<PgPool>,
    query: web::Query<CreateConversationQuery>,
) -> Result<HttpResponse, AppError> {
    let service = ConversationService::new(pool.get_ref().clone());
    let conversation = service
        .get_or_create_conversation(query.listing_id, &caller.0)
        .await?;
    Ok(HttpResponse::Ok().json(conversation))
}

/// GET /api/messages/conversations/{id}
pub async fn get_conversation(
    caller: CallerIdentity,
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let conversation_id = path.into_inner();
    let service = ConversationService::new(pool.get_ref().clone());
    let conversation = service
        .get_conversation(conversation_id, &caller.0)
        .await?;
    Ok(HttpResponse::Ok().json(conversation))
}
