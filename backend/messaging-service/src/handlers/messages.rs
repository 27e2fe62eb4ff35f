//! REST handlers for reading and sending messages within a conversation.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

use crate::error::AppError;
use crate::middleware::CallerIdentity;
use crate::services::MessageService;

#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub content: String,
}

/// GET /api/messages/conversations/{id}/messages
/// Full chronological message history. Participants only.
pub async fn list_messages(
    caller: CallerIdentity,
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let conversation_id = path.into_inner();
    let service = MessageService::new(pool.get_ref().clone());
    let messages = service.list_messages(conversation_id, &caller.0).await?;
    Ok(HttpResponse::Ok().json(messages))
}

/// POST /api/messages/conversations/{id}/messages
pub async fn send_message(
    caller: CallerIdentity,
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
    body: web::Json<SendMessageRequest>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;

    let conversation_id = path.into_inner();
    let service = MessageService::new(pool.get_ref().clone());
    let message = service
        .send_message(conversation_id, &body.content, &caller.0)
        .await?;
    Ok(HttpResponse::Ok().json(message))
}
