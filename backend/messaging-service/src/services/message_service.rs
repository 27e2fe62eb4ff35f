use sqlx::PgPool;

use crate::db::{conversation_repo, message_repo, user_repo};
use crate::error::AppError;
use crate::models::{Conversation, MessageView, User};

/// Upper bound on message content, in characters. Mirrored by the request
/// DTO validation; re-checked here as a domain rule so the limit holds for
/// every transport.
pub const MAX_CONTENT_LENGTH: usize = 2000;

pub struct MessageService {
    pool: PgPool,
}

impl MessageService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Full message history of a conversation, chronological, participants
    /// only. No pagination.
    pub async fn list_messages(
        &self,
        conversation_id: i64,
        caller: &str,
    ) -> Result<Vec<MessageView>, AppError> {
        let user = self.resolve_caller(caller).await?;
        self.load_conversation_for(conversation_id, &user).await?;

        Ok(message_repo::list_views(&self.pool, conversation_id).await?)
    }

    /// Append a message to a conversation as the caller.
    ///
    /// The insert and the conversation recency bump are one transaction:
    /// updated_at advances to the new message's sent_at, which is what keeps
    /// the conversation list ordered by latest activity.
    pub async fn send_message(
        &self,
        conversation_id: i64,
        content: &str,
        caller: &str,
    ) -> Result<MessageView, AppError> {
        tracing::info!(
            conversation_id,
            caller = %caller,
            content_length = content.len(),
            "send message"
        );

        validate_content(content)?;

        let sender = self.resolve_caller(caller).await?;
        let conversation = self.load_conversation_for(conversation_id, &sender).await?;

        let mut tx = self.pool.begin().await?;
        let message =
            message_repo::insert(&mut *tx, conversation.id, sender.id, content).await?;
        conversation_repo::touch(&mut *tx, conversation.id, message.sent_at).await?;
        tx.commit().await?;

        Ok(MessageView {
            id: message.id,
            conversation_id: message.conversation_id,
            sender_id: sender.id,
            sender_username: sender.username,
            content: message.content,
            sent_at: message.sent_at,
        })
    }

    async fn resolve_caller(&self, caller: &str) -> Result<User, AppError> {
        user_repo::find_by_username(&self.pool, caller)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    async fn load_conversation_for(
        &self,
        conversation_id: i64,
        user: &User,
    ) -> Result<Conversation, AppError> {
        let conversation = conversation_repo::find_by_id(&self.pool, conversation_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conversation not found".into()))?;

        if !conversation.is_participant(user.id) {
            return Err(AppError::Authorization(
                "You are not a participant in this conversation".into(),
            ));
        }

        Ok(conversation)
    }
}

/// Domain-level content rules: non-blank and at most [`MAX_CONTENT_LENGTH`]
/// characters.
pub(crate) fn validate_content(content: &str) -> Result<(), AppError> {
    if content.trim().is_empty() {
        return Err(AppError::Validation("Message content is required".into()));
    }
    if content.chars().count() > MAX_CONTENT_LENGTH {
        return Err(AppError::Validation(format!(
            "Message must be at most {MAX_CONTENT_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_must_not_be_empty() {
        assert!(matches!(
            validate_content(""),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_whitespace_only_content_rejected() {
        assert!(matches!(
            validate_content("   \n\t"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_content_at_limit_accepted() {
        let content = "a".repeat(MAX_CONTENT_LENGTH);
        assert!(validate_content(&content).is_ok());
    }

    #[test]
    fn test_content_over_limit_rejected() {
        let content = "a".repeat(MAX_CONTENT_LENGTH + 1);
        assert!(matches!(
            validate_content(&content),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        // 2000 multibyte characters are within the limit even though the
        // byte length is larger.
        let content = "é".repeat(MAX_CONTENT_LENGTH);
        assert!(validate_content(&content).is_ok());
    }
}
