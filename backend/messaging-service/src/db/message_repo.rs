//! Message rows - an append-only log per conversation.
use crate::models::{Message, MessageView};
use sqlx::{PgConnection, PgPool};

pub async fn insert(
    conn: &mut PgConnection,
    conversation_id: i64,
    sender_id: i64,
    content: &str,
) -> Result<Message, sqlx::Error> {
    sqlx::query_as::<_, Message>(
        r#"
        INSERT INTO messages (conversation_id, sender_id, content)
        VALUES ($1, $2, $3)
        RETURNING id, conversation_id, sender_id, content, sent_at
        "#,
    )
    .bind(conversation_id)
    .bind(sender_id)
    .bind(content)
    .fetch_one(conn)
    .await
}

/// Full history in chronological order. Equal timestamps fall back to id
/// order, which is assignment order, so the sort is stable.
pub async fn list_views(
    pool: &PgPool,
    conversation_id: i64,
) -> Result<Vec<MessageView>, sqlx::Error> {
    sqlx::query_as::<_, MessageView>(
        r#"
        SELECT m.id, m.conversation_id, m.sender_id, u.username AS sender_username,
               m.content, m.sent_at
        FROM messages m
        JOIN users u ON u.id = m.sender_id
        WHERE m.conversation_id = $1
        ORDER BY m.sent_at ASC, m.id ASC
        "#,
    )
    .bind(conversation_id)
    .fetch_all(pool)
    .await
}

/// Most recent message, if any, for conversation summaries.
pub async fn find_last_in_conversation(
    pool: &PgPool,
    conversation_id: i64,
) -> Result<Option<Message>, sqlx::Error> {
    sqlx::query_as::<_, Message>(
        r#"
        SELECT id, conversation_id, sender_id, content, sent_at
        FROM messages
        WHERE conversation_id = $1
        ORDER BY sent_at DESC, id DESC
        LIMIT 1
        "#,
    )
    .bind(conversation_id)
    .fetch_optional(pool)
    .await
}
