use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One immutable unit of communication inside a conversation. Messages are
/// append-only: never edited, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: i64,
    pub conversation_id: i64,
    pub sender_id: i64,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

/// Message joined with its sender's username, as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MessageView {
    pub id: i64,
    pub conversation_id: i64,
    pub sender_id: i64,
    pub sender_username: String,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}
