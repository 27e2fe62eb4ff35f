pub mod conversation;
pub mod message;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use conversation::Conversation;
pub use message::{Message, MessageView};

/// Marketplace account, owned by the identity service. Read-only here.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Classified listing, owned by the listing service. Read-only here.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Listing {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}
