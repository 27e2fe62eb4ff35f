//! Conversation rows. Transactional steps take `&mut PgConnection` so the
//! service layer can compose them inside a single `pool.begin()` scope.
use crate::models::Conversation;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Conversation>, sqlx::Error> {
    sqlx::query_as::<_, Conversation>(
        r#"
        SELECT id, buyer_id, seller_id, listing_id, created_at, updated_at
        FROM conversations
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// All conversations where the user is a participant, most recent activity
/// first. Ties on updated_at are broken by id so the ordering is stable.
pub async fn list_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<Conversation>, sqlx::Error> {
    sqlx::query_as::<_, Conversation>(
        r#"
        SELECT id, buyer_id, seller_id, listing_id, created_at, updated_at
        FROM conversations
        WHERE buyer_id = $1 OR seller_id = $1
        ORDER BY updated_at DESC, id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn find_by_buyer_and_listing(
    conn: &mut PgConnection,
    buyer_id: i64,
    listing_id: i64,
) -> Result<Option<Conversation>, sqlx::Error> {
    sqlx::query_as::<_, Conversation>(
        r#"
        SELECT id, buyer_id, seller_id, listing_id, created_at, updated_at
        FROM conversations
        WHERE buyer_id = $1 AND listing_id = $2
        "#,
    )
    .bind(buyer_id)
    .bind(listing_id)
    .fetch_optional(conn)
    .await
}

/// Conditionally insert a conversation for (buyer, listing). Returns `None`
/// when a concurrent request already created the row; the caller re-fetches
/// the winner instead of failing.
pub async fn insert_if_absent(
    conn: &mut PgConnection,
    buyer_id: i64,
    seller_id: i64,
    listing_id: i64,
) -> Result<Option<Conversation>, sqlx::Error> {
    sqlx::query_as::<_, Conversation>(
        r#"
        INSERT INTO conversations (buyer_id, seller_id, listing_id)
        VALUES ($1, $2, $3)
        ON CONFLICT (buyer_id, listing_id) DO NOTHING
        RETURNING id, buyer_id, seller_id, listing_id, created_at, updated_at
        "#,
    )
    .bind(buyer_id)
    .bind(seller_id)
    .bind(listing_id)
    .fetch_optional(conn)
    .await
}

/// Advance the recency marker that drives conversation list ordering. Called
/// in the same transaction as every message append.
pub async fn touch(
    conn: &mut PgConnection,
    id: i64,
    at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE conversations SET updated_at = $1 WHERE id = $2")
        .bind(at)
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}
