use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::db::{conversation_repo, listing_repo, message_repo, user_repo};
use crate::error::AppError;
use crate::models::{Conversation, User};

/// A conversation shaped from one participant's viewpoint: the "other" side
/// is the seller when the viewer is the buyer, and vice versa.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationSummary {
    pub id: i64,
    pub listing_id: i64,
    pub listing_title: String,
    pub listing_image: Option<String>,
    pub other_user_id: i64,
    pub other_username: String,
    pub last_message: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

pub struct ConversationService {
    pool: PgPool,
}

impl ConversationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All conversations the caller participates in, most recent activity
    /// first.
    pub async fn list_conversations(
        &self,
        caller: &str,
    ) -> Result<Vec<ConversationSummary>, AppError> {
        let user = self.resolve_caller(caller).await?;

        let conversations = conversation_repo::list_for_user(&self.pool, user.id).await?;

        let mut summaries = Vec::with_capacity(conversations.len());
        for conversation in &conversations {
            summaries.push(self.summarize(conversation, user.id).await?);
        }
        Ok(summaries)
    }

    /// The conversation between the caller (as buyer) and the listing's
    /// owner (as seller), created on first contact.
    ///
    /// Idempotent: an existing (buyer, listing) conversation is returned
    /// unchanged. The lookup and conditional insert run in one transaction;
    /// the unique constraint on (buyer_id, listing_id) resolves concurrent
    /// first-contact races, with the losing request re-reading the winner's
    /// row.
    pub async fn get_or_create_conversation(
        &self,
        listing_id: i64,
        caller: &str,
    ) -> Result<ConversationSummary, AppError> {
        let buyer = self.resolve_caller(caller).await?;

        let listing = listing_repo::find_by_id(&self.pool, listing_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Listing not found".into()))?;

        if buyer.id == listing.user_id {
            return Err(AppError::Validation("You cannot message yourself".into()));
        }

        let mut tx = self.pool.begin().await?;

        let conversation =
            match conversation_repo::find_by_buyer_and_listing(&mut *tx, buyer.id, listing_id)
                .await?
            {
                Some(existing) => existing,
                None => {
                    match conversation_repo::insert_if_absent(
                        &mut *tx,
                        buyer.id,
                        listing.user_id,
                        listing_id,
                    )
                    .await?
                    {
                        Some(created) => {
                            tracing::info!(
                                conversation_id = created.id,
                                buyer_id = buyer.id,
                                listing_id,
                                "conversation created"
                            );
                            created
                        }
                        // Lost the insert race; the winner's row must exist.
                        None => conversation_repo::find_by_buyer_and_listing(
                            &mut *tx, buyer.id, listing_id,
                        )
                        .await?
                        .ok_or_else(|| {
                            AppError::Internal(
                                "conversation missing after unique-constraint conflict".into(),
                            )
                        })?,
                    }
                }
            };

        tx.commit().await?;

        self.summarize(&conversation, buyer.id).await
    }

    /// Single conversation summary, participant-only.
    pub async fn get_conversation(
        &self,
        conversation_id: i64,
        caller: &str,
    ) -> Result<ConversationSummary, AppError> {
        let user = self.resolve_caller(caller).await?;

        let conversation = conversation_repo::find_by_id(&self.pool, conversation_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conversation not found".into()))?;

        if !conversation.is_participant(user.id) {
            return Err(AppError::Authorization(
                "You are not a participant in this conversation".into(),
            ));
        }

        self.summarize(&conversation, user.id).await
    }

    async fn resolve_caller(&self, caller: &str) -> Result<User, AppError> {
        user_repo::find_by_username(&self.pool, caller)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    async fn summarize(
        &self,
        conversation: &Conversation,
        viewer_id: i64,
    ) -> Result<ConversationSummary, AppError> {
        let listing = listing_repo::find_by_id(&self.pool, conversation.listing_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Listing not found".into()))?;

        let other_user_id = conversation.other_participant_id(viewer_id);
        let other_user = user_repo::find_by_id(&self.pool, other_user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        let last_message =
            message_repo::find_last_in_conversation(&self.pool, conversation.id).await?;

        Ok(ConversationSummary {
            id: conversation.id,
            listing_id: listing.id,
            listing_title: listing.title,
            listing_image: listing.image,
            other_user_id: other_user.id,
            other_username: other_user.username,
            last_message_at: last_message.as_ref().map(|m| m.sent_at),
            last_message: last_message.map(|m| m.content),
            created_at: conversation.created_at,
        })
    }
}
