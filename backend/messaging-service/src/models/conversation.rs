use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One buyer/seller thread about a single listing.
///
/// `seller_id` is denormalized from the listing owner at creation time and is
/// never re-derived afterwards; later ownership changes do not rewrite
/// existing conversations. At most one row exists per (buyer_id, listing_id).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Conversation {
    pub id: i64,
    pub buyer_id: i64,
    pub seller_id: i64,
    pub listing_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn is_participant(&self, user_id: i64) -> bool {
        self.buyer_id == user_id || self.seller_id == user_id
    }

    /// The counterpart of `viewer_id` in this conversation. Callers must
    /// check `is_participant` first; for a non-participant viewer this
    /// returns the buyer.
    pub fn other_participant_id(&self, viewer_id: i64) -> i64 {
        if self.buyer_id == viewer_id {
            self.seller_id
        } else {
            self.buyer_id
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn conversation(buyer_id: i64, seller_id: i64) -> Conversation {
        Conversation {
            id: 1,
            buyer_id,
            seller_id,
            listing_id: 42,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_both_parties_are_participants() {
        let conv = conversation(7, 3);
        assert!(conv.is_participant(7));
        assert!(conv.is_participant(3));
        assert!(!conv.is_participant(9));
    }

    #[test]
    fn test_other_participant_is_relative_to_viewer() {
        let conv = conversation(7, 3);
        assert_eq!(conv.other_participant_id(7), 3);
        assert_eq!(conv.other_participant_id(3), 7);
    }
}
