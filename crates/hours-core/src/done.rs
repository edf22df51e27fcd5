//! Done entries: short notes on finished work that teammates can like.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::{Clock, SystemClock};
use crate::types::{CalendarDate, DoneEntryId, UserId};

/// A note of something finished on a given day.
///
/// When deserializing, a missing id is generated, missing likes start empty
/// and a missing timestamp is the current time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoneEntry {
    #[serde(default = "DoneEntryId::generate")]
    pub id: DoneEntryId,
    pub user_id: UserId,
    pub date: CalendarDate,
    pub content: String,
    /// Users who liked the entry, in the order they did.
    #[serde(default)]
    pub likes: Vec<UserId>,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl DoneEntry {
    pub fn new(user_id: UserId, date: CalendarDate, content: impl Into<String>) -> Self {
        Self::recorded_by(&SystemClock, user_id, date, content)
    }

    /// Creates an entry stamped with `clock`'s current time.
    pub fn recorded_by(
        clock: &dyn Clock,
        user_id: UserId,
        date: CalendarDate,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: DoneEntryId::generate(),
            user_id,
            date,
            content: content.into(),
            likes: Vec::new(),
            timestamp: clock.now(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: DoneEntryId) -> Self {
        self.id = id;
        self
    }

    /// Records a like from `user`. Returns `false` if they already liked it.
    pub fn like(&mut self, user: UserId) -> bool {
        if self.likes.contains(&user) {
            return false;
        }
        tracing::debug!(entry = %self.id, user = %user, "liked done entry");
        self.likes.push(user);
        true
    }
}
