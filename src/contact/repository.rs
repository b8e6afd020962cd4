use chrono::{DateTime, Utc};

use crate::repository::RepositoryError;

use super::domain::{ContactMessage, MessageFilters, MessageId, NewMessage};

/// Storage abstraction for contact messages.
pub trait ContactRepository: Send + Sync {
    fn insert(
        &self,
        message: NewMessage,
        received_at: DateTime<Utc>,
    ) -> Result<ContactMessage, RepositoryError>;
    fn fetch(&self, id: MessageId) -> Result<Option<ContactMessage>, RepositoryError>;
    /// Set either flag without disturbing the other.
    fn set_flags(
        &self,
        id: MessageId,
        read: Option<bool>,
        responded: Option<bool>,
    ) -> Result<ContactMessage, RepositoryError>;
    fn unread(&self) -> Result<Vec<ContactMessage>, RepositoryError>;
    /// Most recent messages, newest first, capped at `limit`.
    fn recent(&self, limit: usize) -> Result<Vec<ContactMessage>, RepositoryError>;
    /// Inbox listing, newest first.
    fn search(&self, filters: &MessageFilters) -> Result<Vec<ContactMessage>, RepositoryError>;
    fn count_unread(&self) -> Result<usize, RepositoryError>;
}
