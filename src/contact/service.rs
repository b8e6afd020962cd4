use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::repository::RepositoryError;
use crate::validation::FieldViolation;

use super::domain::{ContactMessage, MessageFilters, MessageId, NewMessage};
use super::repository::ContactRepository;

/// Service behind the public contact form and the staff inbox.
pub struct ContactDesk<R> {
    repository: Arc<R>,
}

impl<R> ContactDesk<R>
where
    R: ContactRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn submit(&self, message: NewMessage) -> Result<ContactMessage, ContactError> {
        let mut violations = Vec::new();
        for (field, value) in [
            ("name", &message.name),
            ("subject", &message.subject),
            ("message", &message.message),
        ] {
            if value.trim().is_empty() {
                violations.push(FieldViolation {
                    field,
                    reason: "This field is required.".to_string(),
                });
            }
        }
        if !message.email.trim().contains('@') {
            violations.push(FieldViolation {
                field: "email",
                reason: "Please enter a valid email address.".to_string(),
            });
        }
        if !violations.is_empty() {
            return Err(ContactError::Validation(violations));
        }

        let stored = self.repository.insert(message, Utc::now())?;
        info!(message = %stored.id, "contact message received");
        Ok(stored)
    }

    pub fn get(&self, id: MessageId) -> Result<ContactMessage, ContactError> {
        self.repository
            .fetch(id)?
            .ok_or(ContactError::NotFound(id))
    }

    pub fn mark_read(&self, id: MessageId) -> Result<ContactMessage, ContactError> {
        self.set_flags(id, Some(true), None)
    }

    pub fn mark_responded(&self, id: MessageId) -> Result<ContactMessage, ContactError> {
        self.set_flags(id, None, Some(true))
    }

    fn set_flags(
        &self,
        id: MessageId,
        read: Option<bool>,
        responded: Option<bool>,
    ) -> Result<ContactMessage, ContactError> {
        match self.repository.set_flags(id, read, responded) {
            Ok(message) => Ok(message),
            Err(RepositoryError::NotFound) => Err(ContactError::NotFound(id)),
            Err(other) => Err(other.into()),
        }
    }

    pub fn unread(&self) -> Result<Vec<ContactMessage>, ContactError> {
        Ok(self.repository.unread()?)
    }

    pub fn recent(&self, limit: usize) -> Result<Vec<ContactMessage>, ContactError> {
        Ok(self.repository.recent(limit)?)
    }

    pub fn search(&self, filters: &MessageFilters) -> Result<Vec<ContactMessage>, ContactError> {
        Ok(self.repository.search(filters)?)
    }
}

/// Error raised by the contact desk.
#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("message failed validation")]
    Validation(Vec<FieldViolation>),
    #[error("message {0} not found")]
    NotFound(MessageId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
