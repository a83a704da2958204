use std::sync::Arc;

use quizdeck_backend::{Backend, BackendError, QuestionRecord};
use thiserror::Error;

use crate::AuthStore;

#[derive(Debug, Error)]
pub enum QuestionError {
    /// No session is present, nothing was sent to the backend
    #[error("User must be authenticated")]
    Unauthenticated,
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Read-only access to the shared question bank.
/// Writes happen through operator bulk imports, never from here.
pub struct Questions<B> {
    backend: Arc<B>,
    store: Arc<AuthStore>,
}

impl<B> Questions<B>
where
    B: Backend,
{
    pub fn new(backend: &Arc<B>, store: &Arc<AuthStore>) -> Self {
        Self {
            backend: backend.clone(),
            store: store.clone(),
        }
    }

    /// The full question bank, visible to any authenticated user
    pub async fn list(&self) -> Result<Vec<QuestionRecord>, QuestionError> {
        if !self.store.is_valid() {
            return Err(QuestionError::Unauthenticated);
        }

        Ok(self.backend.list_questions(&self.store.token()).await?)
    }
}
