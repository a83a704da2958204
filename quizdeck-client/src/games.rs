use std::sync::Arc;

use quizdeck_backend::{Backend, BackendError, GameRecord, GameUpdate, NewGame};
use thiserror::Error;

use crate::{validate, AuthStore, ValidationError};

/// The status every new game starts out with.
const DEFAULT_STATUS: &str = "not_started";

pub type GameResult<T> = Result<T, GameError>;

#[derive(Debug, Error)]
pub enum GameError {
    /// No session identity is present, nothing was sent to the backend
    #[error("User must be authenticated")]
    Unauthenticated,
    /// A field failed validation, nothing was sent to the backend
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The backend rejected or failed the request
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Validates and authorizes game operations before they reach the backend.
///
/// Ownership of individual games is not checked here: the backend's rules
/// are the authority on which records a session may touch.
pub struct Games<B> {
    backend: Arc<B>,
    store: Arc<AuthStore>,
}

impl<B> Games<B>
where
    B: Backend,
{
    pub fn new(backend: &Arc<B>, store: &Arc<AuthStore>) -> Self {
        Self {
            backend: backend.clone(),
            store: store.clone(),
        }
    }

    /// Returns the session token and host id, failing before any request is
    /// made when no session is present
    fn require_auth(&self) -> GameResult<(String, String)> {
        let record = self.store.record().ok_or(GameError::Unauthenticated)?;
        let token = self.store.token();

        if token.is_empty() {
            return Err(GameError::Unauthenticated);
        }

        Ok((token, record.id))
    }

    /// Every game visible to the current host, newest first.
    /// Empty when there are none, never an error for that.
    pub async fn list(&self) -> GameResult<Vec<GameRecord>> {
        let (token, _) = self.require_auth()?;

        Ok(self.backend.list_games(&token).await?)
    }

    /// Creates a game owned by the current host, with the default status and
    /// a round counter of zero. The name is checked before the code.
    pub async fn create(&self, name: &str, code: &str) -> GameResult<GameRecord> {
        let (token, host) = self.require_auth()?;

        validate::game_name(name)?;
        validate::game_code(code)?;

        let new_game = NewGame {
            host,
            name: name.to_string(),
            code: code.to_string(),
            status: DEFAULT_STATUS.to_string(),
            current_round: 0,
        };

        Ok(self.backend.create_game(&token, new_game).await?)
    }

    /// Applies a partial update. Only the fields present in the payload are
    /// validated, and validation finishes before anything is sent.
    pub async fn update(&self, id: &str, update: GameUpdate) -> GameResult<GameRecord> {
        let (token, _) = self.require_auth()?;

        if let Some(name) = &update.name {
            validate::game_name(name)?;
        }

        if let Some(code) = &update.code {
            validate::game_code(code)?;
        }

        Ok(self.backend.update_game(&token, id, update).await?)
    }

    /// Deletes a game. Existence and ownership are not pre-checked, so a bad
    /// id surfaces the backend's error unchanged. Children cascade at the
    /// backend.
    pub async fn delete(&self, id: &str) -> GameResult<()> {
        let (token, _) = self.require_auth()?;

        Ok(self.backend.delete_game(&token, id).await?)
    }
}
