use async_trait::async_trait;
use thiserror::Error;

mod config;
pub use config::*;

mod records;
pub use records::*;

mod rest;
pub use rest::*;

pub type Result<T> = std::result::Result<T, BackendError>;
pub type BoxedBackend = Box<dyn Backend>;

#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never produced a response
    #[error("Request failed: {0}")]
    Request(String),
    /// The backend answered with a non-success status.
    /// The body is passed through unchanged for the caller to interpret.
    #[error("Backend responded with status {status}: {body}")]
    Response { status: u16, body: String },
    /// The response did not match the documented record shape
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl BackendError {
    /// Returns the response status, if this error came from a response at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Represents a type that can perform quizdeck operations against a backend
#[async_trait]
pub trait Backend: Send + Sync {
    /// Exchanges credentials for a token and the matching identity
    async fn auth_with_password(&self, identity: &str, password: &str) -> Result<AuthResponse>;
    /// Creates a new account. Does not authenticate it.
    async fn create_user(&self, new_user: NewUser) -> Result<UserRecord>;
    /// Asks the backend to send reset instructions to the given address
    async fn request_password_reset(&self, email: &str) -> Result<()>;

    /// Lists every game the session may see, newest first.
    /// Which games those are is decided by the backend's own rules.
    async fn list_games(&self, token: &str) -> Result<Vec<GameRecord>>;
    async fn create_game(&self, token: &str, new_game: NewGame) -> Result<GameRecord>;
    /// Applies a partial update. Fields absent from the payload are left untouched.
    async fn update_game(&self, token: &str, id: &str, update: GameUpdate) -> Result<GameRecord>;
    async fn delete_game(&self, token: &str, id: &str) -> Result<()>;

    /// Lists the shared question bank, readable by any authenticated user
    async fn list_questions(&self, token: &str) -> Result<Vec<QuestionRecord>>;
}
