mod auth;
mod games;
mod hooks;
mod questions;
mod store;
pub mod validate;

#[cfg(test)]
mod testing;

use std::sync::Arc;

pub use auth::*;
pub use games::*;
pub use hooks::*;
pub use questions::*;
pub use store::*;
pub use validate::ValidationError;

use quizdeck_backend::{Backend, RestBackend};

/// The quizdeck client, facilitating authentication, game management, and
/// access to the question bank.
///
/// All parts share one [AuthStore], so a session established through
/// [Auth] is immediately visible to every service.
pub struct Quizdeck<B> {
    backend: Arc<B>,
    store: Arc<AuthStore>,

    pub auth: Auth<B>,
    pub games: Games<B>,
    pub questions: Questions<B>,
}

impl Quizdeck<RestBackend> {
    /// Creates a client against the configured backend address
    pub fn new() -> Self {
        Self::with_backend(RestBackend::from_env())
    }
}

impl Default for Quizdeck<RestBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> Quizdeck<B>
where
    B: Backend,
{
    pub fn with_backend(backend: B) -> Self {
        let backend = Arc::new(backend);
        let store = AuthStore::new();

        Self {
            auth: Auth::new(&backend, &store),
            games: Games::new(&backend, &store),
            questions: Questions::new(&backend, &store),
            backend,
            store,
        }
    }

    /// The session store backing this client
    pub fn store(&self) -> &Arc<AuthStore> {
        &self.store
    }

    /// Creates a fresh game list handle for a presentation component
    pub fn games_query(&self) -> GamesQuery<B> {
        GamesQuery::new(&self.backend, &self.store)
    }

    /// Creates a fresh mutation handle for a presentation component
    pub fn game_mutation(&self) -> GameMutation<B> {
        GameMutation::new(&self.backend, &self.store)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::MockBackend;

    #[tokio::test]
    async fn test_session_is_shared_between_parts() {
        let client = Quizdeck::with_backend(MockBackend::new());

        client.auth.login("a@b.com", "password123").await.unwrap();

        assert!(client.auth.is_authenticated());
        assert!(client.store().is_valid());

        // The games service sees the same session
        client.games.create("Test Game", "TEST123").await.unwrap();

        client.auth.logout();
        assert!(!client.store().is_valid());
    }
}
