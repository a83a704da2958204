//! Request-state handles for presentation components: each wraps the games
//! service with an in-flight flag and the most recent error message, so a
//! form or list can render without interpreting errors itself.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use quizdeck_backend::{Backend, GameRecord, GameUpdate};

use crate::{AuthStore, GameResult, Games};

/// Fetches and holds one component's copy of the game list.
/// The copy is replaced wholesale on every refresh, never merged.
pub struct GamesQuery<B> {
    service: Games<B>,

    games: RwLock<Vec<GameRecord>>,
    error: RwLock<Option<String>>,
    is_loading: AtomicBool,
}

impl<B> GamesQuery<B>
where
    B: Backend,
{
    pub fn new(backend: &Arc<B>, store: &Arc<AuthStore>) -> Self {
        Self {
            service: Games::new(backend, store),
            games: RwLock::new(Vec::new()),
            error: RwLock::new(None),
            is_loading: AtomicBool::new(false),
        }
    }

    /// Refetches the list. On failure the previous copy is kept and the
    /// error is recorded instead.
    pub async fn refresh(&self) {
        self.is_loading.store(true, Ordering::SeqCst);
        *self.error.write() = None;

        match self.service.list().await {
            Ok(games) => *self.games.write() = games,
            Err(e) => *self.error.write() = Some(e.to_string()),
        }

        self.is_loading.store(false, Ordering::SeqCst);
    }

    pub fn games(&self) -> Vec<GameRecord> {
        self.games.read().clone()
    }

    pub fn error(&self) -> Option<String> {
        self.error.read().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading.load(Ordering::SeqCst)
    }
}

/// Wraps the mutating game operations with request state.
/// Results are recorded and still returned, so callers can chain on them.
pub struct GameMutation<B> {
    service: Games<B>,

    error: RwLock<Option<String>>,
    is_loading: AtomicBool,
}

impl<B> GameMutation<B>
where
    B: Backend,
{
    pub fn new(backend: &Arc<B>, store: &Arc<AuthStore>) -> Self {
        Self {
            service: Games::new(backend, store),
            error: RwLock::new(None),
            is_loading: AtomicBool::new(false),
        }
    }

    pub async fn create_game(&self, name: &str, code: &str) -> GameResult<GameRecord> {
        self.run(self.service.create(name, code)).await
    }

    pub async fn update_game(&self, id: &str, update: GameUpdate) -> GameResult<GameRecord> {
        self.run(self.service.update(id, update)).await
    }

    pub async fn delete_game(&self, id: &str) -> GameResult<()> {
        self.run(self.service.delete(id)).await
    }

    pub fn error(&self) -> Option<String> {
        self.error.read().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading.load(Ordering::SeqCst)
    }

    async fn run<T>(&self, operation: impl Future<Output = GameResult<T>>) -> GameResult<T> {
        self.is_loading.store(true, Ordering::SeqCst);
        *self.error.write() = None;

        let result = operation.await;

        if let Err(e) = &result {
            *self.error.write() = Some(e.to_string());
        }

        self.is_loading.store(false, Ordering::SeqCst);
        result
    }
}
