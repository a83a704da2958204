//! An in-memory [Backend] for tests: counts every call, captures payloads,
//! and can be told to fail on demand.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use quizdeck_backend::{
    AuthResponse, Backend, BackendError, GameRecord, GameUpdate, NewGame, NewUser, QuestionRecord,
    Result, UserRecord,
};

#[derive(Default)]
pub struct CallCounts {
    auth_with_password: AtomicUsize,
    create_user: AtomicUsize,
    request_password_reset: AtomicUsize,
    list_games: AtomicUsize,
    create_game: AtomicUsize,
    update_game: AtomicUsize,
    delete_game: AtomicUsize,
    list_questions: AtomicUsize,
}

impl CallCounts {
    pub fn auth_with_password(&self) -> usize {
        self.auth_with_password.load(Ordering::SeqCst)
    }

    pub fn create_user(&self) -> usize {
        self.create_user.load(Ordering::SeqCst)
    }

    pub fn request_password_reset(&self) -> usize {
        self.request_password_reset.load(Ordering::SeqCst)
    }

    pub fn list_games(&self) -> usize {
        self.list_games.load(Ordering::SeqCst)
    }

    pub fn create_game(&self) -> usize {
        self.create_game.load(Ordering::SeqCst)
    }

    pub fn update_game(&self) -> usize {
        self.update_game.load(Ordering::SeqCst)
    }

    pub fn delete_game(&self) -> usize {
        self.delete_game.load(Ordering::SeqCst)
    }

    pub fn list_questions(&self) -> usize {
        self.list_questions.load(Ordering::SeqCst)
    }

    /// Every call that would have gone over the network
    pub fn total(&self) -> usize {
        self.auth_with_password()
            + self.create_user()
            + self.request_password_reset()
            + self.list_games()
            + self.create_game()
            + self.update_game()
            + self.delete_game()
            + self.list_questions()
    }
}

#[derive(Default)]
pub struct MockBackend {
    pub calls: CallCounts,

    games: Mutex<Vec<GameRecord>>,
    users: Mutex<Vec<UserRecord>>,
    questions: Mutex<Vec<QuestionRecord>>,

    auth_response: Mutex<Option<AuthResponse>>,
    fail_next: Mutex<Option<BackendError>>,
    fail_auth_next: Mutex<Option<BackendError>>,

    last_update: Mutex<Option<(String, GameUpdate)>>,
    next_id: AtomicUsize,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(id: &str, email: &str) -> UserRecord {
        UserRecord {
            id: id.to_string(),
            email: email.to_string(),
            display_name: String::new(),
            created: String::new(),
            updated: String::new(),
        }
    }

    /// The next call of any kind fails with the given error
    pub fn fail_next(&self, error: BackendError) {
        *self.fail_next.lock() = Some(error);
    }

    /// The next credential check fails, other calls are unaffected
    pub fn fail_auth_next(&self, error: BackendError) {
        *self.fail_auth_next.lock() = Some(error);
    }

    /// Overrides what the next credential check returns
    pub fn respond_to_auth_with(&self, response: AuthResponse) {
        *self.auth_response.lock() = Some(response);
    }

    /// The id and payload of the most recent update call
    pub fn last_update(&self) -> Option<(String, GameUpdate)> {
        self.last_update.lock().clone()
    }

    /// Pre-populates the question bank
    pub fn seed_questions(&self, questions: Vec<QuestionRecord>) {
        *self.questions.lock() = questions;
    }

    fn take_failure(&self) -> Result<()> {
        match self.fail_next.lock().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn assign_id(&self) -> String {
        let count = self.next_id.fetch_add(1, Ordering::SeqCst);
        format!("g{:014}", count)
    }

    fn not_found() -> BackendError {
        BackendError::Response {
            status: 404,
            body: "The requested resource wasn't found.".to_string(),
        }
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn auth_with_password(&self, identity: &str, _password: &str) -> Result<AuthResponse> {
        self.calls.auth_with_password.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;

        if let Some(error) = self.fail_auth_next.lock().take() {
            return Err(error);
        }

        if let Some(response) = self.auth_response.lock().take() {
            return Ok(response);
        }

        // Prefer an account created earlier in the test
        let record = self
            .users
            .lock()
            .iter()
            .find(|user| user.email == identity)
            .cloned()
            .unwrap_or_else(|| Self::user("u1", identity));

        Ok(AuthResponse {
            token: "t".to_string(),
            record,
        })
    }

    async fn create_user(&self, new_user: NewUser) -> Result<UserRecord> {
        self.calls.create_user.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;

        let record = UserRecord {
            id: self.assign_id(),
            email: new_user.email,
            display_name: new_user.display_name,
            created: String::new(),
            updated: String::new(),
        };

        self.users.lock().push(record.clone());
        Ok(record)
    }

    async fn request_password_reset(&self, _email: &str) -> Result<()> {
        self.calls
            .request_password_reset
            .fetch_add(1, Ordering::SeqCst);
        self.take_failure()
    }

    async fn list_games(&self, _token: &str) -> Result<Vec<GameRecord>> {
        self.calls.list_games.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;

        let mut games = self.games.lock().clone();
        games.sort_by(|a, b| b.id.cmp(&a.id));

        Ok(games)
    }

    async fn create_game(&self, _token: &str, new_game: NewGame) -> Result<GameRecord> {
        self.calls.create_game.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;

        let record = GameRecord {
            id: self.assign_id(),
            host: new_game.host,
            name: new_game.name,
            code: new_game.code,
            status: new_game.status,
            current_round: new_game.current_round,
            started_at: None,
            completed_at: None,
            created: "2024-06-01 18:00:00.000Z".to_string(),
            updated: "2024-06-01 18:00:00.000Z".to_string(),
        };

        self.games.lock().push(record.clone());
        Ok(record)
    }

    async fn update_game(&self, _token: &str, id: &str, update: GameUpdate) -> Result<GameRecord> {
        self.calls.update_game.fetch_add(1, Ordering::SeqCst);
        *self.last_update.lock() = Some((id.to_string(), update.clone()));
        self.take_failure()?;

        let mut games = self.games.lock();
        let game = games
            .iter_mut()
            .find(|game| game.id == id)
            .ok_or_else(Self::not_found)?;

        if let Some(name) = update.name {
            game.name = name;
        }

        if let Some(code) = update.code {
            game.code = code;
        }

        Ok(game.clone())
    }

    async fn delete_game(&self, _token: &str, id: &str) -> Result<()> {
        self.calls.delete_game.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;

        let mut games = self.games.lock();
        let before = games.len();
        games.retain(|game| game.id != id);

        if games.len() == before {
            return Err(Self::not_found());
        }

        Ok(())
    }

    async fn list_questions(&self, _token: &str) -> Result<Vec<QuestionRecord>> {
        self.calls.list_questions.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;

        Ok(self.questions.lock().clone())
    }
}
