use std::future::Future;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::{
    resolve_backend_url, AuthResponse, Backend, BackendError, GameRecord, GameUpdate, ListResult,
    NewGame, NewUser, QuestionRecord, Result, UserRecord,
};

/// How many records are requested per page when listing a full collection.
const PAGE_SIZE: usize = 200;

/// A [Backend] implementation that speaks the PocketBase-style REST protocol
pub struct RestBackend {
    base_url: String,
    client: Client,
}

impl RestBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Creates a backend against the configured address, falling back to the
    /// local development default
    pub fn from_env() -> Self {
        Self::new(&resolve_backend_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/api/collections/{}/records", self.base_url, collection)
    }

    async fn send(request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(handle_unsuccessful_request(response, status).await);
        }

        Ok(response)
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
        response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }

    /// Fetches every page of a collection, in the given sort order
    async fn full_list<T: DeserializeOwned>(
        &self,
        token: &str,
        collection: &str,
        sort: &str,
    ) -> Result<Vec<T>> {
        paginate(|page| {
            let request = self
                .client
                .get(self.collection_url(collection))
                .bearer_auth(token)
                .query(&[
                    ("page", page.to_string()),
                    ("perPage", PAGE_SIZE.to_string()),
                    ("sort", sort.to_string()),
                ]);

            async move { Self::parse(Self::send(request).await?).await }
        })
        .await
    }
}

/// Collects every page of a listing, asking for pages starting at 1 until a
/// short page signals that the collection is exhausted
async fn paginate<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<ListResult<T>>>,
{
    let mut records = Vec::new();
    let mut page = 1usize;

    loop {
        let result = fetch_page(page).await?;
        let received = result.items.len();

        records.extend(result.items);

        if received < PAGE_SIZE {
            break;
        }

        page += 1;
    }

    Ok(records)
}

#[async_trait]
impl Backend for RestBackend {
    async fn auth_with_password(&self, identity: &str, password: &str) -> Result<AuthResponse> {
        let url = format!(
            "{}/api/collections/users/auth-with-password",
            self.base_url
        );

        let request = self.client.post(url).json(&json!({
            "identity": identity,
            "password": password,
        }));

        Self::parse(Self::send(request).await?).await
    }

    async fn create_user(&self, new_user: NewUser) -> Result<UserRecord> {
        let request = self.client.post(self.collection_url("users")).json(&new_user);

        Self::parse(Self::send(request).await?).await
    }

    async fn request_password_reset(&self, email: &str) -> Result<()> {
        let url = format!(
            "{}/api/collections/users/request-password-reset",
            self.base_url
        );

        let request = self.client.post(url).json(&json!({ "email": email }));

        Self::send(request).await?;
        Ok(())
    }

    async fn list_games(&self, token: &str) -> Result<Vec<GameRecord>> {
        self.full_list(token, "games", "-id").await
    }

    async fn create_game(&self, token: &str, new_game: NewGame) -> Result<GameRecord> {
        let request = self
            .client
            .post(self.collection_url("games"))
            .bearer_auth(token)
            .json(&new_game);

        Self::parse(Self::send(request).await?).await
    }

    async fn update_game(&self, token: &str, id: &str, update: GameUpdate) -> Result<GameRecord> {
        let url = format!("{}/{}", self.collection_url("games"), id);

        let request = self.client.patch(url).bearer_auth(token).json(&update);

        Self::parse(Self::send(request).await?).await
    }

    async fn delete_game(&self, token: &str, id: &str) -> Result<()> {
        let url = format!("{}/{}", self.collection_url("games"), id);

        let request = self.client.delete(url).bearer_auth(token);

        Self::send(request).await?;
        Ok(())
    }

    async fn list_questions(&self, token: &str) -> Result<Vec<QuestionRecord>> {
        self.full_list(token, "questions", "id").await
    }
}

async fn handle_unsuccessful_request(response: Response, status: StatusCode) -> BackendError {
    let body = response.text().await.unwrap_or_default();

    BackendError::Response {
        status: status.as_u16(),
        body,
    }
}
