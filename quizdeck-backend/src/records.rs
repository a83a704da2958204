use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The type used for backend-assigned record identifiers.
/// Identifiers are chronologically weighted, so sorting by them descending
/// yields the most recent records first.
pub type RecordId = String;

/// An account in the `users` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: RecordId,
    pub email: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
}

/// A trivia event in the `games` collection, owned by exactly one host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub id: RecordId,
    /// The user that owns this game. Immutable after creation.
    pub host: RecordId,
    pub name: String,
    /// The join code players use to find this game
    pub code: String,
    /// Free-form progression marker, for example "not_started" or "in_progress"
    pub status: String,
    #[serde(default)]
    pub current_round: u32,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
}

/// An item in the read-only `questions` bank.
/// Bulk-imported by operators, never written from the client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuestionRecord {
    pub id: RecordId,
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub difficulty: String,
    pub question: String,
    pub a: String,
    pub b: String,
    pub c: String,
    pub d: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub metadata: Option<Value>,
}

/// What the backend returns when credentials check out
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub record: UserRecord,
}

/// Payload for creating an account
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub display_name: String,
}

/// Payload for creating a game
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGame {
    pub host: RecordId,
    pub name: String,
    pub code: String,
    pub status: String,
    pub current_round: u32,
}

/// Partial payload for updating a game. Fields left as `None` are not
/// serialized at all, so the backend leaves them untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// One page of a paginated list response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResult<T> {
    pub page: u32,
    pub per_page: u32,
    pub total_items: i64,
    pub total_pages: i64,
    pub items: Vec<T>,
}
