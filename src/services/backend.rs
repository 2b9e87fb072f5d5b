use crate::models::{
    AuthSession, AuthUser, Destination, DestinationSummary, Post, PreferenceRecord, UserPreferences,
};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with the hosted backend
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned {0}: {1}")]
    ApiError(u16, String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Table names in the data API
#[derive(Debug, Clone)]
pub struct BackendTables {
    pub destinations: String,
    pub user_preferences: String,
    pub posts: String,
}

impl Default for BackendTables {
    fn default() -> Self {
        Self {
            destinations: "destinations".to_string(),
            user_preferences: "user_preferences".to_string(),
            posts: "posts".to_string(),
        }
    }
}

/// Result of an account registration
#[derive(Debug, Clone)]
pub struct SignUpResult {
    pub user: Option<AuthUser>,
    /// Present only when the project auto-confirms new accounts
    pub session: Option<AuthSession>,
}

const SUMMARY_COLUMNS: &str = "id,name,location,image,category,rating";

/// Hosted backend API client
///
/// Handles all communication with the backend-as-a-service:
/// - Destination records (public reads, admin writes)
/// - Onboarding preferences keyed by user id
/// - Blog posts
/// - Email/password accounts through the auth API
pub struct BackendClient {
    base_url: String,
    service_key: String,
    anon_key: String,
    client: Client,
    tables: BackendTables,
}

impl BackendClient {
    /// Create a new backend client
    pub fn new(
        base_url: String,
        service_key: String,
        anon_key: String,
        tables: BackendTables,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
            anon_key,
            client,
            tables,
        })
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn data_request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
    }

    fn auth_request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client.request(method, url).header("apikey", &self.anon_key)
    }

    /// Fetch the stored preferences for a user, if any
    pub async fn get_preferences(
        &self,
        user_id: &str,
    ) -> Result<Option<UserPreferences>, BackendError> {
        let url = format!(
            "{}?user_id=eq.{}&select=*&limit=1",
            self.rest_url(&self.tables.user_preferences),
            urlencoding::encode(user_id)
        );

        tracing::debug!("Fetching preferences from: {}", url);

        let response = self.data_request(Method::GET, &url).send().await?;
        let rows: Vec<Value> = check_status(response, "fetch preferences").await?.json().await?;

        let record: Option<PreferenceRecord> = first_row(rows, "preferences")?;
        Ok(record.map(|r| r.preferences))
    }

    /// Replace a user's preferences
    pub async fn save_preferences(
        &self,
        user_id: &str,
        preferences: &UserPreferences,
    ) -> Result<UserPreferences, BackendError> {
        let url = format!(
            "{}?on_conflict=user_id",
            self.rest_url(&self.tables.user_preferences)
        );

        let record = PreferenceRecord {
            user_id: user_id.to_string(),
            preferences: preferences.clone(),
            updated_at: Some(chrono::Utc::now()),
        };

        let response = self
            .data_request(Method::POST, &url)
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&record)
            .send()
            .await?;
        let rows: Vec<Value> = check_status(response, "save preferences").await?.json().await?;

        let saved: Option<PreferenceRecord> = first_row(rows, "preferences")?;
        tracing::debug!("Saved preferences for user {}", user_id);

        Ok(saved.map(|r| r.preferences).unwrap_or_else(|| preferences.clone()))
    }

    /// Fetch every destination with all columns
    pub async fn list_destinations(&self) -> Result<Vec<Destination>, BackendError> {
        let url = format!("{}?select=*", self.rest_url(&self.tables.destinations));

        let response = self.data_request(Method::GET, &url).send().await?;
        let rows: Vec<Value> = check_status(response, "list destinations").await?.json().await?;
        let total = rows.len();

        let destinations: Vec<Destination> = rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value(row) {
                Ok(destination) => Some(destination),
                Err(e) => {
                    tracing::warn!("Skipping malformed destination row: {}", e);
                    None
                }
            })
            .collect();

        tracing::debug!("Fetched {} destinations ({} rows)", destinations.len(), total);

        Ok(destinations)
    }

    /// Fetch the listing projection of every destination, newest first
    pub async fn list_destination_summaries(&self) -> Result<Vec<DestinationSummary>, BackendError> {
        let url = format!(
            "{}?select={}&order=created_at.desc",
            self.rest_url(&self.tables.destinations),
            SUMMARY_COLUMNS
        );

        let response = self.data_request(Method::GET, &url).send().await?;
        let summaries = check_status(response, "list destinations").await?.json().await?;

        Ok(summaries)
    }

    pub async fn get_destination(&self, id: &str) -> Result<Destination, BackendError> {
        let url = format!(
            "{}?id=eq.{}&select=*&limit=1",
            self.rest_url(&self.tables.destinations),
            urlencoding::encode(id)
        );

        let response = self.data_request(Method::GET, &url).send().await?;
        let rows: Vec<Value> = check_status(response, "fetch destination").await?.json().await?;

        first_row(rows, "destination")?
            .ok_or_else(|| BackendError::NotFound(format!("Destination {} not found", id)))
    }

    /// Insert destination records and return them as stored
    pub async fn insert_destinations(
        &self,
        destinations: &[Destination],
    ) -> Result<Vec<Destination>, BackendError> {
        let url = self.rest_url(&self.tables.destinations);

        let response = self
            .data_request(Method::POST, &url)
            .header("Prefer", "return=representation")
            .json(destinations)
            .send()
            .await?;
        let inserted: Vec<Destination> = check_status(response, "insert destinations").await?.json().await?;

        tracing::debug!("Inserted {} destinations", inserted.len());

        Ok(inserted)
    }

    /// Apply a partial update to one destination
    pub async fn update_destination(
        &self,
        id: &str,
        patch: &Map<String, Value>,
    ) -> Result<Destination, BackendError> {
        let url = format!(
            "{}?id=eq.{}",
            self.rest_url(&self.tables.destinations),
            urlencoding::encode(id)
        );

        let response = self
            .data_request(Method::PATCH, &url)
            .header("Prefer", "return=representation")
            .json(patch)
            .send()
            .await?;
        let rows: Vec<Value> = check_status(response, "update destination").await?.json().await?;

        first_row(rows, "destination")?
            .ok_or_else(|| BackendError::NotFound(format!("Destination {} not found", id)))
    }

    /// Delete one destination and return the removed record
    pub async fn delete_destination(&self, id: &str) -> Result<Destination, BackendError> {
        let url = format!(
            "{}?id=eq.{}",
            self.rest_url(&self.tables.destinations),
            urlencoding::encode(id)
        );

        let response = self
            .data_request(Method::DELETE, &url)
            .header("Prefer", "return=representation")
            .send()
            .await?;
        let rows: Vec<Value> = check_status(response, "delete destination").await?.json().await?;

        first_row(rows, "destination")?
            .ok_or_else(|| BackendError::NotFound(format!("Destination {} not found", id)))
    }

    /// Fetch blog posts, newest first
    pub async fn list_posts(&self) -> Result<Vec<Post>, BackendError> {
        let url = format!("{}?select=*&order=date.desc", self.rest_url(&self.tables.posts));

        let response = self.data_request(Method::GET, &url).send().await?;
        let posts = check_status(response, "list posts").await?.json().await?;

        Ok(posts)
    }

    pub async fn get_post(&self, slug: &str) -> Result<Post, BackendError> {
        let url = format!(
            "{}?slug=eq.{}&select=*&limit=1",
            self.rest_url(&self.tables.posts),
            urlencoding::encode(slug)
        );

        let response = self.data_request(Method::GET, &url).send().await?;
        let rows: Vec<Value> = check_status(response, "fetch post").await?.json().await?;

        first_row(rows, "post")?.ok_or_else(|| BackendError::NotFound(format!("Post {} not found", slug)))
    }

    /// Register an email/password account
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<SignUpResult, BackendError> {
        let url = self.auth_url("signup");
        let body = json!({
            "email": email,
            "password": password,
            "data": { "name": name },
        });

        let response = self.auth_request(Method::POST, &url).json(&body).send().await?;
        let json: Value = check_status(response, "sign up").await?.json().await?;

        // Auto-confirmed projects answer with a session, others with the bare user
        if json.get("access_token").is_some() {
            let session: AuthSession = parse(json, "session")?;
            Ok(SignUpResult {
                user: session.user.clone(),
                session: Some(session),
            })
        } else {
            let user = json.get("user").cloned().unwrap_or(json);
            Ok(SignUpResult {
                user: Some(parse(user, "user")?),
                session: None,
            })
        }
    }

    /// Exchange email and password for a session
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, BackendError> {
        let url = format!("{}?grant_type=password", self.auth_url("token"));
        let body = json!({ "email": email, "password": password });

        let response = self.auth_request(Method::POST, &url).json(&body).send().await?;
        let response = match check_status(response, "sign in").await {
            Err(BackendError::ApiError(400, _)) => {
                return Err(BackendError::Unauthorized("Invalid login credentials".to_string()))
            }
            other => other?,
        };

        parse(response.json().await?, "session")
    }

    /// Revoke the session behind an access token
    pub async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        let url = self.auth_url("logout");

        let response = self
            .auth_request(Method::POST, &url)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await?;
        check_status(response, "sign out").await?;

        Ok(())
    }
}

/// Map non-success statuses to typed errors, keeping the body for diagnostics
async fn check_status(response: Response, context: &str) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
    tracing::debug!("Backend call '{}' failed: {} - {}", context, status, body);

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            BackendError::Unauthorized(format!("Failed to {}: {}", context, status))
        }
        StatusCode::NOT_FOUND => BackendError::NotFound(format!("Failed to {}: {}", context, status)),
        _ => BackendError::ApiError(status.as_u16(), body),
    })
}

fn first_row<T: DeserializeOwned>(rows: Vec<Value>, what: &str) -> Result<Option<T>, BackendError> {
    match rows.into_iter().next() {
        Some(row) => parse(row, what).map(Some),
        None => Ok(None),
    }
}

fn parse<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, BackendError> {
    serde_json::from_value(value)
        .map_err(|e| BackendError::InvalidResponse(format!("Failed to parse {}: {}", what, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn create_client(url: &str) -> BackendClient {
        BackendClient::new(
            url.to_string(),
            "service_key".to_string(),
            "anon_key".to_string(),
            BackendTables::default(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_backend_client_creation() {
        let client = create_client("https://project.example.co/");

        assert_eq!(client.base_url, "https://project.example.co");
        assert_eq!(
            client.rest_url("destinations"),
            "https://project.example.co/rest/v1/destinations"
        );
        assert_eq!(client.auth_url("signup"), "https://project.example.co/auth/v1/signup");
    }

    #[tokio::test]
    async fn test_get_preferences_found() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/v1/user_preferences")
            .match_query(Matcher::UrlEncoded("user_id".into(), "eq.user-1".into()))
            .match_header("apikey", "service_key")
            .with_status(200)
            .with_body(r#"[{"user_id": "user-1", "travel_style": "adventure", "budget_range": "budget", "interests": ["nature"]}]"#)
            .create_async()
            .await;

        let client = create_client(&server.url());
        let prefs = client.get_preferences("user-1").await.unwrap();

        mock.assert_async().await;
        assert_eq!(prefs, Some(UserPreferences::new("adventure", "budget", &["nature"])));
    }

    #[tokio::test]
    async fn test_get_preferences_missing_row() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/v1/user_preferences")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = create_client(&server.url());

        assert_eq!(client.get_preferences("user-2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_preferences_denied() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/v1/user_preferences")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"message": "permission denied"}"#)
            .create_async()
            .await;

        let client = create_client(&server.url());
        let result = client.get_preferences("user-3").await;

        assert!(matches!(result, Err(BackendError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_list_destinations_keeps_rows_with_null_text() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/v1/destinations")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"[{"id": "a", "name": "Kep", "location": "Kep"}, {"id": "b", "name": null, "location": null}]"#)
            .create_async()
            .await;

        let client = create_client(&server.url());
        let destinations = client.list_destinations().await.unwrap();

        assert_eq!(destinations.len(), 2);
        assert_eq!(destinations[1].id, "b");
        assert_eq!(destinations[1].name, "");
    }

    #[tokio::test]
    async fn test_get_destination_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/v1/destinations")
            .match_query(Matcher::UrlEncoded("id".into(), "eq.nowhere".into()))
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = create_client(&server.url());
        let result = client.get_destination("nowhere").await;

        assert!(matches!(result, Err(BackendError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_sign_in_bad_credentials() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/auth/v1/token")
            .match_query(Matcher::UrlEncoded("grant_type".into(), "password".into()))
            .match_header("apikey", "anon_key")
            .with_status(400)
            .with_body(r#"{"error": "invalid_grant"}"#)
            .create_async()
            .await;

        let client = create_client(&server.url());
        let result = client.sign_in("traveler@example.com", "wrong").await;

        assert!(matches!(result, Err(BackendError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_sign_up_without_session() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/auth/v1/signup")
            .with_status(200)
            .with_body(r#"{"id": "new-user", "email": "traveler@example.com", "confirmation_sent_at": "2025-01-01T00:00:00Z"}"#)
            .create_async()
            .await;

        let client = create_client(&server.url());
        let result = client.sign_up("traveler@example.com", "secret123", "Sok").await.unwrap();

        assert!(result.session.is_none());
        assert_eq!(result.user.map(|u| u.id), Some("new-user".to_string()));
    }
}
