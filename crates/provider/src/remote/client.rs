use std::env;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;

use exam_core::model::{ExamSelection, Question, Subject};

use crate::repository::{
    AttemptRecord, AttemptStore, AuthProvider, NewAttemptRecord, ProfileStore, ProviderError,
    QuestionProvider, QuestionRecord, SubjectRecord, UserId, UserIdentity,
};

/// Connection settings for the hosted backend (a Supabase-style REST API).
#[derive(Clone, Debug)]
pub struct RemoteConfig {
    pub base_url: String,
    pub api_key: String,
    /// The signed-in user's access token; absent when browsing signed out.
    pub access_token: Option<String>,
}

impl RemoteConfig {
    /// Read connection settings from the environment.
    ///
    /// Returns `None` when `EXAM_PROVIDER_URL` or `EXAM_PROVIDER_KEY` is
    /// missing, in which case callers fall back to the in-memory provider.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("EXAM_PROVIDER_URL").ok()?;
        let api_key = env::var("EXAM_PROVIDER_KEY").ok()?;
        if base_url.trim().is_empty() || api_key.trim().is_empty() {
            return None;
        }
        let access_token = env::var("EXAM_PROVIDER_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());
        Some(Self {
            base_url,
            api_key,
            access_token,
        })
    }
}

/// REST client implementing the provider contracts against the hosted backend.
pub struct RemoteProvider {
    client: Client,
    config: RemoteConfig,
}

impl RemoteProvider {
    #[must_use]
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn rest_url(&self, table: &str) -> String {
        format!(
            "{}/rest/v1/{table}",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn auth_url(&self, path: &str) -> String {
        format!(
            "{}/auth/v1/{path}",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("apikey", &self.config.api_key);
        match &self.config.access_token {
            Some(token) => request.bearer_auth(token),
            None => request.bearer_auth(&self.config.api_key),
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ProviderError> {
        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::Connection(e.to_string()))?;
        check_status(response)
    }
}

fn check_status(response: Response) -> Result<Response, ProviderError> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ProviderError::Unauthorized),
        StatusCode::NOT_FOUND => Err(ProviderError::NotFound),
        status => Err(ProviderError::Http {
            status: status.as_u16(),
        }),
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ProviderError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ProviderError::Serialization(e.to_string()))
}

#[async_trait]
impl QuestionProvider for RemoteProvider {
    async fn list_subjects(&self) -> Result<Vec<Subject>, ProviderError> {
        let request = self
            .authorize(self.client.get(self.rest_url("subjects")))
            .query(&[("select", "*"), ("order", "subject_name.asc")]);
        let rows: Vec<SubjectRecord> = decode(self.send(request).await?).await?;
        rows.into_iter().map(SubjectRecord::into_subject).collect()
    }

    async fn fetch_questions(
        &self,
        selection: &ExamSelection,
    ) -> Result<Vec<Question>, ProviderError> {
        let request = self
            .authorize(self.client.get(self.rest_url("questions")))
            .query(&[
                ("select", "*".to_string()),
                ("subject", format!("eq.{}", selection.subject)),
                ("exam_type", format!("eq.{}", selection.exam_type)),
                ("year", format!("eq.{}", selection.year)),
                ("order", "id.asc".to_string()),
            ]);
        let rows: Vec<QuestionRecord> = decode(self.send(request).await?).await?;
        rows.into_iter().map(QuestionRecord::into_question).collect()
    }
}

#[async_trait]
impl AttemptStore for RemoteProvider {
    async fn insert_attempt(
        &self,
        user: UserId,
        record: NewAttemptRecord,
    ) -> Result<AttemptRecord, ProviderError> {
        let payload = json!({
            "user_id": user,
            "subject": record.subject,
            "exam_type": record.exam_type,
            "questions_answered": record.questions_answered,
            "correct_answers": record.correct_answers,
            "score_percent": record.score_percent,
            "time_taken_minutes": record.time_taken_minutes,
        });
        let request = self
            .authorize(self.client.post(self.rest_url("exam_attempts")))
            .header("Prefer", "return=representation")
            .json(&payload);
        let mut rows: Vec<AttemptRecord> = decode(self.send(request).await?).await?;
        rows.pop().ok_or(ProviderError::NotFound)
    }

    async fn list_recent(
        &self,
        user: UserId,
        limit: u32,
    ) -> Result<Vec<AttemptRecord>, ProviderError> {
        let request = self
            .authorize(self.client.get(self.rest_url("exam_attempts")))
            .query(&[
                ("select", "*".to_string()),
                ("user_id", format!("eq.{user}")),
                ("order", "completed_at.desc".to_string()),
                ("limit", limit.to_string()),
            ]);
        decode(self.send(request).await?).await
    }
}

#[async_trait]
impl ProfileStore for RemoteProvider {
    async fn mark_premium(&self, user: UserId, transaction_id: &str) -> Result<(), ProviderError> {
        let payload = json!({
            "is_premium": true,
            "premium_transaction_id": transaction_id,
        });
        let request = self
            .authorize(self.client.patch(self.rest_url("profiles")))
            .query(&[("id", format!("eq.{user}"))])
            .json(&payload);
        self.send(request).await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct AuthUserResponse {
    id: UserId,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    #[serde(default)]
    is_premium: bool,
}

#[async_trait]
impl AuthProvider for RemoteProvider {
    async fn current_user(&self) -> Result<Option<UserIdentity>, ProviderError> {
        // No token means nobody is signed in; that is a state, not an error.
        if self.config.access_token.is_none() {
            return Ok(None);
        }

        let request = self.authorize(self.client.get(self.auth_url("user")));
        let user: AuthUserResponse = match self.send(request).await {
            Ok(response) => decode(response).await?,
            Err(ProviderError::Unauthorized) => return Ok(None),
            Err(err) => return Err(err),
        };

        let request = self
            .authorize(self.client.get(self.rest_url("profiles")))
            .query(&[
                ("select", "is_premium".to_string()),
                ("id", format!("eq.{}", user.id)),
            ]);
        let profiles: Vec<ProfileRow> = decode(self.send(request).await?).await?;
        let is_premium = profiles.first().is_some_and(|row| row.is_premium);

        Ok(Some(UserIdentity {
            id: user.id,
            email: user.email.unwrap_or_default(),
            is_premium,
        }))
    }
}
