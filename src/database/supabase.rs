// ==================== SUPABASE (PostgREST) STORE ====================
// Cada operação é uma única requisição HTTP para /rest/v1/<tabela>

use super::{Store, StoreBackend, StoreError};
use crate::models::{
    Application, ApplicationScoreUpdate, ProfileUpdate, Ranking, RankingSummary, SessionStatus,
    SessionStatusUpdate, User, VideoSession,
};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const APPLICATIONS: &str = "applications";
const USERS: &str = "users";
const VIDEO_SESSIONS: &str = "video_sessions";
const RANKINGS: &str = "rankings";

/// Corpo de erro padrão do PostgREST
#[derive(Debug, Deserialize)]
struct PostgrestError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

/// Linha de `rankings` com o embed `applications(count)` do PostgREST
#[derive(Debug, Deserialize)]
struct RankingWithCount {
    #[serde(flatten)]
    ranking: Ranking,
    #[serde(default)]
    applications: Vec<EmbeddedCount>,
}

#[derive(Debug, Deserialize)]
struct EmbeddedCount {
    count: u64,
}

impl From<RankingWithCount> for RankingSummary {
    fn from(row: RankingWithCount) -> Self {
        RankingSummary {
            applications_count: row.applications.first().map_or(0, |c| c.count),
            ranking: row.ranking,
        }
    }
}

#[derive(Clone)]
pub struct SupabaseStore {
    client: reqwest::Client,
    rest_url: String,
    service_key: String,
}

impl SupabaseStore {
    pub fn new(base_url: &str, service_key: &str, timeout: Duration) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Request(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            rest_url: format!("{}/rest/v1", base_url.trim_end_matches('/')),
            service_key: service_key.to_string(),
        })
    }

    /// Monta `<rest_url>/<table>?col=eq.valor&...` com os valores url-encoded
    fn table_url(&self, table: &str, params: &[(&str, String)]) -> String {
        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        if query.is_empty() {
            format!("{}/{}", self.rest_url, table)
        } else {
            format!("{}/{}?{}", self.rest_url, table, query)
        }
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .header("Accept", "application/json")
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, StoreError> {
        let response = builder
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<PostgrestError>(&body) {
            Ok(err) => {
                let mut msg = err.message.unwrap_or_else(|| status.to_string());
                if let Some(code) = err.code {
                    msg = format!("{} [{}]", msg, code);
                }
                if let Some(details) = err.details {
                    msg = format!("{} - {}", msg, details);
                }
                msg
            }
            Err(_) if body.is_empty() => status.to_string(),
            Err(_) => body,
        };

        Err(StoreError::Api { status: status.as_u16(), message })
    }

    async fn rows<T: DeserializeOwned>(response: Response) -> Result<Vec<T>, StoreError> {
        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        let url = self.table_url(table, params);
        let response = self.send(self.request(Method::GET, &url)).await?;
        Self::rows(response).await
    }

    /// SELECT que aceita zero ou uma linha
    async fn select_optional<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, String)],
    ) -> Result<Option<T>, StoreError> {
        let mut rows = self.select::<T>(table, params).await?;
        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            found => Err(StoreError::RowCount { expected: 1, found }),
        }
    }

    async fn patch<B: Serialize + ?Sized>(
        &self,
        table: &str,
        params: &[(&str, String)],
        body: &B,
    ) -> Result<Response, StoreError> {
        let url = self.table_url(table, params);
        self.send(
            self.request(Method::PATCH, &url)
                .header("Prefer", "return=representation")
                .json(body),
        )
        .await
    }

    /// UPDATE ... RETURNING que exige exatamente uma linha afetada
    async fn patch_single<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        table: &str,
        params: &[(&str, String)],
        body: &B,
    ) -> Result<T, StoreError> {
        let response = self.patch(table, params, body).await?;
        let mut rows = Self::rows::<T>(response).await?;
        if rows.len() != 1 {
            return Err(StoreError::RowCount { expected: 1, found: rows.len() });
        }
        rows.pop().ok_or(StoreError::RowCount { expected: 1, found: 0 })
    }

    async fn delete(&self, table: &str, params: &[(&str, String)]) -> Result<(), StoreError> {
        let url = self.table_url(table, params);
        self.send(self.request(Method::DELETE, &url)).await?;
        Ok(())
    }
}

fn eq(value: &str) -> String {
    format!("eq.{}", value)
}

#[async_trait]
impl Store for SupabaseStore {
    fn backend(&self) -> StoreBackend {
        StoreBackend::Supabase
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.select::<serde_json::Value>(USERS, &[("select", "id".to_string()), ("limit", "1".to_string())])
            .await
            .map(|_| ())
    }

    async fn delete_application(&self, id: &str) -> Result<(), StoreError> {
        self.delete(APPLICATIONS, &[("id", eq(id))]).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.select_optional(USERS, &[("select", "*".to_string()), ("email", eq(email))])
            .await
    }

    async fn update_user(&self, email: &str, update: &ProfileUpdate) -> Result<User, StoreError> {
        self.patch_single(USERS, &[("email", eq(email))], update).await
    }

    async fn find_video_session(&self, id: &str) -> Result<Option<VideoSession>, StoreError> {
        self.select_optional(VIDEO_SESSIONS, &[("select", "*".to_string()), ("id", eq(id))])
            .await
    }

    async fn delete_video_session(&self, id: &str) -> Result<(), StoreError> {
        self.delete(VIDEO_SESSIONS, &[("id", eq(id))]).await
    }

    async fn find_session_by_meeting_id(
        &self,
        meeting_id: &str,
    ) -> Result<Option<VideoSession>, StoreError> {
        self.select_optional(
            VIDEO_SESSIONS,
            &[("select", "*".to_string()), ("meeting_id", eq(meeting_id))],
        )
        .await
    }

    async fn update_session_status(
        &self,
        meeting_id: &str,
        status: SessionStatus,
        updated_at: &str,
    ) -> Result<VideoSession, StoreError> {
        let body = SessionStatusUpdate { status, updated_at };
        self.patch_single(VIDEO_SESSIONS, &[("meeting_id", eq(meeting_id))], &body)
            .await
    }

    async fn find_ranking(&self, id: &str) -> Result<Option<Ranking>, StoreError> {
        self.select_optional(RANKINGS, &[("select", "*".to_string()), ("id", eq(id))])
            .await
    }

    async fn list_active_rankings(&self) -> Result<Vec<RankingSummary>, StoreError> {
        let rows: Vec<RankingWithCount> = self
            .select(
                RANKINGS,
                &[
                    ("select", "*,applications(count)".to_string()),
                    ("is_active", "eq.true".to_string()),
                    ("order", "created_at.desc".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(RankingSummary::from).collect())
    }

    async fn list_pending_applications(&self, ranking_id: &str) -> Result<Vec<Application>, StoreError> {
        self.select(
            APPLICATIONS,
            &[
                ("select", "*".to_string()),
                ("ranking_id", eq(ranking_id)),
                ("status", eq(crate::models::STATUS_PENDING)),
            ],
        )
        .await
    }

    async fn record_application_score(
        &self,
        id: &str,
        update: &ApplicationScoreUpdate,
    ) -> Result<(), StoreError> {
        self.patch(APPLICATIONS, &[("id", eq(id))], update).await?;
        Ok(())
    }

    async fn list_scored_applications(&self, ranking_id: &str) -> Result<Vec<Application>, StoreError> {
        self.select(
            APPLICATIONS,
            &[
                ("select", "id,total_score,applicant_name".to_string()),
                ("ranking_id", eq(ranking_id)),
                ("total_score", "not.is.null".to_string()),
                ("order", "total_score.desc".to_string()),
            ],
        )
        .await
    }

    async fn set_application_rank(&self, id: &str, rank: i64) -> Result<(), StoreError> {
        self.patch(APPLICATIONS, &[("id", eq(id))], &serde_json::json!({ "rank": rank }))
            .await?;
        Ok(())
    }
}
