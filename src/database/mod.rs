pub mod memory;
pub mod supabase;

pub use memory::MemoryStore;
pub use supabase::SupabaseStore;

use crate::config::AppConfig;
use crate::models::{
    Application, ApplicationScoreUpdate, ProfileUpdate, Ranking, RankingSummary, SessionStatus, User,
    VideoSession,
};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Falha de transporte (conexão, timeout, TLS)
    Request(String),
    /// Resposta de erro da API do banco
    Api { status: u16, message: String },
    /// Esperava exatamente uma linha
    RowCount { expected: usize, found: usize },
    Decode(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Request(msg) => write!(f, "Store request failed: {}", msg),
            StoreError::Api { status, message } => write!(f, "Store error ({}): {}", status, message),
            StoreError::RowCount { expected, found } => {
                write!(f, "Expected {} row(s), store returned {}", expected, found)
            }
            StoreError::Decode(msg) => write!(f, "Failed to decode store response: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Supabase,
    InMemory,
}

/// Handle injetado nos handlers. Cada operação corresponde a uma única chamada ao banco.
#[async_trait]
pub trait Store: Send + Sync {
    fn backend(&self) -> StoreBackend;

    async fn ping(&self) -> Result<(), StoreError>;

    async fn delete_application(&self, id: &str) -> Result<(), StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Atualiza o usuário identificado por email e devolve a linha atualizada
    async fn update_user(&self, email: &str, update: &ProfileUpdate) -> Result<User, StoreError>;

    async fn find_video_session(&self, id: &str) -> Result<Option<VideoSession>, StoreError>;

    async fn delete_video_session(&self, id: &str) -> Result<(), StoreError>;

    async fn find_session_by_meeting_id(
        &self,
        meeting_id: &str,
    ) -> Result<Option<VideoSession>, StoreError>;

    /// Falha com `RowCount` se nenhuma (ou mais de uma) sessão tiver esse meeting_id
    async fn update_session_status(
        &self,
        meeting_id: &str,
        status: SessionStatus,
        updated_at: &str,
    ) -> Result<VideoSession, StoreError>;

    async fn find_ranking(&self, id: &str) -> Result<Option<Ranking>, StoreError>;

    /// Rankings ativos, mais recentes primeiro, com a contagem de candidaturas
    async fn list_active_rankings(&self) -> Result<Vec<RankingSummary>, StoreError>;

    async fn list_pending_applications(&self, ranking_id: &str) -> Result<Vec<Application>, StoreError>;

    async fn record_application_score(
        &self,
        id: &str,
        update: &ApplicationScoreUpdate,
    ) -> Result<(), StoreError>;

    /// Candidaturas com total_score, ordenadas do maior para o menor
    async fn list_scored_applications(&self, ranking_id: &str) -> Result<Vec<Application>, StoreError>;

    async fn set_application_rank(&self, id: &str, rank: i64) -> Result<(), StoreError>;
}

/// Escolhe o backend a partir da configuração.
/// Sem SUPABASE_URL / SUPABASE_SERVICE_ROLE_KEY o serviço sobe com o store em memória.
pub fn connect(config: &AppConfig) -> Result<Arc<dyn Store>, StoreError> {
    match (&config.supabase_url, &config.supabase_service_key) {
        (Some(url), Some(key)) => {
            log::info!("🗄️  Using Supabase store at {}", url);
            let store = SupabaseStore::new(url, key, config.store_timeout)?;
            Ok(Arc::new(store))
        }
        _ => {
            log::warn!(
                "⚠️  Supabase not configured (missing: {}), falling back to in-memory store",
                config.missing_store_vars().join(", ")
            );
            Ok(Arc::new(MemoryStore::default()))
        }
    }
}
