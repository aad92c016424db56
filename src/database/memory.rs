// ==================== IN-MEMORY STORE ====================
// Usado quando o Supabase não está configurado (dev local) e como fake nos testes.

use super::{Store, StoreBackend, StoreError};
use crate::models::{
    Application, ApplicationScoreUpdate, ProfileUpdate, Ranking, RankingSummary, SessionStatus, User,
    VideoSession, STATUS_PENDING,
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, User>>,
    video_sessions: RwLock<HashMap<String, VideoSession>>,
    applications: RwLock<HashMap<String, Application>>,
    rankings: RwLock<HashMap<String, Ranking>>,
    calls: AtomicUsize,
    failing: RwLock<HashSet<&'static str>>,
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Request("in-memory store lock poisoned".to_string())
}

#[cfg(test)]
impl MemoryStore {
    pub fn with_user(self, user: User) -> Self {
        if let Ok(mut users) = self.users.write() {
            users.insert(user.email.clone(), user);
        }
        self
    }

    pub fn with_video_session(self, session: VideoSession) -> Self {
        if let Ok(mut sessions) = self.video_sessions.write() {
            sessions.insert(session.id.to_string(), session);
        }
        self
    }

    pub fn with_application(self, application: Application) -> Self {
        if let Ok(mut applications) = self.applications.write() {
            applications.insert(application.id.clone(), application);
        }
        self
    }

    pub fn with_ranking(self, ranking: Ranking) -> Self {
        if let Ok(mut rankings) = self.rankings.write() {
            rankings.insert(ranking.id.to_string(), ranking);
        }
        self
    }

    /// Faz a operação informada (nome do método do trait) falhar com erro 503
    pub fn fail_operation(self, operation: &'static str) -> Self {
        if let Ok(mut failing) = self.failing.write() {
            failing.insert(operation);
        }
        self
    }

    /// Total de chamadas recebidas (inclusive as que falharam)
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn user(&self, email: &str) -> Option<User> {
        self.users.read().ok()?.get(email).cloned()
    }

    pub fn video_session(&self, id: &str) -> Option<VideoSession> {
        self.video_sessions.read().ok()?.get(id).cloned()
    }

    pub fn application(&self, id: &str) -> Option<Application> {
        self.applications.read().ok()?.get(id).cloned()
    }
}

impl MemoryStore {
    fn enter(&self, operation: &'static str) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let failing = self.failing.read().map_err(poisoned)?;
        if failing.contains(operation) {
            return Err(StoreError::Api {
                status: 503,
                message: format!("simulated failure in {}", operation),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> StoreBackend {
        StoreBackend::InMemory
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.enter("ping")
    }

    async fn delete_application(&self, id: &str) -> Result<(), StoreError> {
        self.enter("delete_application")?;
        self.applications.write().map_err(poisoned)?.remove(id);
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.enter("find_user_by_email")?;
        Ok(self.users.read().map_err(poisoned)?.get(email).cloned())
    }

    async fn update_user(&self, email: &str, update: &ProfileUpdate) -> Result<User, StoreError> {
        self.enter("update_user")?;
        let mut users = self.users.write().map_err(poisoned)?;
        let user = users
            .get_mut(email)
            .ok_or(StoreError::RowCount { expected: 1, found: 0 })?;
        user.apply(update);
        Ok(user.clone())
    }

    async fn find_video_session(&self, id: &str) -> Result<Option<VideoSession>, StoreError> {
        self.enter("find_video_session")?;
        Ok(self.video_sessions.read().map_err(poisoned)?.get(id).cloned())
    }

    async fn delete_video_session(&self, id: &str) -> Result<(), StoreError> {
        self.enter("delete_video_session")?;
        self.video_sessions.write().map_err(poisoned)?.remove(id);
        Ok(())
    }

    async fn find_session_by_meeting_id(
        &self,
        meeting_id: &str,
    ) -> Result<Option<VideoSession>, StoreError> {
        self.enter("find_session_by_meeting_id")?;
        let sessions = self.video_sessions.read().map_err(poisoned)?;
        let matches: Vec<&VideoSession> = sessions
            .values()
            .filter(|s| s.meeting_id == meeting_id)
            .collect();
        let found = matches.len();

        match matches.as_slice() {
            [] => Ok(None),
            [session] => Ok(Some((*session).clone())),
            _ => Err(StoreError::RowCount { expected: 1, found }),
        }
    }

    async fn update_session_status(
        &self,
        meeting_id: &str,
        status: SessionStatus,
        updated_at: &str,
    ) -> Result<VideoSession, StoreError> {
        self.enter("update_session_status")?;
        let mut sessions = self.video_sessions.write().map_err(poisoned)?;
        let mut matches: Vec<&mut VideoSession> = sessions
            .values_mut()
            .filter(|s| s.meeting_id == meeting_id)
            .collect();
        let found = matches.len();

        match matches.as_mut_slice() {
            [session] => {
                session.status = status;
                session
                    .extra
                    .insert("updated_at".to_string(), updated_at.into());
                Ok((**session).clone())
            }
            _ => Err(StoreError::RowCount { expected: 1, found }),
        }
    }

    async fn find_ranking(&self, id: &str) -> Result<Option<Ranking>, StoreError> {
        self.enter("find_ranking")?;
        Ok(self.rankings.read().map_err(poisoned)?.get(id).cloned())
    }

    async fn list_active_rankings(&self) -> Result<Vec<RankingSummary>, StoreError> {
        self.enter("list_active_rankings")?;
        let rankings = self.rankings.read().map_err(poisoned)?;
        let applications = self.applications.read().map_err(poisoned)?;

        let mut active: Vec<RankingSummary> = rankings
            .values()
            .filter(|r| r.is_active == Some(true))
            .map(|ranking| {
                let id = ranking.id.to_string();
                let applications_count = applications
                    .values()
                    .filter(|a| a.ranking_id.as_deref() == Some(id.as_str()))
                    .count() as u64;
                RankingSummary { ranking: ranking.clone(), applications_count }
            })
            .collect();
        // created_at é ISO 8601, então a ordem lexicográfica é a cronológica
        active.sort_by(|a, b| b.ranking.created_at.cmp(&a.ranking.created_at));
        Ok(active)
    }

    async fn list_pending_applications(&self, ranking_id: &str) -> Result<Vec<Application>, StoreError> {
        self.enter("list_pending_applications")?;
        let applications = self.applications.read().map_err(poisoned)?;
        let mut pending: Vec<Application> = applications
            .values()
            .filter(|a| a.ranking_id.as_deref() == Some(ranking_id))
            .filter(|a| a.status.as_deref() == Some(STATUS_PENDING))
            .cloned()
            .collect();
        pending.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(pending)
    }

    async fn record_application_score(
        &self,
        id: &str,
        update: &ApplicationScoreUpdate,
    ) -> Result<(), StoreError> {
        self.enter("record_application_score")?;
        let mut applications = self.applications.write().map_err(poisoned)?;
        if let Some(application) = applications.get_mut(id) {
            application.scores = Some(update.scores.clone());
            application.total_score = Some(update.total_score);
            application.status = Some(update.status.to_string());
            application.scored_at = Some(update.scored_at.clone());
        }
        Ok(())
    }

    async fn list_scored_applications(&self, ranking_id: &str) -> Result<Vec<Application>, StoreError> {
        self.enter("list_scored_applications")?;
        let applications = self.applications.read().map_err(poisoned)?;
        let mut scored: Vec<Application> = applications
            .values()
            .filter(|a| a.ranking_id.as_deref() == Some(ranking_id))
            .filter(|a| a.total_score.is_some())
            .cloned()
            .collect();
        scored.sort_by(|a, b| b.total_score.cmp(&a.total_score).then_with(|| a.id.cmp(&b.id)));
        Ok(scored)
    }

    async fn set_application_rank(&self, id: &str, rank: i64) -> Result<(), StoreError> {
        self.enter("set_application_rank")?;
        let mut applications = self.applications.write().map_err(poisoned)?;
        if let Some(application) = applications.get_mut(id) {
            application.rank = Some(rank);
        }
        Ok(())
    }
}
