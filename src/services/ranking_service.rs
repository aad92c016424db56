// ==================== RANKING SCORING ====================
// Pontua as candidaturas pendentes de um ranking e recalcula as posições.

use crate::database::Store;
use crate::models::{Application, ApplicationScoreUpdate, CriteriaWeights, STATUS_SCORED};
use crate::services::scoring_service::score_application;
use crate::utils::error::AppError;
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRankingResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scored_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_applications: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

fn display_name(application: &Application) -> &str {
    application.applicant_name.as_deref().unwrap_or(&application.id)
}

fn has_resume_data(application: &Application) -> bool {
    let present = |field: &Option<String>| field.as_deref().is_some_and(|v| !v.is_empty());
    present(&application.resume_summary) && present(&application.key_skills)
}

/// POST /api/rankings/{id}/score
pub async fn score_ranking(store: &dyn Store, ranking_id: &str) -> Result<ScoreRankingResponse, AppError> {
    let ranking = match store.find_ranking(ranking_id).await {
        Ok(Some(ranking)) => ranking,
        Ok(None) => return Err(AppError::NotFound("Ranking not found".to_string())),
        Err(e) => {
            log::warn!("⚠️  Ranking lookup failed for {}: {}", ranking_id, e);
            return Err(AppError::NotFound("Ranking not found".to_string()));
        }
    };

    let applications = store
        .list_pending_applications(ranking_id)
        .await
        .map_err(AppError::store("Failed to fetch applications"))?;

    if applications.is_empty() {
        return Ok(ScoreRankingResponse {
            message: "No pending applications to score".to_string(),
            scored_count: None,
            total_applications: None,
            errors: None,
        });
    }

    let criteria_weights = ranking.criteria_weights.unwrap_or_else(CriteriaWeights::new);
    let mut scored_count = 0;
    let mut errors = Vec::new();

    log::info!("📊 Scoring {} applications for ranking {}", applications.len(), ranking_id);

    for application in &applications {
        let name = display_name(application);

        if !has_resume_data(application) {
            log::info!("⏭️  Skipping {} - no resume data available", name);
            errors.push(format!("Skipped {}: No resume data available", name));
            continue;
        }

        let result = score_application(application, &criteria_weights);
        let update = ApplicationScoreUpdate {
            scores: result.criteria_scores,
            total_score: result.total_score,
            status: STATUS_SCORED,
            scored_at: chrono::Utc::now().to_rfc3339(),
        };

        match store.record_application_score(&application.id, &update).await {
            Ok(()) => {
                scored_count += 1;
                log::info!("✅ Scored {}: {}", name, update.total_score);
            }
            Err(e) => {
                log::error!("❌ Error updating application {}: {}", application.id, e);
                errors.push(format!("Failed to update {}", name));
            }
        }
    }

    if scored_count > 0 {
        update_ranks(store, ranking_id).await;
    }

    Ok(ScoreRankingResponse {
        message: format!(
            "Successfully scored {} out of {} applications",
            scored_count,
            applications.len()
        ),
        scored_count: Some(scored_count),
        total_applications: Some(applications.len()),
        errors: if errors.is_empty() { None } else { Some(errors) },
    })
}

/// Reordena por total_score e grava rank = posição + 1. Falhas só vão para o log.
async fn update_ranks(store: &dyn Store, ranking_id: &str) {
    let scored = match store.list_scored_applications(ranking_id).await {
        Ok(scored) => scored,
        Err(e) => {
            log::error!("❌ Failed to load scored applications for ranking {}: {}", ranking_id, e);
            return;
        }
    };

    for (position, application) in scored.iter().enumerate() {
        if let Err(e) = store.set_application_rank(&application.id, position as i64 + 1).await {
            log::error!("❌ Error updating rank for {}: {}", display_name(application), e);
        }
    }

    log::info!("🏆 Updated rankings for {} applications", scored.len());
}
