use actix_web::{web, HttpResponse};
use crate::database::Store;
use crate::models::RankingSummary;
use crate::services::ranking_service::{self, ScoreRankingResponse};
use crate::utils::error::{AppError, ErrorResponse};

/// GET /api/rankings - Rankings ativos com o total de candidaturas
#[utoipa::path(
    get,
    path = "/api/rankings",
    tag = "Rankings",
    responses(
        (status = 200, description = "Active rankings, newest first", body = Vec<RankingSummary>),
        (status = 500, description = "Failed to fetch rankings", body = ErrorResponse)
    )
)]
pub async fn list_rankings(store: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /rankings");

    let rankings = store
        .list_active_rankings()
        .await
        .map_err(AppError::store("Failed to fetch rankings"))?;

    Ok(HttpResponse::Ok().json(rankings))
}

/// POST /api/rankings/{id}/score - Pontua as candidaturas pendentes e atualiza o rank
#[utoipa::path(
    post,
    path = "/api/rankings/{id}/score",
    tag = "Rankings",
    params(("id" = String, Path, description = "Ranking id")),
    responses(
        (status = 200, description = "Scoring summary", body = ScoreRankingResponse),
        (status = 404, description = "Ranking not found", body = ErrorResponse),
        (status = 500, description = "Failed to fetch applications", body = ErrorResponse)
    )
)]
pub async fn score_ranking(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let ranking_id = path.into_inner();

    log::info!("📊 POST /rankings/{}/score", ranking_id);

    let response = ranking_service::score_ranking(store.get_ref(), &ranking_id).await?;

    log::info!("✅ {}", response.message);

    Ok(HttpResponse::Ok().json(response))
}

#[cfg(test)]
mod tests {
    use crate::database::MemoryStore;
    use crate::models::{Application, Ranking, STATUS_PENDING};
    use actix_web::{http::StatusCode, test};
    use serde_json::json;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_score_ranking_endpoint() {
        let store = Arc::new(
            MemoryStore::default()
                .with_ranking(Ranking::new("r1"))
                .with_application(Application {
                    id: "a1".to_string(),
                    ranking_id: Some("r1".to_string()),
                    resume_summary: Some("Backend developer".to_string()),
                    key_skills: Some("rust,postgres".to_string()),
                    education_level: Some("phd".to_string()),
                    status: Some(STATUS_PENDING.to_string()),
                    ..Application::default()
                }),
        );
        let app = test_app!(store);

        let req = test::TestRequest::post().uri("/api/rankings/r1/score").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({
                "message": "Successfully scored 1 out of 1 applications",
                "scoredCount": 1,
                "totalApplications": 1
            })
        );

        let scored = store.application("a1").unwrap();
        assert_eq!(scored.total_score, Some(70));
        assert_eq!(scored.rank, Some(1));
    }

    #[actix_web::test]
    async fn test_unknown_ranking() {
        let store = Arc::new(MemoryStore::default());
        let app = test_app!(store);

        let req = test::TestRequest::post().uri("/api/rankings/nope/score").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Ranking not found" }));
    }

    fn ranking(id: &str, title: &str, created_at: &str, is_active: bool) -> Ranking {
        let mut ranking = Ranking::new(id);
        ranking.is_active = Some(is_active);
        ranking.created_at = Some(created_at.to_string());
        ranking.extra.insert("title".to_string(), json!(title));
        ranking
    }

    fn application(id: &str, ranking_id: &str) -> Application {
        Application {
            id: id.to_string(),
            ranking_id: Some(ranking_id.to_string()),
            ..Application::default()
        }
    }

    #[actix_web::test]
    async fn test_list_active_rankings() {
        let store = Arc::new(
            MemoryStore::default()
                .with_ranking(ranking("r1", "Baristas", "2024-03-01T00:00:00+00:00", true))
                .with_ranking(ranking("r2", "Cashiers", "2024-05-01T00:00:00+00:00", true))
                .with_ranking(ranking("r3", "Closed", "2024-06-01T00:00:00+00:00", false))
                .with_application(application("a1", "r1"))
                .with_application(application("a2", "r1"))
                .with_application(application("a3", "r3")),
        );
        let app = test_app!(store);

        let req = test::TestRequest::get().uri("/api/rankings").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 2);

        assert_eq!(items[0]["id"], "r2");
        assert_eq!(items[0]["title"], "Cashiers");
        assert_eq!(items[0]["applications_count"], 0);

        assert_eq!(items[1]["id"], "r1");
        assert_eq!(items[1]["applications_count"], 2);
    }

    #[actix_web::test]
    async fn test_list_rankings_store_failure() {
        let store = Arc::new(MemoryStore::default().fail_operation("list_active_rankings"));
        let app = test_app!(store);

        let req = test::TestRequest::get().uri("/api/rankings").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Failed to fetch rankings" }));
    }
}
