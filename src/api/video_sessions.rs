use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use crate::database::Store;
use crate::models::{SessionStatus, VideoSession};
use crate::utils::error::{required, AppError, ErrorResponse};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateStatusRequest {
    /// scheduled | active | completed. Qualquer outro valor (inclusive não-string) vira 400 "Invalid status".
    #[schema(value_type = Option<String>)]
    pub status: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DeleteSessionResponse {
    pub success: bool,
    pub message: String,
}

fn session_not_found() -> AppError {
    AppError::NotFound("Session not found".to_string())
}

#[utoipa::path(
    delete,
    path = "/api/video-sessions/{id}",
    tag = "Video Sessions",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Session deleted", body = DeleteSessionResponse),
        (status = 400, description = "Session ID is required", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 500, description = "Failed to delete session", body = ErrorResponse)
    )
)]
pub async fn delete_session(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    let session_id = required(Some(session_id.as_str()))
        .ok_or_else(|| AppError::InvalidRequest("Session ID is required".to_string()))?;

    log::info!("🗑️  DELETE /video-sessions/{}", session_id);

    // Leitura separada antes do delete para distinguir 404 de 500
    match store.find_video_session(session_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Err(session_not_found()),
        Err(e) => {
            log::warn!("⚠️  Session lookup failed for {}: {}", session_id, e);
            return Err(session_not_found());
        }
    }

    store
        .delete_video_session(session_id)
        .await
        .map_err(AppError::store("Failed to delete session"))?;

    log::info!("✅ Session {} deleted", session_id);

    Ok(HttpResponse::Ok().json(DeleteSessionResponse {
        success: true,
        message: "Session deleted successfully".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/video-sessions/meeting/{meeting_id}",
    tag = "Video Sessions",
    params(("meeting_id" = String, Path, description = "Meeting id shared with participants")),
    responses(
        (status = 200, description = "Session record", body = VideoSession),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_session_by_meeting_id(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let meeting_id = path.into_inner();

    log::info!("🎥 GET /video-sessions/meeting/{}", meeting_id);

    match store.find_session_by_meeting_id(&meeting_id).await {
        Ok(Some(session)) => Ok(HttpResponse::Ok().json(session)),
        Ok(None) => Err(session_not_found()),
        Err(e) => {
            log::warn!("⚠️  Session lookup failed for meeting {}: {}", meeting_id, e);
            Err(session_not_found())
        }
    }
}

#[utoipa::path(
    patch,
    path = "/api/video-sessions/meeting/{meeting_id}/status",
    tag = "Video Sessions",
    params(("meeting_id" = String, Path, description = "Meeting id shared with participants")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated session record", body = VideoSession),
        (status = 400, description = "Invalid status", body = ErrorResponse),
        (status = 500, description = "Failed to update session", body = ErrorResponse)
    )
)]
pub async fn update_session_status(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
    request: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let meeting_id = path.into_inner();
    let meeting_id = required(Some(meeting_id.as_str()))
        .ok_or_else(|| AppError::InvalidRequest("Meeting ID is required".to_string()))?;

    let status: SessionStatus = request
        .status
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| AppError::InvalidRequest("Invalid status".to_string()))?;

    log::info!("🔄 PATCH /video-sessions/meeting/{}/status -> {}", meeting_id, status);

    let updated_at = chrono::Utc::now().to_rfc3339();
    let session = store
        .update_session_status(meeting_id, status, &updated_at)
        .await
        .map_err(AppError::store("Failed to update session"))?;

    Ok(HttpResponse::Ok().json(session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use actix_web::{http::StatusCode, test};
    use serde_json::json;
    use std::sync::Arc;

    fn session(id: &str, meeting_id: &str) -> VideoSession {
        let mut session = VideoSession::new(id, meeting_id, SessionStatus::Scheduled);
        session.extra.insert("title".to_string(), json!("Interview"));
        session
            .extra
            .insert("meeting_url".to_string(), json!("https://meet.example/mtg-1"));
        session
    }

    fn store_with_session() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::default().with_video_session(session("s1", "mtg-1")))
    }

    #[actix_web::test]
    async fn test_delete_session() {
        let store = store_with_session();
        let app = test_app!(store);

        let req = test::TestRequest::delete().uri("/api/video-sessions/s1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "success": true, "message": "Session deleted successfully" }));
        assert!(store.video_session("s1").is_none());
    }

    #[actix_web::test]
    async fn test_delete_missing_session_is_404() {
        let store = store_with_session();
        let app = test_app!(store);

        let req = test::TestRequest::delete().uri("/api/video-sessions/nope").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Session not found" }));
        // só a leitura, nenhum delete
        assert_eq!(store.call_count(), 1);
    }

    #[actix_web::test]
    async fn test_delete_lookup_failure_is_404() {
        let store = Arc::new(
            MemoryStore::default()
                .with_video_session(session("s1", "mtg-1"))
                .fail_operation("find_video_session"),
        );
        let app = test_app!(store);

        let req = test::TestRequest::delete().uri("/api/video-sessions/s1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_delete_failure_is_500() {
        let store = Arc::new(
            MemoryStore::default()
                .with_video_session(session("s1", "mtg-1"))
                .fail_operation("delete_video_session"),
        );
        let app = test_app!(store);

        let req = test::TestRequest::delete().uri("/api/video-sessions/s1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Failed to delete session" }));
        assert!(store.video_session("s1").is_some());
    }

    #[actix_web::test]
    async fn test_get_session_by_meeting_id() {
        let store = store_with_session();
        let app = test_app!(store);

        let req = test::TestRequest::get().uri("/api/video-sessions/meeting/mtg-1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["id"], "s1");
        assert_eq!(body["meeting_id"], "mtg-1");
        assert_eq!(body["status"], "scheduled");
        assert_eq!(body["title"], "Interview");
        assert_eq!(body["meeting_url"], "https://meet.example/mtg-1");
    }

    #[actix_web::test]
    async fn test_get_session_keeps_numeric_id_and_extra_columns() {
        let row: VideoSession = serde_json::from_value(json!({
            "id": 12,
            "meeting_id": "mtg-12",
            "status": "active",
            "meeting_url": "https://meet.example/mtg-12",
            "interviewer_email": "hr@example.com",
            "scheduled_at": null
        }))
        .unwrap();
        let store = Arc::new(MemoryStore::default().with_video_session(row));
        let app = test_app!(store);

        let req = test::TestRequest::get().uri("/api/video-sessions/meeting/mtg-12").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({
                "id": 12,
                "meeting_id": "mtg-12",
                "status": "active",
                "meeting_url": "https://meet.example/mtg-12",
                "interviewer_email": "hr@example.com",
                "scheduled_at": null
            })
        );
    }

    #[actix_web::test]
    async fn test_delete_with_empty_id_is_400() {
        let store = store_with_session();
        let app = test_app!(store);

        let req = test::TestRequest::delete().uri("/api/video-sessions/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Session ID is required" }));
        assert_eq!(store.call_count(), 0);
    }

    #[actix_web::test]
    async fn test_update_status_with_empty_meeting_id_is_400() {
        let store = store_with_session();
        let app = test_app!(store);

        let req = test::TestRequest::patch()
            .uri("/api/video-sessions/meeting//status")
            .set_json(json!({ "status": "active" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Meeting ID is required" }));
        assert_eq!(store.call_count(), 0);
    }

    #[actix_web::test]
    async fn test_get_unknown_meeting_is_404() {
        let store = store_with_session();
        let app = test_app!(store);

        let req = test::TestRequest::get().uri("/api/video-sessions/meeting/other").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_get_lookup_failure_is_404() {
        let store = Arc::new(
            MemoryStore::default()
                .with_video_session(session("s1", "mtg-1"))
                .fail_operation("find_session_by_meeting_id"),
        );
        let app = test_app!(store);

        let req = test::TestRequest::get().uri("/api/video-sessions/meeting/mtg-1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_update_status() {
        let store = store_with_session();
        let app = test_app!(store);

        let req = test::TestRequest::patch()
            .uri("/api/video-sessions/meeting/mtg-1/status")
            .set_json(json!({ "status": "active" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "active");
        assert!(body["updated_at"].is_string());

        let stored = store.video_session("s1").unwrap();
        assert_eq!(stored.status, SessionStatus::Active);
        assert!(stored.updated_at().is_some());
        assert_eq!(stored.extra["meeting_url"], "https://meet.example/mtg-1");
    }

    #[actix_web::test]
    async fn test_invalid_status_never_reaches_store() {
        let store = store_with_session();
        let app = test_app!(store);

        for payload in [
            json!({ "status": "cancelled" }),
            json!({ "status": "ACTIVE" }),
            json!({ "status": "" }),
            json!({ "status": 5 }),
            json!({ "status": null }),
            json!({ "status": ["active"] }),
            json!({}),
        ] {
            let req = test::TestRequest::patch()
                .uri("/api/video-sessions/meeting/mtg-1/status")
                .set_json(payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body, json!({ "error": "Invalid status" }));
        }

        assert_eq!(store.call_count(), 0);
        assert_eq!(store.video_session("s1").unwrap().status, SessionStatus::Scheduled);
    }

    #[actix_web::test]
    async fn test_update_status_unknown_meeting_is_500() {
        let store = store_with_session();
        let app = test_app!(store);

        let req = test::TestRequest::patch()
            .uri("/api/video-sessions/meeting/other/status")
            .set_json(json!({ "status": "completed" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Failed to update session" }));
    }
}
