use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recruitment API",
        version = "1.0.0",
        description = "Route handlers for applications, user profiles, video interview sessions and ranking scoring.\n\nAll errors are returned as `{\"error\": string}` with status 400, 404 or 500."
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Applications
        crate::api::applications::delete_application,

        // Auth / profile
        crate::api::auth::get_profile,
        crate::api::auth::update_profile,

        // Video sessions
        crate::api::video_sessions::delete_session,
        crate::api::video_sessions::get_session_by_meeting_id,
        crate::api::video_sessions::update_session_status,

        // Rankings
        crate::api::rankings::list_rankings,
        crate::api::rankings::score_ranking,
    ),
    components(
        schemas(
            crate::utils::error::ErrorResponse,
            crate::api::health::HealthResponse,
            crate::api::health::HealthEnvironment,
            crate::api::applications::DeleteApplicationResponse,
            crate::api::auth::ProfileResponse,
            crate::api::auth::UpdateProfileRequest,
            crate::api::auth::MessageResponse,
            crate::api::video_sessions::UpdateStatusRequest,
            crate::api::video_sessions::DeleteSessionResponse,
            crate::services::ranking_service::ScoreRankingResponse,
            crate::models::User,
            crate::models::VideoSession,
            crate::models::SessionStatus,
            crate::models::Ranking,
            crate::models::RankingSummary,
        )
    ),
    tags(
        (name = "Health", description = "Service and store connectivity check."),
        (name = "Applications", description = "Candidate applications."),
        (name = "Auth", description = "Profile of the current user, identified by email."),
        (name = "Video Sessions", description = "Interview video sessions and their status (scheduled, active, completed)."),
        (name = "Rankings", description = "Active rankings and scoring of their pending applications."),
    )
)]
pub struct ApiDoc;
