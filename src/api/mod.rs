use crate::utils::error::AppError;
use actix_web::{error, web, HttpRequest};

/// Monta o App de teste com o store informado (Arc<MemoryStore>) e as rotas reais
#[cfg(test)]
macro_rules! test_app {
    ($store:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::from(
                    $store.clone() as std::sync::Arc<dyn crate::database::Store>
                ))
                .app_data(actix_web::web::Data::new(crate::config::AppConfig::default()))
                .configure(crate::api::routes),
        )
        .await
    };
}

pub mod applications;
pub mod auth;
pub mod health;
pub mod rankings;
pub mod swagger;
pub mod video_sessions;

fn json_error_handler(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("⚠️  Rejected body for {} {}: {}", req.method(), req.path(), err);
    AppError::InvalidRequest("Invalid request body".to_string()).into()
}

fn query_error_handler(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("⚠️  Rejected query for {} {}: {}", req.method(), req.path(), err);
    AppError::InvalidRequest("Invalid query string".to_string()).into()
}

async fn not_found(req: HttpRequest) -> Result<actix_web::HttpResponse, AppError> {
    log::debug!("No route for {} {}", req.method(), req.path());
    Err(AppError::NotFound("Not found".to_string()))
}

/// Todas as rotas /api. Usado pelo main e pelos testes.
/// Segmentos de id aceitam vazio (`[^/]*`) para o handler responder 400 em vez do 404 do roteador.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .default_service(web::to(not_found))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .route(
                    "/applications/{id:[^/]*}/delete",
                    web::delete().to(applications::delete_application),
                )
                .service(
                    web::scope("/auth")
                        .route("/profile", web::get().to(auth::get_profile))
                        .route("/update-profile", web::post().to(auth::update_profile)),
                )
                .service(
                    web::scope("/video-sessions")
                        .route(
                            "/meeting/{meeting_id}",
                            web::get().to(video_sessions::get_session_by_meeting_id),
                        )
                        .route(
                            "/meeting/{meeting_id:[^/]*}/status",
                            web::patch().to(video_sessions::update_session_status),
                        )
                        .route(
                            "/{id:[^/]*}",
                            web::delete().to(video_sessions::delete_session),
                        ),
                )
                .route("/rankings", web::get().to(rankings::list_rankings))
                .route("/rankings/{id}/score", web::post().to(rankings::score_ranking)),
        );
}
