use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use crate::config::AppConfig;
use crate::database::{Store, StoreBackend};

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthEnvironment {
    pub supabase_url: bool,
    pub supabase_service_key: bool,
    pub store_status: String,
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
    pub environment: HealthEnvironment,
    pub missing_env_vars: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up; environment shows store connectivity", body = HealthResponse)
    )
)]
pub async fn health_check(store: web::Data<dyn Store>, config: web::Data<AppConfig>) -> impl Responder {
    let store_status = match (store.backend(), store.ping().await) {
        (StoreBackend::InMemory, _) => "in_memory".to_string(),
        (StoreBackend::Supabase, Ok(())) => "connected".to_string(),
        (StoreBackend::Supabase, Err(e)) => {
            log::warn!("⚠️  Health check: store unreachable: {}", e);
            format!("error: {}", e)
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        environment: HealthEnvironment {
            supabase_url: config.supabase_url.is_some(),
            supabase_service_key: config.supabase_service_key.is_some(),
            store_status,
        },
        missing_env_vars: config
            .missing_store_vars()
            .into_iter()
            .map(String::from)
            .collect(),
    })
}
