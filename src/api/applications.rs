use actix_web::{web, HttpResponse};
use serde::Serialize;
use crate::database::Store;
use crate::utils::error::{required, AppError, ErrorResponse};

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DeleteApplicationResponse {
    pub success: bool,
}

#[utoipa::path(
    delete,
    path = "/api/applications/{id}/delete",
    tag = "Applications",
    params(("id" = String, Path, description = "Application id")),
    responses(
        (status = 200, description = "Application deleted", body = DeleteApplicationResponse),
        (status = 400, description = "Missing id", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn delete_application(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let application_id = path.into_inner();
    let application_id = required(Some(application_id.as_str()))
        .ok_or_else(|| AppError::InvalidRequest("Application ID is required".to_string()))?;

    log::info!("🗑️  DELETE /applications/{}/delete", application_id);

    store
        .delete_application(application_id)
        .await
        .map_err(AppError::store("Failed to delete application"))?;

    log::info!("✅ Application {} deleted", application_id);

    Ok(HttpResponse::Ok().json(DeleteApplicationResponse { success: true }))
}
