use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use crate::database::Store;
use crate::models::{ProfileUpdate, User};
use crate::utils::error::{required, AppError, ErrorResponse};

/// Header com o email do usuário logado (preenchido pelo frontend / proxy de sessão)
pub const USER_EMAIL_HEADER: &str = "x-user-email";

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProfileQuery {
    /// Usado quando o header x-user-email não vem na requisição
    pub email: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProfileResponse {
    pub user: User,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub company_name: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

fn requested_email<'a>(req: &'a HttpRequest, query: &'a ProfileQuery) -> Option<&'a str> {
    let from_header = req
        .headers()
        .get(USER_EMAIL_HEADER)
        .and_then(|value| value.to_str().ok());

    required(from_header).or_else(|| required(query.email.as_deref()))
}

#[utoipa::path(
    get,
    path = "/api/auth/profile",
    tag = "Auth",
    params(
        ("x-user-email" = Option<String>, Header, description = "Email of the current user"),
        ProfileQuery
    ),
    responses(
        (status = 200, description = "User profile", body = ProfileResponse),
        (status = 400, description = "Email is required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_profile(
    store: web::Data<dyn Store>,
    req: HttpRequest,
    query: web::Query<ProfileQuery>,
) -> Result<HttpResponse, AppError> {
    let email = requested_email(&req, &query)
        .ok_or_else(|| AppError::InvalidRequest("Email is required".to_string()))?;

    log::info!("👤 GET /auth/profile - email: {}", email);

    let user = store
        .find_user_by_email(email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ProfileResponse { user }))
}

#[utoipa::path(
    post,
    path = "/api/auth/update-profile",
    tag = "Auth",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = MessageResponse),
        (status = 400, description = "Missing email or name fields", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_profile(
    store: web::Data<dyn Store>,
    request: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let email = required(request.email.as_deref())
        .ok_or_else(|| AppError::InvalidRequest("Email is required".to_string()))?;

    let update = match (
        required(request.firstname.as_deref()),
        required(request.lastname.as_deref()),
        required(request.company_name.as_deref()),
    ) {
        (Some(firstname), Some(lastname), Some(company_name)) => ProfileUpdate {
            firstname: firstname.to_string(),
            lastname: lastname.to_string(),
            company_name: company_name.to_string(),
        },
        _ => {
            return Err(AppError::InvalidRequest(
                "First name, last name, and company name are required".to_string(),
            ))
        }
    };

    log::info!("📝 POST /auth/update-profile - email: {}", email);

    if store.find_user_by_email(email).await?.is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    store.update_user(email, &update).await?;

    log::info!("✅ Profile updated: {}", email);

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Profile updated successfully".to_string(),
    }))
}
