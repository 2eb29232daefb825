use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::routes::{
    auth_error_response, CredentialsRequestDto, SessionResponse,
};
use crate::modules::auth::application::errors::AuthError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use tracing::warn;

/// User login
///
/// Authenticates with email and password and returns a fresh token pair.
/// Any refresh token issued earlier for the same user stops working.
#[utoipa::path(
    post,
    path = "/api/user/login",
    tag = "auth",
    request_body = CredentialsRequestDto,
    responses(
        (status = 200, description = "Login successful", body = inline(SuccessResponse<SessionResponse>)),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Wrong password", body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "UNAUTHORIZED", "message": "Invalid password" }
            })
        ),
        (status = 404, description = "Unknown email", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/user/login")]
pub async fn login_user_handler(
    req: web::Json<CredentialsRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    match data.user_service.login(&dto.email, &dto.password).await {
        Ok(session) => ApiResponse::success(SessionResponse::from(session)),
        Err(e @ (AuthError::Unauthorized(_) | AuthError::NotFound(_))) => {
            warn!(email = %dto.email.trim(), error = %e, "Login rejected");
            auth_error_response(&e)
        }
        Err(e) => auth_error_response(&e),
    }
}
