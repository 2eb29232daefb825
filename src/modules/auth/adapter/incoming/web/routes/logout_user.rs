use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::routes::{
    auth_error_response, RefreshTokenRequestDto,
};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct LogoutResponse {
    /// Stored refresh tokens removed; 0 when the token was unknown.
    #[schema(example = 1)]
    pub deleted: u64,
}

/// Logout
///
/// Forgets the given refresh token. Logging out twice is not an error.
#[utoipa::path(
    post,
    path = "/api/user/logout",
    tag = "auth",
    request_body = RefreshTokenRequestDto,
    responses(
        (status = 200, description = "Token removed", body = inline(SuccessResponse<LogoutResponse>)),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/user/logout")]
pub async fn logout_user_handler(
    req: web::Json<RefreshTokenRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.user_service.logout(&req.refresh_token).await {
        Ok(deleted) => {
            info!(deleted, "User logged out");
            ApiResponse::success(LogoutResponse { deleted })
        }
        Err(e) => auth_error_response(&e),
    }
}
