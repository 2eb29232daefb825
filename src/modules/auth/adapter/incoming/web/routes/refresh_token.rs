use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::routes::{auth_error_response, SessionResponse};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::{debug, info};
use utoipa::ToSchema;

/// Body of the refresh and logout endpoints.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequestDto {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    #[serde(default)]
    pub refresh_token: String,
}

/// Refresh the token pair
///
/// Accepts only the refresh token currently stored for its user. On success
/// that token is replaced, so it cannot be used again.
#[utoipa::path(
    post,
    path = "/api/user/refresh",
    tag = "auth",
    request_body = RefreshTokenRequestDto,
    responses(
        (status = 200, description = "New token pair issued", body = inline(SuccessResponse<SessionResponse>)),
        (status = 401, description = "Token invalid, expired, rotated or logged out", body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "UNAUTHORIZED", "message": "User is not authorized" }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/user/refresh")]
pub async fn refresh_token_handler(
    req: web::Json<RefreshTokenRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.user_service.refresh(&req.refresh_token).await {
        Ok(session) => {
            info!(user_id = session.user.id, "Token pair refreshed");
            ApiResponse::success(SessionResponse::from(session))
        }
        Err(e) => {
            debug!(error = %e, "Refresh refused");
            auth_error_response(&e)
        }
    }
}
