use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::routes::auth_error_response;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, web, Responder};
use serde::Serialize;
use tracing::{info, warn};
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct ActivationResponse {
    #[schema(example = "Account activated")]
    pub message: String,
}

/// Activate an account
///
/// Consumes the link sent by email. Redirects to the storefront when
/// `CLIENT_URL` is configured.
#[utoipa::path(
    get,
    path = "/api/user/activate/{link}",
    tag = "auth",
    params(("link" = String, Path, description = "Activation link from the email")),
    responses(
        (status = 200, description = "Account activated", body = inline(SuccessResponse<ActivationResponse>)),
        (status = 302, description = "Account activated, redirecting to the client"),
        (status = 400, description = "Unknown or already used link", body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "BAD_REQUEST", "message": "Invalid activation link" }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/user/activate/{link}")]
pub async fn activate_user_handler(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let link = path.into_inner();

    match data.user_service.activate(&link).await {
        Ok(()) => {
            info!("Account activated");
            match &data.client_url {
                Some(url) => ApiResponse::redirect(url),
                None => ApiResponse::success(ActivationResponse {
                    message: "Account activated".to_string(),
                }),
            }
        }
        Err(e) => {
            warn!(error = %e, "Activation failed");
            auth_error_response(&e)
        }
    }
}
