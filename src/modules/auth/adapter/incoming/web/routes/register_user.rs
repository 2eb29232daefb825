use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::routes::{auth_error_response, SessionResponse};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

/// Email and password, used by both registration and login.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct CredentialsRequestDto {
    #[schema(example = "buyer@example.com")]
    pub email: String,

    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Register a new account
///
/// Creates an unactivated user, queues the activation mail and signs the
/// caller in straight away.
#[utoipa::path(
    post,
    path = "/api/user/registration",
    tag = "auth",
    request_body = CredentialsRequestDto,
    responses(
        (status = 201, description = "User registered", body = inline(SuccessResponse<SessionResponse>)),
        (status = 400, description = "Invalid email or empty password", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "CONFLICT",
                    "message": "User with email buyer@example.com already exists"
                }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/user/registration")]
pub async fn register_user_handler(
    req: web::Json<CredentialsRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    match data.user_service.registration(&dto.email, &dto.password).await {
        Ok(session) => {
            info!(user_id = session.user.id, "User registered");
            ApiResponse::created(SessionResponse::from(session))
        }
        Err(e) => {
            warn!(error = %e, "Registration failed");
            auth_error_response(&e)
        }
    }
}
