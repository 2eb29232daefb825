use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AdminUser;
use crate::modules::auth::adapter::incoming::web::routes::{auth_error_response, UserResponse};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, web, Responder};
use tracing::debug;

/// List users
///
/// Every registered user ordered by id. Requires an `ADMIN` access token.
#[utoipa::path(
    get,
    path = "/api/user/users",
    tag = "users",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "All users", body = inline(SuccessResponse<Vec<UserResponse>>)),
        (status = 401, description = "Missing, invalid or expired access token", body = ErrorResponse),
        (status = 403, description = "Caller is not an administrator", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/user/users")]
pub async fn list_users_handler(admin: AdminUser, data: web::Data<AppState>) -> impl Responder {
    match data.user_service.get_all_users().await {
        Ok(users) => {
            debug!(admin_id = admin.user.id, count = users.len(), "Listed users");
            ApiResponse::success(
                users
                    .into_iter()
                    .map(UserResponse::from)
                    .collect::<Vec<_>>(),
            )
        }
        Err(e) => auth_error_response(&e),
    }
}
