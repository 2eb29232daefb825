use crate::api::schemas::{ErrorDetail, ErrorResponse, SuccessResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::modules::auth::adapter::incoming::web::routes::{
    ActivationResponse, CredentialsRequestDto, LogoutResponse, RefreshTokenRequestDto,
    SessionResponse, UserResponse,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Device Shop API",
        version = "1.0.0",
        description = "Accounts, activation and JWT sessions for the device shop backend"
    ),
    paths(
        crate::modules::auth::adapter::incoming::web::routes::register_user::register_user_handler,
        crate::modules::auth::adapter::incoming::web::routes::activate_user::activate_user_handler,
        crate::modules::auth::adapter::incoming::web::routes::login_user::login_user_handler,
        crate::modules::auth::adapter::incoming::web::routes::logout_user::logout_user_handler,
        crate::modules::auth::adapter::incoming::web::routes::refresh_token::refresh_token_handler,
        crate::modules::auth::adapter::incoming::web::routes::list_users::list_users_handler,
    ),
    components(
        schemas(
            SuccessResponse<SessionResponse>,
            ErrorResponse,
            ErrorDetail,
            CredentialsRequestDto,
            RefreshTokenRequestDto,
            SessionResponse,
            UserResponse,
            LogoutResponse,
            ActivationResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, activation and sessions"),
        (name = "users", description = "User administration"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from login, registration or refresh"))
                        .build(),
                ),
            )
        }
    }
}
