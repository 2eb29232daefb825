pub mod activate_user;
pub mod list_users;
pub mod login_user;
pub mod logout_user;
pub mod refresh_token;
pub mod register_user;

pub use activate_user::{activate_user_handler, ActivationResponse};
pub use list_users::list_users_handler;
pub use login_user::login_user_handler;
pub use logout_user::{logout_user_handler, LogoutResponse};
pub use refresh_token::{refresh_token_handler, RefreshTokenRequestDto};
pub use register_user::{register_user_handler, CredentialsRequestDto};

use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::modules::auth::application::domain::entities::{AuthSession, UserDto};
use crate::modules::auth::application::errors::AuthError;
use crate::shared::api::ApiResponse;

/// Public user projection.
#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,

    #[schema(example = "buyer@example.com")]
    pub email: String,

    /// `USER` or `ADMIN`
    #[schema(example = "USER")]
    pub role: String,
}

impl From<UserDto> for UserResponse {
    fn from(user: UserDto) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role.to_string(),
        }
    }
}

/// Token pair plus the user it was issued for.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Short-lived access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,

    /// Long-lived refresh token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub refresh_token: String,

    pub user: UserResponse,
}

impl From<AuthSession> for SessionResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            user: session.user.into(),
        }
    }
}

/// Maps a use-case failure onto the response envelope. Internal details stay
/// in the logs.
pub(crate) fn auth_error_response(err: &AuthError) -> HttpResponse {
    let status = match err {
        AuthError::Conflict(_) => StatusCode::CONFLICT,
        AuthError::BadRequest(_) => StatusCode::BAD_REQUEST,
        AuthError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        AuthError::NotFound(_) => StatusCode::NOT_FOUND,
        AuthError::Internal(_) => return ApiResponse::internal_error(),
    };

    ApiResponse::error(status, err.code(), &err.to_string())
}
