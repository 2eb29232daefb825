use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use std::future::{ready, Ready};

use crate::modules::auth::application::domain::entities::{Role, UserDto};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Caller identified by a valid access token in `Authorization: Bearer`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: UserDto,
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = match req.app_data::<web::Data<AppState>>() {
            Some(state) => state,
            None => {
                tracing::error!("AppState missing from request; cannot authenticate");
                return ready(Err(create_api_error(ApiResponse::internal_error())));
            }
        };

        let token = match extract_token_from_header(req) {
            Some(t) => t,
            None => {
                return ready(Err(create_api_error(ApiResponse::unauthorized(
                    "MISSING_AUTH_HEADER",
                    "Missing or invalid authorization header",
                ))));
            }
        };

        match state.token_service.validate_access_token(token) {
            Some(claims) => ready(Ok(AuthenticatedUser {
                user: claims.user(),
            })),
            None => ready(Err(create_api_error(ApiResponse::unauthorized(
                "INVALID_TOKEN",
                "Invalid or expired token",
            )))),
        }
    }
}

/// Authenticated caller holding the `ADMIN` role.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub user: UserDto,
}

impl FromRequest for AdminUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        match AuthenticatedUser::from_request(req, payload).into_inner() {
            Ok(AuthenticatedUser { user }) if user.role == Role::Admin => {
                ready(Ok(AdminUser { user }))
            }
            Ok(AuthenticatedUser { user }) => {
                tracing::warn!(user_id = user.id, role = %user.role, "Admin route refused");
                ready(Err(create_api_error(ApiResponse::forbidden(
                    "FORBIDDEN",
                    "Administrator role required",
                ))))
            }
            Err(e) => ready(Err(e)),
        }
    }
}

fn extract_token_from_header(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
