pub mod api;
pub mod health;
pub mod modules;
pub mod shared;

pub use modules::auth;
pub use modules::email;

use actix_web::web;

use crate::auth::application::services::TokenService;
use crate::auth::application::UserService;

#[cfg(test)]
mod tests;

/// Services shared by every worker thread.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    /// Used by the bearer-token extractor.
    pub token_service: TokenService,
    /// Storefront URL the activation route redirects to, when set.
    pub client_url: Option<String>,
}

#[cfg(not(tarpaulin_include))]
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    use crate::auth::adapter::incoming::web::routes;

    // Health
    cfg.service(health::health);
    cfg.service(health::readiness);
    // User
    cfg.service(routes::register_user_handler);
    cfg.service(routes::activate_user_handler);
    cfg.service(routes::login_user_handler);
    cfg.service(routes::logout_user_handler);
    cfg.service(routes::refresh_token_handler);
    cfg.service(routes::list_users_handler);
}
