pub mod app_state_builder;
pub mod memory;
pub mod stubs;

use std::sync::Arc;

use crate::modules::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::modules::auth::application::services::TokenService;

use memory::InMemoryTokenRepository;

pub fn load_test_env() {
    dotenvy::from_filename(".env.test").ok();
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        access_secret: "test_access_secret_for_testing_only_0001".to_string(),
        refresh_secret: "test_refresh_secret_for_testing_only_0002".to_string(),
        issuer: "device-shop-test".to_string(),
        access_token_expiry: 3600,
        refresh_token_expiry: 86400,
    }
}

pub fn test_jwt_service() -> JwtTokenService {
    JwtTokenService::new(test_jwt_config())
}

pub fn test_token_service(repository: Arc<InMemoryTokenRepository>) -> TokenService {
    TokenService::new(Arc::new(test_jwt_service()), repository)
}
