pub mod domain;
pub mod errors;
pub mod ports;
pub mod services;
pub mod use_cases;
pub mod user_service;

pub use errors::AuthError;
pub use user_service::{UserService, UserServiceDeps};
