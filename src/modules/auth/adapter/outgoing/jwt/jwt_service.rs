use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use std::fmt;
use tracing;

use crate::modules::auth::application::domain::entities::UserDto;
use crate::modules::auth::application::ports::outgoing::{TokenClaims, TokenError, TokenProvider};

use super::jwt_config::JwtConfig;

/// Clock skew tolerated on `exp` and `nbf`, in seconds.
pub const JWT_LEEWAY_SECS: u64 = 30;

#[derive(Clone)]
struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKeys {
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// HS256 signer with one key per token kind.
#[derive(Clone)]
pub struct JwtTokenService {
    config: JwtConfig,
    access: SigningKeys,
    refresh: SigningKeys,
}

#[cfg(not(tarpaulin_include))]
impl fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("issuer", &self.config.issuer)
            .field("access_token_expiry", &self.config.access_token_expiry)
            .field("refresh_token_expiry", &self.config.refresh_token_expiry)
            .finish()
    }
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let access = SigningKeys::from_secret(&config.access_secret);
        let refresh = SigningKeys::from_secret(&config.refresh_secret);

        Self {
            config,
            access,
            refresh,
        }
    }

    fn sign(
        &self,
        user: &UserDto,
        keys: &SigningKeys,
        expiry_seconds: i64,
    ) -> Result<String, TokenError> {
        let claims = TokenClaims::new(user, &self.config.issuer, Utc::now(), expiry_seconds);

        encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding)
            .map_err(|e| TokenError::EncodingError(e.to_string()))
    }

    fn verify(&self, token: &str, keys: &SigningKeys) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = JWT_LEEWAY_SECS;
        validation.validate_nbf = true;
        validation.set_issuer(&[&self.config.issuer]);

        let decoded = decode::<TokenClaims>(token, &keys.decoding, &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;

            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token verification failed: Token expired");
                    TokenError::TokenExpired
                }
                ErrorKind::ImmatureSignature => {
                    tracing::warn!("Token verification failed: Token not yet valid");
                    TokenError::TokenNotYetValid
                }
                ErrorKind::InvalidSignature => {
                    tracing::warn!("Token verification failed: Invalid signature");
                    TokenError::InvalidSignature
                }
                ErrorKind::InvalidToken | ErrorKind::InvalidAlgorithm => {
                    tracing::warn!("Token verification failed: Malformed or wrong algorithm");
                    TokenError::MalformedToken
                }
                ErrorKind::InvalidIssuer => {
                    tracing::warn!("Token verification failed: Unexpected issuer");
                    TokenError::InvalidSignature
                }
                ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
                    tracing::debug!("Token verification failed: Malformed token");
                    TokenError::MalformedToken
                }
                _ => {
                    tracing::warn!(error = %e, "Token verification failed: Unknown error");
                    TokenError::MalformedToken
                }
            }
        })?;

        Ok(decoded.claims)
    }
}

impl TokenProvider for JwtTokenService {
    fn generate_access_token(&self, user: &UserDto) -> Result<String, TokenError> {
        self.sign(user, &self.access, self.config.access_token_expiry)
    }

    fn generate_refresh_token(&self, user: &UserDto) -> Result<String, TokenError> {
        self.sign(user, &self.refresh, self.config.refresh_token_expiry)
    }

    fn verify_access_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.verify(token, &self.access)
    }

    fn verify_refresh_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.verify(token, &self.refresh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::domain::entities::Role;
    use crate::tests::support::{load_test_env, test_jwt_config};

    fn service() -> JwtTokenService {
        JwtTokenService::new(test_jwt_config())
    }

    fn buyer() -> UserDto {
        UserDto {
            id: 11,
            email: "buyer@example.com".to_string(),
            role: Role::User,
        }
    }

    #[test]
    fn test_generate_and_verify_access_token() {
        let service = service();

        let token = service
            .generate_access_token(&buyer())
            .expect("Token should be generated");

        let claims = service.verify_access_token(&token).expect("Token should be valid");
        assert_eq!(claims.id, 11);
        assert_eq!(claims.email, "buyer@example.com");
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims.iss, service.config.issuer);
    }

    #[test]
    fn test_access_and_refresh_use_different_secrets() {
        let service = service();
        let access = service.generate_access_token(&buyer()).unwrap();
        let refresh = service.generate_refresh_token(&buyer()).unwrap();

        assert!(matches!(
            service.verify_refresh_token(&access),
            Err(TokenError::InvalidSignature)
        ));
        assert!(matches!(
            service.verify_access_token(&refresh),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_refresh_token_outlives_access_token() {
        let service = service();
        let access = service.generate_access_token(&buyer()).unwrap();
        let refresh = service.generate_refresh_token(&buyer()).unwrap();

        let access = service.verify_access_token(&access).unwrap();
        let refresh = service.verify_refresh_token(&refresh).unwrap();

        assert_eq!(access.exp - access.iat, service.config.access_token_expiry);
        assert_eq!(refresh.exp - refresh.iat, service.config.refresh_token_expiry);
    }

    #[test]
    fn test_two_tokens_for_same_user_differ() {
        let service = service();
        let first = service.generate_refresh_token(&buyer()).unwrap();
        let second = service.generate_refresh_token(&buyer()).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_invalid_token_verification() {
        let result = service().verify_access_token("invalid.jwt.token");

        assert!(matches!(result, Err(TokenError::MalformedToken)));
    }

    #[test]
    fn test_malformed_token_base64_error() {
        let result = service().verify_refresh_token("not.a.valid@base64.token!");

        assert!(matches!(result, Err(TokenError::MalformedToken)));
    }

    #[test]
    fn test_token_with_invalid_json() {
        use base64::{engine::general_purpose, Engine as _};

        let header = general_purpose::URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = general_purpose::URL_SAFE_NO_PAD.encode("not valid json");
        let crafted = format!("{}.{}.fakesignature", header, payload);

        assert!(service().verify_access_token(&crafted).is_err());
    }

    #[test]
    fn test_expired_token() {
        let mut config = test_jwt_config();
        config.access_token_expiry = -35; // beyond leeway
        let service = JwtTokenService::new(config);

        let token = service.generate_access_token(&buyer()).unwrap();

        assert!(matches!(
            service.verify_access_token(&token),
            Err(TokenError::TokenExpired)
        ));
    }

    #[test]
    fn test_recently_expired_token_is_accepted_within_leeway() {
        let mut config = test_jwt_config();
        config.access_token_expiry = -(JWT_LEEWAY_SECS as i64) + 10;
        config.refresh_token_expiry = -(JWT_LEEWAY_SECS as i64) + 10;
        let service = JwtTokenService::new(config);

        let access = service.generate_access_token(&buyer()).unwrap();
        let refresh = service.generate_refresh_token(&buyer()).unwrap();

        assert!(service.verify_access_token(&access).is_ok());
        assert!(service.verify_refresh_token(&refresh).is_ok());
    }

    #[test]
    fn test_refresh_token_expired_past_leeway() {
        let mut config = test_jwt_config();
        config.refresh_token_expiry = -(JWT_LEEWAY_SECS as i64) - 5;
        let service = JwtTokenService::new(config);

        let token = service.generate_refresh_token(&buyer()).unwrap();

        assert!(matches!(
            service.verify_refresh_token(&token),
            Err(TokenError::TokenExpired)
        ));
    }

    #[test]
    fn test_token_not_yet_valid() {
        let service = service();
        let mut claims = TokenClaims::new(&buyer(), &service.config.issuer, Utc::now(), 3_600);
        claims.nbf += 600;

        let token = encode(&Header::new(Algorithm::HS256), &claims, &service.access.encoding)
            .unwrap();

        assert!(matches!(
            service.verify_access_token(&token),
            Err(TokenError::TokenNotYetValid)
        ));
    }

    #[test]
    fn test_invalid_signature() {
        load_test_env();
        let service = service();
        let token = service.generate_access_token(&buyer()).unwrap();

        let mut other = test_jwt_config();
        other.access_secret = format!("{}_DIFFERENT", other.access_secret);
        let other = JwtTokenService::new(other);

        assert!(matches!(
            other.verify_access_token(&token),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_foreign_issuer_is_rejected() {
        let token = service().generate_access_token(&buyer()).unwrap();

        let mut other = test_jwt_config();
        other.issuer = "somebody-else".to_string();
        let other = JwtTokenService::new(other);

        assert!(other.verify_access_token(&token).is_err());
    }

    #[test]
    fn test_tampered_token_fails() {
        let service = service();
        let mut token = service.generate_refresh_token(&buyer()).unwrap();
        token.push('x');

        assert!(service.verify_refresh_token(&token).is_err());
    }

    #[test]
    fn test_jwt_service_debug_hides_secrets() {
        let service = service();
        let debug_str = format!("{:?}", service);

        assert!(debug_str.contains("JwtTokenService"));
        assert!(!debug_str.contains(&service.config.access_secret));
    }
}
