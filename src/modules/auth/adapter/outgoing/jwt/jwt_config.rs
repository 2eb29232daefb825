use std::env;

const MIN_SECRET_LEN: usize = 32;
const MAX_ACCESS_EXPIRY: i64 = 86_400;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JwtConfigError {
    #[error("{0} must be set")]
    MissingSecret(&'static str),

    #[error("{0} must be at least 32 characters long for HS256")]
    SecretTooShort(&'static str),

    #[error("JWT_ACCESS_SECRET and JWT_REFRESH_SECRET must differ")]
    SecretsNotDistinct,

    #[error("Invalid {key} value: {value}")]
    InvalidExpiry { key: &'static str, value: String },

    #[error("JWT_ACCESS_EXPIRY must be between 1 and 86400 seconds")]
    AccessExpiryOutOfRange,

    #[error("JWT_REFRESH_EXPIRY must be greater than JWT_ACCESS_EXPIRY")]
    RefreshExpiryTooShort,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub issuer: String,
    pub access_token_expiry: i64,  // seconds
    pub refresh_token_expiry: i64, // seconds
}

impl JwtConfig {
    fn secret(key: &'static str) -> Result<String, JwtConfigError> {
        let value = env::var(key).map_err(|_| JwtConfigError::MissingSecret(key))?;
        if value.len() < MIN_SECRET_LEN {
            return Err(JwtConfigError::SecretTooShort(key));
        }
        Ok(value)
    }

    fn parse_expiry(key: &'static str, default: i64) -> Result<i64, JwtConfigError> {
        match env::var(key) {
            Ok(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| JwtConfigError::InvalidExpiry { key, value: raw }),
            Err(_) => Ok(default),
        }
    }

    /// Load JWT configuration from environment variables.
    pub fn from_env() -> Result<Self, JwtConfigError> {
        let config = Self {
            access_secret: Self::secret("JWT_ACCESS_SECRET")?,
            refresh_secret: Self::secret("JWT_REFRESH_SECRET")?,
            issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "device-shop".to_string()),
            access_token_expiry: Self::parse_expiry("JWT_ACCESS_EXPIRY", 1_800)?,
            refresh_token_expiry: Self::parse_expiry("JWT_REFRESH_EXPIRY", 2_592_000)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), JwtConfigError> {
        if self.access_secret == self.refresh_secret {
            return Err(JwtConfigError::SecretsNotDistinct);
        }
        if self.access_token_expiry <= 0 || self.access_token_expiry > MAX_ACCESS_EXPIRY {
            return Err(JwtConfigError::AccessExpiryOutOfRange);
        }
        if self.refresh_token_expiry <= self.access_token_expiry {
            return Err(JwtConfigError::RefreshExpiryTooShort);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            access_secret: "a".repeat(32),
            refresh_secret: "r".repeat(32),
            issuer: "test".to_string(),
            access_token_expiry: 1_800,
            refresh_token_expiry: 2_592_000,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert_eq!(config().validate(), Ok(()));
    }

    #[test]
    fn test_identical_secrets_are_rejected() {
        let mut cfg = config();
        cfg.refresh_secret = cfg.access_secret.clone();
        assert_eq!(cfg.validate(), Err(JwtConfigError::SecretsNotDistinct));
    }

    #[test]
    fn test_expiry_bounds() {
        let mut cfg = config();
        cfg.access_token_expiry = 0;
        assert_eq!(cfg.validate(), Err(JwtConfigError::AccessExpiryOutOfRange));

        cfg.access_token_expiry = 86_401;
        assert_eq!(cfg.validate(), Err(JwtConfigError::AccessExpiryOutOfRange));

        cfg.access_token_expiry = 3_600;
        cfg.refresh_token_expiry = 3_600;
        assert_eq!(cfg.validate(), Err(JwtConfigError::RefreshExpiryTooShort));
    }
}
