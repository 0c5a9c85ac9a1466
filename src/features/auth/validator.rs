use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;

/// Validates bearer tokens issued by the external identity provider.
///
/// Tokens are HS256-signed with a shared secret. Account provisioning and
/// session management live with the identity provider; this service only
/// decodes the claims it needs for authorization.
pub struct JwtValidator {
    decoding_key: DecodingKey,
    leeway: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: u64,
    #[serde(default)]
    pub iat: u64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub is_staff: bool,
}

impl JwtValidator {
    pub fn new(secret: &str, leeway: Duration) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            leeway: leeway.as_secs(),
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Auth(e.to_string()))?;

        let claims = token_data.claims;

        Ok(AuthenticatedUser {
            sub: claims.sub,
            username: claims.username,
            is_superuser: claims.is_superuser,
            is_staff: claims.is_staff,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn issue(secret: &str, claims: &Claims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims_for(sub: &str) -> Claims {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        Claims {
            sub: sub.to_string(),
            exp: now + 3600,
            iat: now,
            username: Some("alice".to_string()),
            is_superuser: false,
            is_staff: true,
        }
    }

    #[test]
    fn valid_token_decodes_to_user() {
        let validator = JwtValidator::new("secret", Duration::from_secs(60));
        let token = issue("secret", &claims_for("user-42"));

        let user = validator.validate_token(&token).unwrap();
        assert_eq!(user.sub, "user-42");
        assert_eq!(user.username.as_deref(), Some("alice"));
        assert!(user.is_staff);
        assert!(!user.is_superuser);
        assert!(user.is_admin());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let validator = JwtValidator::new("secret", Duration::from_secs(60));
        let token = issue("other-secret", &claims_for("user-42"));

        assert!(matches!(
            validator.validate_token(&token),
            Err(AppError::Auth(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let validator = JwtValidator::new("secret", Duration::from_secs(0));
        let mut claims = claims_for("user-42");
        claims.exp = claims.iat.saturating_sub(7200);
        let token = issue("secret", &claims);

        assert!(validator.validate_token(&token).is_err());
    }
}
