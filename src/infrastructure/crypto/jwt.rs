//! JWT token handling
//!
//! Tokens are signed with HMAC-SHA256 and carry the username as
//! subject, a unique token id and one entry per role. Expiry is
//! enforced by signature/time check only; there is no revocation list.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Fixed token validity window.
pub const TOKEN_LIFETIME_HOURS: i64 = 3;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Symmetric secret for signing tokens
    pub secret: String,
    /// Issuer claim
    pub issuer: String,
    /// Audience claim
    pub audience: String,
}

/// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (username)
    pub sub: String,
    /// Unique token id
    pub jti: String,
    /// Role names held at issue time
    pub roles: Vec<String>,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl TokenClaims {
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Admin policy: membership in "SuperUser" or "Admin".
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == "SuperUser" || r == "Admin")
    }
}

/// A signed token together with its expiry timestamp.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Create a signed JWT for the given user and role set, valid for
/// [`TOKEN_LIFETIME_HOURS`] from now.
pub fn create_token(
    username: &str,
    roles: Vec<String>,
    config: &JwtConfig,
) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(TOKEN_LIFETIME_HOURS);

    let claims = TokenClaims {
        sub: username.to_string(),
        jti: uuid::Uuid::new_v4().to_string(),
        roles,
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(IssuedToken { token, expires_at })
}

/// Verify and decode a JWT token
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);
    validation.set_audience(&[&config.audience]);

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-test-secret-test-secret".to_string(),
            issuer: "identity-service".to_string(),
            audience: "identity-spa".to_string(),
        }
    }

    #[test]
    fn test_create_and_verify_token() {
        let config = config();
        let issued = create_token(
            "alice",
            vec!["Admin".to_string(), "SuperUser".to_string()],
            &config,
        )
        .unwrap();

        let claims = verify_token(&issued.token, &config).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.roles, vec!["Admin", "SuperUser"]);
        assert_eq!(claims.iss, "identity-service");
        assert!(!claims.is_expired());
        assert!(claims.is_admin());
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_expiry_is_exactly_three_hours() {
        let issued = create_token("alice", vec![], &config()).unwrap();
        let claims = verify_token(&issued.token, &config()).unwrap();
        assert_eq!(claims.exp - claims.iat, TOKEN_LIFETIME_HOURS * 3600);
        assert_eq!(issued.expires_at.timestamp(), claims.exp);
    }

    #[test]
    fn test_token_ids_are_unique() {
        let config = config();
        let a = create_token("alice", vec![], &config).unwrap();
        let b = create_token("alice", vec![], &config).unwrap();
        let ca = verify_token(&a.token, &config).unwrap();
        let cb = verify_token(&b.token, &config).unwrap();
        assert_ne!(ca.jti, cb.jti);
    }

    #[test]
    fn test_invalid_token() {
        let result = verify_token("invalid-token", &config());
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issued = create_token("alice", vec![], &config()).unwrap();
        let other = JwtConfig {
            secret: "another-secret-entirely".to_string(),
            ..config()
        };
        assert!(verify_token(&issued.token, &other).is_err());
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let issued = create_token("alice", vec![], &config()).unwrap();
        let other = JwtConfig {
            audience: "some-other-app".to_string(),
            ..config()
        };
        assert!(verify_token(&issued.token, &other).is_err());
    }

    #[test]
    fn test_non_admin_roles() {
        let issued = create_token("bob", vec!["Member".to_string()], &config()).unwrap();
        let claims = verify_token(&issued.token, &config()).unwrap();
        assert!(!claims.is_admin());
    }
}
