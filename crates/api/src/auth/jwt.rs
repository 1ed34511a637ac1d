//! JWT bearer-token generation and validation.
//!
//! Tokens are HS256-signed and carry the caller's already-namespaced
//! permissions (e.g. `"comicat:write"`). The catalog never issues tokens in
//! production; [`generate_token`] exists for tooling and tests.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims embedded in every bearer token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- an opaque caller identifier.
    pub sub: String,
    /// Granted permissions, each `"<namespace>:<capability>"`.
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// Configuration for JWT validation and permission naming.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Prefix applied to capability names (default: `comicat`).
    pub permission_namespace: String,
    /// Lifetime of generated tokens in minutes (default: 60).
    pub token_expiry_mins: i64,
}

/// Default permission namespace.
pub const DEFAULT_PERMISSION_NAMESPACE: &str = "comicat";
/// Default generated-token expiry in minutes.
const DEFAULT_TOKEN_EXPIRY_MINS: i64 = 60;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                | Required | Default   |
    /// |------------------------|----------|-----------|
    /// | `JWT_SECRET`           | **yes**  | --        |
    /// | `PERMISSION_NAMESPACE` | no       | `comicat` |
    /// | `JWT_EXPIRY_MINS`      | no       | `60`      |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let permission_namespace = std::env::var("PERMISSION_NAMESPACE")
            .unwrap_or_else(|_| DEFAULT_PERMISSION_NAMESPACE.to_string());

        let token_expiry_mins: i64 = std::env::var("JWT_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_TOKEN_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_EXPIRY_MINS must be a valid i64");

        Self {
            secret,
            permission_namespace,
            token_expiry_mins,
        }
    }
}

/// Generate an HS256 token granting `permissions` to `subject`.
pub fn generate_token(
    subject: &str,
    permissions: &[&str],
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: subject.to_string(),
        permissions: permissions.iter().map(|p| p.to_string()).collect(),
        exp: now + config.token_expiry_mins * 60,
        iat: now,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".into(),
            permission_namespace: DEFAULT_PERMISSION_NAMESPACE.into(),
            token_expiry_mins: 5,
        }
    }

    #[test]
    fn issued_token_carries_permissions() {
        let token = generate_token("tester", &["comicat:write"], &config()).unwrap();
        let claims = validate_token(&token, &config()).unwrap();
        assert_eq!(claims.sub, "tester");
        assert_eq!(claims.permissions, ["comicat:write"]);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_token("tester", &[], &config()).unwrap();
        let other = JwtConfig {
            secret: "other-secret".into(),
            ..config()
        };
        assert!(validate_token(&token, &other).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let expired = JwtConfig {
            token_expiry_mins: -10,
            ..config()
        };
        let token = generate_token("tester", &[], &expired).unwrap();
        assert!(validate_token(&token, &config()).is_err());
    }
}
