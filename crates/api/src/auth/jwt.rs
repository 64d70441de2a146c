//! JWT access/refresh token issuance and validation.
//!
//! Both tokens are HS256-signed JWTs carrying the same [`Claims`] shape and
//! distinguished by [`TokenKind`]. An access token never passes where a
//! refresh token is expected and vice versa.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tasklane_core::roles::Role;
use tasklane_core::types::{Id, Timestamp};
use uuid::Uuid;

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 60;
/// Default refresh token expiry in days.
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;
/// Longest accepted access token lifetime: one week.
const MAX_ACCESS_EXPIRY_MINS: i64 = 7 * 24 * 60;
/// Longest accepted refresh token lifetime: one year.
const MAX_REFRESH_EXPIRY_DAYS: i64 = 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the member's id.
    pub sub: Id,
    pub role: Role,
    pub kind: TokenKind,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// The token pair handed to clients on join, login, and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenBundle {
    pub access: String,
    pub refresh: String,
    /// When `access` stops being accepted.
    pub expired_at: Timestamp,
    /// When `refresh` stops being accepted.
    pub refreshable_until: Timestamp,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("expected a {expected:?} token, got {found:?}")]
    WrongKind { expected: TokenKind, found: TokenKind },

    #[error("token lifetime does not fit in a timestamp")]
    LifetimeOutOfRange,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in minutes (default: 60).
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in days (default: 7).
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Load JWT configuration through a variable lookup.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `JWT_SECRET`               | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | no       | `60`    |
    /// | `JWT_REFRESH_EXPIRY_DAYS`  | no       | `7`     |
    ///
    /// Lifetimes must be positive: at most a week for access tokens and a
    /// year for refresh tokens.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, crate::config::ConfigError> {
        use crate::config::{parse_in_range, ConfigError};

        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let access_token_expiry_mins = parse_in_range(
            &lookup,
            "JWT_ACCESS_EXPIRY_MINS",
            DEFAULT_ACCESS_EXPIRY_MINS,
            1..=MAX_ACCESS_EXPIRY_MINS,
        )?;
        let refresh_token_expiry_days = parse_in_range(
            &lookup,
            "JWT_REFRESH_EXPIRY_DAYS",
            DEFAULT_REFRESH_EXPIRY_DAYS,
            1..=MAX_REFRESH_EXPIRY_DAYS,
        )?;

        Ok(Self {
            secret,
            access_token_expiry_mins,
            refresh_token_expiry_days,
        })
    }
}

/// Sign a single token of the given kind expiring at `expires_at`.
fn sign(
    member_id: Id,
    role: Role,
    kind: TokenKind,
    expires_at: Timestamp,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: member_id,
        role,
        kind,
        exp: expires_at.timestamp(),
        iat: Utc::now().timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// `now + lifetime`, or an error when either step overflows.
fn expiry(now: Timestamp, lifetime: Option<Duration>) -> Result<Timestamp, TokenError> {
    lifetime
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or(TokenError::LifetimeOutOfRange)
}

/// Issue an access + refresh token pair for the given member.
pub fn issue_token_bundle(
    member_id: Id,
    role: Role,
    config: &JwtConfig,
) -> Result<TokenBundle, TokenError> {
    let now = Utc::now();
    let expired_at = expiry(now, Duration::try_minutes(config.access_token_expiry_mins))?;
    let refreshable_until = expiry(now, Duration::try_days(config.refresh_token_expiry_days))?;

    Ok(TokenBundle {
        access: sign(member_id, role, TokenKind::Access, expired_at, config)?,
        refresh: sign(member_id, role, TokenKind::Refresh, refreshable_until, config)?,
        expired_at,
        refreshable_until,
    })
}

/// Validate and decode a token, requiring it to be of the `expected` kind.
///
/// Signature and expiration are checked by `jsonwebtoken`.
pub fn validate_token(
    token: &str,
    expected: TokenKind,
    config: &JwtConfig,
) -> Result<Claims, TokenError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    let claims = token_data.claims;
    if claims.kind != expected {
        return Err(TokenError::WrongKind {
            expected,
            found: claims.kind,
        });
    }
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::config::ConfigError;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
            refresh_token_expiry_days: 7,
        }
    }

    #[test]
    fn test_bundle_tokens_validate_as_their_kind() {
        let config = test_config();
        let member_id = Id::new_v4();
        let bundle = issue_token_bundle(member_id, Role::Pm, &config).unwrap();

        let access = validate_token(&bundle.access, TokenKind::Access, &config).unwrap();
        assert_eq!(access.sub, member_id);
        assert_eq!(access.role, Role::Pm);
        assert!(access.exp > access.iat);

        let refresh = validate_token(&bundle.refresh, TokenKind::Refresh, &config).unwrap();
        assert_eq!(refresh.sub, member_id);
        assert_ne!(access.jti, refresh.jti);
    }

    #[test]
    fn test_bundle_expiry_windows() {
        let config = test_config();
        let before = Utc::now();
        let bundle = issue_token_bundle(Id::new_v4(), Role::Admin, &config).unwrap();
        let after = Utc::now();

        assert!(bundle.expired_at >= before + Duration::minutes(60));
        assert!(bundle.expired_at <= after + Duration::minutes(60));
        assert!(bundle.refreshable_until >= before + Duration::days(7));
        assert!(bundle.refreshable_until <= after + Duration::days(7));
    }

    #[test]
    fn test_kinds_are_not_interchangeable() {
        let config = test_config();
        let bundle = issue_token_bundle(Id::new_v4(), Role::Developer, &config).unwrap();

        assert_matches!(
            validate_token(&bundle.access, TokenKind::Refresh, &config),
            Err(TokenError::WrongKind {
                expected: TokenKind::Refresh,
                found: TokenKind::Access
            })
        );
        assert_matches!(
            validate_token(&bundle.refresh, TokenKind::Access, &config),
            Err(TokenError::WrongKind { .. })
        );
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();

        // Well beyond the default 60-second leeway.
        let expired_at = Utc::now() - Duration::minutes(5);
        let token = sign(Id::new_v4(), Role::Pm, TokenKind::Access, expired_at, &config)
            .expect("encoding should succeed");

        assert_matches!(
            validate_token(&token, TokenKind::Access, &config),
            Err(TokenError::Jwt(_))
        );
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = test_config();
        let config_b = JwtConfig {
            secret: "secret-bravo".to_string(),
            ..test_config()
        };

        let bundle = issue_token_bundle(Id::new_v4(), Role::Pm, &config_a).unwrap();
        assert!(validate_token(&bundle.access, TokenKind::Access, &config_b).is_err());
    }

    #[test]
    fn test_bundle_serializes_iso_timestamps() {
        let bundle = issue_token_bundle(Id::new_v4(), Role::Pm, &test_config()).unwrap();
        let json = serde_json::to_value(&bundle).unwrap();
        let expired_at = json["expired_at"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(expired_at).is_ok());
    }

    #[test]
    fn test_from_lookup_defaults_and_missing_secret() {
        let config = JwtConfig::from_lookup(|key| match key {
            "JWT_SECRET" => Some("s3cret".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.access_token_expiry_mins, 60);
        assert_eq!(config.refresh_token_expiry_days, 7);

        assert!(JwtConfig::from_lookup(|_| None).is_err());
        assert!(JwtConfig::from_lookup(|key| (key == "JWT_SECRET").then(String::new)).is_err());
    }

    fn lookup_with(key: &'static str, value: String) -> impl Fn(&str) -> Option<String> {
        move |k: &str| match k {
            "JWT_SECRET" => Some("s3cret".to_string()),
            k if k == key => Some(value.clone()),
            _ => None,
        }
    }

    #[test]
    fn test_from_lookup_rejects_out_of_range_lifetimes() {
        let max = i64::MAX.to_string();
        for key in ["JWT_ACCESS_EXPIRY_MINS", "JWT_REFRESH_EXPIRY_DAYS"] {
            for value in ["0", "-5", max.as_str()] {
                assert_matches!(
                    JwtConfig::from_lookup(lookup_with(key, value.to_string())),
                    Err(ConfigError::Invalid { key: k, .. }) if k == key,
                    "{key}={value} should be rejected"
                );
            }
        }
    }

    #[test]
    fn test_from_lookup_accepts_upper_bounds() {
        let config = JwtConfig::from_lookup(lookup_with("JWT_REFRESH_EXPIRY_DAYS", "365".into())).unwrap();
        assert_eq!(config.refresh_token_expiry_days, 365);

        let config = JwtConfig::from_lookup(lookup_with("JWT_ACCESS_EXPIRY_MINS", "10080".into())).unwrap();
        assert_eq!(config.access_token_expiry_mins, 10080);
    }

    #[test]
    fn test_overflowing_lifetime_is_an_error_not_a_panic() {
        let config = JwtConfig {
            refresh_token_expiry_days: i64::MAX,
            ..test_config()
        };
        assert_matches!(
            issue_token_bundle(Id::new_v4(), Role::Pm, &config),
            Err(TokenError::LifetimeOutOfRange)
        );

        let config = JwtConfig {
            access_token_expiry_mins: i64::MAX,
            ..test_config()
        };
        assert_matches!(
            issue_token_bundle(Id::new_v4(), Role::Pm, &config),
            Err(TokenError::LifetimeOutOfRange)
        );
    }
}
