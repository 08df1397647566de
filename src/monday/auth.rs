//! Credential resolution for the Monday.com API.
//!
//! Two auth provenances are supported: a direct API token and an OAuth
//! access token. Both resolve to the same bearer credential, so everything
//! past this module is auth-method-agnostic.

use crate::types::SourceConfig;

/// Configured auth method, resolved once at stream-list construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    ApiToken,
    OAuth2,
}

/// Bearer token usable to build an `Authorization` header, independent of
/// its original provenance.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerCredential {
    token: String,
}

impl BearerCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl std::fmt::Debug for BearerCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Keep the token out of logs
        f.debug_struct("BearerCredential")
            .field("token", &"***")
            .finish()
    }
}

/// Credential configuration errors. Raised before any network call and
/// never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// `api_token` auth without a token in the credential block or the
    /// legacy top-level field
    MissingApiToken,
    /// `oauth2.0` auth without an access token
    MissingAccessToken,
    /// Unrecognized `auth_method` value
    InvalidMethod(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingApiToken => write!(f, "No api_token in configuration"),
            Self::MissingAccessToken => {
                write!(f, "No access_token in oauth2.0 credentials")
            }
            Self::InvalidMethod(method) => write!(f, "Invalid auth method: {}", method),
        }
    }
}

impl std::error::Error for AuthError {}

/// Resolve the configured credentials to a bearer token.
///
/// Decision order:
/// 1. `auth_method` of `api_token`, or an absent/empty credential block:
///    the token comes from `credentials.api_token`, falling back to the
///    legacy top-level `api_token`.
/// 2. `auth_method` of `oauth2.0`: the token comes from
///    `credentials.access_token`.
/// 3. Anything else fails naming the invalid method.
pub fn resolve_credential(config: &SourceConfig) -> Result<BearerCredential, AuthError> {
    let credentials = config
        .credentials
        .as_ref()
        .filter(|credentials| !credentials.is_empty());

    let method = match credentials {
        None => AuthMethod::ApiToken,
        Some(credentials) => match credentials.auth_method.as_deref() {
            Some("api_token") => AuthMethod::ApiToken,
            Some("oauth2.0") => AuthMethod::OAuth2,
            other => {
                return Err(AuthError::InvalidMethod(
                    other.unwrap_or("none").to_string(),
                ));
            }
        },
    };

    match method {
        AuthMethod::ApiToken => credentials
            .and_then(|credentials| credentials.api_token.clone())
            .or_else(|| config.api_token.clone())
            .map(BearerCredential::new)
            .ok_or(AuthError::MissingApiToken),
        AuthMethod::OAuth2 => credentials
            .and_then(|credentials| credentials.access_token.clone())
            .map(BearerCredential::new)
            .ok_or(AuthError::MissingAccessToken),
    }
}
