//! Verification of session tokens issued by the external identity provider.
//!
//! The provider signs short-lived JWTs for signed-in users. This module only
//! verifies them; issuing, refreshing and revoking sessions stay with the
//! provider. Two key types are supported:
//!
//! - RS256 with the provider's PEM-encoded public key (hosted providers)
//! - HS256 with a shared secret (self-hosted setups and tests)

use std::fmt;

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::config::{parse_var, ConfigError};

/// Clock skew tolerated when checking `exp`, in seconds.
const DEFAULT_LEEWAY_SECS: u64 = 60;

/// Claims the server relies on. Providers add more; they are ignored.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the provider's user id.
    pub sub: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Issuer, checked when [`JwtConfig::issuer`] is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Key material used to check token signatures.
#[derive(Clone)]
pub enum TokenKey {
    /// HS256 shared secret.
    Hmac(String),
    /// RS256 public key in PEM form.
    RsaPem(String),
}

impl TokenKey {
    fn algorithm(&self) -> Algorithm {
        match self {
            TokenKey::Hmac(_) => Algorithm::HS256,
            TokenKey::RsaPem(_) => Algorithm::RS256,
        }
    }

    fn decoding_key(&self) -> Result<DecodingKey, jsonwebtoken::errors::Error> {
        match self {
            TokenKey::Hmac(secret) => Ok(DecodingKey::from_secret(secret.as_bytes())),
            TokenKey::RsaPem(pem) => DecodingKey::from_rsa_pem(pem.as_bytes()),
        }
    }
}

impl fmt::Debug for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKey::Hmac(_) => f.write_str("Hmac(<redacted>)"),
            TokenKey::RsaPem(_) => f.write_str("RsaPem(..)"),
        }
    }
}

/// Configuration for token validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub key: TokenKey,
    /// Expected `iss` claim. Unchecked when `None`.
    pub issuer: Option<String>,
    pub leeway_secs: u64,
}

impl JwtConfig {
    pub fn hmac(secret: impl Into<String>) -> Self {
        Self {
            key: TokenKey::Hmac(secret.into()),
            issuer: None,
            leeway_secs: DEFAULT_LEEWAY_SECS,
        }
    }

    /// Load token settings.
    ///
    /// | Env Var                | Required | Default |
    /// |------------------------|----------|---------|
    /// | `AUTH_JWT_PUBLIC_KEY`  | no       | --      |
    /// | `AUTH_JWT_SECRET`      | no       | --      |
    /// | `AUTH_JWT_ISSUER`      | no       | --      |
    /// | `AUTH_JWT_LEEWAY_SECS` | no       | `60`    |
    ///
    /// The public key wins when both keys are set. Literal `\n` sequences in
    /// the PEM are unescaped so the key fits in a single-line variable.
    /// Returns `Ok(None)` when no key is configured.
    pub fn from_lookup(
        lookup: &impl Fn(&str) -> Option<String>,
    ) -> Result<Option<Self>, ConfigError> {
        let non_empty = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let key = if let Some(pem) = non_empty("AUTH_JWT_PUBLIC_KEY") {
            let pem = pem.replace("\\n", "\n");
            DecodingKey::from_rsa_pem(pem.as_bytes()).map_err(|e| ConfigError::Invalid {
                var: "AUTH_JWT_PUBLIC_KEY",
                reason: e.to_string(),
            })?;
            TokenKey::RsaPem(pem)
        } else if let Some(secret) = non_empty("AUTH_JWT_SECRET") {
            TokenKey::Hmac(secret)
        } else {
            return Ok(None);
        };

        Ok(Some(Self {
            key,
            issuer: non_empty("AUTH_JWT_ISSUER"),
            leeway_secs: parse_var(lookup, "AUTH_JWT_LEEWAY_SECS", DEFAULT_LEEWAY_SECS)?,
        }))
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.key.algorithm());
        validation.leeway = self.leeway_secs;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);
        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer]);
        }
        validation
    }
}

/// Validate and decode a session token, returning the embedded [`Claims`].
///
/// Checks the signature, expiration and (when configured) issuer.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = config.key.decoding_key()?;
    let token_data = decode::<Claims>(token, &key, &config.validation())?;
    Ok(token_data.claims)
}
