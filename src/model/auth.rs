use crate::constants::{ENV_COMPANY_DOMAIN, ENV_COMPANY_ID, ENV_PASSWORD, ENV_USER};
use crate::error::{AppError, Result};
use crate::utils::config::get_env_or_none;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Locations checked, in order, for the session token in a login response
pub const TOKEN_POINTERS: [&str; 4] = ["/api_token", "/token", "/data/api_token", "/data/token"];

/// Complete credentials for the authenticate endpoint
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Login user
    pub user: String,
    /// Login password
    pub password: String,
    /// Numeric company identifier
    pub company_id: i64,
    /// Company domain (subdomain on the vendor side)
    pub company_domain: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .field("company_id", &self.company_id)
            .field("company_domain", &self.company_domain)
            .finish()
    }
}

/// Credentials supplied by the caller, any of which may be missing
///
/// Missing fields are filled from `THREEC_USER`, `THREEC_PASSWORD`,
/// `THREEC_COMPANY_ID` and `THREEC_COMPANY_DOMAIN` when resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PartialCredentials {
    /// Login user
    pub user: Option<String>,
    /// Login password
    pub password: Option<String>,
    /// Company id
    pub company_id: Option<i64>,
    /// Company domain
    pub company_domain: Option<String>,
}

impl PartialCredentials {
    /// All four fields given explicitly
    pub fn new(
        user: impl Into<String>,
        password: impl Into<String>,
        company_id: i64,
        company_domain: impl Into<String>,
    ) -> Self {
        Self {
            user: Some(user.into()),
            password: Some(password.into()),
            company_id: Some(company_id),
            company_domain: Some(company_domain.into()),
        }
    }

    /// Nothing given; everything comes from the environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Sets the user
    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Sets the password
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the company id
    #[must_use]
    pub fn company_id(mut self, company_id: i64) -> Self {
        self.company_id = Some(company_id);
        self
    }

    /// Sets the company domain
    #[must_use]
    pub fn company_domain(mut self, company_domain: impl Into<String>) -> Self {
        self.company_domain = Some(company_domain.into());
        self
    }

    /// Fills the gaps from the environment and validates the result.
    ///
    /// Explicit values win field by field. Empty strings count as absent and
    /// a company id that does not parse as an integer counts as absent.
    ///
    /// # Errors
    /// `AppError::InputInvalid` when any field is still missing.
    pub fn resolve(self) -> Result<Credentials> {
        self.resolve_with(|key| get_env_or_none::<String>(key))
    }

    /// Same as [`resolve`](Self::resolve) with a custom variable lookup.
    pub fn resolve_with<F>(self, lookup: F) -> Result<Credentials>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fallback = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let user = non_empty(self.user).or_else(|| fallback(ENV_USER));
        let password = non_empty(self.password).or_else(|| fallback(ENV_PASSWORD));
        let company_id = self.company_id.or_else(|| {
            fallback(ENV_COMPANY_ID).and_then(|raw| raw.trim().parse::<i64>().ok())
        });
        let company_domain =
            non_empty(self.company_domain).or_else(|| fallback(ENV_COMPANY_DOMAIN));

        match (user, password, company_id, company_domain) {
            (Some(user), Some(password), Some(company_id), Some(company_domain)) => {
                Ok(Credentials {
                    user,
                    password,
                    company_id,
                    company_domain,
                })
            }
            _ => Err(AppError::InputInvalid(
                "incomplete credentials: pass them explicitly or set THREEC_USER, \
                 THREEC_PASSWORD, THREEC_COMPANY_ID and THREEC_COMPANY_DOMAIN"
                    .to_string(),
            )),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Finds the session token in a login response body.
///
/// Checks [`TOKEN_POINTERS`] in order; the first non-empty string wins.
#[must_use]
pub fn extract_token(body: &Value) -> Option<String> {
    TOKEN_POINTERS
        .iter()
        .find_map(|pointer| {
            body.pointer(pointer)
                .and_then(Value::as_str)
                .filter(|token| !token.is_empty())
        })
        .map(str::to_string)
}

/// Best human-readable explanation in an error body: `message`, then `error`, then raw text
#[must_use]
pub fn error_message(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body).into_owned();
    match serde_json::from_slice::<Value>(body) {
        Ok(json) => ["message", "error"]
            .iter()
            .find_map(|key| {
                json.get(key)
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or(text),
        Err(_) => text,
    }
}
