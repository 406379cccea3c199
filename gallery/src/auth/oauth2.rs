use core::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use getset::Getters;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::client::request::ApiRequest;

use super::clock::{Clock, SystemClock};
use super::errors::AuthError;
use super::Authenticator;

const REDACTED: &str = "******";

/// Client secret of a Gallery API profile. Never rendered by [`fmt::Debug`] or [`fmt::Display`].
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ClientSecret(String);

impl ClientSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The raw secret, only meant to be put on the wire.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", REDACTED)
    }
}

impl fmt::Display for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", REDACTED)
    }
}

/// Client credentials of an API enabled Gallery profile.
#[derive(Getters, Debug, Clone)]
pub struct Credentials {
    /// Client id shown in the Gallery profile.
    #[getset(get = "pub")]
    client_id: String,
    /// Client secret shown in the Gallery profile.
    #[getset(get = "pub")]
    client_secret: ClientSecret,
    /// Token endpoint, e.g. `https://{gallery}/webapi/oauth2/token`.
    #[getset(get = "pub")]
    token_endpoint: String,
}

impl Credentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: ClientSecret,
        token_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret,
            token_endpoint: token_endpoint.into(),
        }
    }
}

#[derive(Debug, Clone)]
struct BearerToken {
    /// Full header value, `Bearer <access_token>`.
    value: String,
    expires_at: DateTime<Utc>,
}

impl BearerToken {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<i64>,
    error: Option<String>,
    error_description: Option<String>,
}

/// OAuth 2.0 client credentials authentication against the Gallery token endpoint.
///
/// A bearer token is minted on first use and cached until it expires. Expired tokens
/// are replaced lazily the next time a request is authenticated; there is no background
/// renewal. The check and the mint happen under one lock, so an instance can be shared
/// between tasks without minting twice for the same expiry.
///
/// The [`fmt::Display`] and [`fmt::Debug`] renderings mask the client secret but show
/// the current bearer token and its expiry. Do not log them verbatim in production.
pub struct OAuth2 {
    credentials: Credentials,
    http: reqwest::Client,
    clock: Arc<dyn Clock>,
    token: Mutex<Option<BearerToken>>,
}

impl OAuth2 {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_clock(credentials, Arc::new(SystemClock))
    }

    pub fn with_clock(credentials: Credentials, clock: Arc<dyn Clock>) -> Self {
        Self {
            credentials,
            http: reqwest::Client::new(),
            clock,
            token: Mutex::new(None),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Current bearer token as a full `Authorization` header value, minting a new one
    /// if there is none or the cached one has expired.
    pub async fn bearer_token(&self) -> Result<String, AuthError> {
        self.ensure_valid_token().await
    }

    async fn ensure_valid_token(&self) -> Result<String, AuthError> {
        let mut token = self.token.lock().await;

        match token.as_ref() {
            Some(current) if !current.is_expired(self.clock.now()) => {
                return Ok(current.value.clone())
            }
            Some(_) => tracing::debug!("Bearer token expired"),
            None => tracing::debug!("No bearer token yet"),
        }

        let minted = self.mint_token().await?;
        let value = minted.value.clone();
        *token = Some(minted);

        Ok(value)
    }

    #[tracing::instrument(skip(self), fields(
        client_id = %self.credentials.client_id,
        token_endpoint = %self.credentials.token_endpoint,
    ))]
    async fn mint_token(&self) -> Result<BearerToken, AuthError> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.expose()),
        ];

        let response: TokenResponse = self
            .http
            .post(&self.credentials.token_endpoint)
            .form(&form)
            .send()
            .await?
            .json()
            .await?;

        if let Some(error) = response.error {
            return Err(AuthError::Rejected {
                error,
                description: response.error_description.unwrap_or_default(),
            });
        }

        let (Some(access_token), Some(expires_in)) = (response.access_token, response.expires_in)
        else {
            return Err(AuthError::MissingTokenFields);
        };

        // A lifetime that is already over would hand out an expired token.
        if expires_in <= 0 {
            return Err(AuthError::InvalidExpiry(expires_in));
        }

        let expires_at = TimeDelta::try_seconds(expires_in)
            .and_then(|lifetime| self.clock.now().checked_add_signed(lifetime))
            .ok_or(AuthError::InvalidExpiry(expires_in))?;

        tracing::debug!(%expires_at, "Minted bearer token");

        Ok(BearerToken {
            value: format!("Bearer {}", access_token),
            expires_at,
        })
    }
}

#[async_trait]
impl Authenticator for OAuth2 {
    async fn authenticate(&self, request: &mut ApiRequest) -> Result<(), AuthError> {
        let bearer = self.ensure_valid_token().await?;

        let mut value = HeaderValue::from_str(&bearer)?;
        value.set_sensitive(true);
        request.headers_mut().insert(AUTHORIZATION, value);

        Ok(())
    }
}

impl fmt::Display for OAuth2 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (bearer_token, token_expiration) = match self.token.try_lock() {
            Ok(token) => match token.as_ref() {
                Some(token) => (token.value.clone(), token.expires_at.to_string()),
                None => ("None".to_owned(), "None".to_owned()),
            },
            Err(_) => ("<refreshing>".to_owned(), "<refreshing>".to_owned()),
        };

        write!(
            f,
            "{{client_id: {}, client_secret: {}, gallery_auth_url: {}, bearer_token: {}, token_expiration: {}}}",
            self.credentials.client_id,
            REDACTED,
            self.credentials.token_endpoint,
            bearer_token,
            token_expiration
        )
    }
}

impl fmt::Debug for OAuth2 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut debug = f.debug_struct("OAuth2");
        debug.field("credentials", &self.credentials);

        match self.token.try_lock() {
            Ok(token) => debug.field("token", &*token),
            Err(_) => debug.field("token", &"<refreshing>"),
        };

        debug.finish()
    }
}
