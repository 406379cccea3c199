use serde::Deserialize;
use thiserror::Error;

use crate::auth::{ClientSecret, Credentials};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid env config: {0}")]
    Env(
        #[source]
        #[from]
        envy::Error,
    ),
}

/// Connection settings for a Gallery instance. Environment variables that are expected to be set
/// are the fields of this struct in all caps prefixed with `GALLERY_`, e.g. `GALLERY_BASE_URL`.
#[derive(Debug, PartialEq, Deserialize)]
pub struct GalleryConfig {
    /// API root defined in the Gallery settings, e.g. `https://{gallery}/webapi`.
    pub base_url: String,
    /// Token endpoint, e.g. `https://{gallery}/webapi/oauth2/token`.
    pub auth_url: String,
    pub client_id: String,
    pub client_secret: ClientSecret,
}

impl GalleryConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(envy::prefixed("GALLERY_").from_env()?)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.client_id.clone(),
            self.client_secret.clone(),
            self.auth_url.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    const VARS: [(&str, &str); 4] = [
        ("GALLERY_BASE_URL", "https://gallery.local/webapi"),
        ("GALLERY_AUTH_URL", "https://gallery.local/webapi/oauth2/token"),
        ("GALLERY_CLIENT_ID", "my-client"),
        ("GALLERY_CLIENT_SECRET", "hunter2"),
    ];

    fn clear_env() {
        for (key, _) in VARS {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_from_env() {
        for (key, value) in VARS {
            std::env::set_var(key, value);
        }

        let config = GalleryConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.base_url, "https://gallery.local/webapi");
        assert_eq!(config.client_secret.expose(), "hunter2");
        assert!(!format!("{:?}", config).contains("hunter2"));

        let credentials = config.credentials();
        assert_eq!(credentials.client_id(), "my-client");
        assert_eq!(
            credentials.token_endpoint(),
            "https://gallery.local/webapi/oauth2/token"
        );
    }

    #[test]
    #[serial]
    fn test_from_env_missing_variable() {
        clear_env();
        std::env::set_var("GALLERY_BASE_URL", "https://gallery.local/webapi");

        let error = GalleryConfig::from_env().unwrap_err();
        clear_env();

        assert!(error.to_string().contains("auth_url"));
    }
}
