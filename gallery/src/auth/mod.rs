//! Authentication schemes used to decorate outgoing Gallery requests.
//!
//! Every scheme implements [`Authenticator`]. Today the only scheme is
//! [`OAuth2`], the client-credentials grant used by Gallery API profiles.

use async_trait::async_trait;

use crate::client::request::ApiRequest;

pub mod clock;
pub mod errors;
pub mod oauth2;

pub use errors::AuthError;
pub use oauth2::{ClientSecret, Credentials, OAuth2};

/// Attaches credential material to a request.
///
/// Implementations may only touch the headers of the request. Any error is
/// specific to the scheme and is returned before the request is modified.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, request: &mut ApiRequest) -> Result<(), AuthError>;
}
