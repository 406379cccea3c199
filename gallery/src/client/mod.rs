//! Request plumbing and endpoint wrappers for the Gallery API.

use std::sync::Arc;

use crate::auth::Authenticator;

pub mod admin;
pub mod dispatch;
pub mod errors;
pub mod jobs;
pub mod package;
pub mod request;
pub mod workflows;

pub use admin::Admin;
pub use dispatch::Dispatcher;
pub use errors::ClientError;
pub use jobs::Jobs;
pub use request::{Method, RequestOptions};
pub use workflows::Workflows;

/// Entry point bundling the endpoint wrappers around one shared authenticator.
#[derive(Debug, Clone)]
pub struct Gallery {
    dispatcher: Dispatcher,
}

impl Gallery {
    pub fn new(base_url: impl Into<String>, authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            dispatcher: Dispatcher::new(base_url, authenticator),
        }
    }

    pub fn base_url(&self) -> &str {
        self.dispatcher.base_url()
    }

    pub fn admin(&self) -> Admin {
        Admin::new(self.dispatcher.clone())
    }

    pub fn jobs(&self) -> Jobs {
        Jobs::new(self.dispatcher.clone())
    }

    pub fn workflows(&self) -> Workflows {
        Workflows::new(self.dispatcher.clone())
    }
}
