use core::fmt;
use std::sync::Arc;

use reqwest::Response;
use url::Url;

use crate::auth::Authenticator;

use super::errors::ClientError;
use super::request::{ApiRequest, Method, RequestOptions};

/// Shared plumbing behind every endpoint wrapper: joins the endpoint path onto the
/// base URL, authenticates the request and sends it.
#[derive(Clone)]
pub struct Dispatcher {
    base_url: String,
    authenticator: Arc<dyn Authenticator>,
    http: reqwest::Client,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Join `base_url` and `endpoint` with exactly one `/` between them.
fn get_abs_url(base_url: &str, endpoint: &str) -> Result<Url, ClientError> {
    let joined = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    );

    Ok(Url::parse(&joined)?)
}

impl Dispatcher {
    /// `base_url` is the API root configured in the Gallery settings, e.g. `https://{gallery}/webapi`.
    pub fn new(base_url: impl Into<String>, authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            base_url: base_url.into(),
            authenticator,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build, authenticate and send a request. The response is returned as is, whatever its status.
    #[tracing::instrument(skip(self, options, body))]
    pub async fn send(
        &self,
        method: Method,
        endpoint: &str,
        options: RequestOptions,
        body: Option<Vec<u8>>,
    ) -> Result<Response, ClientError> {
        let url = get_abs_url(&self.base_url, endpoint)?;

        let mut request = ApiRequest::new(method, url).with_options(options);

        if let Some(body) = body {
            request = request.with_body(body);
        }

        self.authenticator.authenticate(&mut request).await?;

        let prepared = request.prepare(&self.http)?;

        tracing::debug!(url = %prepared.url(), "Sending request");

        Ok(self.http.execute(prepared).await?)
    }

    pub async fn get(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Response, ClientError> {
        self.send(Method::Get, endpoint, options, None).await
    }
}

/// Turn a non 2xx response into [`ClientError::ResponseNotOk`] carrying the response body.
pub async fn check_status(response: Response) -> Result<Response, ClientError> {
    let response_status = response.status();

    if !response_status.is_success() {
        return Err(ClientError::ResponseNotOk(
            response_status.as_u16(),
            response.text().await?,
        ));
    }

    Ok(response)
}
