use core::fmt;
use std::collections::BTreeMap;

use getset::Getters;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

/// HTTP methods used by the Gallery API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Put => reqwest::Method::PUT,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Put => write!(f, "PUT"),
            Method::Post => write!(f, "POST"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// Extra headers and query parameters for a single API call.
///
/// ```
/// use gallery::client::request::RequestOptions;
/// use reqwest::header::{HeaderValue, ACCEPT};
///
/// let options = RequestOptions::new()
///     .header(ACCEPT, HeaderValue::from_static("application/json"))
///     .param("format", "Csv");
/// ```
#[derive(Getters, Debug, Clone, Default)]
pub struct RequestOptions {
    #[getset(get = "pub")]
    headers: HeaderMap,
    #[getset(get = "pub")]
    params: BTreeMap<String, String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }
}

/// A pending call to the Gallery API.
///
/// Built fresh for every call, decorated by an [`crate::auth::Authenticator`] and then
/// consumed when it is sent.
#[derive(Getters, Debug)]
pub struct ApiRequest {
    #[getset(get = "pub")]
    method: Method,
    #[getset(get = "pub")]
    url: Url,
    #[getset(get = "pub")]
    headers: HeaderMap,
    #[getset(get = "pub")]
    query: BTreeMap<String, String>,
    #[getset(get = "pub")]
    body: Option<Vec<u8>>,
}

impl ApiRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            query: BTreeMap::new(),
            body: None,
        }
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.headers.extend(options.headers);
        self.query.extend(options.params);
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Turn the request into a wire request for `http` to execute.
    pub(crate) fn prepare(self, http: &reqwest::Client) -> Result<reqwest::Request, reqwest::Error> {
        let mut builder = http.request(self.method.into(), self.url).headers(self.headers);

        if !self.query.is_empty() {
            builder = builder.query(&self.query);
        }

        if let Some(body) = self.body {
            builder = builder.body(body);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::{ACCEPT, CONTENT_TYPE};

    use super::*;

    #[test]
    fn test_prepare() {
        let options = RequestOptions::new()
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .param("page", 2)
            .param("entity", "users");

        let request = ApiRequest::new(
            Method::Post,
            Url::parse("https://gallery.local/webapi/admin/v1/auditlog").unwrap(),
        )
        .with_options(options)
        .with_body(r#"{"a":1}"#);

        assert_eq!(request.query().get("page").map(String::as_str), Some("2"));

        let prepared = request.prepare(&reqwest::Client::new()).unwrap();

        assert_eq!(prepared.method(), &reqwest::Method::POST);
        assert_eq!(
            prepared.url().as_str(),
            "https://gallery.local/webapi/admin/v1/auditlog?entity=users&page=2"
        );
        assert_eq!(prepared.headers().get(ACCEPT).unwrap(), "application/json");
        assert!(prepared.headers().get(CONTENT_TYPE).is_none());
        assert_eq!(
            prepared.body().and_then(|body| body.as_bytes()),
            Some(r#"{"a":1}"#.as_bytes())
        );
    }

    #[test]
    fn test_header_names_are_case_insensitive() {
        let mut request = ApiRequest::new(
            Method::Get,
            Url::parse("https://gallery.local/webapi/v1/jobs/1").unwrap(),
        );

        request.headers_mut().insert(
            HeaderName::from_bytes(b"X-Trace").unwrap(),
            HeaderValue::from_static("one"),
        );
        request.headers_mut().insert(
            HeaderName::from_bytes(b"x-trace").unwrap(),
            HeaderValue::from_static("two"),
        );

        assert_eq!(request.headers().len(), 1);
        assert_eq!(request.headers().get("X-TRACE").unwrap(), "two");
    }
}
