use std::path::PathBuf;

use thiserror::Error;

use crate::auth::AuthError;

/// An error while making a request to the Gallery API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Base URL and endpoint path do not form a valid URL.
    #[error("invalid url error: {0}")]
    InvalidUrl(
        #[source]
        #[from]
        url::ParseError,
    ),
    /// Unable to make a request or connection or read the response body.
    #[error("request error: {0}")]
    Request(
        #[source]
        #[from]
        reqwest::Error,
    ),
    /// Unable to attach credentials to the request.
    #[error("authentication error: {0}")]
    Authentication(
        #[source]
        #[from]
        AuthError,
    ),
    /// Request was sent but the server responded with a non 2xx HTTP status code.
    #[error("response {0} error: {1}")]
    ResponseNotOk(u16, String),
    /// Path given for saving a package is not an existing directory.
    #[error("{0} is not a directory")]
    InvalidTargetDirectory(PathBuf),
    /// Error performing file operations.
    #[error("io error: {0}")]
    Io(
        #[source]
        #[from]
        std::io::Error,
    ),
    /// Downloaded package is not a readable zip archive.
    #[error("package archive error: {0}")]
    Archive(
        #[source]
        #[from]
        zip::result::ZipError,
    ),
    /// Operation is part of the API surface but not supported by this client.
    #[error("{0} is not implemented")]
    Unimplemented(&'static str),
}
