use thiserror::Error;

/// An error while acquiring credentials or attaching them to a request.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The token endpoint answered with an OAuth2 error object.
    #[error(
        "the following error was returned when attempting to connect to Gallery: {error}:{description}"
    )]
    Rejected { error: String, description: String },
    /// The token endpoint answered without an error but also without `access_token` and `expires_in`.
    #[error("token response is missing access_token or expires_in")]
    MissingTokenFields,
    /// The token endpoint answered with a non-positive `expires_in`, or one that cannot be
    /// turned into an expiry instant.
    #[error("token response has an invalid expires_in: {0}")]
    InvalidExpiry(i64),
    /// Unable to reach the token endpoint or decode its JSON body.
    #[error("token request error: {0}")]
    Request(
        #[source]
        #[from]
        reqwest::Error,
    ),
    /// The minted token contains characters that are not allowed in an HTTP header.
    #[error("token is not a valid header value: {0}")]
    InvalidToken(
        #[source]
        #[from]
        reqwest::header::InvalidHeaderValue,
    ),
}
