pub use crate::bills::BillsService;
pub use crate::config::{ClientConfig, ClientOption};
pub use crate::envelope::Response;
pub use crate::environment::Environment;
pub use crate::http::{Client, HttpClient, HttpRequest, HttpResponse, Params, ReqwestHttpClient};
pub use crate::responses::*;

pub use tokio_util::sync::CancellationToken;

pub mod bills;
pub mod config;
pub mod envelope;
pub mod environment;
pub mod http;
pub mod responses;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Transport(#[source] BoxError),
    #[error("request cancelled")]
    Cancelled,
    /// The API reported a failure; `message` is `"<status>: <reason>, Body: <body>"`.
    #[error("{message}")]
    Api {
        message: String,
        response: Box<Response>,
    },
    #[error("JSON deserialization failed: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        response: Box<Response>,
    },
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        ClientError::Transport(err.into())
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ClientError::Cancelled)
    }

    /// The envelope the error was classified from, if the exchange completed.
    pub fn response(&self) -> Option<&Response> {
        match self {
            ClientError::Api { response, .. } | ClientError::Decode { response, .. } => {
                Some(response)
            }
            _ => None,
        }
    }

    /// The `{code, description}` payload reported by the API, if any.
    ///
    /// Also set on [`ClientError::Decode`]: the API rejects requests with an
    /// error body on a 200, which then fails to decode as the expected result.
    pub fn api_error(&self) -> Option<&ErrorResponse> {
        self.response().and_then(Response::error)
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
