use std::{collections::BTreeMap, sync::Arc};

use futures::future::BoxFuture;
use reqwest::Method;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::{
    bills::BillsService,
    config::{ClientConfig, ClientOption},
    envelope::Response,
    environment::Environment,
    ClientError, Result,
};

/// Extra query parameters for a request, keyed uniquely.
pub type Params<'a> = BTreeMap<&'a str, String>;

const PARAM_USERNAME: &str = "username";
const PARAM_API_KEY: &str = "api_key";

/// Transport seam. Implementations must be safe to share across concurrent
/// calls and must read the whole body before resolving.
pub trait HttpClient: Send + Sync {
    fn execute(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse>>;
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Default transport backed by a `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse>> {
        Box::pin(async move {
            let response = self
                .client
                .request(request.method, request.url)
                .send()
                .await
                .map_err(ClientError::transport)?;
            let status = response.status().as_u16();
            // `bytes` consumes the response, so the connection is released
            // here or when this future is dropped mid-read.
            let body = response.bytes().await.map_err(ClientError::transport)?;
            Ok(HttpResponse {
                status,
                body: body.to_vec(),
            })
        })
    }
}

/// MobileNig API client. Cheap to clone; clones share one configuration.
#[derive(Debug, Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
}

impl Default for Client {
    fn default() -> Self {
        Self::from_config(ClientConfig::default())
    }
}

impl Client {
    pub fn new<I>(options: I) -> Self
    where
        I: IntoIterator<Item = ClientOption>,
    {
        Self::from_config(ClientConfig::from_options(options))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn environment(&self) -> Environment {
        self.config.environment
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// DStv bill operations.
    pub fn bills(&self) -> BillsService<'_> {
        BillsService::new(self)
    }

    /// Builds an authenticated GET request for `base_url + path`.
    ///
    /// `username` and `api_key` are always sent, even when empty, and cannot
    /// be overridden through `params`.
    pub fn new_request(&self, path: &str, params: &Params<'_>) -> Result<HttpRequest> {
        let mut query = format!(
            "{}={}&{}={}",
            PARAM_USERNAME,
            urlencoding::encode(&self.config.username),
            PARAM_API_KEY,
            urlencoding::encode(&self.config.api_key)
        );
        for (key, value) in params {
            if *key == PARAM_USERNAME || *key == PARAM_API_KEY {
                continue;
            }
            query.push_str(&format!(
                "&{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            ));
        }

        let endpoint = format!("{}{}", self.config.base_url, path);
        let url = Url::parse(&format!("{}?{}", endpoint, query))
            .map_err(|err| ClientError::InvalidUrl(format!("{}: {}", endpoint, err)))?;

        Ok(HttpRequest {
            method: Method::GET,
            url,
        })
    }

    /// Performs one round trip against `path` and classifies the outcome.
    ///
    /// The returned envelope is already known to be successful; API failures
    /// come back as [`ClientError::Api`] with the envelope attached.
    pub async fn execute(
        &self,
        cancel: &CancellationToken,
        path: &str,
        params: &Params<'_>,
    ) -> Result<Response> {
        if cancel.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        let request = self.new_request(path, params)?;
        debug!(path, environment = %self.config.environment, "dispatching request");

        let response = self.send(cancel, request).await?;
        debug!(
            path,
            status = response.status(),
            body_len = response.body().len(),
            "response received"
        );

        response.into_result()
    }

    /// Runs `request` on the configured transport, racing it against `cancel`.
    async fn send(&self, cancel: &CancellationToken, request: HttpRequest) -> Result<Response> {
        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("request cancelled");
                return Err(ClientError::Cancelled);
            }
            response = self.config.http_client.execute(request) => response?,
        };

        Ok(Response::new(response.status, response.body))
    }
}
