use std::{fmt, sync::Arc};

use url::Url;

use crate::{
    environment::Environment,
    http::{HttpClient, ReqwestHttpClient},
};

pub const API_BASE_URL: &str = "https://mobilenig.com/API";

pub const ENV_USERNAME: &str = "MOBILENIG_USERNAME";
pub const ENV_API_KEY: &str = "MOBILENIG_API_KEY";
pub const ENV_ENVIRONMENT: &str = "MOBILENIG_ENVIRONMENT";
pub const ENV_BASE_URL: &str = "MOBILENIG_BASE_URL";

/// Settings a [`Client`](crate::Client) is built from. Immutable once the
/// client exists.
#[derive(Clone)]
pub struct ClientConfig {
    pub(crate) http_client: Arc<dyn HttpClient>,
    pub(crate) environment: Environment,
    pub(crate) base_url: String,
    pub(crate) username: String,
    pub(crate) api_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            http_client: Arc::new(ReqwestHttpClient::default()),
            environment: Environment::Live,
            base_url: API_BASE_URL.to_string(),
            username: String::new(),
            api_key: String::new(),
        }
    }
}

impl ClientConfig {
    /// Applies `options` in order over the defaults.
    pub fn from_options<I>(options: I) -> Self
    where
        I: IntoIterator<Item = ClientOption>,
    {
        let mut config = Self::default();
        for option in options {
            option.apply(&mut config);
        }
        config
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// A single configuration mutator. Options that receive an invalid value
/// leave the config untouched rather than failing.
pub struct ClientOption(Box<dyn FnOnce(&mut ClientConfig) + Send>);

impl ClientOption {
    fn new<F>(apply: F) -> Self
    where
        F: FnOnce(&mut ClientConfig) + Send + 'static,
    {
        Self(Box::new(apply))
    }

    pub fn apply(self, config: &mut ClientConfig) {
        (self.0)(config)
    }
}

impl fmt::Debug for ClientOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientOption")
    }
}

/// Sets the transport used for requests. `None` keeps the current one.
pub fn with_http_client(http_client: Option<Arc<dyn HttpClient>>) -> ClientOption {
    ClientOption::new(move |config| {
        if let Some(http_client) = http_client {
            config.http_client = http_client;
        }
    })
}

/// Shorthand for [`with_http_client`] over a preconfigured `reqwest::Client`.
pub fn with_reqwest_client(client: reqwest::Client) -> ClientOption {
    with_http_client(Some(Arc::new(ReqwestHttpClient::new(client))))
}

/// Sets the environment. Only `"LIVE"` and `"TEST"` are accepted; any other
/// value is ignored.
pub fn with_environment<E: AsRef<str>>(environment: E) -> ClientOption {
    let environment = environment.as_ref().parse::<Environment>().ok();
    ClientOption::new(move |config| {
        if let Some(environment) = environment {
            config.environment = environment;
        }
    })
}

pub fn with_username<S: Into<String>>(username: S) -> ClientOption {
    let username = username.into();
    ClientOption::new(move |config| config.username = username)
}

pub fn with_api_key<S: Into<String>>(api_key: S) -> ClientOption {
    let api_key = api_key.into();
    ClientOption::new(move |config| config.api_key = api_key)
}

/// Overrides the API base URL. `None` keeps the current one.
pub fn with_base_url(base_url: Option<Url>) -> ClientOption {
    ClientOption::new(move |config| {
        if let Some(base_url) = base_url {
            config.base_url = base_url.as_str().trim_end_matches('/').to_string();
        }
    })
}

/// Options read from the `MOBILENIG_*` process environment variables.
pub fn options_from_env() -> Vec<ClientOption> {
    options_from_lookup(|key| std::env::var(key).ok())
}

/// Builds options from `lookup`. Missing keys produce no option and values
/// that fail to parse become no-op options.
pub fn options_from_lookup<F>(lookup: F) -> Vec<ClientOption>
where
    F: Fn(&str) -> Option<String>,
{
    let mut options = Vec::new();
    if let Some(username) = lookup(ENV_USERNAME) {
        options.push(with_username(username));
    }
    if let Some(api_key) = lookup(ENV_API_KEY) {
        options.push(with_api_key(api_key));
    }
    if let Some(environment) = lookup(ENV_ENVIRONMENT) {
        options.push(with_environment(environment));
    }
    if let Some(base_url) = lookup(ENV_BASE_URL) {
        options.push(with_base_url(Url::parse(&base_url).ok()));
    }
    options
}
