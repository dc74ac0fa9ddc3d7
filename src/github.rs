use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Url;

use crate::Error;
use crate::PageSource;
use crate::RelationEntry;
use crate::RelationKind;
use crate::API_URL;
use crate::PAGE_SIZE;

/// Media type of the GitHub REST api.
const ACCEPT: &str = "application/vnd.github+json";
/// Sent with every request, GitHub rejects requests without one.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// GitHub REST api client serving relation pages.
#[derive(Debug, Clone)]
pub struct GithubClient {
    // api base url
    base: Url,
    // http client with default headers
    http: reqwest::Client,
}

impl GithubClient {
    /// Build a GithubClient.
    ///
    /// See [`ClientBuilder`].
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Get the api base url.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Url of the `kind` relation list of `username`, without paging parameters.
    pub fn endpoint(&self, username: &str, kind: RelationKind) -> Result<Url, Error> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("not a base url: {}", self.base)))?
            .pop_if_empty()
            .extend(["users", username, kind.as_ref()]);
        Ok(url)
    }
}

#[async_trait]
impl PageSource for GithubClient {
    async fn page(
        &self,
        username: &str,
        kind: RelationKind,
        page: u32,
    ) -> Result<Vec<RelationEntry>, Error> {
        let url = self.endpoint(username, kind)?;
        debug!("GET {url} page={page}");

        let res = self
            .http
            .get(url)
            .query(&[("per_page", PAGE_SIZE), ("page", page)])
            .send()
            .await
            .map_err(|error| Error::Http { kind, error })?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::Status { kind, status });
        }

        res.json::<Vec<RelationEntry>>()
            .await
            .map_err(|error| Error::Http { kind, error })
    }
}

/// Builder.
#[derive(Debug, Default)]
pub struct ClientBuilder {
    api_url: Option<String>,
    token: Option<String>,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Setter for the api base url, defaults to [`API_URL`].
    pub fn api_url(&mut self, url: &str) -> &mut Self {
        self.api_url = Some(url.to_string());
        self
    }

    /// Setter for the bearer token.
    pub fn token(&mut self, token: Option<String>) -> &mut Self {
        self.token = token;
        self
    }

    /// Setter for the request timeout.
    pub fn timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = Some(timeout);
        self
    }

    /// Finish building and return a new GithubClient.
    pub fn build(&self) -> Result<GithubClient, Error> {
        let api_url = self.api_url.as_deref().unwrap_or(API_URL);
        let base = Url::parse(api_url).map_err(|e| Error::Config(format!("{api_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(Error::Config(format!("not a base url: {api_url}")));
        }

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
        if let Some(token) = &self.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| Error::Config("invalid characters in token".to_string()))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        let mut http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers);
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        let http = http
            .build()
            .map_err(|e| Error::Config(format!("http client: {e}")))?;

        Ok(GithubClient { base, http })
    }
}
