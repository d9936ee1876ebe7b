use std::time::Duration;

use product_logging::{client_debug, client_info, client_warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use url::Url;

use crate::response::{self, RawResponse};
use crate::{ApiError, ErrorKind, HealthStatus, Product, ProductId, ScrapeRequest};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Root of the API, e.g. `http://127.0.0.1:5000/api`.
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Whole-request deadline. `None` lets slow responses take as long as they need.
    pub request_timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            user_agent: concat!("product_scraper/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ApiConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

#[async_trait::async_trait]
pub trait ProductApi: Send + Sync {
    /// `GET /products`, optionally filtered by `q`. Blank queries are unfiltered.
    async fn list_products(&self, query: Option<&str>) -> Result<Vec<Product>, ApiError>;

    /// `POST /scrape`. An empty URL fails without touching the network.
    async fn scrape(&self, request: &ScrapeRequest) -> Result<Product, ApiError>;

    /// `POST /refetch/{id}`.
    async fn refetch(&self, id: ProductId) -> Result<Product, ApiError>;

    /// `GET /products/{id}`.
    async fn product(&self, id: ProductId) -> Result<Product, ApiError>;

    /// `GET /health`.
    async fn health(&self) -> Result<HealthStatus, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url).map_err(|err| {
            ApiError::new(
                ErrorKind::InvalidRequest,
                format!("invalid base url {base_url:?}: {err}"),
            )
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::new(
                ErrorKind::InvalidRequest,
                format!("base url {base_url:?} cannot carry a path"),
            ));
        }

        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::new(ErrorKind::Transport, err.to_string()))?;

        client_info!("API client ready for {}", base_url);
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let raw = format!("{}/{}", self.base_url, path);
        Url::parse(&raw).map_err(|err| {
            ApiError::new(
                ErrorKind::InvalidRequest,
                format!("invalid endpoint {raw:?}: {err}"),
            )
        })
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<RawResponse, ApiError> {
        let label = format!("{} {}", method, url.path());
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().await.map_err(|err| {
            let err = map_reqwest_error(err);
            client_warn!("{} failed: {}", label, err);
            err
        })?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;
        client_debug!("{} -> {} ({} bytes)", label, status, body.len());
        Ok(RawResponse { status, body })
    }
}

#[async_trait::async_trait]
impl ProductApi for ReqwestApiClient {
    async fn list_products(&self, query: Option<&str>) -> Result<Vec<Product>, ApiError> {
        let mut url = self.endpoint("products")?;
        if let Some(query) = query.filter(|q| !q.trim().is_empty()) {
            url.query_pairs_mut().append_pair("q", query);
        }
        let raw = self.send(Method::GET, url, None).await?;
        response::product_list(&raw)
    }

    async fn scrape(&self, request: &ScrapeRequest) -> Result<Product, ApiError> {
        let url = request.url.trim();
        if url.is_empty() {
            return Err(ApiError::new(ErrorKind::InvalidRequest, "url is required"));
        }
        let request = ScrapeRequest {
            url: url.to_string(),
            force: request.force,
        };
        let body = serde_json::to_vec(&request)
            .map_err(|err| ApiError::new(ErrorKind::InvalidRequest, err.to_string()))?;
        let endpoint = self.endpoint("scrape")?;
        let raw = self.send(Method::POST, endpoint, Some(body)).await?;
        response::scraped_product(&raw)
    }

    async fn refetch(&self, id: ProductId) -> Result<Product, ApiError> {
        let url = self.endpoint(&format!("refetch/{id}"))?;
        let raw = self.send(Method::POST, url, None).await?;
        response::refetched_product(&raw)
    }

    async fn product(&self, id: ProductId) -> Result<Product, ApiError> {
        let url = self.endpoint(&format!("products/{id}"))?;
        let raw = self.send(Method::GET, url, None).await?;
        response::single_product(&raw)
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        let url = self.endpoint("health")?;
        let raw = self.send(Method::GET, url, None).await?;
        response::health(&raw)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ErrorKind::Timeout, err.to_string());
    }
    ApiError::new(ErrorKind::Transport, err.to_string())
}
