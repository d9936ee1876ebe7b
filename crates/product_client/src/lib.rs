//! Product scraper client: HTTP API access and request execution.
mod api;
mod debounce;
mod engine;
mod response;
mod types;

pub use api::{ApiConfig, ProductApi, ReqwestApiClient, DEFAULT_BASE_URL};
pub use debounce::DebounceTimer;
pub use engine::ClientHandle;
pub use product_core::{Product, ProductId};
pub use types::{ApiError, ClientEvent, ErrorKind, HealthStatus, ScrapeRequest};
