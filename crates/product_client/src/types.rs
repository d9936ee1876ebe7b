use std::fmt;

use serde::{Deserialize, Serialize};

use product_core::TimerToken;

use crate::{Product, ProductId};

/// Events reported by the request runner back to the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    ProductsListed {
        query: Option<String>,
        result: Result<Vec<Product>, ApiError>,
    },
    Scraped {
        url: String,
        result: Result<Product, ApiError>,
    },
    Refetched {
        id: ProductId,
        result: Result<Product, ApiError>,
    },
    ProductLoaded {
        id: ProductId,
        result: Result<Product, ApiError>,
    },
    HealthChecked {
        result: Result<HealthStatus, ApiError>,
    },
    SearchTimerFired {
        token: TimerToken,
    },
}

/// Body of `POST /scrape`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeRequest {
    pub url: String,
    /// Bypass the backend's freshness window. Omitted from the body when false.
    #[serde(skip_serializing_if = "is_false")]
    pub force: bool,
}

impl ScrapeRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            force: false,
        }
    }

    pub fn forced(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            force: true,
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub time: Option<String>,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn is_transport(&self) -> bool {
        self.kind.is_transport()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connection, DNS or body-read failure.
    Transport,
    Timeout,
    /// The response body carried an `error` field.
    Server,
    HttpStatus(u16),
    MalformedBody,
    MissingProduct,
    /// Rejected before any request was made.
    InvalidRequest,
}

impl ErrorKind {
    /// Transport-class failures never got an answer from the server.
    pub fn is_transport(&self) -> bool {
        matches!(self, ErrorKind::Transport | ErrorKind::Timeout)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Transport => write!(f, "transport error"),
            ErrorKind::Timeout => write!(f, "timeout"),
            ErrorKind::Server => write!(f, "server error"),
            ErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            ErrorKind::MalformedBody => write!(f, "malformed response body"),
            ErrorKind::MissingProduct => write!(f, "missing product payload"),
            ErrorKind::InvalidRequest => write!(f, "invalid request"),
        }
    }
}
