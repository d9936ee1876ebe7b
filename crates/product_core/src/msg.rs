use crate::{Product, ProductId, TimerToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// App finished setting up; load the initial list.
    Started,
    /// User edited the scrape URL field.
    UrlInputChanged(String),
    /// User toggled "force re-scrape" for the next submission.
    ForceToggled,
    /// User submitted the scrape form.
    ScrapeSubmitted,
    /// Scrape call resolved.
    ScrapeFinished {
        url: String,
        result: Result<Product, RequestFailure>,
    },
    /// User edited the search box (raw, not debounced).
    SearchInputChanged(String),
    /// A scheduled search timer elapsed.
    SearchTimerFired { token: TimerToken },
    /// User asked to search immediately.
    SearchNowClicked,
    /// List/search call resolved.
    ProductsLoaded {
        query: Option<String>,
        result: Result<Vec<Product>, RequestFailure>,
    },
    /// User moved the card selection.
    ProductSelected { id: ProductId },
    /// User clicked Refetch on a card.
    RefetchClicked { id: ProductId },
    /// Refetch call resolved.
    RefetchFinished {
        id: ProductId,
        result: Result<Product, RequestFailure>,
    },
    /// User asked to reload one card from storage.
    ReloadClicked { id: ProductId },
    /// Single-product lookup resolved.
    ProductLoaded {
        id: ProductId,
        result: Result<Product, RequestFailure>,
    },
    /// Health probe resolved.
    HealthChecked { result: Result<(), RequestFailure> },
}

/// Two-way split of request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// The request never reached the server or the response never arrived.
    Transport,
    /// The server answered, but with an error or an unusable payload.
    Api,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailure {
    pub class: FailureClass,
    pub message: String,
}

impl RequestFailure {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            class: FailureClass::Transport,
            message: message.into(),
        }
    }

    pub fn api(message: impl Into<String>) -> Self {
        Self {
            class: FailureClass::Api,
            message: message.into(),
        }
    }
}
