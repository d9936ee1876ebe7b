//! Product scraper core: pure state machine and view-model helpers.
mod effect;
mod form;
mod msg;
mod product;
mod search;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, Notification, NotificationLevel};
pub use form::{PendingScrape, ScrapeForm, SubmitRejected};
pub use msg::{FailureClass, Msg, RequestFailure};
pub use product::{parse_timestamp, Product, ProductId};
pub use search::{SearchController, SearchRequest, TimerToken, SEARCH_QUIET_INTERVAL};
pub use state::{AppState, BackendStatus};
pub use update::{update, SCRAPE_SUCCESS_MESSAGE};
pub use view_model::{
    AppViewModel, ProductCardView, ScrapeFormView, SearchView, EMPTY_LIST_MESSAGE,
    MISSING_FIELD, NO_DESCRIPTION, NO_TITLE, SOURCE_LINK_LABEL, UNKNOWN_TIMESTAMP,
};
