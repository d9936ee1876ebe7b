use chrono::NaiveDateTime;

use crate::{BackendStatus, Product, ProductId, ScrapeForm};

pub const EMPTY_LIST_MESSAGE: &str = "No products yet. Scrape a URL to add one.";
pub const NO_TITLE: &str = "No title";
pub const NO_DESCRIPTION: &str = "No description";
pub const MISSING_FIELD: &str = "—";
pub const UNKNOWN_TIMESTAMP: &str = "unknown";
pub const SOURCE_LINK_LABEL: &str = "Open Source URL";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub form: ScrapeFormView,
    pub search: SearchView,
    pub cards: Vec<ProductCardView>,
    /// Set only when there are no cards to show.
    pub empty_message: Option<&'static str>,
    pub selected: Option<ProductId>,
    pub backend: BackendStatus,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn card(&self, id: ProductId) -> Option<&ProductCardView> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selected?;
        self.cards.iter().position(|card| card.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScrapeFormView {
    pub url: String,
    pub force: bool,
    pub submitting: bool,
    pub button_label: &'static str,
}

impl ScrapeFormView {
    pub(crate) fn from_form(form: &ScrapeForm) -> Self {
        Self {
            url: form.url().to_string(),
            force: form.force(),
            submitting: form.submitting(),
            button_label: if form.submitting() {
                "Scraping..."
            } else {
                "Scrape & Save"
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchView {
    pub query: String,
    /// A debounced search is scheduled but has not fired yet.
    pub pending: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub id: ProductId,
    pub title: String,
    pub price: String,
    pub category: String,
    pub description: String,
    pub updated: String,
    pub source_label: &'static str,
    pub source_url: String,
    pub refetching: bool,
    pub refetch_label: &'static str,
    /// A reload from storage is in flight.
    pub reloading: bool,
    pub selected: bool,
}

impl ProductCardView {
    pub fn from_product(
        product: &Product,
        refetching: bool,
        reloading: bool,
        selected: bool,
    ) -> Self {
        Self {
            id: product.id,
            title: or_placeholder(product.title.as_deref(), NO_TITLE),
            price: or_placeholder(product.price.as_deref(), MISSING_FIELD),
            category: or_placeholder(product.category.as_deref(), MISSING_FIELD),
            description: or_placeholder(product.description.as_deref(), NO_DESCRIPTION),
            updated: format_timestamp(product.updated_at),
            source_label: SOURCE_LINK_LABEL,
            source_url: product.url.clone(),
            refetching,
            refetch_label: if refetching { "Refetching..." } else { "Refetch" },
            reloading,
            selected,
        }
    }
}

fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => placeholder.to_string(),
    }
}

fn format_timestamp(value: Option<NaiveDateTime>) -> String {
    value
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| UNKNOWN_TIMESTAMP.to_string())
}
