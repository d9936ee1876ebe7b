use std::collections::BTreeSet;

use product_logging::client_warn;

use crate::view_model::{AppViewModel, ProductCardView, ScrapeFormView, SearchView};
use crate::{Product, ProductId, ScrapeForm, SearchController, EMPTY_LIST_MESSAGE};

/// Last known reachability of the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BackendStatus {
    #[default]
    Unknown,
    Online,
    Unreachable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    form: ScrapeForm,
    search: SearchController,
    products: Vec<Product>,
    refetching: BTreeSet<ProductId>,
    reloading: BTreeSet<ProductId>,
    selected: Option<ProductId>,
    backend: BackendStatus,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let cards = self
            .products
            .iter()
            .map(|product| {
                ProductCardView::from_product(
                    product,
                    self.refetching.contains(&product.id),
                    self.reloading.contains(&product.id),
                    self.selected == Some(product.id),
                )
            })
            .collect::<Vec<_>>();
        let empty_message = cards.is_empty().then_some(EMPTY_LIST_MESSAGE);

        AppViewModel {
            form: ScrapeFormView::from_form(&self.form),
            search: SearchView {
                query: self.search.raw_query().to_string(),
                pending: self.search.pending_timer().is_some(),
            },
            cards,
            empty_message,
            selected: self.selected,
            backend: self.backend.clone(),
            dirty: self.dirty,
        }
    }

    pub fn form(&self) -> &ScrapeForm {
        &self.form
    }

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn selected(&self) -> Option<ProductId> {
        self.selected
    }

    pub fn is_refetching(&self, id: ProductId) -> bool {
        self.refetching.contains(&id)
    }

    pub fn is_reloading(&self, id: ProductId) -> bool {
        self.reloading.contains(&id)
    }

    pub fn backend(&self) -> &BackendStatus {
        &self.backend
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn form_mut(&mut self) -> &mut ScrapeForm {
        &mut self.form
    }

    pub(crate) fn search_mut(&mut self) -> &mut SearchController {
        &mut self.search
    }

    pub(crate) fn set_backend(&mut self, backend: BackendStatus) {
        self.backend = backend;
    }

    pub(crate) fn contains_product(&self, id: ProductId) -> bool {
        self.products.iter().any(|p| p.id == id)
    }

    /// Replace the whole collection, keeping the selection when its id survives.
    pub(crate) fn replace_products(&mut self, products: Vec<Product>) {
        let mut seen = BTreeSet::new();
        if let Some(dup) = products.iter().find(|p| !seen.insert(p.id)) {
            client_warn!("Product list contains duplicate id {}", dup.id);
        }
        self.products = products;
        let keep_selection = self
            .selected
            .is_some_and(|id| self.contains_product(id));
        if !keep_selection {
            self.selected = self.products.first().map(|p| p.id);
        }
    }

    /// Swap in a refreshed product at the position of `id`. Returns false when
    /// the id is no longer in the collection.
    pub(crate) fn replace_product(&mut self, id: ProductId, product: Product) -> bool {
        match self.products.iter_mut().find(|p| p.id == id) {
            Some(slot) => {
                *slot = product;
                true
            }
            None => false,
        }
    }

    pub(crate) fn select(&mut self, id: ProductId) -> bool {
        if self.selected == Some(id) || !self.contains_product(id) {
            return false;
        }
        self.selected = Some(id);
        true
    }

    /// Mark a card as refetching. Returns false if it already was.
    pub(crate) fn start_refetch(&mut self, id: ProductId) -> bool {
        self.refetching.insert(id)
    }

    pub(crate) fn finish_refetch(&mut self, id: ProductId) -> bool {
        self.refetching.remove(&id)
    }

    /// Mark a card as reloading. Returns false if it already was.
    pub(crate) fn start_reload(&mut self, id: ProductId) -> bool {
        self.reloading.insert(id)
    }

    pub(crate) fn finish_reload(&mut self, id: ProductId) -> bool {
        self.reloading.remove(&id)
    }
}
