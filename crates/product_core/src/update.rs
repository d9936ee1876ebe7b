use product_logging::{client_debug, client_info, client_trace, client_warn};

use crate::{
    AppState, BackendStatus, Effect, Msg, Notification, SubmitRejected, SEARCH_QUIET_INTERVAL,
};

pub const SCRAPE_SUCCESS_MESSAGE: &str = "Scrape success!";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => vec![Effect::CheckHealth, Effect::FetchProducts { query: None }],
        Msg::HealthChecked { result } => match result {
            Ok(()) => {
                state.set_backend(BackendStatus::Online);
                state.mark_dirty();
                Vec::new()
            }
            Err(failure) => {
                state.set_backend(BackendStatus::Unreachable(failure.message.clone()));
                state.mark_dirty();
                vec![Effect::Notify(Notification::error(format!(
                    "Backend unreachable: {}",
                    failure.message
                )))]
            }
        },
        Msg::UrlInputChanged(text) => {
            state.form_mut().set_url(text);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ForceToggled => {
            state.form_mut().toggle_force();
            state.mark_dirty();
            Vec::new()
        }
        Msg::ScrapeSubmitted => match state.form_mut().begin_submit() {
            Ok(pending) => {
                client_info!("Scrape submitted url={} force={}", pending.url, pending.force);
                state.mark_dirty();
                vec![Effect::Scrape {
                    url: pending.url,
                    force: pending.force,
                }]
            }
            Err(SubmitRejected::EmptyUrl) => {
                client_debug!("Scrape ignored: empty url");
                Vec::new()
            }
            Err(SubmitRejected::AlreadySubmitting) => {
                client_debug!("Scrape ignored: submission already in flight");
                Vec::new()
            }
        },
        Msg::ScrapeFinished { url, result } => {
            if !state.form().submitting() {
                client_warn!("Scrape result for {} arrived with no submission pending", url);
                return (state, Vec::new());
            }
            state.mark_dirty();
            match result {
                Ok(product) => {
                    state.form_mut().finish(true);
                    client_info!("Scrape of {} stored product id={}", url, product.id);
                    // Unfiltered: an active search filter is dropped here.
                    vec![
                        Effect::FetchProducts { query: None },
                        Effect::Notify(Notification::success(SCRAPE_SUCCESS_MESSAGE)),
                    ]
                }
                Err(failure) => {
                    state.form_mut().finish(false);
                    client_warn!("Scrape of {} failed: {}", url, failure.message);
                    vec![Effect::Notify(Notification::error(format!(
                        "Error: {}",
                        failure.message
                    )))]
                }
            }
        }
        Msg::SearchInputChanged(text) => {
            let token = state.search_mut().input_changed(text);
            state.mark_dirty();
            vec![Effect::ScheduleSearch {
                token,
                delay: SEARCH_QUIET_INTERVAL,
            }]
        }
        Msg::SearchTimerFired { token } => match state.search_mut().timer_fired(token) {
            Some(request) => {
                state.mark_dirty();
                vec![Effect::FetchProducts {
                    query: request.query,
                }]
            }
            None => {
                client_trace!("Ignoring stale search timer {}", token);
                Vec::new()
            }
        },
        Msg::SearchNowClicked => {
            let mut effects = Vec::with_capacity(2);
            if state.search_mut().cancel_pending().is_some() {
                effects.push(Effect::CancelScheduledSearch);
                state.mark_dirty();
            }
            let request = state.search().current_request();
            effects.push(Effect::FetchProducts {
                query: request.query,
            });
            effects
        }
        Msg::ProductsLoaded { query, result } => match result {
            Ok(products) => {
                client_debug!(
                    "Loaded {} products for query {:?}",
                    products.len(),
                    query
                );
                state.replace_products(products);
                state.mark_dirty();
                Vec::new()
            }
            Err(failure) => {
                client_warn!("Product list for {:?} failed: {}", query, failure.message);
                vec![Effect::Notify(Notification::error(format!(
                    "Error: {}",
                    failure.message
                )))]
            }
        },
        Msg::ProductSelected { id } => {
            if state.select(id) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::RefetchClicked { id } => {
            if !state.contains_product(id) || state.is_reloading(id) || !state.start_refetch(id)
            {
                return (state, Vec::new());
            }
            state.mark_dirty();
            vec![Effect::Refetch { id }]
        }
        Msg::RefetchFinished { id, result } => {
            state.finish_refetch(id);
            state.mark_dirty();
            match result {
                Ok(product) => {
                    if !state.replace_product(id, product) {
                        client_debug!("Refetched product {} is no longer listed", id);
                    }
                    Vec::new()
                }
                Err(failure) => {
                    client_warn!("Refetch of {} failed: {}", id, failure.message);
                    vec![Effect::Notify(Notification::error(format!(
                        "Refetch failed: {}",
                        failure.message
                    )))]
                }
            }
        }
        Msg::ReloadClicked { id } => {
            if !state.contains_product(id) || state.is_refetching(id) || !state.start_reload(id) {
                return (state, Vec::new());
            }
            state.mark_dirty();
            vec![Effect::LoadProduct { id }]
        }
        Msg::ProductLoaded { id, result } => {
            if state.finish_reload(id) {
                state.mark_dirty();
            }
            match result {
                Ok(product) => {
                    if state.replace_product(id, product) {
                        state.mark_dirty();
                    } else {
                        client_debug!("Reloaded product {} is no longer listed", id);
                    }
                    Vec::new()
                }
                Err(failure) => {
                    client_warn!("Reload of {} failed: {}", id, failure.message);
                    vec![Effect::Notify(Notification::error(format!(
                        "Reload failed: {}",
                        failure.message
                    )))]
                }
            }
        }
    };

    (state, effects)
}
