use std::sync::{mpsc, Arc};
use std::thread;

use product_client::{ApiError, ClientEvent, ClientHandle, ProductApi, ScrapeRequest};
use product_core::{Effect, Msg, Notification, RequestFailure};
use product_logging::{client_debug, client_info};

/// Executes core effects against the request runner and feeds results back
/// as messages. Notifications go out on their own channel for the UI.
pub struct EffectRunner {
    client: ClientHandle,
    notify_tx: mpsc::Sender<Notification>,
}

impl EffectRunner {
    pub fn new(
        api: Arc<dyn ProductApi>,
        msg_tx: mpsc::Sender<Msg>,
        notify_tx: mpsc::Sender<Notification>,
    ) -> Self {
        let (client, events) = ClientHandle::spawn(api);
        spawn_event_loop(events, msg_tx);
        Self { client, notify_tx }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchProducts { query } => {
                    client_debug!("FetchProducts query={:?}", query);
                    self.client.list_products(query);
                }
                Effect::ScheduleSearch { token, delay } => {
                    self.client.schedule_search(token, delay);
                }
                Effect::CancelScheduledSearch => self.client.cancel_search(),
                Effect::Scrape { url, force } => {
                    client_info!("Scrape url={} force={}", url, force);
                    self.client.scrape(ScrapeRequest { url, force });
                }
                Effect::Refetch { id } => {
                    client_info!("Refetch id={}", id);
                    self.client.refetch(id);
                }
                Effect::LoadProduct { id } => self.client.load_product(id),
                Effect::CheckHealth => self.client.check_health(),
                Effect::Notify(notification) => {
                    let _ = self.notify_tx.send(notification);
                }
            }
        }
    }
}

fn spawn_event_loop(events: mpsc::Receiver<ClientEvent>, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        while let Ok(event) = events.recv() {
            if msg_tx.send(map_event(event)).is_err() {
                break;
            }
        }
    });
}

pub(crate) fn map_event(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::ProductsListed { query, result } => Msg::ProductsLoaded {
            query,
            result: result.map_err(map_failure),
        },
        ClientEvent::Scraped { url, result } => Msg::ScrapeFinished {
            url,
            result: result.map_err(map_failure),
        },
        ClientEvent::Refetched { id, result } => Msg::RefetchFinished {
            id,
            result: result.map_err(map_failure),
        },
        ClientEvent::ProductLoaded { id, result } => Msg::ProductLoaded {
            id,
            result: result.map_err(map_failure),
        },
        ClientEvent::HealthChecked { result } => Msg::HealthChecked {
            result: match result {
                Ok(status) if status.is_ok() => Ok(()),
                Ok(status) => Err(RequestFailure::api(format!(
                    "backend reports status {:?}",
                    status.status
                ))),
                Err(err) => Err(map_failure(err)),
            },
        },
        ClientEvent::SearchTimerFired { token } => Msg::SearchTimerFired { token },
    }
}

fn map_failure(err: ApiError) -> RequestFailure {
    if err.is_transport() {
        RequestFailure::transport(err.message)
    } else {
        RequestFailure::api(err.message)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use product_client::{ErrorKind, HealthStatus, Product, ProductId};
    use product_core::{FailureClass, NotificationLevel};

    use super::*;

    const WAIT: Duration = Duration::from_secs(2);

    struct EmptyApi;

    #[async_trait::async_trait]
    impl ProductApi for EmptyApi {
        async fn list_products(&self, _query: Option<&str>) -> Result<Vec<Product>, ApiError> {
            Ok(Vec::new())
        }

        async fn scrape(&self, _request: &ScrapeRequest) -> Result<Product, ApiError> {
            Err(ApiError::new(ErrorKind::Server, "invalid url"))
        }

        async fn refetch(&self, _id: ProductId) -> Result<Product, ApiError> {
            Err(ApiError::new(ErrorKind::MissingProduct, "response has no product payload"))
        }

        async fn product(&self, _id: ProductId) -> Result<Product, ApiError> {
            Err(ApiError::new(ErrorKind::HttpStatus(404), "http status 404"))
        }

        async fn health(&self) -> Result<HealthStatus, ApiError> {
            Err(ApiError::new(ErrorKind::Transport, "connection refused"))
        }
    }

    #[test]
    fn transport_errors_keep_their_class() {
        let msg = map_event(ClientEvent::HealthChecked {
            result: Err(ApiError::new(ErrorKind::Timeout, "timed out")),
        });
        match msg {
            Msg::HealthChecked { result: Err(failure) } => {
                assert_eq!(failure.class, FailureClass::Transport);
                assert_eq!(failure.message, "timed out");
            }
            other => panic!("unexpected msg {other:?}"),
        }
    }

    #[test]
    fn unhealthy_status_is_api_failure() {
        let msg = map_event(ClientEvent::HealthChecked {
            result: Ok(HealthStatus {
                status: "degraded".to_string(),
                time: None,
            }),
        });
        assert!(matches!(
            msg,
            Msg::HealthChecked { result: Err(RequestFailure { class: FailureClass::Api, .. }) }
        ));
    }

    #[test]
    fn runner_routes_results_and_notifications() {
        let (msg_tx, msg_rx) = mpsc::channel();
        let (notify_tx, notify_rx) = mpsc::channel();
        let runner = EffectRunner::new(Arc::new(EmptyApi), msg_tx, notify_tx);

        runner.enqueue(vec![
            Effect::Scrape {
                url: "http://example.com/p/1".to_string(),
                force: false,
            },
            Effect::Notify(Notification::error("Error: boom")),
        ]);

        let note = notify_rx.recv_timeout(WAIT).expect("notification");
        assert_eq!(note.level, NotificationLevel::Error);
        assert_eq!(note.message, "Error: boom");

        match msg_rx.recv_timeout(WAIT).expect("msg") {
            Msg::ScrapeFinished { url, result } => {
                assert_eq!(url, "http://example.com/p/1");
                assert_eq!(result, Err(RequestFailure::api("invalid url")));
            }
            other => panic!("unexpected msg {other:?}"),
        }
    }
}
