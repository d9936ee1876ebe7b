use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use product_core::TimerToken;
use product_logging::{client_debug, client_error};

use crate::{ClientEvent, DebounceTimer, ProductApi, ProductId, ScrapeRequest};

enum ClientCommand {
    Call(ApiCall),
    ScheduleSearch { token: TimerToken, delay: Duration },
    CancelSearch,
}

enum ApiCall {
    ListProducts { query: Option<String> },
    Scrape { request: ScrapeRequest },
    Refetch { id: ProductId },
    LoadProduct { id: ProductId },
    CheckHealth,
}

/// Handle to the background request runner.
///
/// The runner owns a tokio runtime on its own thread. API calls run
/// concurrently and are never cancelled; the search timer is the only
/// cancellable piece. Results come back on the receiver returned by
/// [`ClientHandle::spawn`]. The runner stops once every handle is dropped.
#[derive(Clone)]
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
}

impl ClientHandle {
    pub fn spawn(api: Arc<dyn ProductApi>) -> (Self, mpsc::Receiver<ClientEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    client_error!("Failed to start request runtime: {}", err);
                    return;
                }
            };
            let mut search_timer = DebounceTimer::new(runtime.handle().clone());

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    ClientCommand::ScheduleSearch { token, delay } => {
                        client_debug!("Search timer {} scheduled in {:?}", token, delay);
                        let event_tx = event_tx.clone();
                        search_timer.schedule(delay, move || {
                            let _ = event_tx.send(ClientEvent::SearchTimerFired { token });
                        });
                    }
                    ClientCommand::CancelSearch => {
                        if search_timer.cancel() {
                            client_debug!("Pending search timer cancelled");
                        }
                    }
                    ClientCommand::Call(call) => {
                        let api = api.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let event = execute(api.as_ref(), call).await;
                            let _ = event_tx.send(event);
                        });
                    }
                }
            }
        });

        (Self { cmd_tx }, event_rx)
    }

    pub fn list_products(&self, query: Option<String>) {
        self.send(ClientCommand::Call(ApiCall::ListProducts { query }));
    }

    pub fn scrape(&self, request: ScrapeRequest) {
        self.send(ClientCommand::Call(ApiCall::Scrape { request }));
    }

    pub fn refetch(&self, id: ProductId) {
        self.send(ClientCommand::Call(ApiCall::Refetch { id }));
    }

    pub fn load_product(&self, id: ProductId) {
        self.send(ClientCommand::Call(ApiCall::LoadProduct { id }));
    }

    pub fn check_health(&self) {
        self.send(ClientCommand::Call(ApiCall::CheckHealth));
    }

    /// Replace any pending search timer with one firing after `delay`.
    pub fn schedule_search(&self, token: TimerToken, delay: Duration) {
        self.send(ClientCommand::ScheduleSearch { token, delay });
    }

    pub fn cancel_search(&self) {
        self.send(ClientCommand::CancelSearch);
    }

    fn send(&self, command: ClientCommand) {
        if self.cmd_tx.send(command).is_err() {
            client_error!("Request runner has stopped; command dropped");
        }
    }
}

async fn execute(api: &dyn ProductApi, call: ApiCall) -> ClientEvent {
    match call {
        ApiCall::ListProducts { query } => {
            let result = api.list_products(query.as_deref()).await;
            ClientEvent::ProductsListed { query, result }
        }
        ApiCall::Scrape { request } => {
            let result = api.scrape(&request).await;
            ClientEvent::Scraped {
                url: request.url,
                result,
            }
        }
        ApiCall::Refetch { id } => ClientEvent::Refetched {
            id,
            result: api.refetch(id).await,
        },
        ApiCall::LoadProduct { id } => ClientEvent::ProductLoaded {
            id,
            result: api.product(id).await,
        },
        ApiCall::CheckHealth => ClientEvent::HealthChecked {
            result: api.health().await,
        },
    }
}
