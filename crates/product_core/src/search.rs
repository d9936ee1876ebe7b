use std::time::Duration;

/// Quiet period after the last keystroke before a search is issued.
pub const SEARCH_QUIET_INTERVAL: Duration = Duration::from_millis(500);

/// Identifies one scheduled search timer. Tokens are never reused.
pub type TimerToken = u64;

/// A list/search request ready to be sent. `None` means unfiltered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: Option<String>,
}

/// Debounce bookkeeping for the search box.
///
/// The controller only decides *whether* a request goes out; the actual timer
/// lives in the effect runner. Only the most recently issued token is ever
/// honoured, so at most one scheduled search is live at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchController {
    raw_query: String,
    pending: Option<TimerToken>,
    last_token: TimerToken,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    pub fn pending_timer(&self) -> Option<TimerToken> {
        self.pending
    }

    /// Record a keystroke and replace any pending timer with a fresh one.
    pub fn input_changed(&mut self, text: String) -> TimerToken {
        self.raw_query = text;
        self.last_token += 1;
        self.pending = Some(self.last_token);
        self.last_token
    }

    /// A timer elapsed. Returns the request to send if `token` is still the
    /// pending timer; stale or cancelled tokens yield `None`.
    pub fn timer_fired(&mut self, token: TimerToken) -> Option<SearchRequest> {
        if self.pending != Some(token) {
            return None;
        }
        self.pending = None;
        Some(self.current_request())
    }

    /// Drop the pending timer, if any, returning its token.
    pub fn cancel_pending(&mut self) -> Option<TimerToken> {
        self.pending.take()
    }

    pub fn current_request(&self) -> SearchRequest {
        SearchRequest {
            query: query_param(&self.raw_query),
        }
    }
}

fn query_param(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}
