/// Scrape request captured at submit time; lives until the response resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingScrape {
    pub url: String,
    pub force: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    EmptyUrl,
    AlreadySubmitting,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScrapeForm {
    url: String,
    force: bool,
    in_flight: Option<PendingScrape>,
}

impl ScrapeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn force(&self) -> bool {
        self.force
    }

    pub fn submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<&PendingScrape> {
        self.in_flight.as_ref()
    }

    pub fn set_url(&mut self, url: String) {
        self.url = url;
    }

    pub fn toggle_force(&mut self) {
        self.force = !self.force;
    }

    /// Start a submission. The field keeps its text until the scrape succeeds.
    pub fn begin_submit(&mut self) -> Result<PendingScrape, SubmitRejected> {
        if self.in_flight.is_some() {
            return Err(SubmitRejected::AlreadySubmitting);
        }
        let url = self.url.trim();
        if url.is_empty() {
            return Err(SubmitRejected::EmptyUrl);
        }
        let pending = PendingScrape {
            url: url.to_string(),
            force: self.force,
        };
        self.in_flight = Some(pending.clone());
        Ok(pending)
    }

    /// Settle the in-flight submission. Returns what was pending, if anything.
    pub fn finish(&mut self, succeeded: bool) -> Option<PendingScrape> {
        let pending = self.in_flight.take()?;
        if succeeded {
            self.url.clear();
            self.force = false;
        }
        Some(pending)
    }
}
