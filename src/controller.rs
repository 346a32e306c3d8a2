//! Search controller: owns the query, loading flag and result list, and
//! wires the debounced query to catalog requests running on worker threads.
//!
//! Each dispatch carries a sequence number. Only the response for the most
//! recent dispatch is applied; anything older is dropped, so a slow response
//! for an earlier query can never overwrite newer results.

use crate::catalog::{Catalog, Product, SearchResponse};
use crate::debounce::Debounce;
use crate::error::Result;
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Messages from request threads
#[derive(Debug)]
pub struct FetchMessage {
    pub seq: u64,
    pub query: String,
    pub outcome: Result<SearchResponse>,
}

pub struct SearchController {
    catalog: Arc<dyn Catalog>,

    // State
    query: String,
    is_loading: bool,
    results: Vec<Product>,
    total: Option<u64>,
    results_generation: u64,

    debounce: Debounce<String>,

    // Latest dispatched (or cleared) request
    latest_seq: u64,
    requests_sent: u64,

    // Channel
    tx: Sender<FetchMessage>,
    rx: Receiver<FetchMessage>,
}

/// What the debounced effect decided to do
enum Settled {
    Search(String),
    Clear,
}

impl SearchController {
    pub fn new(catalog: Arc<dyn Catalog>, delay: Duration, now: Instant) -> Self {
        let (tx, rx) = unbounded();
        Self {
            catalog,
            query: String::new(),
            is_loading: false,
            results: Vec::new(),
            total: None,
            results_generation: 0,
            debounce: Debounce::new(String::new(), delay, now),
            latest_seq: 0,
            requests_sent: 0,
            tx,
            rx,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn results(&self) -> &[Product] {
        &self.results
    }

    /// Total hits reported by the API for the current results
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Bumped whenever the result list is replaced or cleared
    pub fn results_generation(&self) -> u64 {
        self.results_generation
    }

    /// Number of requests dispatched so far
    pub fn requests_sent(&self) -> u64 {
        self.requests_sent
    }

    pub fn delay(&self) -> Duration {
        self.debounce.delay()
    }

    /// Change handler for the input: store the query and restart the delay
    pub fn set_query(&mut self, query: impl Into<String>, now: Instant) {
        self.query = query.into();
        self.debounce.update(self.query.clone(), now);
    }

    /// Time until the debounced effect is due, for sizing the event poll
    pub fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        self.debounce.time_until_due(now)
    }

    /// Run the debounced effect if its delay has elapsed
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut settled = None;
        self.debounce.fire_if_due(now, |q| settled = Some(Self::settle(q)));
        self.apply_settled(settled)
    }

    /// Run a pending debounced effect right away
    pub fn flush(&mut self) -> bool {
        let mut settled = None;
        self.debounce.flush(|q| settled = Some(Self::settle(q)));
        self.apply_settled(settled)
    }

    fn settle(query: &str) -> Settled {
        if query.is_empty() {
            Settled::Clear
        } else {
            Settled::Search(query.to_string())
        }
    }

    fn apply_settled(&mut self, settled: Option<Settled>) -> bool {
        match settled {
            Some(Settled::Search(query)) => {
                self.dispatch(query);
                true
            }
            Some(Settled::Clear) => {
                self.clear_results();
                true
            }
            None => false,
        }
    }

    fn clear_results(&mut self) {
        // Invalidate anything still in flight
        self.latest_seq += 1;
        self.is_loading = false;
        if !self.results.is_empty() || self.total.is_some() {
            self.results.clear();
            self.total = None;
            self.results_generation += 1;
        }
    }

    fn dispatch(&mut self, query: String) {
        self.latest_seq += 1;
        self.requests_sent += 1;
        self.is_loading = true;

        let seq = self.latest_seq;
        let catalog = Arc::clone(&self.catalog);
        let tx = self.tx.clone();

        tracing::info!(target: "search", seq, query = %query, "dispatching search");

        thread::spawn(move || {
            let outcome = catalog.search(&query);
            let _ = tx.send(FetchMessage {
                seq,
                query,
                outcome,
            });
        });
    }

    /// Apply any finished requests without blocking
    pub fn process_messages(&mut self) -> bool {
        let mut changed = false;
        while let Ok(msg) = self.rx.try_recv() {
            changed |= self.apply(msg);
        }
        changed
    }

    /// Block until the current request settles or `timeout` passes.
    /// Returns `true` if nothing is loading afterwards.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        self.process_messages();
        while self.is_loading {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(msg) => {
                    self.apply(msg);
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        !self.is_loading
    }

    fn apply(&mut self, msg: FetchMessage) -> bool {
        if msg.seq != self.latest_seq {
            tracing::debug!(
                target: "search",
                seq = msg.seq,
                latest = self.latest_seq,
                query = %msg.query,
                "discarding stale response"
            );
            return false;
        }

        self.is_loading = false;

        match msg.outcome {
            Ok(response) => {
                tracing::info!(
                    target: "search",
                    seq = msg.seq,
                    query = %msg.query,
                    hits = response.products.len(),
                    "search complete"
                );
                self.results = response.products;
                self.total = response.total;
                self.results_generation += 1;
            }
            Err(e) if e.is_fetch_failure() => {
                tracing::warn!(
                    target: "search",
                    seq = msg.seq,
                    query = %msg.query,
                    kind = e.kind(),
                    error = %e,
                    "failed to fetch"
                );
            }
            Err(e) => {
                tracing::error!(
                    target: "search",
                    seq = msg.seq,
                    query = %msg.query,
                    kind = e.kind(),
                    error = %e,
                    "search failed"
                );
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use std::sync::Mutex;

    const DELAY: Duration = Duration::from_millis(1000);
    const WAIT: Duration = Duration::from_secs(5);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn product(id: u64, title: &str) -> Product {
        Product {
            id,
            title: title.into(),
            description: format!("about {}", title),
            thumbnail: format!("{}.jpg", id),
        }
    }

    /// Answers every query with one product titled after it
    #[derive(Default)]
    struct EchoCatalog {
        calls: Mutex<Vec<String>>,
    }

    impl Catalog for EchoCatalog {
        fn search(&self, query: &str) -> Result<SearchResponse> {
            self.calls.lock().unwrap().push(query.to_string());
            Ok(SearchResponse {
                products: vec![product(1, query)],
                total: Some(1),
            })
        }
    }

    struct FailingCatalog;

    impl Catalog for FailingCatalog {
        fn search(&self, _query: &str) -> Result<SearchResponse> {
            Err(SearchError::Parse(
                serde_json::from_str::<SearchResponse>("{}").unwrap_err(),
            ))
        }
    }

    #[test]
    fn mount_with_empty_query_sends_nothing() {
        let catalog = Arc::new(EchoCatalog::default());
        let t0 = Instant::now();
        let mut c = SearchController::new(catalog.clone(), DELAY, t0);

        assert!(c.tick(t0 + DELAY));
        assert!(catalog.calls.lock().unwrap().is_empty());
        assert!(c.results().is_empty());
        assert!(!c.is_loading());
    }

    #[test]
    fn rapid_edits_send_one_request() {
        let catalog = Arc::new(EchoCatalog::default());
        let t0 = Instant::now();
        let mut c = SearchController::new(catalog.clone(), DELAY, t0);

        c.set_query("p", t0);
        c.set_query("ph", t0 + ms(200));
        assert!(!c.tick(t0 + ms(1100)));
        assert!(c.tick(t0 + ms(1200)));
        assert!(c.is_loading());

        assert!(c.wait_idle(WAIT));
        assert_eq!(*catalog.calls.lock().unwrap(), vec!["ph".to_string()]);
        assert_eq!(c.results()[0].title, "ph");
        assert_eq!(c.total(), Some(1));
        assert_eq!(c.requests_sent(), 1);
    }

    #[test]
    fn empty_query_clears_after_delay() {
        let catalog = Arc::new(EchoCatalog::default());
        let t0 = Instant::now();
        let mut c = SearchController::new(catalog.clone(), DELAY, t0);

        c.set_query("phone", t0);
        c.tick(t0 + DELAY);
        c.wait_idle(WAIT);
        assert_eq!(c.results().len(), 1);

        let t1 = t0 + ms(2000);
        c.set_query("", t1);
        // Not cleared until the delay elapses
        c.tick(t1 + ms(500));
        assert_eq!(c.results().len(), 1);

        c.tick(t1 + DELAY);
        assert!(c.results().is_empty());
        assert_eq!(catalog.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn failure_keeps_previous_results() {
        let t0 = Instant::now();
        let mut c = SearchController::new(Arc::new(FailingCatalog), DELAY, t0);
        c.results = vec![product(7, "kept")];

        c.set_query("x", t0);
        c.tick(t0 + DELAY);
        assert!(c.is_loading());
        assert!(c.wait_idle(WAIT));

        assert!(!c.is_loading());
        assert_eq!(c.results(), &[product(7, "kept")]);
    }

    struct BrokenCatalog;

    impl Catalog for BrokenCatalog {
        fn search(&self, _query: &str) -> Result<SearchResponse> {
            Err(SearchError::Io(std::io::Error::other("disk gone")))
        }
    }

    #[test]
    fn non_fetch_error_also_settles() {
        let t0 = Instant::now();
        let mut c = SearchController::new(Arc::new(BrokenCatalog), DELAY, t0);
        c.results = vec![product(3, "kept")];
        let generation = c.results_generation();

        c.set_query("x", t0);
        assert!(c.flush());
        assert!(c.wait_idle(WAIT));

        assert!(!c.is_loading());
        assert_eq!(c.results(), &[product(3, "kept")]);
        assert_eq!(c.results_generation(), generation);
    }

    #[test]
    fn stale_message_is_ignored() {
        let catalog = Arc::new(EchoCatalog::default());
        let t0 = Instant::now();
        let mut c = SearchController::new(catalog, DELAY, t0);

        c.set_query("new", t0);
        c.tick(t0 + DELAY);
        let stale = FetchMessage {
            seq: 0,
            query: "old".into(),
            outcome: Ok(SearchResponse {
                products: vec![product(9, "old")],
                total: None,
            }),
        };
        assert!(!c.apply(stale));
        assert!(c.is_loading());

        c.wait_idle(WAIT);
        assert_eq!(c.results()[0].title, "new");
    }

    #[test]
    fn flush_skips_the_delay() {
        let catalog = Arc::new(EchoCatalog::default());
        let t0 = Instant::now();
        let mut c = SearchController::new(catalog.clone(), DELAY, t0);

        c.set_query("laptop", t0);
        assert!(c.flush());
        assert!(c.wait_idle(WAIT));
        assert_eq!(c.results()[0].title, "laptop");
        assert!(!c.flush());
    }
}
