//! Shared test fixtures: an in-memory fetcher standing in for the origin.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use globalcare::{Fetch, FetchError};
use serde_json::Value;

/// Fetcher serving canned bodies keyed by resource name.
///
/// Cloning shares the call counter, delay queue, and URL log, so a clone
/// can be handed to a `ContentStore` while the test keeps observing it.
#[derive(Clone, Default)]
pub struct StubFetcher {
    bodies: HashMap<String, String>,
    failures: HashMap<String, u16>,
    calls: Arc<AtomicUsize>,
    delays: Arc<Mutex<VecDeque<Duration>>>,
    urls: Arc<Mutex<Vec<String>>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `document` for `resource`
    pub fn with_document(mut self, resource: &str, document: Value) -> Self {
        self.bodies.insert(resource.to_string(), document.to_string());
        self
    }

    /// Serve a raw (possibly malformed) body for `resource`
    pub fn with_body(mut self, resource: &str, body: &str) -> Self {
        self.bodies.insert(resource.to_string(), body.to_string());
        self
    }

    /// Fail `resource` with an HTTP status
    pub fn with_status(mut self, resource: &str, status: u16) -> Self {
        self.failures.insert(resource.to_string(), status);
        self
    }

    /// Delay successive fetches by these durations (then no delay)
    pub fn with_delays(self, delays: Vec<Duration>) -> Self {
        *self.delays.lock().unwrap() = delays.into();
        self
    }

    /// Number of fetches performed
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// URLs fetched, in order
    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

/// Resource name from a fetch URL: the path segment before ".json"
fn resource_of(url: &str) -> &str {
    url.rsplit('/')
        .next()
        .and_then(|segment| segment.split(".json").next())
        .unwrap_or_default()
}

#[async_trait]
impl Fetch for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let delay = self.delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(url.to_string());

        let resource = resource_of(url);

        if let Some(status) = self.failures.get(resource) {
            return Err(FetchError::Status(*status));
        }

        self.bodies
            .get(resource)
            .cloned()
            .ok_or(FetchError::Status(404))
    }
}

/// A terms document with a handful of glossary entries
pub fn terms_document() -> Value {
    serde_json::json!({
        "terms": [
            {"term": "Acute", "definition": "Sudden onset of symptoms."},
            {"term": "Ankle", "definition": "Joint between foot and leg."},
            {"term": "Bursitis", "definition": "Inflammation of a bursa."}
        ]
    })
}

/// An articles document spanning two categories
pub fn articles_document() -> Value {
    serde_json::json!({
        "articles": [
            {
                "id": "back-stretches",
                "title": "Lower Back Stretches",
                "category": "Back Pain",
                "excerpt": "Daily stretches for a healthy back.",
                "date": "2024-02-10",
                "readTime": "4 min read"
            },
            {
                "id": "knee-pain-basics",
                "title": "Knee Pain Basics",
                "category": "Knee",
                "excerpt": "Common causes of knee pain.",
                "date": "2024-03-05",
                "readTime": "5 min read",
                "image": "images/knee.jpg"
            }
        ]
    })
}
