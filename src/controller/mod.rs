//! Presentation controllers: glue between the store, the query functions,
//! and a mount point.
//!
//! Each controller drives one mount point through
//! `Idle -> Loading -> {Populated | Empty}`, re-entering `Loading` on every
//! new query or filter action. Search input is debounced (trailing edge
//! only); category/letter selection re-queries immediately and is exclusive
//! single-selection. A request-generation counter guarantees that only the
//! most recently issued query writes its result, so a slow earlier response
//! can never overwrite a newer one.

use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::content::{query, ContentStore};
use crate::render;

pub mod debounce;
pub mod mount;

pub use debounce::Debouncer;
pub use mount::{HtmlBuffer, MountHandle, MountPoint, MountRegistry};

/// Which collection a controller presents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentView {
    Articles,
    Conditions,
    Treatments,
    Terms,
}

impl std::fmt::Display for ContentView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentView::Articles => write!(f, "articles"),
            ContentView::Conditions => write!(f, "conditions"),
            ContentView::Treatments => write!(f, "treatments"),
            ContentView::Terms => write!(f, "terms"),
        }
    }
}

impl FromStr for ContentView {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "articles" => Ok(ContentView::Articles),
            "conditions" => Ok(ContentView::Conditions),
            "treatments" => Ok(ContentView::Treatments),
            "terms" | "glossary" => Ok(ContentView::Terms),
            _ => anyhow::bail!("Unknown collection: {}", s),
        }
    }
}

/// Lifecycle state of a mount point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Loading,
    Populated,
    Empty,
}

/// Active filter selections for a controller.
///
/// Category and letter are single-selection: assigning a new value replaces
/// the previous one, so exactly one is active at a time.
#[derive(Debug, Clone)]
pub struct FilterState {
    pub category: String,
    pub letter: String,
    pub query: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: query::ALL.to_string(),
            letter: query::ALL.to_string(),
            query: String::new(),
        }
    }
}

/// Tunable presentation behavior
#[derive(Debug, Clone)]
pub struct PresentationSettings {
    /// Quiet period before a search input fires a query
    pub debounce: Duration,

    /// Placeholder count in the loading skeleton
    pub skeleton_count: usize,
}

impl Default for PresentationSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            skeleton_count: render::DEFAULT_SKELETON_COUNT,
        }
    }
}

/// Everything a spawned query task needs, cheaply cloneable
#[derive(Clone)]
struct Shared {
    store: Arc<ContentStore>,
    view: ContentView,
    mount: MountHandle,
    state: Arc<Mutex<ViewState>>,
    generation: Arc<AtomicU64>,
    skeleton_count: usize,
}

/// Controller for one mount point
pub struct Controller {
    shared: Shared,
    filters: Arc<std::sync::Mutex<FilterState>>,
    debouncer: Debouncer,
}

impl Controller {
    /// Create a controller bound to a mount handle
    pub fn new(
        store: Arc<ContentStore>,
        view: ContentView,
        mount: MountHandle,
        settings: &PresentationSettings,
    ) -> Self {
        Self {
            shared: Shared {
                store,
                view,
                mount,
                state: Arc::new(Mutex::new(ViewState::Idle)),
                generation: Arc::new(AtomicU64::new(0)),
                skeleton_count: settings.skeleton_count,
            },
            filters: Arc::new(std::sync::Mutex::new(FilterState::default())),
            debouncer: Debouncer::new(settings.debounce),
        }
    }

    /// Attach to a mount point by id. Returns `None` (a no-op) when the id
    /// is not registered.
    pub fn attach(
        store: Arc<ContentStore>,
        view: ContentView,
        registry: &MountRegistry,
        mount_id: &str,
        settings: &PresentationSettings,
    ) -> Option<Self> {
        let mount = registry.get(mount_id)?;
        Some(Self::new(store, view, mount, settings))
    }

    /// Query with the current filters and wait for the mount to settle
    pub async fn refresh(&self) {
        let generation = self.issue();
        run_query(self.shared.clone(), self.filters(), generation).await;
    }

    /// Query with the current filters without waiting for completion
    pub fn refresh_detached(&self) {
        let generation = self.issue();
        tokio::spawn(run_query(self.shared.clone(), self.filters(), generation));
    }

    /// Update the search query; the actual re-query fires only after the
    /// debounce quiet period, and only for the trailing input of a burst.
    pub fn search(&mut self, query: &str) {
        self.lock_filters().query = query.to_string();

        let shared = self.shared.clone();
        let filters = Arc::clone(&self.filters);
        self.debouncer.call(async move {
            // Snapshot at fire time, so a category/letter selected during
            // the quiet period applies to this query
            let snapshot = lock_filters(&filters).clone();
            let generation = shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
            run_query(shared, snapshot, generation).await;
        });
    }

    /// Select the active category (exclusive) and re-query immediately
    pub async fn select_category(&mut self, category: &str) {
        self.lock_filters().category = category.to_string();
        self.refresh().await;
    }

    /// Select the active letter (exclusive) and re-query immediately
    pub async fn select_letter(&mut self, letter: &str) {
        self.lock_filters().letter = letter.to_string();
        self.refresh().await;
    }

    /// Current lifecycle state
    pub async fn state(&self) -> ViewState {
        *self.shared.state.lock().await
    }

    /// Current filter selections
    pub fn filters(&self) -> FilterState {
        self.lock_filters().clone()
    }

    fn lock_filters(&self) -> std::sync::MutexGuard<'_, FilterState> {
        lock_filters(&self.filters)
    }

    fn issue(&self) -> u64 {
        self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// Lock the filter state, recovering from a poisoned lock
fn lock_filters(filters: &std::sync::Mutex<FilterState>) -> std::sync::MutexGuard<'_, FilterState> {
    filters.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Execute one query against the store and write the outcome to the mount.
///
/// The result write is skipped when a newer generation has been issued in
/// the meantime; stale responses are discarded rather than racing.
async fn run_query(shared: Shared, filters: FilterState, generation: u64) {
    // A newer query may have been issued before this task first ran; it
    // owns the mount now, so don't even write the skeleton over it
    if shared.generation.load(Ordering::SeqCst) != generation {
        tracing::debug!("discarding stale query (generation {})", generation);
        return;
    }

    *shared.state.lock().await = ViewState::Loading;
    shared
        .mount
        .lock()
        .await
        .set_html(&render::skeleton(shared.skeleton_count));

    let fragments = collect_fragments(&shared, &filters).await;

    if shared.generation.load(Ordering::SeqCst) != generation {
        tracing::debug!("discarding stale response (generation {})", generation);
        return;
    }

    if fragments.is_empty() {
        shared.mount.lock().await.set_html(&render::empty_state());
        *shared.state.lock().await = ViewState::Empty;
    } else {
        shared.mount.lock().await.set_html(&fragments.join("\n"));
        *shared.state.lock().await = ViewState::Populated;
    }
}

/// Load, filter, and render the fragments for a view
async fn collect_fragments(shared: &Shared, filters: &FilterState) -> Vec<String> {
    match shared.view {
        ContentView::Articles => {
            let articles = shared.store.articles().await;
            let by_category: Vec<_> = query::filter_by_category(&articles, &filters.category)
                .into_iter()
                .cloned()
                .collect();
            query::search(&by_category, &filters.query)
                .into_iter()
                .map(render::article_card)
                .collect()
        }
        ContentView::Conditions => {
            let conditions = shared.store.conditions().await;
            query::search(&conditions, &filters.query)
                .into_iter()
                .map(render::condition_card)
                .collect()
        }
        ContentView::Treatments => {
            // Treatments page has no search or filter controls
            shared
                .store
                .treatments()
                .await
                .iter()
                .map(render::treatment_card)
                .collect()
        }
        ContentView::Terms => {
            let terms = shared.store.terms().await;
            let by_letter: Vec<_> = query::filter_by_prefix(&terms, &filters.letter)
                .into_iter()
                .cloned()
                .collect();
            query::search(&by_letter, &filters.query)
                .into_iter()
                .map(render::term_card)
                .collect()
        }
    }
}
