//! globalcare - content client for the GlobalCare Physio site
//!
//! Implements the client-side behavior of the content site: fetching
//! JSON-encoded collections (articles, conditions, treatments, glossary
//! terms) from a content origin, memoizing them, filtering and searching
//! them, rendering them into HTML card fragments, and managing the
//! dark/light theme preference.
//!
//! # Modules
//!
//! - `content`: memoizing `ContentStore` and the pure filter/search functions
//! - `domain`: record types for the collections
//! - `render`: record-to-HTML card fragments (escape-on-interpolation)
//! - `controller`: per-mount-point presentation state machine with debounced
//!   search and stale-response discard
//! - `prefs`: theme preference with system fallback
//! - `cli`: command-line interface
//!
//! # Usage
//!
//! ```bash
//! # List articles in a category
//! globalcare articles --category "Back Pain"
//!
//! # Search the glossary
//! globalcare terms --letter A --search tendon
//!
//! # Render condition cards as HTML
//! globalcare render conditions -o conditions.html
//! ```

pub mod cli;
pub mod config;
pub mod content;
pub mod controller;
pub mod domain;
pub mod prefs;
pub mod render;

// Re-export main types at crate root for convenience
pub use content::{ContentError, ContentStore, Fetch, FetchError};
pub use controller::{ContentView, Controller, FilterState, PresentationSettings, ViewState};
pub use domain::{Article, Condition, Term, Treatment};
pub use prefs::{PreferenceStore, Theme, ThemeManager};
