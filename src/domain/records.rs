//! Record types for the content collections served by the origin.
//!
//! Each collection document has the shape `{ "<name>": [ ... ] }` and the
//! records inside use camelCase keys. Required fields are plain, everything
//! the site can render without is `Option` or defaulted, so a partially
//! shaped record fails deserialization instead of carrying undefined fields
//! into rendering.

use serde::{Deserialize, Serialize};

/// A knowledge-base article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Unique within the articles collection
    pub id: String,

    pub title: String,

    /// Free-form taxonomy value (e.g. "Back Pain", "Knee")
    pub category: String,

    pub excerpt: String,

    /// ISO-ish date string, e.g. "2024-03-05"
    pub date: String,

    /// Display string, e.g. "5 min read"
    #[serde(rename = "readTime")]
    pub read_time: String,

    /// Card image URL; a placeholder is rendered when absent
    #[serde(default)]
    pub image: Option<String>,
}

/// A treatable condition shown on the conditions page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: String,

    pub title: String,

    pub description: String,

    /// Icon glyph; defaults to a stethoscope at render time
    #[serde(default)]
    pub icon: Option<String>,
}

/// A treatment offering with its benefit tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Treatment {
    pub title: String,

    pub description: String,

    /// Ordered benefit strings, rendered as tags
    #[serde(default)]
    pub benefits: Vec<String>,

    #[serde(default)]
    pub icon: Option<String>,
}

/// A glossary term. `term` doubles as the sort/filter key for the
/// alphabet navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub term: String,

    pub definition: String,

    #[serde(default)]
    pub category: Option<String>,
}
