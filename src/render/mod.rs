//! Rendering records into HTML card fragments.

pub mod cards;
pub mod html;

pub use cards::{
    article_card, condition_card, empty_state, empty_state_with, featured_article, format_date,
    skeleton, term_card, treatment_card, DEFAULT_SKELETON_COUNT,
};
pub use html::escape;
