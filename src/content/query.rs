//! Pure filter and search functions over loaded collections.
//!
//! All functions preserve the input order and treat the sentinel value
//! `"all"` as "no filter applied". Search is plain case-insensitive
//! substring containment, no ranking.

use crate::domain::{Article, Condition, Term};

/// Sentinel filter value meaning "no filter applied"
pub const ALL: &str = "all";

/// Types that expose text fields for substring search
pub trait Searchable {
    /// The fields a query is matched against
    fn haystacks(&self) -> Vec<&str>;
}

impl Searchable for Term {
    fn haystacks(&self) -> Vec<&str> {
        vec![&self.term, &self.definition]
    }
}

impl Searchable for Article {
    fn haystacks(&self) -> Vec<&str> {
        vec![&self.title, &self.category, &self.excerpt]
    }
}

impl Searchable for Condition {
    fn haystacks(&self) -> Vec<&str> {
        vec![&self.title, &self.description]
    }
}

/// Filter terms by the first letter of `term`, case-insensitively.
pub fn filter_by_prefix<'a>(terms: &'a [Term], letter: &str) -> Vec<&'a Term> {
    if letter.eq_ignore_ascii_case(ALL) {
        return terms.iter().collect();
    }

    let letter = letter.to_lowercase();
    terms
        .iter()
        .filter(|t| t.term.to_lowercase().starts_with(&letter))
        .collect()
}

/// Keep items where the query appears in at least one haystack field.
/// An empty query means "show all".
pub fn search<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    if query.is_empty() {
        return items.iter().collect();
    }

    let query = query.to_lowercase();
    items
        .iter()
        .filter(|item| {
            item.haystacks()
                .iter()
                .any(|field| field.to_lowercase().contains(&query))
        })
        .collect()
}

/// Filter articles by exact category match.
pub fn filter_by_category<'a>(articles: &'a [Article], category: &str) -> Vec<&'a Article> {
    if category.eq_ignore_ascii_case(ALL) {
        return articles.iter().collect();
    }

    articles
        .iter()
        .filter(|a| a.category == category)
        .collect()
}
