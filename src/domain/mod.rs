//! Data structures for the content collections.

pub mod records;

pub use records::{Article, Condition, Term, Treatment};
