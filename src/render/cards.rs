//! Card fragments for each record kind, plus the loading/empty states.
//!
//! Fragments mirror the site's card markup. All interpolated fields are
//! escaped; see `html::escape`.

use chrono::NaiveDate;

use crate::domain::{Article, Condition, Term, Treatment};

use super::html::escape;

/// Placeholder count used when none is specified
pub const DEFAULT_SKELETON_COUNT: usize = 3;

const ARTICLE_PLACEHOLDER_ICON: &str = "📰";
const CONDITION_DEFAULT_ICON: &str = "🩺";
const TREATMENT_DEFAULT_ICON: &str = "💪";

/// Render an article as a full card
pub fn article_card(article: &Article) -> String {
    let image = match &article.image {
        Some(url) => format!(
            r#"<img src="{}" alt="{}" class="card-image" loading="lazy">"#,
            escape(url),
            escape(&article.title)
        ),
        None => format!(
            r#"<div class="card-image-placeholder">{}</div>"#,
            ARTICLE_PLACEHOLDER_ICON
        ),
    };

    format!(
        r#"<article class="card article-card">
  {image}
  <div class="card-body">
    <div class="article-meta">
      <span class="article-category">{category}</span>
      <span class="article-meta-item"><span>📅</span> {date}</span>
      <span class="article-meta-item"><span>⏱️</span> {read_time}</span>
    </div>
    <h3 class="card-title">{title}</h3>
    <p class="card-text article-excerpt">{excerpt}</p>
    <a href="article.html?id={id}" class="article-link">Read Article <span>→</span></a>
  </div>
</article>"#,
        image = image,
        category = escape(&article.category),
        date = format_date(&article.date),
        read_time = escape(&article.read_time),
        title = escape(&article.title),
        excerpt = escape(&article.excerpt),
        id = escape(&article.id),
    )
}

/// Render an article as a compact feature card (homepage)
pub fn featured_article(article: &Article) -> String {
    format!(
        r#"<a href="article.html?id={id}" class="card feature-card">
  <div class="feature-icon">📖</div>
  <h3 class="card-title">{title}</h3>
  <p class="card-text">{excerpt}</p>
</a>"#,
        id = escape(&article.id),
        title = escape(&article.title),
        excerpt = escape(&article.excerpt),
    )
}

/// Render a condition card
pub fn condition_card(condition: &Condition) -> String {
    let icon = condition.icon.as_deref().unwrap_or(CONDITION_DEFAULT_ICON);

    format!(
        r#"<div class="condition-card" data-id="{id}">
  <div class="condition-icon">{icon}</div>
  <h3 class="condition-title">{title}</h3>
  <p class="condition-description">{description}</p>
</div>"#,
        id = escape(&condition.id),
        icon = escape(icon),
        title = escape(&condition.title),
        description = escape(&condition.description),
    )
}

/// Render a treatment card with its benefit tags
pub fn treatment_card(treatment: &Treatment) -> String {
    let icon = treatment.icon.as_deref().unwrap_or(TREATMENT_DEFAULT_ICON);

    let benefits: String = treatment
        .benefits
        .iter()
        .map(|b| format!(r#"<span class="treatment-benefit">{}</span>"#, escape(b)))
        .collect();

    format!(
        r#"<div class="treatment-card">
  <div class="treatment-icon-wrapper">{icon}</div>
  <div class="treatment-content">
    <h3 class="treatment-title">{title}</h3>
    <p class="treatment-description">{description}</p>
    <div class="treatment-benefits">{benefits}</div>
  </div>
</div>"#,
        icon = escape(icon),
        title = escape(&treatment.title),
        description = escape(&treatment.description),
        benefits = benefits,
    )
}

/// Render a glossary term card
pub fn term_card(term: &Term) -> String {
    let category = match &term.category {
        Some(c) => format!(r#"<span class="term-category">{}</span>"#, escape(c)),
        None => String::new(),
    };

    format!(
        r#"<div class="term-card">
  <div class="term-word">{word}</div>
  <p class="term-definition">{definition}</p>
  {category}
</div>"#,
        word = escape(&term.term),
        definition = escape(&term.definition),
        category = category,
    )
}

/// Render `count` loading-skeleton placeholders
pub fn skeleton(count: usize) -> String {
    let card = r#"<div class="card">
  <div class="skeleton skeleton-card"></div>
  <div class="card-body">
    <div class="skeleton skeleton-heading"></div>
    <div class="skeleton skeleton-text"></div>
    <div class="skeleton skeleton-text" style="width: 80%"></div>
  </div>
</div>"#;

    card.repeat(count)
}

/// Render the empty-state fragment with the default copy
pub fn empty_state() -> String {
    empty_state_with("No content found", "Try adjusting your search or filters.")
}

/// Render the empty-state fragment with custom title and subtext
pub fn empty_state_with(title: &str, text: &str) -> String {
    format!(
        r#"<div class="empty-state">
  <div class="empty-state-icon">🔍</div>
  <h3 class="empty-state-title">{}</h3>
  <p class="empty-state-text">{}</p>
</div>"#,
        escape(title),
        escape(text),
    )
}

/// Format an ISO `YYYY-MM-DD` date as a short display date ("Mar 5, 2024").
/// Unparseable input passes through unchanged.
pub fn format_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%b %-d, %Y").to_string(),
        Err(_) => escape(date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_article() -> Article {
        Article {
            id: "knee-pain-basics".to_string(),
            title: "Knee Pain Basics".to_string(),
            category: "Knee".to_string(),
            excerpt: "Common causes of knee pain.".to_string(),
            date: "2024-03-05".to_string(),
            read_time: "5 min read".to_string(),
            image: None,
        }
    }

    #[test]
    fn test_article_card_contains_fields_verbatim() {
        let html = article_card(&sample_article());

        assert!(html.contains("Knee Pain Basics"));
        assert!(html.contains("Common causes of knee pain."));
        assert!(html.contains("article.html?id=knee-pain-basics"));
        // No image: placeholder is rendered
        assert!(html.contains("card-image-placeholder"));
    }

    #[test]
    fn test_article_card_escapes_fields() {
        let mut article = sample_article();
        article.title = r#"<img src=x onerror="x">"#.to_string();

        let html = article_card(&article);
        assert!(!html.contains("<img src=x"));
        assert!(html.contains("&lt;img src=x"));
    }

    #[test]
    fn test_featured_article_markup() {
        let html = featured_article(&sample_article());

        assert!(html.contains("feature-card"));
        assert!(html.contains("Knee Pain Basics"));
        assert!(html.contains("Common causes of knee pain."));
        assert!(html.contains("article.html?id=knee-pain-basics"));
    }

    #[test]
    fn test_featured_article_escapes_fields() {
        let mut article = sample_article();
        article.excerpt = "a <b>bold</b> claim".to_string();

        let html = featured_article(&article);
        assert!(!html.contains("<b>"));
        assert!(html.contains("a &lt;b&gt;bold&lt;/b&gt; claim"));
    }

    #[test]
    fn test_condition_card_default_icon() {
        let condition = Condition {
            id: "c1".to_string(),
            title: "Sciatica".to_string(),
            description: "Nerve pain along the sciatic nerve.".to_string(),
            icon: None,
        };

        let html = condition_card(&condition);
        assert!(html.contains("🩺"));
        assert!(html.contains("Sciatica"));
    }

    #[test]
    fn test_treatment_card_benefits() {
        let treatment = Treatment {
            title: "Manual Therapy".to_string(),
            description: "Hands-on care.".to_string(),
            benefits: vec!["Pain relief".to_string(), "Mobility".to_string()],
            icon: None,
        };

        let html = treatment_card(&treatment);
        assert_eq!(html.matches("treatment-benefit\"").count(), 2);
        assert!(html.contains("Pain relief"));
    }

    #[test]
    fn test_term_card_optional_category() {
        let term = Term {
            term: "Acute".to_string(),
            definition: "Sudden onset.".to_string(),
            category: None,
        };
        assert!(!term_card(&term).contains("term-category"));

        let term = Term {
            category: Some("General".to_string()),
            ..term
        };
        assert!(term_card(&term).contains("term-category"));
    }

    #[test]
    fn test_skeleton_count() {
        let html = skeleton(4);
        assert_eq!(html.matches("skeleton-card").count(), 4);
        assert!(skeleton(0).is_empty());
    }

    #[test]
    fn test_empty_state_defaults() {
        let html = empty_state();
        assert!(html.contains("No content found"));
        assert!(html.contains("Try adjusting your search or filters."));
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-05"), "Mar 5, 2024");
        assert_eq!(format_date("2024-12-25"), "Dec 25, 2024");
        // Unparseable input passes through
        assert_eq!(format_date("soon"), "soon");
    }
}
