//! Category / sub-category assignment.
//!
//! Tag data is authoritative when present (official taxonomy); the keyword
//! table is a heuristic safety net used only on the category-driven fetch
//! path; everything else lands on the generic placeholder.

use crate::keywords::CategoryRule;
use crate::types::{Classification, ClassificationSource, Market, Tag};

/// Placeholder category when neither tags nor keywords produce a label.
pub const FALLBACK_CATEGORY: &str = "Markets";

/// Resolve category labels for one market.
///
/// Precedence, first matching rule wins:
/// 1. tag-derived — labels 1/2/3 of the usable tags;
/// 2. keyword fallback — only when `rule` is supplied (category-driven
///    fetch path), exclusions evaluated strictly before inclusions;
/// 3. the generic placeholder.
pub fn classify(market: &Market, rule: Option<&CategoryRule>) -> Classification {
    if let Some(c) = classify_from_tags(&market.tags) {
        return c;
    }
    if let Some(rule) = rule {
        if let Some(c) = classify_from_keywords(&market.question, rule) {
            return c;
        }
    }
    Classification {
        category: FALLBACK_CATEGORY.to_string(),
        sub_category1: String::new(),
        sub_category2: String::new(),
        source: ClassificationSource::Fallback,
        matched_keywords: Vec::new(),
    }
}

/// Tags with no usable label text are dropped before indexing so they never
/// leave empty slots that shift the label-1/2/3 cut.
fn classify_from_tags(tags: &[Tag]) -> Option<Classification> {
    let labels: Vec<&str> = tags
        .iter()
        .map(|t| t.label.trim())
        .filter(|l| !l.is_empty())
        .collect();
    let first = labels.first()?;
    Some(Classification {
        category: first.to_string(),
        sub_category1: labels.get(1).unwrap_or(&"").to_string(),
        sub_category2: labels.get(2).unwrap_or(&"").to_string(),
        source: ClassificationSource::Tags,
        matched_keywords: Vec::new(),
    })
}

fn classify_from_keywords(question: &str, rule: &CategoryRule) -> Option<Classification> {
    let q = question.to_lowercase();

    // Exclusions first: any hit kills the match regardless of inclusions.
    if rule.exclusions.iter().any(|x| q.contains(&x.to_lowercase())) {
        return None;
    }

    let matched: Vec<String> = rule
        .keywords
        .iter()
        .filter(|k| q.contains(&k.to_lowercase()))
        .cloned()
        .collect();
    if matched.is_empty() {
        return None;
    }

    // The only sub-category inference documented for this path.
    let (sub1, sub2) = if q.contains("copa libertadores") {
        ("Soccer", "Copa Libertadores")
    } else if q.contains("soccer") {
        ("Soccer", "")
    } else {
        ("", "")
    };

    Some(Classification {
        category: rule.name.clone(),
        sub_category1: sub1.to_string(),
        sub_category2: sub2.to_string(),
        source: ClassificationSource::Keywords,
        matched_keywords: matched,
    })
}
