//! Gamma REST access: the single capped `/markets` fetch, the `/tags`
//! catalog, and tag-id resolution for server-side filtering.
//!
//! Records come back as raw JSON values; field normalization happens
//! downstream so that a malformed field in one record never disturbs its
//! siblings. Fetches are serial, not retried, and a failure aborts the
//! whole run.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use crate::config::{Config, FETCH_TIMEOUT_SECS};
use crate::error::{AppError, Result};
use crate::types::Tag;

fn http_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()?)
}

/// Fetch one capped page of open markets. `tag_id` switches on server-side
/// category filtering when the resolver found an official tag.
pub async fn fetch_markets(cfg: &Config, tag_id: Option<&str>) -> Result<Vec<Value>> {
    let client = http_client()?;

    let mut url = format!(
        "{}/markets?active=true&closed=false&limit={}&offset=0",
        cfg.gamma_api_url,
        cfg.effective_limit(),
    );
    if let Some(id) = tag_id {
        url.push_str("&tag=");
        url.push_str(id);
    }
    debug!(%url, "fetching markets");

    let resp: Value = client.get(&url).send().await?.json().await?;
    match resp {
        Value::Array(items) => {
            info!(count = items.len(), "Gamma /markets returned");
            Ok(items)
        }
        _ => Err(AppError::Fetch(
            "Gamma /markets response was not an array".to_string(),
        )),
    }
}

/// Fetch the official tag catalog. Elements missing a label are dropped;
/// numeric ids coerce to strings.
pub async fn fetch_tags(cfg: &Config) -> Result<Vec<Tag>> {
    let client = http_client()?;
    let url = format!("{}/tags", cfg.gamma_api_url);

    let resp: Value = client.get(&url).send().await?.json().await?;
    let items = match resp.as_array() {
        Some(a) => a,
        None => {
            return Err(AppError::Fetch(
                "Gamma /tags response was not an array".to_string(),
            ))
        }
    };

    let tags: Vec<Tag> = items
        .iter()
        .filter_map(|t| {
            let label = t.get("label").and_then(Value::as_str)?.to_string();
            let id = match t.get("id") {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            };
            Some(Tag { id, label })
        })
        .collect();

    info!(count = tags.len(), "Gamma /tags returned");
    Ok(tags)
}

/// Fuzzy-match a human category name against the tag catalog: exact label
/// match (case-insensitive) first, then substring containment in either
/// direction. Only tags that carry an id are candidates — the whole point
/// is to use the id as a server-side filter.
pub fn resolve_tag<'a>(catalog: &'a [Tag], name: &str) -> Option<&'a Tag> {
    let target = name.trim().to_lowercase();
    if target.is_empty() {
        return None;
    }

    let candidates: Vec<&Tag> = catalog.iter().filter(|t| t.id.is_some()).collect();

    if let Some(exact) = candidates.iter().find(|t| t.label.to_lowercase() == target) {
        return Some(*exact);
    }
    candidates
        .into_iter()
        .filter(|t| !t.label.trim().is_empty())
        .find(|t| {
            let label = t.label.to_lowercase();
            label.contains(&target) || target.contains(&label)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(id: Option<&str>, label: &str) -> Tag {
        Tag { id: id.map(str::to_string), label: label.to_string() }
    }

    #[test]
    fn exact_match_is_case_insensitive() {
        let catalog = vec![tag(Some("1"), "Sports"), tag(Some("2"), "Politics")];
        assert_eq!(resolve_tag(&catalog, "sports").unwrap().id.as_deref(), Some("1"));
        assert_eq!(resolve_tag(&catalog, "POLITICS").unwrap().id.as_deref(), Some("2"));
    }

    #[test]
    fn substring_match_works_both_directions() {
        let catalog = vec![tag(Some("7"), "US Elections")];
        // Query inside label.
        assert!(resolve_tag(&catalog, "elections").is_some());
        // Label inside query.
        assert!(resolve_tag(&catalog, "2026 US Elections cycle").is_some());
    }

    #[test]
    fn exact_match_beats_substring() {
        let catalog = vec![tag(Some("1"), "Sports Betting"), tag(Some("2"), "Sports")];
        assert_eq!(resolve_tag(&catalog, "sports").unwrap().id.as_deref(), Some("2"));
    }

    #[test]
    fn idless_tags_are_never_resolved() {
        let catalog = vec![tag(None, "Sports")];
        assert!(resolve_tag(&catalog, "Sports").is_none());
    }

    #[test]
    fn empty_query_resolves_nothing() {
        let catalog = vec![tag(Some("1"), "Sports")];
        assert!(resolve_tag(&catalog, "  ").is_none());
    }
}
