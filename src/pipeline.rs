//! The one-pass pipeline: fetch → normalize → validate → (classify ∥
//! listing ∥ timestamp) → explode.
//!
//! Per-record problems are recovered and counted; only the batch-level
//! fetch can fail the run. `process_markets` is the pure core so the whole
//! transform is testable without a network.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::classify::classify;
use crate::config::Config;
use crate::error::Result;
use crate::explode::{explode, to_percent, RowContext};
use crate::fetcher::{fetch_markets, fetch_tags, resolve_tag};
use crate::keywords::{find_rule, CategoryRule};
use crate::listing::extract_listing;
use crate::normalize::{normalize_market, NormalizeStats};
use crate::timefmt::{to_local_civil, ClockStyle};
use crate::types::{Classification, ClassificationSource, Market, OutputRow};
use crate::validate::{parse_end_date, validate};

/// Everything one run produced, plus the accounting for the summary line.
#[derive(Debug)]
pub struct PipelineReport {
    pub fetched: usize,
    pub valid: usize,
    pub rows: Vec<OutputRow>,
    /// The classified markets behind the rows, for the original layout.
    pub classified: Vec<(Market, Classification)>,
    pub normalize: NormalizeStats,
    /// Markets dropped on the category-driven path (no tags, no keyword hit).
    pub off_category: usize,
    /// Valid markets that contributed zero rows (no outcomes survived).
    pub rowless: usize,
    /// Label of the official tag when server-side filtering was used.
    pub resolved_tag: Option<String>,
}

/// Run the full pipeline against the live API.
pub async fn run(cfg: &Config, table: &[CategoryRule], style: ClockStyle) -> Result<PipelineReport> {
    // Tag resolution happens out-of-band, before the market fetch, to decide
    // whether server-side filtering is available.
    let mut resolved: Option<crate::types::Tag> = None;
    if let Some(name) = cfg.category_filter.as_deref() {
        let catalog = fetch_tags(cfg).await?;
        resolved = resolve_tag(&catalog, name).cloned();
        match &resolved {
            Some(t) => info!(
                category = name,
                tag_id = t.id.as_deref().unwrap_or(""),
                label = %t.label,
                "resolved official tag, filtering server-side",
            ),
            None => info!(category = name, "no official tag found, using keyword fallback"),
        }
    }

    let server_filtered = resolved.is_some();
    let tag_id = resolved.as_ref().and_then(|t| t.id.clone());
    let raw = fetch_markets(cfg, tag_id.as_deref()).await?;

    // The keyword rule applies only on the category-driven path when the
    // server could not pre-filter.
    let rule = if server_filtered {
        None
    } else {
        cfg.category_filter.as_deref().and_then(|n| find_rule(table, n))
    };

    let mut report = process_markets(raw, rule, &cfg.timezone, style, Utc::now());
    report.resolved_tag = resolved.map(|t| t.label);

    info!(
        fetched = report.fetched,
        valid = report.valid,
        rows = report.rows.len(),
        off_category = report.off_category,
        rowless = report.rowless,
        decode_failures = report.normalize.total(),
        "pipeline complete",
    );

    Ok(report)
}

/// The pure transform from raw records to output rows.
pub fn process_markets(
    raw: Vec<Value>,
    rule: Option<&CategoryRule>,
    timezone: &str,
    style: ClockStyle,
    now: DateTime<Utc>,
) -> PipelineReport {
    let fetched = raw.len();

    let mut stats = NormalizeStats::default();
    let markets: Vec<Market> = raw.iter().map(|v| normalize_market(v, &mut stats)).collect();
    if stats.total() > 0 {
        warn!(
            outcomes = stats.outcome_failures,
            prices = stats.price_failures,
            tags = stats.tag_failures,
            tokens = stats.token_failures,
            "field decode failures recovered with defaults",
        );
    }

    let valid = validate(markets, now);
    let valid_count = valid.len();

    let mut rows = Vec::new();
    let mut classified = Vec::new();
    let mut off_category = 0usize;
    let mut rowless = 0usize;

    for market in valid {
        let classification = classify(&market, rule);

        // Category-driven path: a market that neither carries tags nor hits
        // the keyword rule does not belong in this category's output.
        if rule.is_some() && classification.source == ClassificationSource::Fallback {
            off_category += 1;
            debug!(id = %market.id, question = %market.question, "dropped: off category");
            continue;
        }
        if !classification.matched_keywords.is_empty() {
            debug!(
                id = %market.id,
                keywords = ?classification.matched_keywords,
                "keyword classification hit",
            );
        }

        let market_rows = rows_for_market(&market, &classification, timezone, style);
        if market_rows.is_empty() {
            rowless += 1;
            warn!(id = %market.id, question = %market.question, "market produced no rows");
        }
        rows.extend(market_rows);
        classified.push((market, classification));
    }

    PipelineReport {
        fetched,
        valid: valid_count,
        rows,
        classified,
        normalize: stats,
        off_category,
        rowless,
        resolved_tag: None,
    }
}

/// Explode one classified market. Dates that fail to parse leave the date
/// and time cells blank; the zone label is stamped regardless.
fn rows_for_market(
    market: &Market,
    classification: &Classification,
    timezone: &str,
    style: ClockStyle,
) -> Vec<OutputRow> {
    let (date, time) = match market.end_date.as_deref().and_then(parse_end_date) {
        Some(end) => {
            let stamp = to_local_civil(end, timezone, style);
            (stamp.date, stamp.time)
        }
        None => (String::new(), String::new()),
    };

    let ctx = RowContext {
        category: classification.category.clone(),
        sub_category1: classification.sub_category1.clone(),
        sub_category2: classification.sub_category2.clone(),
        listing: extract_listing(&market.question),
        date,
        time,
        timezone: timezone.to_string(),
    };

    let prices: Vec<u32> = market.outcome_prices.iter().map(|p| to_percent(*p)).collect();
    explode(&ctx, &market.outcomes, &prices)
}
