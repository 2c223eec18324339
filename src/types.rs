use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Market
// ---------------------------------------------------------------------------

/// A Gamma market after field normalization: the four list-valued fields
/// (which the API delivers either as native arrays or as JSON-encoded
/// strings) are decoded to native lists, and the tradeability flags keep
/// their absent-vs-explicit distinction for the validator.
///
/// `outcomes[i]` corresponds to `outcome_prices[i]`; a missing price index
/// reads as 0 downstream, nothing re-verifies the lengths beyond that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Market {
    pub id: String,
    pub question: String,
    pub description: String,
    pub outcomes: Vec<String>,
    pub outcome_prices: Vec<f64>,
    pub tags: Vec<Tag>,
    pub clob_token_ids: Vec<String>,
    pub active: Option<bool>,
    pub closed: Option<bool>,
    pub archived: Option<bool>,
    pub accepting_orders: Option<bool>,
    /// Coalesced from `endDate` / `endDateIso`, whichever is present first.
    pub end_date: Option<String>,
    pub volume: Option<f64>,
    pub liquidity: Option<f64>,
}

/// An official category label attached to a market. Tag elements arrive
/// either as bare strings or as `{id, label}` objects; both normalize here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Option<String>,
    pub label: String,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Which classifier rule produced the labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationSource {
    /// Explicit tag data — authoritative when present.
    Tags,
    /// Keyword/exclusion fallback against the question text.
    Keywords,
    /// Neither tags nor a keyword hit: the generic placeholder.
    Fallback,
}

impl std::fmt::Display for ClassificationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ClassificationSource::Tags => "tags",
            ClassificationSource::Keywords => "keywords",
            ClassificationSource::Fallback => "fallback",
        };
        write!(f, "{s}")
    }
}

/// Category labels resolved for one market. Returned as an explicit value
/// and threaded forward; the source record is never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub category: String,
    pub sub_category1: String,
    pub sub_category2: String,
    pub source: ClassificationSource,
    /// Inclusion keywords that hit, for diagnostics. Empty off the keyword path.
    pub matched_keywords: Vec<String>,
}

// ---------------------------------------------------------------------------
// Output rows
// ---------------------------------------------------------------------------

/// Which side of an outcome a row prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Yes,
    No,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Yes => write!(f, "YES"),
            Side::No => write!(f, "NO"),
        }
    }
}

/// Outcome-structure class driving the row-explosion rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketShape {
    /// A "Draw" outcome present, or exactly three outcomes.
    Draw,
    /// Exactly two outcomes, one of them Yes/No.
    Binary,
    /// Anything else.
    MultiOutcome,
}

impl std::fmt::Display for MarketShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MarketShape::Draw => "draw",
            MarketShape::Binary => "binary",
            MarketShape::MultiOutcome => "multi_outcome",
        };
        write!(f, "{s}")
    }
}

/// One flat spreadsheet row: a single outcome-side price of one market.
/// Created fresh per pass, never mutated, no identity beyond position.
#[derive(Debug, Clone, Serialize)]
pub struct OutputRow {
    pub category: String,
    pub sub_category1: String,
    pub sub_category2: String,
    pub listing: String,
    pub date: String,
    pub time: String,
    pub timezone: String,
    pub moneyline: String,
    pub side: Side,
    /// Integer percentage in [0, 100].
    pub price: u32,
}
