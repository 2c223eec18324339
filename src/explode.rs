//! Row explosion: one market becomes one row per outcome per side.
//!
//! Shape detection is ordered; the first matching rule governs the whole
//! market. The binary shape emits YES rows only — an upstream quirk that
//! downstream consumers count on, so it is preserved rather than fixed.

use crate::types::{MarketShape, OutputRow, Side};

/// The non-price columns shared by every row of one market.
#[derive(Debug, Clone)]
pub struct RowContext {
    pub category: String,
    pub sub_category1: String,
    pub sub_category2: String,
    pub listing: String,
    pub date: String,
    pub time: String,
    pub timezone: String,
}

/// Scale a probability in [0, 1] to an integer percentage, rounding half
/// away from zero. Out-of-range input clamps so the NO complement stays in
/// [0, 100].
pub fn to_percent(p: f64) -> u32 {
    (p * 100.0).round().clamp(0.0, 100.0) as u32
}

/// Classify the outcome structure. Evaluated in order; first match governs.
pub fn detect_shape(outcomes: &[String]) -> MarketShape {
    if outcomes.iter().any(|o| o.to_lowercase().contains("draw")) || outcomes.len() == 3 {
        return MarketShape::Draw;
    }
    if outcomes.len() == 2
        && outcomes
            .iter()
            .any(|o| o.eq_ignore_ascii_case("yes") || o.eq_ignore_ascii_case("no"))
    {
        return MarketShape::Binary;
    }
    MarketShape::MultiOutcome
}

/// Explode one market into output rows. `prices` are integer percentages
/// parallel to `outcomes`; a missing index reads as 0. For the draw and
/// generic shapes every YES row gets a complementary NO row at
/// `100 - price`, computed post-rounding so the pair sums to exactly 100.
pub fn explode(ctx: &RowContext, outcomes: &[String], prices: &[u32]) -> Vec<OutputRow> {
    let price_at = |i: usize| prices.get(i).copied().unwrap_or(0);
    let mut rows = Vec::with_capacity(outcomes.len() * 2);

    match detect_shape(outcomes) {
        MarketShape::Draw => {
            for (i, outcome) in outcomes.iter().enumerate() {
                let moneyline = if outcome.to_lowercase().contains("draw") {
                    "DRAW".to_string()
                } else {
                    outcome.clone()
                };
                push_pair(&mut rows, ctx, moneyline, price_at(i));
            }
        }
        MarketShape::Binary => {
            for (i, outcome) in outcomes.iter().enumerate() {
                rows.push(row(ctx, outcome.clone(), Side::Yes, price_at(i)));
            }
        }
        MarketShape::MultiOutcome => {
            for (i, outcome) in outcomes.iter().enumerate() {
                push_pair(&mut rows, ctx, outcome.clone(), price_at(i));
            }
        }
    }

    rows
}

fn push_pair(rows: &mut Vec<OutputRow>, ctx: &RowContext, moneyline: String, yes_price: u32) {
    rows.push(row(ctx, moneyline.clone(), Side::Yes, yes_price));
    rows.push(row(ctx, moneyline, Side::No, 100 - yes_price));
}

fn row(ctx: &RowContext, moneyline: String, side: Side, price: u32) -> OutputRow {
    OutputRow {
        category: ctx.category.clone(),
        sub_category1: ctx.sub_category1.clone(),
        sub_category2: ctx.sub_category2.clone(),
        listing: ctx.listing.clone(),
        date: ctx.date.clone(),
        time: ctx.time.clone(),
        timezone: ctx.timezone.clone(),
        moneyline,
        side,
        price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RowContext {
        RowContext {
            category: "Sports".to_string(),
            sub_category1: "Soccer".to_string(),
            sub_category2: String::new(),
            listing: "RAC vs FLA".to_string(),
            date: "2025-10-29".to_string(),
            time: "20:30".to_string(),
            timezone: "America/Toronto".to_string(),
        }
    }

    fn names(outcomes: &[&str]) -> Vec<String> {
        outcomes.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        // 0.125 and 0.875 scale to exact halves in f64.
        assert_eq!(to_percent(0.125), 13);
        assert_eq!(to_percent(0.875), 88);
        assert_eq!(to_percent(0.31), 31);
        assert_eq!(to_percent(0.0), 0);
        assert_eq!(to_percent(1.0), 100);
    }

    #[test]
    fn shape_detection_order() {
        assert_eq!(detect_shape(&names(&["RAC", "Draw", "FLA"])), MarketShape::Draw);
        // Exactly three outcomes is draw-shaped even without the word.
        assert_eq!(detect_shape(&names(&["A", "B", "C"])), MarketShape::Draw);
        // A draw outcome forces the draw shape at any count.
        assert_eq!(detect_shape(&names(&["A", "Draw"])), MarketShape::Draw);
        assert_eq!(detect_shape(&names(&["Yes", "No"])), MarketShape::Binary);
        assert_eq!(detect_shape(&names(&["Over", "Under"])), MarketShape::MultiOutcome);
        assert_eq!(detect_shape(&names(&["A", "B", "C", "D"])), MarketShape::MultiOutcome);
    }

    #[test]
    fn draw_shape_yields_two_rows_per_outcome() {
        let rows = explode(&ctx(), &names(&["RAC", "Draw", "FLA"]), &[31, 30, 45]);
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].moneyline, "RAC");
        assert_eq!(rows[0].side, Side::Yes);
        assert_eq!(rows[0].price, 31);
        assert_eq!(rows[1].side, Side::No);
        assert_eq!(rows[1].price, 69);
        assert_eq!(rows[2].moneyline, "DRAW");
        assert_eq!(rows[3].moneyline, "DRAW");
    }

    #[test]
    fn binary_shape_emits_yes_rows_only() {
        // Preserved source quirk: no synthesized NO rows for Yes/No markets.
        let rows = explode(&ctx(), &names(&["Yes", "No"]), &[62, 38]);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.side == Side::Yes));
        assert_eq!(rows[0].moneyline, "Yes");
        assert_eq!(rows[0].price, 62);
        assert_eq!(rows[1].moneyline, "No");
        assert_eq!(rows[1].price, 38);
    }

    #[test]
    fn generic_shape_yields_complementary_pairs() {
        let outcomes = names(&["A", "B", "C", "D"]);
        let rows = explode(&ctx(), &outcomes, &[10, 20, 30, 40]);
        assert_eq!(rows.len(), 8);
        for pair in rows.chunks(2) {
            assert_eq!(pair[0].side, Side::Yes);
            assert_eq!(pair[1].side, Side::No);
            assert_eq!(pair[0].price + pair[1].price, 100);
            assert_eq!(pair[0].moneyline, pair[1].moneyline);
        }
    }

    #[test]
    fn missing_price_index_defaults_to_zero() {
        let rows = explode(&ctx(), &names(&["A", "B", "C"]), &[55]);
        assert_eq!(rows[2].price, 0);
        assert_eq!(rows[3].price, 100);
        assert_eq!(rows[4].price, 0);
        assert_eq!(rows[5].price, 100);
    }

    #[test]
    fn draw_outcome_matches_case_insensitively() {
        let rows = explode(&ctx(), &names(&["RAC", "DRAW", "FLA"]), &[31, 30, 45]);
        assert_eq!(rows[2].moneyline, "DRAW");
        assert_eq!(rows[2].price, 30);
        assert_eq!(rows[3].price, 70);
    }
}
