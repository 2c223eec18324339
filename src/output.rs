//! Tabular output surfaces.
//!
//! Two fixed layouts: the structured one-row-per-outcome-side table, and
//! the original one-row-per-market pass-through.

use std::io::Write;

use crate::error::Result;
use crate::types::{Classification, Market, OutputRow};

pub const STRUCTURED_HEADER: [&str; 10] = [
    "Category",
    "SubCategory1",
    "SubCategory2",
    "Listing",
    "Date",
    "Time",
    "Timezone",
    "Moneyline",
    "Outcome",
    "Price",
];

const ORIGINAL_HEADER: [&str; 7] = [
    "Question",
    "Category",
    "Outcomes",
    "Prices",
    "EndDate",
    "Volume",
    "Liquidity",
];

/// Write the structured layout: one CSV row per outcome-side.
pub fn write_structured<W: Write>(rows: &[OutputRow], out: W) -> Result<()> {
    let mut w = csv::Writer::from_writer(out);
    w.write_record(STRUCTURED_HEADER)?;
    for r in rows {
        let side = r.side.to_string();
        let price = r.price.to_string();
        w.write_record([
            r.category.as_str(),
            r.sub_category1.as_str(),
            r.sub_category2.as_str(),
            r.listing.as_str(),
            r.date.as_str(),
            r.time.as_str(),
            r.timezone.as_str(),
            r.moneyline.as_str(),
            side.as_str(),
            price.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Write the original layout: one descriptive CSV row per market.
pub fn write_original<W: Write>(markets: &[(Market, Classification)], out: W) -> Result<()> {
    let mut w = csv::Writer::from_writer(out);
    w.write_record(ORIGINAL_HEADER)?;
    for (m, c) in markets {
        let prices: Vec<String> = m.outcome_prices.iter().map(|p| p.to_string()).collect();
        let outcomes = m.outcomes.join(" | ");
        let prices = prices.join(" | ");
        let volume = m.volume.map(|v| v.to_string()).unwrap_or_default();
        let liquidity = m.liquidity.map(|v| v.to_string()).unwrap_or_default();
        w.write_record([
            m.question.as_str(),
            c.category.as_str(),
            outcomes.as_str(),
            prices.as_str(),
            m.end_date.as_deref().unwrap_or(""),
            volume.as_str(),
            liquidity.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;

    fn sample_row() -> OutputRow {
        OutputRow {
            category: "Sports".to_string(),
            sub_category1: "Soccer".to_string(),
            sub_category2: "Copa Libertadores".to_string(),
            listing: "RAC vs FLA".to_string(),
            date: "2025-10-29".to_string(),
            time: "20:30".to_string(),
            timezone: "America/Toronto".to_string(),
            moneyline: "RAC".to_string(),
            side: Side::Yes,
            price: 31,
        }
    }

    #[test]
    fn structured_layout_matches_documented_columns() {
        let mut buf = Vec::new();
        write_structured(&[sample_row()], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Category,SubCategory1,SubCategory2,Listing,Date,Time,Timezone,Moneyline,Outcome,Price"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Sports,Soccer,Copa Libertadores,RAC vs FLA,2025-10-29,20:30,America/Toronto,RAC,YES,31"
        );
    }

    #[test]
    fn empty_row_set_still_writes_the_header() {
        let mut buf = Vec::new();
        write_structured(&[], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
