use super::cell_text;
use crate::error::{PortalError, Result};
use crate::models::{FIELD_UNKNOWN, Notification};
use crate::selectors;
use scraper::{ElementRef, Html, Selector};

/// Parses the notification inbox table into one entry per row.
pub fn parse_notifications_from_html(html: &str) -> Result<Vec<Notification>> {
    let document = Html::parse_document(html);
    let row_selector = Selector::parse(selectors::TABLE_BODY_ROWS).unwrap();
    let cell_selector = Selector::parse("td").unwrap();
    let link_selector = Selector::parse("a").unwrap();

    let rows: Vec<ElementRef<'_>> = document.select(&row_selector).collect();
    if rows.is_empty() {
        return Err(PortalError::Parsing(
            "no notification rows found".to_string(),
        ));
    }

    let notifications = rows
        .into_iter()
        .map(|row| {
            let cells: Vec<ElementRef<'_>> = row.select(&cell_selector).collect();
            // The subject cell wraps its text in a detail link.
            let subject = cells
                .first()
                .and_then(|cell| cell.select(&link_selector).next())
                .map(|link| link.text().collect::<String>().trim().to_string())
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| FIELD_UNKNOWN.to_string());

            Notification {
                subject,
                sender: cell_text(&cells, 1).unwrap_or_else(|| FIELD_UNKNOWN.to_string()),
                date: cell_text(&cells, 2).unwrap_or_else(|| FIELD_UNKNOWN.to_string()),
            }
        })
        .collect();

    Ok(notifications)
}
