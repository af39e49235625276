use super::cell_text;
use crate::error::{PortalError, Result};
use crate::models::{FIELD_UNKNOWN, SocialWorkEvent};
use crate::selectors;
use scraper::{ElementRef, Html, Selector};

/// Parses the social-work activity table into one event per row.
pub fn parse_social_work_from_html(html: &str) -> Result<Vec<SocialWorkEvent>> {
    let document = Html::parse_document(html);
    let row_selector = Selector::parse(selectors::TABLE_BODY_ROWS).unwrap();
    let cell_selector = Selector::parse("td").unwrap();

    let rows: Vec<ElementRef<'_>> = document.select(&row_selector).collect();
    if rows.is_empty() {
        return Err(PortalError::Parsing(
            "no social work rows found".to_string(),
        ));
    }

    let events = rows
        .into_iter()
        .map(|row| {
            let cells: Vec<ElementRef<'_>> = row.select(&cell_selector).collect();
            let unknown = || FIELD_UNKNOWN.to_string();
            SocialWorkEvent {
                index: cell_text(&cells, 0).unwrap_or_else(unknown),
                event: cell_text(&cells, 1).unwrap_or_else(unknown),
                location: cell_text(&cells, 2).unwrap_or_else(unknown),
                num_registered: cell_text(&cells, 3).unwrap_or_else(unknown),
                points: cell_text(&cells, 4).unwrap_or_else(|| "0".to_string()),
                start_time: cell_text(&cells, 5).unwrap_or_else(unknown),
                end_time: cell_text(&cells, 6).unwrap_or_else(unknown),
            }
        })
        .collect();

    Ok(events)
}
