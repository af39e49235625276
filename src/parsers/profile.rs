use super::cell_text;
use crate::error::{PortalError, Result};
use crate::models::{FIELD_UNKNOWN, ProfileField, StudentProfile};
use crate::selectors;
use scraper::{ElementRef, Html, Selector};

/// Parses the profile page's four tables, in document order: personal,
/// contact, course, emergency contact. Each row is a label cell followed by
/// a value cell.
pub fn parse_profile_from_html(html: &str) -> Result<StudentProfile> {
    let document = Html::parse_document(html);
    let table_selector = Selector::parse(selectors::CONTAINER_TABLES).unwrap();
    let mut tables = document.select(&table_selector);

    let personal = tables
        .next()
        .map(section_fields)
        .ok_or_else(|| PortalError::Parsing("profile tables are missing".to_string()))?;
    let contact = tables.next().map(section_fields).unwrap_or_default();
    let course = tables.next().map(section_fields).unwrap_or_default();
    let emergency_contact = tables.next().map(section_fields).unwrap_or_default();

    Ok(StudentProfile {
        personal,
        contact,
        course,
        emergency_contact,
    })
}

fn section_fields(table: ElementRef<'_>) -> Vec<ProfileField> {
    let row_selector = Selector::parse("tbody tr").unwrap();
    let cell_selector = Selector::parse("td").unwrap();

    table
        .select(&row_selector)
        .filter_map(|row| {
            let cells: Vec<ElementRef<'_>> = row.select(&cell_selector).collect();
            let label = cell_text(&cells, 0)?;
            let value = cell_text(&cells, 1).unwrap_or_else(|| FIELD_UNKNOWN.to_string());
            Some(ProfileField { label, value })
        })
        .collect()
}
