use crate::error::{PortalError, Result};
use crate::models::{DaySchedule, FIELD_UNKNOWN, ScheduleEntry, WeeklySchedule};
use crate::selectors;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

const PERIODS_LABEL: &str = "Tiết: ";
const START_TIME_LABEL: &str = "Giờ bắt đầu: ";
const PROFESSOR_LABEL: &str = "GV: ";
const EMAIL_LABEL: &str = "Email: ";

/// Parses the timetable page into one entry list per day column.
///
/// The first header column is the period axis; every following `<th>` names
/// a day as "weekday<br>date". Class cells carry their details in a fixed
/// span order inside a `.DetailSchedule` block.
pub fn parse_schedule_from_html(html: &str) -> Result<WeeklySchedule> {
    let document = Html::parse_document(html);
    let table_selector = Selector::parse(selectors::SCHEDULE_TABLE).unwrap();
    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| PortalError::Parsing("schedule table is missing".to_string()))?;

    let header_selector = Selector::parse(selectors::SCHEDULE_HEADERS).unwrap();
    let headers: Vec<String> = table.select(&header_selector).map(day_label).collect();
    if headers.is_empty() {
        return Err(PortalError::Parsing(
            "schedule table has no header row".to_string(),
        ));
    }

    let detail_selector = Selector::parse(selectors::SCHEDULE_CELL_DETAIL).unwrap();
    let span_selector = Selector::parse("span").unwrap();

    let mut days = Vec::with_capacity(headers.len().saturating_sub(1));
    for (column, day) in headers.iter().skip(1).enumerate() {
        // Day columns start at the second cell of each body row.
        let cell_selector =
            Selector::parse(&format!("tbody td:nth-child({})", column + 2)).unwrap();

        let mut entries = Vec::new();
        for cell in table.select(&cell_selector) {
            let Some(detail) = cell.select(&detail_selector).next() else {
                continue;
            };
            let spans: Vec<ElementRef<'_>> = detail.select(&span_selector).collect();
            entries.push(entry_from_spans(&spans));
        }

        days.push(DaySchedule {
            day: day.clone(),
            entries,
        });
    }

    Ok(WeeklySchedule { days })
}

/// Splits a "Subject (Code)" cell into its parts. Text without the
/// parenthesized code keeps the full string as the subject and marks the
/// code as unknown.
pub fn split_subject(full: &str) -> (String, String) {
    let pattern = Regex::new(r"(.*) \((.*)\)").unwrap();
    match pattern.captures(full) {
        Some(caps) => (caps[1].to_string(), caps[2].to_string()),
        None => (full.to_string(), FIELD_UNKNOWN.to_string()),
    }
}

/// Builds the day label from a header cell: "weekday - date".
fn day_label(header: ElementRef<'_>) -> String {
    let raw = header.inner_html();
    let mut parts = raw.trim().splitn(2, "<br>");
    let weekday = parts.next().unwrap_or("").trim().to_string();
    let date = parts.next().unwrap_or("").trim().to_string();
    format!("{weekday} - {date}")
}

fn entry_from_spans(spans: &[ElementRef<'_>]) -> ScheduleEntry {
    let subject_full = span_text(spans, 1).unwrap_or_else(|| FIELD_UNKNOWN.to_string());
    let (subject, class_code) = split_subject(&subject_full);

    ScheduleEntry {
        room: span_text(spans, 0).unwrap_or_else(|| FIELD_UNKNOWN.to_string()),
        subject,
        class_code,
        periods: labelled_span(spans, 4, PERIODS_LABEL)
            .unwrap_or_else(|| FIELD_UNKNOWN.to_string()),
        start_time: labelled_span(spans, 5, START_TIME_LABEL)
            .unwrap_or_else(|| FIELD_UNKNOWN.to_string()),
        professor: labelled_span(spans, 6, PROFESSOR_LABEL).unwrap_or_default(),
        email: labelled_span(spans, 7, EMAIL_LABEL).unwrap_or_default(),
    }
}

fn span_text(spans: &[ElementRef<'_>], index: usize) -> Option<String> {
    spans
        .get(index)
        .map(|span| span.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

fn labelled_span(spans: &[ElementRef<'_>], index: usize, label: &str) -> Option<String> {
    span_text(spans, index)
        .map(|text| text.replacen(label, "", 1).trim().to_string())
        .filter(|text| !text.is_empty())
}
