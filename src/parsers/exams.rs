use super::cell_text;
use crate::error::{PortalError, Result};
use crate::models::{ExamEntry, ExamSchedule, FIELD_UNKNOWN, PENDING_UPDATE};
use crate::selectors;
use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};

const NOT_ABSENT: &str = "Không";

/// Parses the exam page: upcoming sittings, filtered to those with an
/// assigned room and location, sorted by date ascending.
pub fn parse_exam_schedule_from_html(html: &str) -> Result<ExamSchedule> {
    let document = Html::parse_document(html);
    let table_selector = Selector::parse(selectors::EXAM_TABLE).unwrap();
    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| PortalError::Parsing("exam table is missing".to_string()))?;

    let row_selector = Selector::parse(selectors::EXAM_ROWS).unwrap();
    let rows: Vec<ElementRef<'_>> = table.select(&row_selector).collect();
    if rows.is_empty() {
        return Ok(ExamSchedule {
            exams: Vec::new(),
            year: FIELD_UNKNOWN.to_string(),
            semester: FIELD_UNKNOWN.to_string(),
        });
    }

    let cell_selector = Selector::parse("td").unwrap();
    let mut exams: Vec<ExamEntry> = rows
        .into_iter()
        .map(|row| {
            let cells: Vec<ElementRef<'_>> = row.select(&cell_selector).collect();
            let unknown = || FIELD_UNKNOWN.to_string();
            let pending = || PENDING_UPDATE.to_string();
            ExamEntry {
                subject: cell_text(&cells, 0).unwrap_or_else(unknown),
                attempt: cell_text(&cells, 1).unwrap_or_else(unknown),
                date: cell_text(&cells, 2).unwrap_or_else(unknown),
                time: cell_text(&cells, 3).unwrap_or_else(pending),
                room: cell_text(&cells, 4).unwrap_or_else(pending),
                location: cell_text(&cells, 5).unwrap_or_else(pending),
                format: cell_text(&cells, 6).unwrap_or_else(unknown),
                absent: cell_text(&cells, 7).unwrap_or_else(|| NOT_ABSENT.to_string()),
            }
        })
        .collect();

    // Sittings without an assigned room or location are not actionable yet.
    exams.retain(|exam| exam.room != PENDING_UPDATE && exam.location != PENDING_UPDATE);
    exams.sort_by_key(|exam| parse_exam_date(&exam.date).unwrap_or(NaiveDate::MAX));

    let year_selector = Selector::parse(selectors::EXAM_YEAR_INPUT).unwrap();
    let year = document
        .select(&year_selector)
        .next()
        .and_then(|input| input.value().attr("value"))
        .map(str::to_string)
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| FIELD_UNKNOWN.to_string());

    let semester_selector = Selector::parse(selectors::EXAM_SEMESTER_SELECT).unwrap();
    let semester = document
        .select(&semester_selector)
        .next()
        .map(|select| select.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| FIELD_UNKNOWN.to_string());

    Ok(ExamSchedule {
        exams,
        year,
        semester,
    })
}

/// Literal "dd/mm/yyyy" split. No calendar or time-zone handling.
fn parse_exam_date(date: &str) -> Option<NaiveDate> {
    let mut parts = date.split('/');
    let day: u32 = parts.next()?.trim().parse().ok()?;
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let year: i32 = parts.next()?.trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
