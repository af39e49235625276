use serde::{Deserialize, Serialize};

/// Placeholder substituted when a field is missing from the rendered page.
/// Partial rows keep this value instead of failing the whole extraction.
pub const FIELD_UNKNOWN: &str = "Không rõ";

/// Placeholder the portal itself shows for exam rooms and locations that
/// have not been assigned yet.
pub const PENDING_UPDATE: &str = "Chưa cập nhật";

/// Which week of the timetable to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Week {
    /// The week currently shown when the schedule page opens.
    Current,
    /// The following week, reached through the week-switch button.
    Next,
}

/// One class occurrence inside a day column of the timetable.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScheduleEntry {
    /// Room where the class takes place.
    pub room: String,
    /// Course name, without the trailing class code.
    pub subject: String,
    /// Class code extracted from the "Subject (Code)" cell text.
    pub class_code: String,
    /// Teaching periods, e.g. "1-3".
    pub periods: String,
    /// Starting time of the first period.
    pub start_time: String,
    /// Lecturer name. Empty when the portal omits it.
    pub professor: String,
    /// Lecturer contact email. Empty when the portal omits it.
    pub email: String,
}

/// All classes of a single weekday.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DaySchedule {
    /// Day label built from the column header, e.g. "Thứ 2 - 10/02/2025".
    pub day: String,
    pub entries: Vec<ScheduleEntry>,
}

/// The full timetable for one week, in column order.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WeeklySchedule {
    pub days: Vec<DaySchedule>,
}

impl WeeklySchedule {
    /// True when no day of the week has any class.
    pub fn is_empty(&self) -> bool {
        self.days.iter().all(|d| d.entries.is_empty())
    }
}

/// One row of the portal's notification inbox.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Notification {
    pub subject: String,
    pub sender: String,
    pub date: String,
}

/// One row of the social-work activity log.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SocialWorkEvent {
    /// Ordinal shown in the first column.
    pub index: String,
    pub event: String,
    pub location: String,
    pub num_registered: String,
    /// Points awarded. "0" when the column is empty.
    pub points: String,
    pub start_time: String,
    pub end_time: String,
}

/// One scheduled exam sitting.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExamEntry {
    pub subject: String,
    /// Which attempt this sitting is (first sit, resit, ...).
    pub attempt: String,
    /// Exam date in "dd/mm/yyyy" form, exactly as printed by the portal.
    pub date: String,
    pub time: String,
    pub room: String,
    pub location: String,
    /// Exam format, e.g. written or oral.
    pub format: String,
    /// Absence marker column. "Không" when the student is not flagged.
    pub absent: String,
}

/// The exam timetable for the selected semester, filtered to sittings whose
/// room and location have been assigned, sorted by date ascending.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExamSchedule {
    pub exams: Vec<ExamEntry>,
    /// Academic year as shown on the page, or [`FIELD_UNKNOWN`].
    pub year: String,
    /// Semester label as shown on the page, or [`FIELD_UNKNOWN`].
    pub semester: String,
}

/// Accumulated credits and grade average across all semester tables.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CreditsSummary {
    /// Sum of the per-semester "STC Đạt Học Kỳ" figures.
    pub total_credits: f64,
    /// 10-point grade average, or the documented fallback when the page
    /// carries no average anywhere.
    pub average_score: f64,
}

/// Tuition totals from the account-fees header row, in VND.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FeesSummary {
    pub must_pay: u64,
    pub paid: u64,
    pub debt: u64,
}

/// A single label/value row from one of the profile tables.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ProfileField {
    pub label: String,
    pub value: String,
}

/// The student's profile, one section per table on the profile page.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StudentProfile {
    pub personal: Vec<ProfileField>,
    pub contact: Vec<ProfileField>,
    pub course: Vec<ProfileField>,
    pub emergency_contact: Vec<ProfileField>,
}
