//! Every portal URL and CSS selector the crate depends on, in one place.
//!
//! The portal's markup is an undocumented wire format that changes without
//! notice. Keeping each lookup path here as data means a markup change is an
//! edit to this file, not to extraction logic.

// Portal pages.
pub const LOGIN_URL: &str = "https://portal.vhu.edu.vn/login";
pub const HOME_URL: &str = "https://portal.vhu.edu.vn/student";
pub const SCHEDULE_URL: &str = "https://portal.vhu.edu.vn/student/schedules";
pub const NOTIFICATIONS_URL: &str = "https://portal.vhu.edu.vn/student/index";
pub const SOCIAL_WORK_URL: &str = "https://portal.vhu.edu.vn/student/congtacxahoi";
pub const MARKS_URL: &str = "https://portal.vhu.edu.vn/student/marks";
pub const EXAM_URL: &str = "https://portal.vhu.edu.vn/student/exam";
pub const FEES_URL: &str = "https://portal.vhu.edu.vn/student/accountfees";
pub const PROFILE_URL: &str = "https://portal.vhu.edu.vn/student/profile";

/// URL fragment that identifies the login page after a navigation.
pub const LOGIN_PATH_MARKER: &str = "/login";

/// Phrase the portal prints on the login page for bad credentials.
pub const BAD_CREDENTIALS_PHRASE: &str = "Username or password is incorrect";

// Login form.
pub const LOGIN_USERNAME: &str = "input[name='email']";
pub const LOGIN_PASSWORD: &str = "input[name='password']";
pub const LOGIN_SUBMIT: &str = "button[type='submit']";
pub const CAPTCHA_IFRAME: &str = "iframe[src*='captcha']";

// Timetable page.
pub const SCHEDULE_TABLE: &str = "#psc-table-head";
pub const SCHEDULE_HEADERS: &str = "thead th";
pub const SCHEDULE_CELL_DETAIL: &str = ".DetailSchedule";
pub const WEEK_BUTTONS: &str = ".MuiButton-containedPrimary";
/// Zero-based position of the "next week" button in [`WEEK_BUTTONS`].
pub const NEXT_WEEK_BUTTON_INDEX: usize = 2;

// Shared MUI table anchors.
pub const TABLE_BODY: &str = ".MuiTableBody-root";
pub const TABLE_BODY_ROWS: &str = ".MuiTableBody-root tr";
pub const TABLE_CONTAINER: &str = ".MuiTableContainer-root";
pub const CONTAINER_TABLES: &str = ".MuiTableContainer-root table";

// Exam page.
pub const EXAM_TABLE: &str = ".MuiTableContainer-root.psc-table";
pub const EXAM_ROWS: &str = "tbody tr.psc_ExamSapToi";
pub const EXAM_YEAR_INPUT: &str = "input[name='NamHienTai']";
pub const EXAM_SEMESTER_SELECT: &str = ".MuiSelect-select";

// Fees page.
pub const FEES_HEADER_ROW: &str = "thead tr";
