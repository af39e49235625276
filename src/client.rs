use crate::auth;
use crate::config::{Credentials, PortalConfig};
use crate::error::{PortalError, Result};
use crate::models::{
    CreditsSummary, ExamSchedule, FeesSummary, Notification, SocialWorkEvent, StudentProfile, Week,
    WeeklySchedule,
};
use crate::parsers;
use crate::selectors;
use crate::session::{ChromeLauncher, Session, SessionLauncher};
use tracing::info;

/// Client for the student portal.
///
/// Every fetch call is self-contained: it signs in with the supplied
/// credentials, drives a fresh browser session to one portal page, projects
/// the rendered markup into structured data, and tears the session down.
/// Nothing is cached between calls and credentials are never stored.
pub struct PortalClient {
    launcher: Box<dyn SessionLauncher>,
    config: PortalConfig,
}

impl PortalClient {
    /// Client backed by a local headless Chrome.
    pub fn new(config: PortalConfig) -> Self {
        let launcher = Box::new(ChromeLauncher::new(config.clone()));
        Self { launcher, config }
    }

    /// Client with a custom session backend. Used by tests to swap the
    /// browser for a scripted double.
    pub fn with_launcher(launcher: Box<dyn SessionLauncher>, config: PortalConfig) -> Self {
        Self { launcher, config }
    }

    /// The week's timetable, one entry list per day column.
    pub async fn fetch_schedule(
        &self,
        credentials: &Credentials,
        week: Week,
    ) -> Result<WeeklySchedule> {
        info!("fetching schedule for {week:?} week");
        let mut session = self.open(credentials).await?;
        let html = schedule_html(session.as_mut(), week, &self.config).await;
        session.close().await;
        parsers::schedule::parse_schedule_from_html(&html?)
    }

    /// The notification inbox, newest first as the portal lists them.
    pub async fn fetch_notifications(&self, credentials: &Credentials) -> Result<Vec<Notification>> {
        info!("fetching notifications");
        let mut session = self.open(credentials).await?;
        let html = page_html(
            session.as_mut(),
            selectors::NOTIFICATIONS_URL,
            selectors::TABLE_BODY,
        )
        .await;
        session.close().await;
        parsers::notifications::parse_notifications_from_html(&html?)
    }

    /// The social-work activity log.
    pub async fn fetch_social_work(&self, credentials: &Credentials) -> Result<Vec<SocialWorkEvent>> {
        info!("fetching social work log");
        let mut session = self.open(credentials).await?;
        let html = page_html(
            session.as_mut(),
            selectors::SOCIAL_WORK_URL,
            selectors::TABLE_BODY,
        )
        .await;
        session.close().await;
        parsers::social_work::parse_social_work_from_html(&html?)
    }

    /// Accumulated credits and the 10-point grade average.
    pub async fn fetch_credits(&self, credentials: &Credentials) -> Result<CreditsSummary> {
        info!("fetching credits summary");
        let mut session = self.open(credentials).await?;
        let html = page_html(
            session.as_mut(),
            selectors::MARKS_URL,
            selectors::TABLE_CONTAINER,
        )
        .await;
        session.close().await;
        parsers::credits::parse_credits_from_html(&html?)
    }

    /// The exam timetable, filtered to sittings with an assigned room and
    /// sorted by date.
    pub async fn fetch_exam_schedule(&self, credentials: &Credentials) -> Result<ExamSchedule> {
        info!("fetching exam schedule");
        let mut session = self.open(credentials).await?;
        let html = page_html(session.as_mut(), selectors::EXAM_URL, selectors::EXAM_TABLE).await;
        session.close().await;
        parsers::exams::parse_exam_schedule_from_html(&html?)
    }

    /// Tuition totals from the account-fees page.
    pub async fn fetch_account_fees(&self, credentials: &Credentials) -> Result<FeesSummary> {
        info!("fetching account fees");
        let mut session = self.open(credentials).await?;
        let html = page_html(
            session.as_mut(),
            selectors::FEES_URL,
            selectors::TABLE_CONTAINER,
        )
        .await;
        session.close().await;
        parsers::fees::parse_fees_from_html(&html?)
    }

    /// The student's profile sections.
    pub async fn fetch_profile(&self, credentials: &Credentials) -> Result<StudentProfile> {
        info!("fetching student profile");
        let mut session = self.open(credentials).await?;
        let html = page_html(
            session.as_mut(),
            selectors::PROFILE_URL,
            selectors::TABLE_CONTAINER,
        )
        .await;
        session.close().await;
        parsers::profile::parse_profile_from_html(&html?)
    }

    async fn open(&self, credentials: &Credentials) -> Result<Box<dyn Session>> {
        auth::login(self.launcher.as_ref(), credentials, &self.config).await
    }
}

/// Walks an authenticated session through the student home page to `target`,
/// waits for the page's marker element, and returns the rendered markup.
/// The caller owns the session and closes it whatever this returns.
async fn page_html(session: &mut dyn Session, target: &str, marker: &str) -> Result<String> {
    session.goto(selectors::HOME_URL).await?;
    session.goto(target).await?;
    session.wait_for_element(marker).await?;
    session.content().await
}

/// Schedule variant of [`page_html`]: for the next-week view it presses the
/// week-switch button and gives the table a fixed delay to re-render.
async fn schedule_html(
    session: &mut dyn Session,
    week: Week,
    config: &PortalConfig,
) -> Result<String> {
    session.goto(selectors::HOME_URL).await?;
    session.goto(selectors::SCHEDULE_URL).await?;
    session.wait_for_element(selectors::SCHEDULE_TABLE).await?;

    if week == Week::Next {
        let clicked = session
            .click_nth(selectors::WEEK_BUTTONS, selectors::NEXT_WEEK_BUTTON_INDEX)
            .await?;
        if !clicked {
            return Err(PortalError::ControlNotFound("next week".to_string()));
        }
        info!("switched the timetable to next week");
        tokio::time::sleep(config.week_switch_delay).await;
    }

    session.content().await
}
