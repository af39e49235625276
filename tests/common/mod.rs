// Shared scripted doubles for the browser session, so the retry and cleanup
// properties can be checked without launching Chrome.
#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use vhu_portal_core::{
    Credentials, DelayConfig, PortalConfig, PortalError, Result, Session, SessionLauncher,
};

pub const STUDENT_HOME_URL: &str = "https://portal.vhu.edu.vn/student";
pub const LOGIN_PAGE_URL: &str = "https://portal.vhu.edu.vn/login";

pub fn test_credentials() -> Credentials {
    Credentials::new("student@vhu.edu.vn", "secret")
}

/// Config with all waits zeroed so retry loops finish instantly.
pub fn fast_config(login_attempts: u32) -> PortalConfig {
    PortalConfig {
        login_attempts,
        retry_backoff: Duration::ZERO,
        week_switch_delay: Duration::ZERO,
        delay: DelayConfig {
            min_delay_ms: 0,
            max_delay_ms: 0,
            enabled: false,
        },
        ..PortalConfig::default()
    }
}

/// Script for a [`MockSession`]: what the fake portal serves and where the
/// session should fail.
#[derive(Clone)]
pub struct SessionScript {
    /// Markup returned by every `content` call.
    pub html: String,
    /// URL reported after the login form submits.
    pub landing_url: String,
    /// Fail `goto` calls for exactly this URL.
    pub fail_goto: Option<String>,
    /// Fail `wait_for_element` calls for exactly this selector.
    pub fail_wait: Option<String>,
    /// Fail the nth `content` call (1-based).
    pub fail_content_at: Option<usize>,
    /// Whether the week-switch button exists on the schedule page.
    pub week_button_present: bool,
}

impl SessionScript {
    /// A session where login succeeds and every step works.
    pub fn success(html: &str) -> Self {
        Self {
            html: html.to_string(),
            landing_url: STUDENT_HOME_URL.to_string(),
            fail_goto: None,
            fail_wait: None,
            fail_content_at: None,
            week_button_present: true,
        }
    }

    /// A session where the portal bounces the login back to the login page.
    pub fn rejected_login(html: &str) -> Self {
        Self {
            landing_url: LOGIN_PAGE_URL.to_string(),
            ..Self::success(html)
        }
    }
}

pub struct MockSession {
    script: SessionScript,
    content_calls: usize,
    closes: Arc<AtomicUsize>,
}

#[async_trait]
impl Session for MockSession {
    async fn goto(&mut self, url: &str) -> Result<()> {
        match &self.script.fail_goto {
            Some(bad) if bad == url => Err(PortalError::NavigationTimeout {
                url: url.to_string(),
                timeout_ms: 0,
            }),
            _ => Ok(()),
        }
    }

    async fn current_url(&mut self) -> Result<String> {
        Ok(self.script.landing_url.clone())
    }

    async fn content(&mut self) -> Result<String> {
        self.content_calls += 1;
        if self.script.fail_content_at == Some(self.content_calls) {
            return Err(PortalError::Parsing("scripted content failure".to_string()));
        }
        Ok(self.script.html.clone())
    }

    async fn fill(&mut self, _selector: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    async fn click(&mut self, _selector: &str) -> Result<()> {
        Ok(())
    }

    async fn click_nth(&mut self, _selector: &str, _index: usize) -> Result<bool> {
        Ok(self.script.week_button_present)
    }

    async fn wait_for_element(&mut self, selector: &str) -> Result<()> {
        match &self.script.fail_wait {
            Some(bad) if bad == selector => Err(PortalError::ElementNotFound {
                selector: selector.to_string(),
                snippet: "<scripted>".to_string(),
            }),
            _ => Ok(()),
        }
    }

    async fn wait_for_navigation(&mut self) -> Result<()> {
        Ok(())
    }

    async fn close(&mut self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Records how many sessions were launched and how often each was closed.
#[derive(Default)]
pub struct LaunchRecorder {
    launches: AtomicUsize,
    close_counters: Mutex<Vec<Arc<AtomicUsize>>>,
}

impl LaunchRecorder {
    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }

    pub fn close_counts(&self) -> Vec<usize> {
        self.close_counters
            .lock()
            .unwrap()
            .iter()
            .map(|counter| counter.load(Ordering::SeqCst))
            .collect()
    }

    pub fn assert_all_closed_once(&self) {
        let counts = self.close_counts();
        assert!(!counts.is_empty(), "no session was ever launched");
        assert!(
            counts.iter().all(|&count| count == 1),
            "each session must be closed exactly once, got {counts:?}"
        );
    }
}

/// Launcher handing out scripted sessions, one per login attempt.
pub struct MockLauncher {
    script: SessionScript,
    recorder: Arc<LaunchRecorder>,
}

impl MockLauncher {
    pub fn new(script: SessionScript) -> (Self, Arc<LaunchRecorder>) {
        let recorder = Arc::new(LaunchRecorder::default());
        (
            Self {
                script,
                recorder: Arc::clone(&recorder),
            },
            recorder,
        )
    }
}

#[async_trait]
impl SessionLauncher for MockLauncher {
    async fn launch(&self) -> Result<Box<dyn Session>> {
        self.recorder.launches.fetch_add(1, Ordering::SeqCst);
        let closes = Arc::new(AtomicUsize::new(0));
        self.recorder
            .close_counters
            .lock()
            .unwrap()
            .push(Arc::clone(&closes));
        Ok(Box::new(MockSession {
            script: self.script.clone(),
            content_calls: 0,
            closes,
        }))
    }
}
