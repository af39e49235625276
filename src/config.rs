use rand::Rng;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_CHROME_PATH: &str = "/usr/bin/google-chrome";

/// Portal account credentials. Supplied by the caller for every fetch call;
/// the client never stores them.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Reads `VHU_EMAIL` / `VHU_PASSWORD` from the environment, loading a
    /// `.env` file first if one is present.
    pub fn from_env() -> Option<Self> {
        dotenvy::dotenv().ok();
        let username = env::var("VHU_EMAIL").ok()?;
        let password = env::var("VHU_PASSWORD").ok()?;
        Some(Self { username, password })
    }
}

/// Configuration for pacing form interactions with randomized delays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelayConfig {
    /// Minimum sleep duration in milliseconds between interactions.
    pub min_delay_ms: u64,
    /// Maximum sleep duration in milliseconds between interactions.
    pub max_delay_ms: u64,
    /// Whether the randomized delay logic is active.
    pub enabled: bool,
}

impl Default for DelayConfig {
    /// Default configuration: 100ms - 400ms, enabled.
    fn default() -> Self {
        Self {
            min_delay_ms: 100,
            max_delay_ms: 400,
            enabled: true,
        }
    }
}

impl DelayConfig {
    /// Sleeps for a random duration inside the configured range.
    pub async fn pause(&self) {
        if !self.enabled || self.max_delay_ms == 0 {
            return;
        }
        let ms = rand::rng().random_range(self.min_delay_ms..=self.max_delay_ms);
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

/// Runtime settings for the browser session and the login loop.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Path to the Chrome/Chromium executable.
    pub browser_path: PathBuf,
    /// Browser window size. The portal renders fine at a small resolution.
    pub window_size: (u32, u32),
    /// How long to wait for the browser process to come up.
    pub launch_timeout: Duration,
    /// Bound on each navigation, including the network-settle wait.
    pub nav_timeout: Duration,
    /// Bound on waits for a specific element to appear.
    pub element_timeout: Duration,
    /// Total login attempts before giving up.
    pub login_attempts: u32,
    /// Pause between login attempts.
    pub retry_backoff: Duration,
    /// Fixed pause after clicking the week-switch button, giving the
    /// timetable time to re-render.
    pub week_switch_delay: Duration,
    /// Pacing between form interactions during login.
    pub delay: DelayConfig,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            browser_path: PathBuf::from(DEFAULT_CHROME_PATH),
            window_size: (800, 600),
            launch_timeout: Duration::from_secs(30),
            nav_timeout: Duration::from_secs(60),
            element_timeout: Duration::from_secs(60),
            login_attempts: 5,
            retry_backoff: Duration::from_secs(5),
            week_switch_delay: Duration::from_secs(5),
            delay: DelayConfig::default(),
        }
    }
}

impl PortalConfig {
    /// Default configuration with the browser path taken from `CHROME_PATH`
    /// when that variable is set.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let mut config = Self::default();
        if let Ok(path) = env::var("CHROME_PATH") {
            config.browser_path = PathBuf::from(path);
        }
        config
    }
}
