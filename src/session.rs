use crate::config::PortalConfig;
use crate::error::{PortalError, Result};
use async_trait::async_trait;
use chromiumoxide::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// How much of the page markup to keep when an element wait times out.
const DIAGNOSTIC_SNIPPET_CHARS: usize = 500;

/// Interval between element-presence polls.
const ELEMENT_POLL_MS: u64 = 250;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Flags for running Chrome inside a constrained container host.
const LAUNCH_ARGS: [&str; 8] = [
    "--disable-setuid-sandbox",
    "--disable-dev-shm-usage",
    "--disable-gpu",
    "--disable-extensions",
    "--disable-background-networking",
    "--disable-accelerated-2d-canvas",
    "--disable-features=site-per-process",
    "--use-gl=swiftshader",
];

/// One browser process plus one page: the unit of automation for a single
/// extraction call. A session never outlives the call that created it.
#[async_trait]
pub trait Session: Send {
    /// Navigates to `url` and waits until network activity settles.
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// The URL the page ended up on after the last navigation.
    async fn current_url(&mut self) -> Result<String>;

    /// The rendered markup of the current page.
    async fn content(&mut self) -> Result<String>;

    /// Waits for `selector` to appear, then types `value` into it.
    async fn fill(&mut self, selector: &str, value: &str) -> Result<()>;

    /// Clicks the first element matching `selector`.
    async fn click(&mut self, selector: &str) -> Result<()>;

    /// Clicks the element at `index` among those matching `selector`.
    /// Returns `Ok(false)` when no such element exists.
    async fn click_nth(&mut self, selector: &str, index: usize) -> Result<bool>;

    /// Waits for `selector` to appear, bounded by the element timeout.
    /// On timeout the error carries a prefix of the page markup.
    async fn wait_for_element(&mut self, selector: &str) -> Result<()>;

    /// Waits for the navigation triggered by the last interaction to finish
    /// and the network to settle.
    async fn wait_for_navigation(&mut self) -> Result<()>;

    /// Tears the session down. Best effort: a session is closed exactly once
    /// on every exit path, so errors here are logged and swallowed.
    async fn close(&mut self);
}

/// Starts a fresh [`Session`]. The login loop re-launches through this trait
/// on every attempt rather than reusing a page with broken state.
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn Session>>;
}

/// Launches headless Chrome with the fixed portal-scraping profile.
pub struct ChromeLauncher {
    config: PortalConfig,
}

impl ChromeLauncher {
    pub fn new(config: PortalConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SessionLauncher for ChromeLauncher {
    async fn launch(&self) -> Result<Box<dyn Session>> {
        let (width, height) = self.config.window_size;
        let browser_config = BrowserConfig::builder()
            .chrome_executable(&self.config.browser_path)
            .no_sandbox()
            .window_size(width, height)
            .launch_timeout(self.config.launch_timeout)
            // The settle poll runs inside a single CDP evaluate call, so the
            // per-request timeout must outlast the navigation timeout.
            .request_timeout(self.config.nav_timeout + Duration::from_secs(5))
            .args(LAUNCH_ARGS)
            .arg(format!("--user-agent={USER_AGENT}"))
            .build()
            .map_err(PortalError::Launch)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| PortalError::Launch(e.to_string()))?;

        // The CDP event stream must be drained for the connection to work.
        let handler_task = tokio::task::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler_task.abort();
                return Err(PortalError::Launch(e.to_string()));
            }
        };

        debug!("browser launched");
        Ok(Box::new(ChromeSession {
            browser,
            page,
            handler_task,
            nav_timeout: self.config.nav_timeout,
            element_timeout: self.config.element_timeout,
        }))
    }
}

/// Production [`Session`] backed by a Chrome process over CDP.
pub struct ChromeSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    nav_timeout: Duration,
    element_timeout: Duration,
}

impl ChromeSession {
    /// Polls the page until `document.readyState` is complete and the
    /// resource count has been stable for a second. The equivalent of
    /// waiting for "network idle" in other automation stacks.
    async fn settle(&self, url: &str) -> Result<()> {
        let timeout_ms = self.nav_timeout.as_millis() as u64;
        let script = format!(
            r#"(async () => {{
                const timeoutMs = {timeout_ms};
                const idleMs = 1000;
                const interval = 250;
                const start = Date.now();
                let lastCount = 0;
                let stableMs = 0;
                try {{ lastCount = performance.getEntriesByType('resource').length; }} catch (_) {{}}
                while (Date.now() - start < timeoutMs) {{
                    await new Promise(r => setTimeout(r, interval));
                    let curCount = lastCount;
                    try {{ curCount = performance.getEntriesByType('resource').length; }} catch (_) {{}}
                    if (document.readyState === 'complete' && curCount === lastCount) {{
                        stableMs += interval;
                        if (stableMs >= idleMs) return {{ ok: true }};
                    }} else {{
                        stableMs = 0;
                    }}
                    lastCount = curCount;
                }}
                return {{ ok: false }};
            }})()"#
        );

        let result = self.page.evaluate(script).await?;
        let ok = result
            .into_value::<serde_json::Value>()
            .ok()
            .and_then(|value| value.get("ok").and_then(|ok| ok.as_bool()))
            .unwrap_or(false);

        if ok {
            Ok(())
        } else {
            Err(PortalError::NavigationTimeout {
                url: url.to_string(),
                timeout_ms,
            })
        }
    }

    async fn markup_snippet(&self) -> String {
        match self.page.content().await {
            Ok(html) => html.chars().take(DIAGNOSTIC_SNIPPET_CHARS).collect(),
            Err(_) => String::from("<unavailable>"),
        }
    }
}

#[async_trait]
impl Session for ChromeSession {
    async fn goto(&mut self, url: &str) -> Result<()> {
        let navigation = async {
            self.page.goto(url).await?;
            self.page.wait_for_navigation().await?;
            Ok::<_, PortalError>(())
        };
        tokio::time::timeout(self.nav_timeout, navigation)
            .await
            .map_err(|_| PortalError::NavigationTimeout {
                url: url.to_string(),
                timeout_ms: self.nav_timeout.as_millis() as u64,
            })??;
        self.settle(url).await
    }

    async fn current_url(&mut self) -> Result<String> {
        self.page
            .url()
            .await?
            .ok_or_else(|| PortalError::Parsing("the page reported no URL".to_string()))
    }

    async fn content(&mut self) -> Result<String> {
        Ok(self.page.content().await?)
    }

    async fn fill(&mut self, selector: &str, value: &str) -> Result<()> {
        self.wait_for_element(selector).await?;
        let element = self.page.find_element(selector).await?;
        element.click().await?;
        element.type_str(value).await?;
        Ok(())
    }

    async fn click(&mut self, selector: &str) -> Result<()> {
        let element = self.page.find_element(selector).await?;
        element.click().await?;
        Ok(())
    }

    async fn click_nth(&mut self, selector: &str, index: usize) -> Result<bool> {
        let elements = self.page.find_elements(selector).await?;
        match elements.get(index) {
            Some(element) => {
                element.click().await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn wait_for_element(&mut self, selector: &str) -> Result<()> {
        let deadline = Instant::now() + self.element_timeout;
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(PortalError::ElementNotFound {
                    selector: selector.to_string(),
                    snippet: self.markup_snippet().await,
                });
            }
            tokio::time::sleep(Duration::from_millis(ELEMENT_POLL_MS)).await;
        }
    }

    async fn wait_for_navigation(&mut self) -> Result<()> {
        let url = self.page.url().await.ok().flatten().unwrap_or_default();
        tokio::time::timeout(self.nav_timeout, self.page.wait_for_navigation())
            .await
            .map_err(|_| PortalError::NavigationTimeout {
                url: url.clone(),
                timeout_ms: self.nav_timeout.as_millis() as u64,
            })??;
        self.settle(&url).await
    }

    async fn close(&mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("browser close failed: {e}");
        }
        let _ = self.browser.wait().await;
        self.handler_task.abort();
        debug!("browser session closed");
    }
}
