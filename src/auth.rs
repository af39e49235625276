use crate::config::{Credentials, PortalConfig};
use crate::error::{PortalError, Result};
use crate::selectors;
use crate::session::{Session, SessionLauncher};
use scraper::{Html, Selector};
use tracing::{info, warn};

/// Signs into the portal, returning an authenticated session.
///
/// Each attempt owns a brand-new session: on failure the session is closed,
/// the loop backs off, and the next attempt launches a fresh browser rather
/// than reusing a page with unknown state. CAPTCHA is deterministic per
/// session, so it aborts immediately instead of burning attempts.
pub(crate) async fn login(
    launcher: &dyn SessionLauncher,
    credentials: &Credentials,
    config: &PortalConfig,
) -> Result<Box<dyn Session>> {
    let attempts = config.login_attempts.max(1);
    let mut last_error = None;

    for attempt in 1..=attempts {
        info!("login attempt {attempt}/{attempts}");
        let mut session = launcher.launch().await?;

        match attempt_login(session.as_mut(), credentials, config).await {
            Ok(()) => {
                info!("login succeeded");
                return Ok(session);
            }
            Err(e @ PortalError::CaptchaRequired) => {
                session.close().await;
                return Err(e);
            }
            Err(e) => {
                warn!("login attempt {attempt} failed: {e}");
                session.close().await;
                last_error = Some(e);
                if attempt < attempts {
                    tokio::time::sleep(config.retry_backoff).await;
                }
            }
        }
    }

    let source = last_error
        .unwrap_or_else(|| PortalError::LoginRejected("no attempt was made".to_string()));
    Err(PortalError::AuthExhausted {
        attempts,
        source: Box::new(source),
    })
}

/// Drives one pass through the login form on an already-launched session.
async fn attempt_login(
    session: &mut dyn Session,
    credentials: &Credentials,
    config: &PortalConfig,
) -> Result<()> {
    session.goto(selectors::LOGIN_URL).await?;

    let markup = session.content().await?;
    if has_captcha(&markup) {
        return Err(PortalError::CaptchaRequired);
    }

    session
        .fill(selectors::LOGIN_USERNAME, &credentials.username)
        .await?;
    config.delay.pause().await;
    session
        .fill(selectors::LOGIN_PASSWORD, &credentials.password)
        .await?;
    config.delay.pause().await;

    session.wait_for_element(selectors::LOGIN_SUBMIT).await?;
    session.click(selectors::LOGIN_SUBMIT).await?;
    session.wait_for_navigation().await?;

    let final_url = session.current_url().await?;
    if final_url.contains(selectors::LOGIN_PATH_MARKER) {
        let page = session.content().await?;
        let reason = if page.contains(selectors::BAD_CREDENTIALS_PHRASE) {
            "incorrect username or password"
        } else {
            "unknown rejection, still on the login page"
        };
        return Err(PortalError::LoginRejected(reason.to_string()));
    }

    info!("authenticated, landed on {final_url}");
    Ok(())
}

fn has_captcha(markup: &str) -> bool {
    let document = Html::parse_document(markup);
    let selector = Selector::parse(selectors::CAPTCHA_IFRAME).unwrap();
    document.select(&selector).next().is_some()
}
