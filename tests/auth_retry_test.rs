// tests/auth_retry_test.rs

mod common;

use common::{MockLauncher, SessionScript, fast_config, test_credentials};
use vhu_portal_core::{PortalClient, PortalError};

const LOGIN_PAGE_WITH_PHRASE: &str = r#"
<html><body>
  <form><input name="email"><input name="password"></form>
  <p>Username or password is incorrect</p>
</body></html>"#;

const LOGIN_PAGE_PLAIN: &str = r#"
<html><body>
  <form><input name="email"><input name="password"></form>
</body></html>"#;

const LOGIN_PAGE_WITH_CAPTCHA: &str = r#"
<html><body>
  <iframe src="https://challenge.example/captcha/v2"></iframe>
  <form><input name="email"><input name="password"></form>
</body></html>"#;

#[tokio::test]
async fn rejected_login_is_retried_exactly_max_attempts_times() {
    let (launcher, recorder) = MockLauncher::new(SessionScript::rejected_login(LOGIN_PAGE_PLAIN));
    let client = PortalClient::with_launcher(Box::new(launcher), fast_config(3));

    let result = client.fetch_notifications(&test_credentials()).await;

    match result {
        Err(PortalError::AuthExhausted { attempts, source }) => {
            assert_eq!(attempts, 3);
            assert!(matches!(*source, PortalError::LoginRejected(_)));
        }
        other => panic!("expected AuthExhausted, got {other:?}"),
    }
    assert_eq!(recorder.launches(), 3, "one fresh session per attempt");
    recorder.assert_all_closed_once();
}

#[tokio::test]
async fn rejection_with_known_phrase_names_the_credentials() {
    let (launcher, recorder) =
        MockLauncher::new(SessionScript::rejected_login(LOGIN_PAGE_WITH_PHRASE));
    let client = PortalClient::with_launcher(Box::new(launcher), fast_config(1));

    let result = client.fetch_notifications(&test_credentials()).await;

    match result {
        Err(PortalError::AuthExhausted { source, .. }) => match *source {
            PortalError::LoginRejected(reason) => {
                assert!(reason.contains("incorrect username or password"));
            }
            other => panic!("expected LoginRejected, got {other:?}"),
        },
        other => panic!("expected AuthExhausted, got {other:?}"),
    }
    recorder.assert_all_closed_once();
}

#[tokio::test]
async fn captcha_aborts_without_retrying() {
    let (launcher, recorder) =
        MockLauncher::new(SessionScript::success(LOGIN_PAGE_WITH_CAPTCHA));
    let client = PortalClient::with_launcher(Box::new(launcher), fast_config(5));

    let result = client.fetch_notifications(&test_credentials()).await;

    assert!(matches!(result, Err(PortalError::CaptchaRequired)));
    assert_eq!(
        recorder.launches(),
        1,
        "a CAPTCHA is deterministic per session, retrying gains nothing"
    );
    recorder.assert_all_closed_once();
}
