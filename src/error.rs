use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Failed to start the browser: {0}")]
    Launch(String),

    #[error("The login page is demanding a CAPTCHA; automated sign-in is not possible")]
    CaptchaRequired,

    #[error("The portal rejected the login: {0}")]
    LoginRejected(String),

    #[error("Login failed after {attempts} attempts: {source}")]
    AuthExhausted {
        attempts: u32,
        #[source]
        source: Box<PortalError>,
    },

    #[error("Navigation to {url} did not settle within {timeout_ms} ms")]
    NavigationTimeout { url: String, timeout_ms: u64 },

    #[error("Element `{selector}` never appeared. Page starts with: {snippet}")]
    ElementNotFound { selector: String, snippet: String },

    #[error("Could not find the `{0}` control on the page")]
    ControlNotFound(String),

    #[error("Browser command failed: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    #[error("Failed to parse page data: {0}")]
    Parsing(String),
}

pub type Result<T> = std::result::Result<T, PortalError>;
