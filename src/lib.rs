// Declare all our modules
mod auth;
mod client;
mod config;
mod error;
mod models;
pub mod parsers;
pub mod selectors;
mod session;

// Publicly export the parts of our library that users will need
pub use client::PortalClient;
pub use config::{Credentials, DelayConfig, PortalConfig};
pub use error::{PortalError, Result};
pub use models::*; // Exposes all structs like WeeklySchedule, ExamEntry, etc.
pub use session::{ChromeLauncher, ChromeSession, Session, SessionLauncher};
