//! Outbound API clients: YouTube Data API search and Google Sheets
//! append, plus the service-account token flow the Sheets client uses.

pub mod auth;
pub mod sheets;
pub mod youtube;

pub use auth::TokenProvider;
pub use sheets::{SheetsClient, HEADER_ROW};
pub use youtube::{Video, YouTubeClient};
