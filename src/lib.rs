pub mod client;
pub mod config;
pub mod error;
pub mod server;
pub mod tools;

pub use client::{SheetsClient, TokenProvider, Video, YouTubeClient};
pub use config::{Config, ServiceAccountKey};
pub use error::{Error, Result};
pub use server::Server;
pub use tools::{SearchAndSaveInput, SearchAndSaveResult, SearchAndSaveTool};
