//! Tool implementations exposed over the MCP surface.

pub mod search_and_save;

pub use search_and_save::{SearchAndSaveInput, SearchAndSaveResult, SearchAndSaveTool};
