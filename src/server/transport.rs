//! Stdio transport sanity checks.

use std::io;
use tracing::{debug, warn};

/// Whether stdin looks like a pipe from an MCP client rather than an
/// interactive terminal.
#[must_use]
pub fn stdin_is_piped() -> bool {
    !atty::is(atty::Stream::Stdin)
}

/// Validate the stdio transport before serving. A terminal on stdin is
/// allowed (useful when poking at the server by hand) but worth a warning,
/// since a real MCP client always pipes.
pub fn validate_stdio_transport() -> io::Result<()> {
    if stdin_is_piped() {
        debug!("Stdio transport detected - ready for MCP communication");
    } else {
        warn!("Stdin is a terminal; expecting an MCP client to pipe stdio in production");
    }
    Ok(())
}
