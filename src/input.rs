//! Readers for captured text.

use std::io::{IsTerminal, Read};

use anyhow::{Context, Result};

/// Text currently on the system clipboard.
pub fn read_clipboard() -> Result<String> {
    let mut clipboard = arboard::Clipboard::new().context("Clipboard unavailable")?;
    clipboard.get_text().context("Clipboard holds no text")
}

/// Everything piped into stdin, or `None` when stdin is an interactive terminal.
pub fn read_stdin() -> Result<Option<String>> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut content = String::new();
    stdin
        .read_to_string(&mut content)
        .context("Failed to read piped input")?;
    Ok(Some(content))
}
