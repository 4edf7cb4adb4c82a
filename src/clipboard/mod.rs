use anyhow::{Context, Result};
use arboard::Clipboard;

use crate::models::DisplayModel;

/// Maximum clipboard size (10MB)
const MAX_CLIPBOARD_SIZE: usize = 10 * 1024 * 1024;

/// Clipboard seam (allows mocking in tests)
trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Real clipboard implementation using arboard
struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

fn validate_clipboard_text(text: &str) -> Result<()> {
    if text.is_empty() {
        anyhow::bail!("Cannot copy empty text to clipboard");
    }

    if text.len() > MAX_CLIPBOARD_SIZE {
        anyhow::bail!(
            "Text too large for clipboard ({} bytes, max {})",
            text.len(),
            MAX_CLIPBOARD_SIZE
        );
    }

    Ok(())
}

/// The text copied for a result: its external link
fn link_for(model: &DisplayModel) -> Result<&str> {
    model
        .external_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .context("This result has no IMDb link")
}

/// Link copy with an injected provider (test use)
#[cfg(test)]
fn copy_link_with_provider(
    model: &DisplayModel,
    provider: &mut dyn ClipboardProvider,
) -> Result<String> {
    let link = link_for(model)?;
    validate_clipboard_text(link)?;
    provider.set_text(link)?;
    Ok(link.to_string())
}

/// Copy text to the system clipboard.
///
/// # Errors
/// Returns error if:
/// - Text is empty
/// - Text is too large for clipboard (>10MB)
/// - System clipboard is unavailable (headless environment, denied access)
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    // Validate before touching the system clipboard
    validate_clipboard_text(text)?;

    let mut clipboard = SystemClipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

/// Copy a result's IMDb link to the system clipboard, returning the link
pub fn copy_link(model: &DisplayModel) -> Result<String> {
    let link = link_for(model)?;
    copy_to_clipboard(link)?;
    Ok(link.to_string())
}
