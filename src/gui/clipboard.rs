//! Clipboard functionality

use arboard::Clipboard;

/// Get clipboard text, trimmed
pub fn get_clipboard_content() -> Result<String, String> {
    let mut clipboard =
        Clipboard::new().map_err(|e| format!("Failed to access clipboard: {}", e))?;

    clipboard
        .get_text()
        .map(|content| content.trim().to_string())
        .map_err(|e| format!("Failed to read clipboard: {}", e))
}
