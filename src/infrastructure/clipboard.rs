use arboard::Clipboard;

/// Copies text to the system clipboard.
pub struct ClipboardWriter;

impl ClipboardWriter {
    /// Returns a short confirmation or the clipboard error as text.
    pub fn copy(text: &str) -> Result<String, String> {
        let mut clipboard = Clipboard::new().map_err(|e| e.to_string())?;
        clipboard.set_text(text.to_string()).map_err(|e| e.to_string())?;
        Ok(format!("{} characters", text.chars().count()))
    }
}
