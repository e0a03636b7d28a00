//! Terminal markdown rendering for assistant prose.
//!
//! Wraps `termimad` with the client's skin. Assistant replies are plain
//! prose with light markdown (emphasis, lists, inline code).

use termimad::MadSkin;

/// Terminal markdown renderer.
pub struct ChatRenderer {
    skin: MadSkin,
}

impl ChatRenderer {
    /// Create a renderer with the default dark skin and yellow inline code.
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);
        Self { skin }
    }

    /// Render a markdown response for terminal display.
    pub fn render(&self, markdown: &str) -> String {
        let mut output = String::new();
        for line in markdown.lines() {
            let rendered = self.skin.term_text(line);
            output.push_str(&format!("  {rendered}"));
        }
        output
    }
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}
