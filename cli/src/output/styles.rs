//! Output styles using owo-colors stylesheet pattern

use owo_colors::Style;

/// Centralized stylesheet for CLI output colors.
#[derive(Default, Clone)]
pub struct Styles {
    /// `OK` and success messages (green)
    pub success: Style,
    /// `FAILED` and error messages (red)
    pub error: Style,
    /// Bold text
    pub bold: Style,
    /// Headers/section titles
    pub header: Style,
}

impl Styles {
    /// Apply colors to the stylesheet.
    pub fn colorize(&mut self) {
        self.success = Style::new().green().bold();
        self.error = Style::new().red().bold();
        self.bold = Style::new().bold();
        self.header = Style::new().bold().cyan();
    }
}
