use crate::device_display::interface::{DeviceDisplay, ScanScreen};
use std::error::Error;
use std::io::Write;

/// Prints the status and prediction lines whenever they change. Preview
/// frames are not drawn.
#[derive(Default)]
pub struct DeviceDisplayConsole {
    last_lines: Option<(String, String)>,
}

impl DeviceDisplayConsole {
    pub fn new() -> Self {
        Self::default()
    }

    fn render_box(lines: &(String, String)) -> String {
        let width = lines.0.chars().count().max(lines.1.chars().count());
        let border = "─".repeat(width);
        format!(
            "┌{}┐\n│{:<width$}│\n│{:<width$}│\n└{}┘",
            border,
            lines.0,
            lines.1,
            border,
            width = width
        )
    }
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn show(&mut self, screen: &ScanScreen) -> Result<(), Box<dyn Error + Send + Sync>> {
        let lines = (screen.status_line(), screen.prediction_text.clone());

        if self.last_lines.as_ref() == Some(&lines) {
            return Ok(());
        }

        writeln!(std::io::stdout().lock(), "{}", Self::render_box(&lines))?;
        self.last_lines = Some(lines);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_box_pads_lines() {
        let rendered = DeviceDisplayConsole::render_box(&("abc".to_string(), "a".to_string()));

        assert_eq!(rendered, "┌───┐\n│abc│\n│a  │\n└───┘");
    }
}
