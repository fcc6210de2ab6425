//! `CellBackend`: Renders text as terminal cells.

use super::backend::{Glyphs, RenderBackend};
use crate::buffer::{Buffer, Cell, Rgb};
use crate::error::RenderError;
use crate::layout::Size;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Terminal-cell text renderer.
///
/// Each grapheme takes one or two columns as reported by `unicode-width`.
/// Text sits on the first row of the line; any further rows of
/// `line_height` are background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellBackend {
    line_height: u16,
    tab_width: u16,
}

impl Default for CellBackend {
    fn default() -> Self {
        Self::new(1)
    }
}

impl CellBackend {
    /// Create a backend whose lines are `line_height` rows tall.
    pub const fn new(line_height: u16) -> Self {
        Self {
            line_height,
            tab_width: 4,
        }
    }

    /// Set the tab stop interval.
    #[must_use]
    pub const fn with_tab_width(mut self, tab_width: u16) -> Self {
        self.tab_width = if tab_width == 0 { 1 } else { tab_width };
        self
    }

    /// Split `text` into (grapheme, width) runs with tabs expanded.
    fn layout<'a>(&self, text: &'a str) -> Result<Vec<(&'a str, u16)>, RenderError> {
        let mut runs = Vec::new();
        let mut col = 0u16;

        for grapheme in text.graphemes(true) {
            if grapheme == "\t" {
                let spaces = self.tab_width - (col % self.tab_width);
                for _ in 0..spaces {
                    runs.push((" ", 1));
                }
                col = col.saturating_add(spaces);
                continue;
            }

            // A carriage return only ever clusters as "\r" or "\r\n".
            let grapheme = grapheme.trim_start_matches('\r');
            if grapheme.is_empty() {
                continue;
            }

            if let Some(c) = grapheme.chars().find(|c| c.is_control()) {
                return Err(RenderError::Unrenderable(c));
            }

            let width = UnicodeWidthStr::width(grapheme).clamp(1, 2) as u16;
            runs.push((grapheme, width));
            col = col.saturating_add(width);
        }

        Ok(runs)
    }
}

impl RenderBackend for CellBackend {
    fn measure(&self, text: &str) -> Result<Size, RenderError> {
        let width = self
            .layout(text)?
            .iter()
            .fold(0u16, |acc, (_, w)| acc.saturating_add(*w));
        Ok(Size::new(width, self.line_height))
    }

    fn render(&self, text: &str, fg: Rgb, bg: Rgb) -> Result<Glyphs, RenderError> {
        if self.line_height == 0 {
            return Err(RenderError::Backend("line height is zero".to_string()));
        }
        let runs = self.layout(text)?;
        let width = runs.iter().fold(0u16, |acc, (_, w)| acc.saturating_add(*w));

        let mut buffer = Buffer::filled(width.max(1), self.line_height, Cell::blank(bg));
        let mut col = 0u16;
        for (grapheme, w) in runs {
            buffer.set_grapheme(col, 0, grapheme, fg, bg);
            col = col.saturating_add(w);
        }

        Ok(Glyphs::new(buffer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_ascii_and_wide() {
        let backend = CellBackend::default();
        assert_eq!(backend.measure("M").unwrap(), Size::new(1, 1));
        assert_eq!(backend.measure("ab日").unwrap(), Size::new(4, 1));
        assert_eq!(CellBackend::new(2).measure("M").unwrap().height, 2);
    }

    #[test]
    fn test_render_colors_and_rows() {
        let fg = Rgb::new(255, 255, 0);
        let bg = Rgb::new(0, 0, 255);
        let glyphs = CellBackend::new(2).render("hi", fg, bg).unwrap();
        let buffer = glyphs.buffer();

        assert_eq!(glyphs.size(), Size::new(2, 2));
        assert_eq!(buffer.row_text(0), "hi");
        assert_eq!(buffer.row_text(1), "  ");
        assert_eq!(buffer.get(0, 0).unwrap().fg(), fg);
        assert_eq!(buffer.get(1, 1).unwrap().bg(), bg);
    }

    #[test]
    fn test_tab_expands_to_stop() {
        let backend = CellBackend::default();
        assert_eq!(backend.measure("a\tb").unwrap().width, 5);
        assert_eq!(backend.with_tab_width(8).measure("\t").unwrap().width, 8);

        let glyphs = backend.render("ab\tc", Rgb::WHITE, Rgb::BLACK).unwrap();
        assert_eq!(glyphs.buffer().row_text(0), "ab  c");
    }

    #[test]
    fn test_control_character_is_unrenderable() {
        let backend = CellBackend::default();
        assert_eq!(
            backend.render("a\u{7}", Rgb::WHITE, Rgb::BLACK).unwrap_err(),
            RenderError::Unrenderable('\u{7}')
        );
        assert!(backend.measure("\n").is_err());
    }

    #[test]
    fn test_carriage_return_is_skipped() {
        let backend = CellBackend::default();
        assert_eq!(backend.measure("a\rb").unwrap(), Size::new(2, 1));
        assert_eq!(backend.measure("\r").unwrap().width, 0);

        let glyphs = backend.render("ab\r", Rgb::WHITE, Rgb::BLACK).unwrap();
        assert_eq!(glyphs.buffer().row_text(0), "ab");

        // The line feed in a CRLF cluster is still a control character.
        assert_eq!(
            backend.measure("a\r\n").unwrap_err(),
            RenderError::Unrenderable('\n')
        );
    }

    #[test]
    fn test_combining_marks_stay_in_one_cell() {
        let glyphs = CellBackend::default()
            .render("e\u{301}x", Rgb::WHITE, Rgb::BLACK)
            .unwrap();
        assert_eq!(glyphs.size().width, 2);
        assert_eq!(glyphs.buffer().get_grapheme(0, 0), Some("e\u{301}"));
    }
}
