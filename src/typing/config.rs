//! Typewriter configuration.

use super::delay::Rate;
use crate::buffer::Rgb;
use crate::error::ConfigError;
use crate::layout::Size;

/// Configuration for a [`Typewriter`](super::Typewriter).
#[derive(Debug, Clone, PartialEq)]
pub struct TypewriterConfig {
    /// Size of the typing region in cells.
    pub size: Size,
    /// Rows per line. `None` uses the measured height of `"M"`.
    pub line_height: Option<u16>,
    /// Text color.
    pub fg: Rgb,
    /// Background color of the region.
    pub bg: Rgb,
    /// Typing speed.
    pub rate: Rate,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            size: Size::new(80, 24),
            line_height: None,
            fg: Rgb::WHITE,
            bg: Rgb::BLACK,
            rate: Rate::DEFAULT,
        }
    }
}

impl TypewriterConfig {
    /// Config for a region of the given size, other fields default.
    pub fn sized(width: u16, height: u16) -> Self {
        Self {
            size: Size::new(width, height),
            ..Self::default()
        }
    }

    /// Set the line height (builder pattern).
    #[must_use]
    pub const fn with_line_height(mut self, line_height: u16) -> Self {
        self.line_height = Some(line_height);
        self
    }

    /// Set the colors (builder pattern).
    #[must_use]
    pub const fn with_colors(mut self, fg: Rgb, bg: Rgb) -> Self {
        self.fg = fg;
        self.bg = bg;
        self
    }

    /// Set the typing rate (builder pattern).
    #[must_use]
    pub const fn with_rate(mut self, rate: Rate) -> Self {
        self.rate = rate;
        self
    }

    /// Check the region and line height.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.size.is_empty() {
            return Err(ConfigError::EmptyRegion {
                width: self.size.width,
                height: self.size.height,
            });
        }
        if matches!(self.line_height, Some(0)) {
            return Err(ConfigError::ZeroLineHeight);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = TypewriterConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.rate, Rate::DEFAULT);
    }

    #[test]
    fn test_empty_region_rejected() {
        assert_eq!(
            TypewriterConfig::sized(0, 10).validate(),
            Err(ConfigError::EmptyRegion { width: 0, height: 10 })
        );
    }

    #[test]
    fn test_zero_line_height_rejected() {
        let config = TypewriterConfig::sized(10, 10).with_line_height(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroLineHeight));
    }
}
