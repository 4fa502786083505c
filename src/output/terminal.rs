//! ANSI terminal styling helpers
//!
//! Free functions over raw SGR escape codes; nothing here touches shared
//! state or extends foreign types.

pub mod colors {
    pub const RED: u8 = 167; // #E34F45 - above-median outliers
    pub const GREEN: u8 = 71; // #63C27A - below-median outliers
}

/// ANSI escape code constants
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const UNDERLINE: &str = "\x1b[4m";

/// Generate foreground color escape code
#[inline]
pub fn fg(color: u8) -> String {
    format!("\x1b[38;5;{}m", color)
}

/// Colorize text with a foreground color
#[inline]
pub fn colorize(text: &str, color: u8) -> String {
    format!("{}{}{}", fg(color), text, RESET)
}

/// Render text in bold
#[inline]
pub fn bold(text: &str) -> String {
    format!("{}{}{}", BOLD, text, RESET)
}

/// Render text underlined
#[inline]
pub fn underline(text: &str) -> String {
    format!("{}{}{}", UNDERLINE, text, RESET)
}
