//! Terminal styling for push output
//!
//! Colors are applied through `owo-colors`, which honors `NO_COLOR`,
//! `CLICOLOR_FORCE` and TTY detection. PR links become OSC 8 hyperlinks
//! where the terminal supports them.

use owo_colors::{OwoColorize, Stream, Style};
use std::fmt::{self, Display};

const ACCENT: Style = Style::new().cyan();
const SUCCESS: Style = Style::new().green();
const MUTED: Style = Style::new().dimmed();
const EMPHASIS: Style = Style::new().bold();

/// Value rendered with a style on stdout
#[derive(Clone, Debug)]
pub struct Styled<T> {
    value: T,
    style: Style,
}

impl<T: Display> Display for Styled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.value
                .if_supports_color(Stream::Stdout, |v| v.style(self.style))
        )
    }
}

/// Semantic styles for any displayable value
pub trait Stylize: Display {
    /// Cyan: repository slugs and branch names
    fn accent(&self) -> Styled<&Self> {
        Styled {
            value: self,
            style: ACCENT,
        }
    }

    /// Dim: hints and secondary shas
    fn muted(&self) -> Styled<&Self> {
        Styled {
            value: self,
            style: MUTED,
        }
    }

    /// Bold: the new commit
    fn emphasis(&self) -> Styled<&Self> {
        Styled {
            value: self,
            style: EMPHASIS,
        }
    }
}

impl<T: Display + ?Sized> Stylize for T {}

/// Green checkmark
pub const fn check() -> Styled<&'static str> {
    Styled {
        value: "✓",
        style: SUCCESS,
    }
}

/// Cyan arrow
pub const fn arrow() -> Styled<&'static str> {
    Styled {
        value: "→",
        style: ACCENT,
    }
}

/// URL as a clickable link on stdout, or plain text without OSC 8 support
pub fn hyperlink_url(url: &str) -> String {
    if supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout) {
        terminal_link::Link::new(url, url).to_string()
    } else {
        url.to_string()
    }
}
