//! Terminal styling helpers.

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Stream::Stdout};

/// Extension methods producing ANSI-styled strings when stdout supports it.
pub trait Stylize {
    /// De-emphasized text.
    fn muted(&self) -> String;
    /// Bold text for labels.
    fn emphasis(&self) -> String;
    /// Highlighted value.
    fn accent(&self) -> String;
    /// Completed operation.
    fn success(&self) -> String;
    /// Warning.
    fn warn(&self) -> String;
    /// Failure.
    fn err(&self) -> String;
    /// Section heading.
    fn heading(&self) -> String;
}

impl Stylize for str {
    fn muted(&self) -> String {
        self.if_supports_color(Stdout, |text| text.dimmed().to_string())
            .to_string()
    }

    fn emphasis(&self) -> String {
        self.if_supports_color(Stdout, |text| text.bold().to_string())
            .to_string()
    }

    fn accent(&self) -> String {
        self.if_supports_color(Stdout, |text| text.cyan().to_string())
            .to_string()
    }

    fn success(&self) -> String {
        self.if_supports_color(Stdout, |text| text.green().to_string())
            .to_string()
    }

    fn warn(&self) -> String {
        self.if_supports_color(Stdout, |text| text.yellow().to_string())
            .to_string()
    }

    fn err(&self) -> String {
        self.if_supports_color(Stdout, |text| text.red().to_string())
            .to_string()
    }

    fn heading(&self) -> String {
        self.if_supports_color(Stdout, |text| text.magenta().bold().to_string())
            .to_string()
    }
}

/// Green check mark.
pub fn check() -> String {
    "✓".success()
}

/// Spinner style used while network operations run.
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}
