//! Notifications for the route-planner CLI
//!
//! Short messages on stderr tagged with a severity.

use route_planner::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Severity a failed command is reported with
    pub fn of(error: &Error) -> Self {
        if error.is_user_error() {
            Severity::Warning
        } else {
            Severity::Error
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Severity::Success => "✅",
            Severity::Info => "ℹ️ ",
            Severity::Warning => "⚠️ ",
            Severity::Error => "❌",
        }
    }
}

/// Format a notification line
pub fn format_notice(severity: Severity, message: &str) -> String {
    format!("{} {message}", severity.glyph())
}

/// Print a notification to stderr
pub fn notify(severity: Severity, message: &str) {
    eprintln!("{}", format_notice(severity, message));
}

/// Report a failed command
pub fn notify_error(error: &Error) {
    notify(Severity::of(error), &error.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_per_error_kind() {
        assert_eq!(
            Severity::of(&Error::OutOfRange { index: 3, len: 1 }),
            Severity::Warning
        );
        assert_eq!(
            Severity::of(&Error::InsufficientStops { count: 1 }),
            Severity::Warning
        );
        assert_eq!(
            Severity::of(&Error::GeocodeFailure("x".to_string())),
            Severity::Error
        );
        assert_eq!(
            Severity::of(&Error::RouteFailure("x".to_string())),
            Severity::Error
        );
    }

    #[test]
    fn test_format_notice() {
        assert_eq!(
            format_notice(Severity::Success, "Added 서울역"),
            "✅ Added 서울역"
        );
    }
}
