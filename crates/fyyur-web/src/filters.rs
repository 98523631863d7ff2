//! Display formatting for show times.

use chrono::NaiveDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    /// `Mon 05, 21, 2035 8:00PM`
    #[default]
    Medium,
    /// `Monday May, 21, 2035 at 8:00PM`
    Full,
}

pub fn format_datetime(value: NaiveDateTime, style: DateStyle) -> String {
    let pattern = match style {
        DateStyle::Medium => "%a %m, %d, %Y %-I:%M%p",
        DateStyle::Full => "%A %B, %-d, %Y at %-I:%M%p",
    };
    value.format(pattern).to_string()
}
